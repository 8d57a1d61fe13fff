// Tests for the log collector - recording and replay through the public API

use std::time::Duration;
use testlog::output::{Event, NullDebugSink};
use testlog::{Output, Record, ReplayMode, SimpleLogCollector, Source};

fn collector() -> SimpleLogCollector {
    SimpleLogCollector::with_debug_sink(false, Box::new(NullDebugSink))
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn failure(test: &str) -> Source {
    Source::new("suite.rs", 10, "S", test, "expected true")
}

/// Suite "S": test "A" passes, test "B" fails with one assertment
fn run_mixed_suite<O: Output>(collector: &mut O) {
    collector.suite_start(2, "S");
    collector.test_start("A");
    collector.test_end("A", true, ms(1));
    collector.test_start("B");
    collector.assertment(&failure("B"));
    collector.test_end("B", false, ms(2));
    collector.suite_end(2, "S", ms(3));
    collector.finished(2, ms(3));
}

fn run_passing_suite<O: Output>(collector: &mut O) {
    collector.suite_start(2, "Green");
    collector.test_start("one");
    collector.test_end("one", true, ms(1));
    collector.test_start("two");
    collector.test_end("two", true, ms(1));
    collector.suite_end(2, "Green", ms(2));
    collector.finished(2, ms(2));
}

fn replay(collector: &SimpleLogCollector, mode: ReplayMode) -> Vec<Event> {
    let mut events = Vec::new();
    collector.play_to(&mut events, mode);
    events
}

#[test]
fn test_mixed_suite_has_errors() {
    // Arrange
    let mut collector = collector();

    // Act
    run_mixed_suite(&mut collector);

    // Assert
    assert!(collector.has_errors());
    assert_eq!(collector.len(), 8);
}

#[test]
fn test_mixed_suite_filtered_replay() {
    // Arrange
    let mut collector = collector();
    run_mixed_suite(&mut collector);

    // Act
    let events = replay(&collector, ReplayMode::WhenFailedWriteOnlyFailures);

    // Assert
    assert_eq!(
        events,
        vec![
            Event::SuiteStart {
                tests: 2,
                name: "S".to_string()
            },
            Event::TestStart {
                name: "B".to_string()
            },
            Event::Assertment {
                source: failure("B")
            },
            Event::TestEnd {
                name: "B".to_string(),
                ok: false,
                time: ms(2)
            },
            Event::SuiteEnd {
                tests: 2,
                name: "S".to_string(),
                time: ms(3)
            },
            Event::Finished {
                tests: 1,
                time: ms(3)
            },
        ]
    );
}

#[test]
fn test_mixed_suite_write_all_replay() {
    // Arrange
    let mut collector = collector();
    run_mixed_suite(&mut collector);
    let mut original: Vec<Event> = Vec::new();
    run_mixed_suite(&mut original);

    // Act
    let events = replay(&collector, ReplayMode::WriteAll);

    // Assert
    assert_eq!(events, original);
    assert_eq!(
        events.last(),
        Some(&Event::Finished {
            tests: 2,
            time: ms(3)
        })
    );
}

#[test]
fn test_filtered_finished_counts_emitted_tests_only() {
    // The replayed total is the number of test_end events forwarded, not the
    // original total. Filtering one of three tests must report 1, not 3.
    let mut collector = collector();
    collector.suite_start(3, "S");
    for (name, ok) in [("a", true), ("b", false), ("c", true)] {
        collector.test_start(name);
        collector.test_end(name, ok, ms(1));
    }
    collector.suite_end(3, "S", ms(3));
    collector.finished(3, ms(3));

    let filtered = replay(&collector, ReplayMode::WhenFailedWriteOnlyFailures);
    let all = replay(&collector, ReplayMode::WriteAll);

    assert_eq!(
        filtered.last(),
        Some(&Event::Finished {
            tests: 1,
            time: ms(3)
        })
    );
    assert_eq!(
        all.last(),
        Some(&Event::Finished {
            tests: 3,
            time: ms(3)
        })
    );
}

#[test]
fn test_filtered_replay_without_errors_equals_write_all() {
    // Arrange
    let mut collector = collector();
    run_passing_suite(&mut collector);

    // Act
    let filtered = replay(&collector, ReplayMode::WhenFailedWriteOnlyFailures);
    let all = replay(&collector, ReplayMode::WriteAll);

    // Assert
    assert!(!collector.has_errors());
    assert_eq!(filtered, all);
    assert_eq!(filtered.len(), 7);
}

#[test]
fn test_passing_suite_dropped_from_filtered_replay() {
    // Arrange
    let mut collector = collector();
    collector.suite_start(1, "Green");
    collector.test_start("ok");
    collector.test_end("ok", true, ms(1));
    collector.suite_end(1, "Green", ms(1));
    collector.suite_start(1, "Red");
    collector.test_start("bad");
    collector.test_end("bad", false, ms(1));
    collector.suite_end(1, "Red", ms(1));
    collector.finished(2, ms(2));

    // Act
    let events = replay(&collector, ReplayMode::default());

    // Assert
    let names: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            Event::SuiteStart { name, .. }
            | Event::SuiteEnd { name, .. }
            | Event::TestStart { name }
            | Event::TestEnd { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["Red", "bad", "bad", "Red"]);
}

#[test]
fn test_assertment_fails_suite_without_failing_test_end() {
    // Arrange
    let mut collector = collector();

    // Act
    collector.suite_start(1, "S");
    collector.test_start("t");
    collector.assertment(&failure("t"));
    collector.test_end("t", true, ms(1));
    collector.suite_end(1, "S", ms(1));

    // Assert
    assert!(collector.has_errors());
    match &collector.records()[4] {
        Record::SuiteEnd { ok, .. } => assert!(!ok),
        other => panic!("expected suite end, got {:?}", other),
    }
    // The test itself reported ok, so its start record stays ok
    assert_eq!(collector.records()[1].ok(), Some(true));
}

#[test]
fn test_assertments_always_replayed() {
    // Arrange
    let mut collector = collector();
    collector.suite_start(1, "S");
    collector.test_start("t");
    collector.assertment(&failure("t"));
    collector.test_end("t", true, ms(1));
    collector.suite_end(1, "S", ms(1));
    collector.finished(1, ms(1));

    // Act
    let events = replay(&collector, ReplayMode::WhenFailedWriteOnlyFailures);

    // Assert
    assert_eq!(
        events,
        vec![
            Event::SuiteStart {
                tests: 1,
                name: "S".to_string()
            },
            Event::Assertment {
                source: failure("t")
            },
            Event::SuiteEnd {
                tests: 1,
                name: "S".to_string(),
                time: ms(1)
            },
            Event::Finished {
                tests: 0,
                time: ms(1)
            },
        ]
    );
}

#[test]
fn test_later_passing_test_does_not_restore_suite() {
    // Arrange
    let mut collector = collector();

    // Act
    collector.suite_start(2, "S");
    collector.test_start("first");
    collector.test_end("first", false, ms(1));
    collector.test_start("second");
    collector.test_end("second", true, ms(1));
    collector.suite_end(2, "S", ms(2));

    // Assert
    assert_eq!(collector.records()[0].ok(), Some(false));
    assert_eq!(collector.records()[5].ok(), Some(false));
}

#[test]
fn test_has_errors_matches_failures_across_runs() {
    // Every pass/fail combination of two suites with two tests each, with and
    // without an assertment in the last test.
    for mask in 0u8..16 {
        for with_assertment in [false, true] {
            let mut collector = collector();
            let mut expected = with_assertment;

            for suite in 0..2 {
                let name = format!("suite{}", suite);
                collector.suite_start(2, &name);
                for test in 0..2 {
                    let bit = suite * 2 + test;
                    let ok = mask & (1 << bit) == 0;
                    let test_name = format!("t{}", bit);
                    collector.test_start(&test_name);
                    if with_assertment && bit == 3 {
                        collector.assertment(&failure(&test_name));
                    }
                    collector.test_end(&test_name, ok, ms(1));
                    expected |= !ok;
                }
                collector.suite_end(2, &name, ms(2));
            }
            collector.finished(4, ms(4));

            assert_eq!(
                collector.has_errors(),
                expected,
                "mask {:04b}, assertment {}",
                mask,
                with_assertment
            );

            let failing_ends = collector
                .records()
                .iter()
                .filter(|r| matches!(r, Record::TestEnd { ok: false, .. }))
                .count();
            let filtered = replay(&collector, ReplayMode::WhenFailedWriteOnlyFailures);
            let expected_count = if collector.has_errors() { failing_ends } else { 4 };
            assert_eq!(
                filtered.last(),
                Some(&Event::Finished {
                    tests: expected_count,
                    time: ms(4)
                })
            );
        }
    }
}

#[test]
fn test_has_errors_never_resets() {
    // Arrange
    let mut collector = collector();
    collector.suite_start(1, "S");
    collector.test_start("bad");
    collector.test_end("bad", false, ms(1));
    collector.suite_end(1, "S", ms(1));

    // Act
    run_passing_suite(&mut collector);

    // Assert
    assert!(collector.has_errors());
}

#[test]
fn test_into_records_returns_every_record() {
    // Arrange
    let mut collector = collector();
    run_mixed_suite(&mut collector);
    run_passing_suite(&mut collector);

    // Act
    let records = collector.into_records();

    // Assert
    assert_eq!(records.len(), 15);
    assert!(matches!(records[0], Record::SuiteStart { .. }));
    assert!(matches!(records[14], Record::Finished { tests: 2, .. }));
}

#[test]
fn test_replay_is_repeatable() {
    // Arrange
    let mut collector = collector();
    run_mixed_suite(&mut collector);

    // Act
    let first = replay(&collector, ReplayMode::default());
    let second = replay(&collector, ReplayMode::default());

    // Assert
    assert_eq!(first, second);
    assert_eq!(collector.len(), 8);
}
