// Collector module - records test output and replays it later

pub mod record;

pub use record::Record;

use crate::config::Config;
use crate::output::{DebugChannel, DebugSink, DebugStream, Output, Source, TextMode, TextOutput};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// What `SimpleLogCollector::play_to` forwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReplayMode {
    /// Everything, unfiltered
    #[serde(rename = "all")]
    WriteAll,
    /// Only failing suites and tests, if the run had any errors;
    /// otherwise everything
    #[default]
    #[serde(rename = "failures-only")]
    WhenFailedWriteOnlyFailures,
}

impl std::str::FromStr for ReplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::WriteAll),
            "failures-only" | "failures" => Ok(Self::WhenFailedWriteOnlyFailures),
            _ => Err(format!("unknown replay mode: {}", s)),
        }
    }
}

/// Output that logs every callback so the run can be replayed elsewhere
///
/// Each callback is mirrored to the console (when enabled) and to the debug
/// stream before it is logged.
pub struct SimpleLogCollector {
    records: Vec<Record>,
    console: Option<Box<dyn Output>>,
    debug: TextOutput<DebugStream>,
    current_suite: Option<usize>,
    current_test: Option<usize>,
    errors: bool,
    assert_on_assertment: bool,
}

impl SimpleLogCollector {
    /// Create a collector, optionally mirroring to a verbose console output
    pub fn new(write_to_console: bool) -> Self {
        Self::with_debug_sink(write_to_console, DebugChannel::default().sink())
    }

    /// Create a collector whose debug stream feeds `sink`
    pub fn with_debug_sink(write_to_console: bool, sink: Box<dyn DebugSink>) -> Self {
        let console: Option<Box<dyn Output>> = if write_to_console {
            Some(Box::new(TextOutput::stdout(TextMode::Verbose)))
        } else {
            None
        };
        Self::build(console, sink)
    }

    /// Create a collector from the `[collector]`, `[debug]` and `[output]`
    /// configuration sections
    pub fn from_config(config: &Config) -> Self {
        let console: Option<Box<dyn Output>> = if config.collector.write_to_console {
            Some(Box::new(
                TextOutput::stdout(TextMode::Verbose).with_color(config.output.color),
            ))
        } else {
            None
        };

        let mut collector = Self::build(console, config.debug.channel.sink());
        collector.set_assert_on_assertment(config.collector.assert_on_assertment);
        collector
    }

    /// Replace the console mirror
    pub fn with_console(mut self, console: Box<dyn Output>) -> Self {
        self.console = Some(console);
        self
    }

    fn build(console: Option<Box<dyn Output>>, sink: Box<dyn DebugSink>) -> Self {
        Self {
            records: Vec::new(),
            console,
            debug: TextOutput::new(TextMode::Verbose, DebugStream::new(sink)),
            current_suite: None,
            current_test: None,
            errors: false,
            assert_on_assertment: false,
        }
    }

    /// True once any test failed or any assertment was recorded
    pub fn has_errors(&self) -> bool {
        self.errors
    }

    /// Panic on the first assertment. Only has an effect with debug assertions.
    pub fn set_assert_on_assertment(&mut self, yesno: bool) {
        self.assert_on_assertment = yesno;
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Replay the log to `output`
    ///
    /// With `WhenFailedWriteOnlyFailures` and a failed run, passing suites and
    /// tests are left out. Assertments are always forwarded. The replayed
    /// `finished` reports the number of `test_end`s forwarded by this replay,
    /// not the original test count.
    pub fn play_to<O: Output + ?Sized>(&self, output: &mut O, mode: ReplayMode) {
        let skip_passing = self.errors && mode == ReplayMode::WhenFailedWriteOnlyFailures;
        let forward = |ok: bool| !skip_passing || !ok;
        let mut count = 0;

        debug!(
            records = self.records.len(),
            ?mode,
            skip_passing,
            "replaying test log"
        );

        for record in &self.records {
            match record {
                Record::Finished { time, .. } => output.finished(count, *time),
                Record::SuiteStart { tests, name, ok } => {
                    if forward(*ok) {
                        output.suite_start(*tests, name);
                    }
                }
                Record::SuiteEnd {
                    tests,
                    name,
                    ok,
                    time,
                } => {
                    if forward(*ok) {
                        output.suite_end(*tests, name, *time);
                    }
                }
                Record::TestStart { name, ok } => {
                    if forward(*ok) {
                        output.test_start(name);
                    }
                }
                Record::TestEnd { name, ok, time } => {
                    if forward(*ok) {
                        count += 1;
                        output.test_end(name, *ok, *time);
                    }
                }
                Record::Assertment { source } => output.assertment(source),
            }
        }
    }

    fn mirror(&mut self, mut emit: impl FnMut(&mut dyn Output)) {
        if let Some(console) = self.console.as_deref_mut() {
            emit(console);
        }
        emit(&mut self.debug);
    }

    fn push(&mut self, record: Record) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    fn fail_current_suite(&mut self) {
        match self.current_suite.and_then(|i| self.records.get_mut(i)) {
            Some(Record::SuiteStart { ok, .. }) => *ok = false,
            _ => warn!("failure reported outside of any suite"),
        }
    }

    fn fail_current_test(&mut self) {
        match self.current_test.and_then(|i| self.records.get_mut(i)) {
            Some(Record::TestStart { ok, .. }) => *ok = false,
            _ => warn!("test failure reported before any test started"),
        }
    }
}

impl Default for SimpleLogCollector {
    fn default() -> Self {
        Self::new(false)
    }
}

impl std::fmt::Debug for SimpleLogCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleLogCollector")
            .field("records", &self.records)
            .field("console", &self.console.is_some())
            .field("current_suite", &self.current_suite)
            .field("current_test", &self.current_test)
            .field("errors", &self.errors)
            .field("assert_on_assertment", &self.assert_on_assertment)
            .finish()
    }
}

impl Output for SimpleLogCollector {
    fn finished(&mut self, tests: usize, time: Duration) {
        self.mirror(|out| out.finished(tests, time));
        self.push(Record::Finished { tests, time });
    }

    fn suite_start(&mut self, tests: usize, name: &str) {
        self.mirror(|out| out.suite_start(tests, name));
        let index = self.push(Record::SuiteStart {
            tests,
            name: name.to_string(),
            ok: true,
        });
        self.current_suite = Some(index);
    }

    fn suite_end(&mut self, tests: usize, name: &str, time: Duration) {
        self.mirror(|out| out.suite_end(tests, name, time));

        let ok = match self.current_suite.and_then(|i| self.records.get(i)) {
            Some(Record::SuiteStart { ok, .. }) => *ok,
            _ => {
                warn!(suite = name, "suite ended without a matching start");
                true
            }
        };
        self.push(Record::SuiteEnd {
            tests,
            name: name.to_string(),
            ok,
            time,
        });
    }

    fn test_start(&mut self, name: &str) {
        self.mirror(|out| out.test_start(name));
        let index = self.push(Record::TestStart {
            name: name.to_string(),
            ok: true,
        });
        self.current_test = Some(index);
    }

    fn test_end(&mut self, name: &str, ok: bool, time: Duration) {
        self.mirror(|out| out.test_end(name, ok, time));

        if !ok {
            self.fail_current_test();
            self.fail_current_suite();
        }

        self.push(Record::TestEnd {
            name: name.to_string(),
            ok,
            time,
        });
        self.errors |= !ok;
    }

    fn assertment(&mut self, source: &Source) {
        self.mirror(|out| out.assertment(source));

        if cfg!(debug_assertions) && self.assert_on_assertment {
            panic!(
                "assertment at {}:{}: {}",
                source.file, source.line, source.message
            );
        }

        self.push(Record::Assertment {
            source: source.clone(),
        });
        self.errors = true;
        self.fail_current_suite();
    }
}
