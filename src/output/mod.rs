// Output module - test output sinks and the callback interface they share

pub mod debug;
pub mod event;
pub mod json;
pub mod text;

pub use debug::{DebugChannel, DebugSink, DebugStream, NullDebugSink, TracingDebugSink};
pub use event::{Event, EventStreamError, read_events};
pub use json::JsonLinesOutput;
pub use text::{TextMode, TextOutput};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Source location of a failed assertion.
///
/// Supplied by the test framework and carried through the log untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub file: String,
    pub line: u32,
    pub suite: String,
    pub test: String,
    pub message: String,
}

impl Source {
    pub fn new(
        file: impl Into<String>,
        line: u32,
        suite: impl Into<String>,
        test: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            suite: suite.into(),
            test: test.into(),
            message: message.into(),
        }
    }
}

/// Test output interface
///
/// The test engine calls these in a fixed order for every run:
/// `suite_start`, then for each test `test_start`, any number of
/// `assertment`s and `test_end`, then `suite_end`; suites repeat and the run
/// closes with `finished`. Every callback defaults to a no-op.
pub trait Output {
    /// Called once when the whole run is complete
    fn finished(&mut self, _tests: usize, _time: Duration) {}

    /// Called when a suite starts
    fn suite_start(&mut self, _tests: usize, _name: &str) {}

    /// Called when a suite ends
    fn suite_end(&mut self, _tests: usize, _name: &str, _time: Duration) {}

    /// Called when a test starts
    fn test_start(&mut self, _name: &str) {}

    /// Called when a test ends
    fn test_end(&mut self, _name: &str, _ok: bool, _time: Duration) {}

    /// Called for every failed assertion
    fn assertment(&mut self, _source: &Source) {}
}

impl<O: Output + ?Sized> Output for &mut O {
    fn finished(&mut self, tests: usize, time: Duration) {
        (**self).finished(tests, time)
    }

    fn suite_start(&mut self, tests: usize, name: &str) {
        (**self).suite_start(tests, name)
    }

    fn suite_end(&mut self, tests: usize, name: &str, time: Duration) {
        (**self).suite_end(tests, name, time)
    }

    fn test_start(&mut self, name: &str) {
        (**self).test_start(name)
    }

    fn test_end(&mut self, name: &str, ok: bool, time: Duration) {
        (**self).test_end(name, ok, time)
    }

    fn assertment(&mut self, source: &Source) {
        (**self).assertment(source)
    }
}

impl<O: Output + ?Sized> Output for Box<O> {
    fn finished(&mut self, tests: usize, time: Duration) {
        (**self).finished(tests, time)
    }

    fn suite_start(&mut self, tests: usize, name: &str) {
        (**self).suite_start(tests, name)
    }

    fn suite_end(&mut self, tests: usize, name: &str, time: Duration) {
        (**self).suite_end(tests, name, time)
    }

    fn test_start(&mut self, name: &str) {
        (**self).test_start(name)
    }

    fn test_end(&mut self, name: &str, ok: bool, time: Duration) {
        (**self).test_end(name, ok, time)
    }

    fn assertment(&mut self, source: &Source) {
        (**self).assertment(source)
    }
}

/// Output that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOutput;

impl Output for NullOutput {}
