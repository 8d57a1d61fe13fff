// Event stream - one serializable value per output callback

use super::{Output, Source};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead};
use std::time::Duration;
use thiserror::Error;

/// A single output callback with its arguments
///
/// Serialized as a JSON object tagged by `"event"`, with times in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Finished {
        tests: usize,
        #[serde(with = "seconds")]
        time: Duration,
    },
    SuiteStart {
        tests: usize,
        name: String,
    },
    SuiteEnd {
        tests: usize,
        name: String,
        #[serde(with = "seconds")]
        time: Duration,
    },
    TestStart {
        name: String,
    },
    TestEnd {
        name: String,
        ok: bool,
        #[serde(with = "seconds")]
        time: Duration,
    },
    Assertment {
        source: Source,
    },
}

impl Event {
    /// Invoke the matching callback on `output`
    pub fn dispatch<O: Output + ?Sized>(&self, output: &mut O) {
        match self {
            Event::Finished { tests, time } => output.finished(*tests, *time),
            Event::SuiteStart { tests, name } => output.suite_start(*tests, name),
            Event::SuiteEnd { tests, name, time } => output.suite_end(*tests, name, *time),
            Event::TestStart { name } => output.test_start(name),
            Event::TestEnd { name, ok, time } => output.test_end(name, *ok, *time),
            Event::Assertment { source } => output.assertment(source),
        }
    }
}

/// Collects every callback as an `Event`, in call order.
impl Output for Vec<Event> {
    fn finished(&mut self, tests: usize, time: Duration) {
        self.push(Event::Finished { tests, time });
    }

    fn suite_start(&mut self, tests: usize, name: &str) {
        self.push(Event::SuiteStart {
            tests,
            name: name.to_string(),
        });
    }

    fn suite_end(&mut self, tests: usize, name: &str, time: Duration) {
        self.push(Event::SuiteEnd {
            tests,
            name: name.to_string(),
            time,
        });
    }

    fn test_start(&mut self, name: &str) {
        self.push(Event::TestStart {
            name: name.to_string(),
        });
    }

    fn test_end(&mut self, name: &str, ok: bool, time: Duration) {
        self.push(Event::TestEnd {
            name: name.to_string(),
            ok,
            time,
        });
    }

    fn assertment(&mut self, source: &Source) {
        self.push(Event::Assertment {
            source: source.clone(),
        });
    }
}

#[derive(Debug, Error)]
pub enum EventStreamError {
    #[error("failed to read event stream: {0}")]
    Io(#[from] io::Error),

    #[error("invalid event on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Read a JSON-lines event stream. Blank lines are skipped.
pub fn read_events<R: BufRead>(reader: R) -> Result<Vec<Event>, EventStreamError> {
    let mut events = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let event = serde_json::from_str(trimmed).map_err(|source| EventStreamError::Parse {
            line: index + 1,
            source,
        })?;
        events.push(event);
    }

    Ok(events)
}

mod seconds {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(time: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(time.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}
