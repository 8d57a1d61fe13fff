// JSON lines output - one event object per line

use super::{Event, Output, Source};
use std::io::{self, Write};
use std::time::Duration;

/// Writes every callback as a JSON `Event` on its own line
pub struct JsonLinesOutput<W: Write> {
    writer: W,
}

impl JsonLinesOutput<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonLinesOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, event: &Event) {
        if let Ok(s) = serde_json::to_string(event) {
            let _ = writeln!(self.writer, "{}", s);
        }
        let _ = self.writer.flush();
    }
}

impl<W: Write> Output for JsonLinesOutput<W> {
    fn finished(&mut self, tests: usize, time: Duration) {
        self.emit(&Event::Finished { tests, time });
    }

    fn suite_start(&mut self, tests: usize, name: &str) {
        self.emit(&Event::SuiteStart {
            tests,
            name: name.to_string(),
        });
    }

    fn suite_end(&mut self, tests: usize, name: &str, time: Duration) {
        self.emit(&Event::SuiteEnd {
            tests,
            name: name.to_string(),
            time,
        });
    }

    fn test_start(&mut self, name: &str) {
        self.emit(&Event::TestStart {
            name: name.to_string(),
        });
    }

    fn test_end(&mut self, name: &str, ok: bool, time: Duration) {
        self.emit(&Event::TestEnd {
            name: name.to_string(),
            ok,
            time,
        });
    }

    fn assertment(&mut self, source: &Source) {
        self.emit(&Event::Assertment {
            source: source.clone(),
        });
    }
}
