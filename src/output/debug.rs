// Debug stream - text buffer flushed to a debug channel

use crate::logging::DEBUG_STREAM_TARGET;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use tracing::debug;

/// Receiver for flushed debug text
pub trait DebugSink {
    fn emit(&mut self, text: &str);
}

/// Drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDebugSink;

impl DebugSink for NullDebugSink {
    fn emit(&mut self, _text: &str) {}
}

/// Emits every line as a `tracing` debug event under the `testlog::debug` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDebugSink;

impl DebugSink for TracingDebugSink {
    fn emit(&mut self, text: &str) {
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            debug!(target: DEBUG_STREAM_TARGET, "{}", line);
        }
    }
}

/// Which debug sink to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugChannel {
    Null,
    #[default]
    Tracing,
}

impl DebugChannel {
    pub fn sink(self) -> Box<dyn DebugSink> {
        match self {
            DebugChannel::Null => Box::new(NullDebugSink),
            DebugChannel::Tracing => Box::new(TracingDebugSink),
        }
    }
}

impl std::str::FromStr for DebugChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" | "none" => Ok(Self::Null),
            "tracing" => Ok(Self::Tracing),
            _ => Err(format!("unknown debug channel: {}", s)),
        }
    }
}

/// Buffered writer in front of a `DebugSink`
///
/// Text accumulates until `flush`, which hands it to the sink and clears the
/// buffer. Anything still pending is flushed on drop.
pub struct DebugStream {
    sink: Box<dyn DebugSink>,
    buffer: Vec<u8>,
}

impl DebugStream {
    pub fn new(sink: Box<dyn DebugSink>) -> Self {
        Self {
            sink,
            buffer: Vec::new(),
        }
    }

    pub fn from_channel(channel: DebugChannel) -> Self {
        Self::new(channel.sink())
    }

    /// Bytes written since the last flush
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    fn sync(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buffer);
        self.sink.emit(&text);
        self.buffer.clear();
    }
}

impl Write for DebugStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sync();
        Ok(())
    }
}

impl Drop for DebugStream {
    fn drop(&mut self) {
        self.sync();
    }
}

impl std::fmt::Debug for DebugStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugStream")
            .field("pending", &self.buffer.len())
            .finish_non_exhaustive()
    }
}
