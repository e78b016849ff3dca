//! Operator-facing output.
//!
//! Every record produces one human-readable line, and every run ends with a
//! summary. Where those lines go is the host's choice: [`TracingSink`] sends
//! them into the structured log, [`MemorySink`] keeps them for inspection.
//! Sinks are fire-and-forget and never influence control flow.

use std::sync::Mutex;
use tracing::{error, info};

pub trait OutputSink: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
    fn comment(&self, message: &str);
}

/// Routes output lines into `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl OutputSink for TracingSink {
    fn info(&self, message: &str) {
        info!(kind = "info", "{}", message);
    }

    fn error(&self, message: &str) {
        error!(kind = "error", "{}", message);
    }

    fn comment(&self, message: &str) {
        info!(kind = "comment", "{}", message);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkLevel {
    Info,
    Error,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkLine {
    pub level: SinkLevel,
    pub message: String,
}

/// Keeps every line in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<SinkLine>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<SinkLine> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Messages emitted at `level`, in order.
    pub fn messages(&self, level: SinkLevel) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.level == level)
            .map(|line| line.message)
            .collect()
    }

    fn push(&self, level: SinkLevel, message: &str) {
        // A poisoned buffer only loses output lines; it must not take the run down.
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(SinkLine {
                level,
                message: message.to_string(),
            });
        }
    }
}

impl OutputSink for MemorySink {
    fn info(&self, message: &str) {
        self.push(SinkLevel::Info, message);
    }

    fn error(&self, message: &str) {
        self.push(SinkLevel::Error, message);
    }

    fn comment(&self, message: &str) {
        self.push(SinkLevel::Comment, message);
    }
}
