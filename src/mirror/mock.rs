#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::{LogContext, LogSink};
use crate::AuthLogError;

/// An entry captured by [`MockLogSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub channel: String,
    pub level: log::Level,
    pub message: String,
    pub context: LogContext,
}

/// In-memory sink that records every entry. Clones share the same entries.
#[derive(Clone)]
pub struct MockLogSink {
    pub entries: Arc<Mutex<Vec<LogEntry>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MockLogSink {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(vec![])),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Makes every following write fail with a sink error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of all entries in the order they were written.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Entries written to `channel`.
    pub fn channel(&self, channel: &str) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.channel == channel)
            .cloned()
            .collect()
    }
}

impl Default for MockLogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for MockLogSink {
    fn log(
        &self,
        channel: &str,
        level: log::Level,
        message: &str,
        context: &LogContext,
    ) -> Result<(), AuthLogError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AuthLogError::LogSinkError(format!(
                "mock sink rejected entry for channel {channel}"
            )));
        }

        self.entries.lock().unwrap().push(LogEntry {
            channel: channel.to_owned(),
            level,
            message: message.to_owned(),
            context: context.clone(),
        });
        Ok(())
    }
}
