//! Mirroring of audit records to a log channel.
//!
//! [`LogMirror`] turns an [`AuthRecord`] into one warning-level entry and
//! hands it to a [`LogSink`]. The default sink, [`LogCrateSink`], writes
//! through the `log` crate using the channel name as the target, so the
//! application's logger decides where the channel ends up.

mod log_crate;
#[cfg(any(test, feature = "mocks"))]
mod mock;
#[cfg(feature = "tracing")]
mod tracing;

use std::collections::BTreeMap;

pub use log_crate::LogCrateSink;
#[cfg(any(test, feature = "mocks"))]
pub use mock::{LogEntry, MockLogSink};
#[cfg(feature = "tracing")]
pub use self::tracing::TracingSink;

use crate::events::AuthRecord;
use crate::AuthLogError;

/// Key/value context attached to a log entry.
pub type LogContext = BTreeMap<String, String>;

/// A channel-addressable log destination.
pub trait LogSink: Send + Sync {
    /// Write one entry to `channel`.
    fn log(
        &self,
        channel: &str,
        level: log::Level,
        message: &str,
        context: &LogContext,
    ) -> Result<(), AuthLogError>;
}

/// Emits one warning per audit record when the channel is enabled.
pub struct LogMirror<S: LogSink> {
    sink: S,
}

impl<S: LogSink> LogMirror<S> {
    pub fn new(sink: S) -> Self {
        LogMirror { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Writes `record` to `channel` if `enable_channel` is true.
    ///
    /// The message is the event name; the context holds `user_id` and
    /// `email` when present, followed by the record's metadata.
    pub fn mirror(
        &self,
        record: &AuthRecord,
        enable_channel: bool,
        channel: &str,
    ) -> Result<(), AuthLogError> {
        if !enable_channel {
            return Ok(());
        }

        self.sink
            .log(channel, log::Level::Warn, record.event_name, &context_for(record))
    }
}

fn context_for(record: &AuthRecord) -> LogContext {
    let mut context = record.metadata.clone();
    if let Some(user_id) = record.user_id {
        context.insert("user_id".to_owned(), user_id.to_string());
    }
    if let Some(email) = &record.email {
        context.insert("email".to_owned(), email.clone());
    }
    context
}
