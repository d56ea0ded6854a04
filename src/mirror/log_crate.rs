use super::{LogContext, LogSink};
use crate::AuthLogError;

/// Writes entries through the `log` crate.
///
/// The channel becomes the record target and the context is appended as
/// `key="value"` pairs, e.g. `msg="Verified", guard="web", user_id="1000"`.
///
/// # Example
///
/// ```rust,ignore
/// use authlog::mirror::LogCrateSink;
/// use authlog::{AuthLogConfig, AuthLogListener};
///
/// let listener = AuthLogListener::new(repository, LogCrateSink, AuthLogConfig::default());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCrateSink;

impl LogSink for LogCrateSink {
    fn log(
        &self,
        channel: &str,
        level: log::Level,
        message: &str,
        context: &LogContext,
    ) -> Result<(), AuthLogError> {
        log::log!(target: channel, level, "{}", format_entry(message, context));
        Ok(())
    }
}

fn format_entry(message: &str, context: &LogContext) -> String {
    let mut line = format!("msg=\"{}\"", escape(message));
    for (key, value) in context {
        line.push_str(&format!(", {key}=\"{}\"", escape(value)));
    }
    line
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
