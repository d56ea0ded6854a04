use super::{LogContext, LogSink};
use crate::AuthLogError;

/// Emits entries as `tracing` events.
///
/// Requires the `tracing` feature. `tracing` targets are fixed at compile
/// time, so every event uses the `authlog::channel` target and carries the
/// channel name as a field.
///
/// # Example
///
/// ```rust,ignore
/// use authlog::mirror::TracingSink;
/// use authlog::{AuthLogConfig, AuthLogListener};
///
/// let listener = AuthLogListener::new(repository, TracingSink, AuthLogConfig::default());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(
        &self,
        channel: &str,
        level: log::Level,
        message: &str,
        context: &LogContext,
    ) -> Result<(), AuthLogError> {
        match level {
            log::Level::Error => {
                ::tracing::error!(target: "authlog::channel", channel, ?context, "{message}");
            }
            log::Level::Warn => {
                ::tracing::warn!(target: "authlog::channel", channel, ?context, "{message}");
            }
            log::Level::Info => {
                ::tracing::info!(target: "authlog::channel", channel, ?context, "{message}");
            }
            log::Level::Debug => {
                ::tracing::debug!(target: "authlog::channel", channel, ?context, "{message}");
            }
            log::Level::Trace => {
                ::tracing::trace!(target: "authlog::channel", channel, ?context, "{message}");
            }
        }
        Ok(())
    }
}
