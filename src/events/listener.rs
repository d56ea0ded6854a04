use async_trait::async_trait;

use super::{AuthEvent, EventRouter};
use crate::config::ConfigSource;
use crate::mirror::{LogMirror, LogSink};
use crate::repository::AuthenticationLogRepository;
use crate::writer::AuditWriter;
use crate::AuthLogError;

/// Trait for handling authentication events.
///
/// Implement this trait to react to events alongside [`AuthLogListener`].
/// An error aborts the dispatch and is returned to whoever raised the event.
///
/// # Example
///
/// ```rust,ignore
/// use authlog::events::{AuthEvent, Listener};
/// use authlog::AuthLogError;
/// use async_trait::async_trait;
///
/// struct LockoutAlertListener;
///
/// #[async_trait]
/// impl Listener for LockoutAlertListener {
///     async fn handle(&self, event: &AuthEvent) -> Result<(), AuthLogError> {
///         if let AuthEvent::Lockout { request } = event {
///             // page whoever is on call
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Handle an authentication event.
    ///
    /// Called for every event dispatched. Filter by matching on the variant.
    async fn handle(&self, event: &AuthEvent) -> Result<(), AuthLogError>;
}

/// Records authentication events in the `authentication_logs` table and
/// mirrors them to a log channel.
///
/// The configuration is read once per event. The database write happens
/// first; if it fails the error is returned and nothing is mirrored.
pub struct AuthLogListener<R, S, C>
where
    R: AuthenticationLogRepository,
    S: LogSink,
    C: ConfigSource,
{
    router: EventRouter,
    writer: AuditWriter<R>,
    mirror: LogMirror<S>,
    config: C,
}

impl<R, S, C> AuthLogListener<R, S, C>
where
    R: AuthenticationLogRepository,
    S: LogSink,
    C: ConfigSource,
{
    pub fn new(repository: R, sink: S, config: C) -> Self {
        Self {
            router: EventRouter::new(),
            writer: AuditWriter::new(repository),
            mirror: LogMirror::new(sink),
            config,
        }
    }

    pub fn repository(&self) -> &R {
        self.writer.repository()
    }

    pub fn sink(&self) -> &S {
        self.mirror.sink()
    }
}

#[async_trait]
impl<R, S, C> Listener for AuthLogListener<R, S, C>
where
    R: AuthenticationLogRepository + Send + Sync + 'static,
    S: LogSink + 'static,
    C: ConfigSource,
{
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "authlog.handle", skip_all, fields(event = event.name()), err)
    )]
    async fn handle(&self, event: &AuthEvent) -> Result<(), AuthLogError> {
        let Some(record) = self.router.normalize(event) else {
            log::debug!(target: "authlog", "msg=\"event not recorded\", event=\"{}\"", event.name());
            return Ok(());
        };

        let config = self.config.snapshot();

        self.writer.write(&record, config.enabled).await?;
        self.mirror
            .mirror(&record, config.enable_channel, &config.channel)?;

        Ok(())
    }
}
