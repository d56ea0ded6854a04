//! Audit logging for authentication lifecycle events.
//!
//! `authlog` turns authentication events (attempts, logins, failures,
//! lockouts, logouts, registrations, password resets, email verifications)
//! into rows of an `authentication_logs` table and, independently, into
//! warning-level entries on a named log channel.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use authlog::events::{AuthEvent, AuthSubject, EventRegistry};
//! use authlog::mirror::LogCrateSink;
//! use authlog::sqlite::{SqliteAuthenticationLogRepository, migrations};
//! use authlog::{AuthLogConfig, AuthLogListener};
//!
//! async fn setup(pool: sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//!     migrations::run(&pool).await?;
//!
//!     let mut registry = EventRegistry::new();
//!     registry.listen(AuthLogListener::new(
//!         SqliteAuthenticationLogRepository::new(pool),
//!         LogCrateSink,
//!         AuthLogConfig::from_env(),
//!     ));
//!
//!     registry
//!         .dispatch(&AuthEvent::Verified {
//!             user: AuthSubject::new(1000),
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```

use std::fmt;

pub mod config;
pub mod events;
pub mod mirror;
pub mod repository;
pub mod writer;

#[cfg(feature = "sqlx_postgres")]
pub mod postgres;
#[cfg(feature = "sqlx_sqlite")]
pub mod sqlite;

pub use config::{AuthLogConfig, ConfigSource, FnSource};
pub use events::{AuthEvent, AuthLogListener, AuthRecord, EventRouter, Listener};
pub use mirror::{LogContext, LogMirror, LogSink};
pub use repository::{AuthenticationLog, AuthenticationLogRepository};
pub use writer::AuditWriter;

#[cfg(any(test, feature = "mocks"))]
pub use mirror::{LogEntry, MockLogSink};
#[cfg(any(test, feature = "mocks"))]
pub use repository::MockAuthenticationLogRepository;

/// Name of the table every backend writes to.
pub const AUTHENTICATION_LOGS_TABLE: &str = "authentication_logs";

/// Errors surfaced while persisting or mirroring an authentication event.
///
/// Extraction from event payloads never fails, so every variant comes from a
/// downstream sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthLogError {
    /// The audit row could not be inserted or read.
    DatabaseError(String),
    /// The log channel rejected the entry.
    LogSinkError(String),
}

impl std::error::Error for AuthLogError {}

impl fmt::Display for AuthLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthLogError::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            AuthLogError::LogSinkError(msg) => write!(f, "Log sink error: {msg}"),
        }
    }
}
