//! Storage abstraction for audit rows.
//!
//! Implement [`AuthenticationLogRepository`] to write audit rows to your own
//! storage. SQL implementations live in [`sqlite`](crate::sqlite) and
//! [`postgres`](crate::postgres) behind the `sqlx_sqlite` and `sqlx_postgres`
//! features.
//!
//! # Mock Implementation
//!
//! Enable the `mocks` feature for [`MockAuthenticationLogRepository`], an
//! in-memory implementation useful for testing.

mod authentication_log;

#[cfg(any(test, feature = "mocks"))]
mod authentication_log_mock;

pub use authentication_log::AuthenticationLog;
pub use authentication_log::AuthenticationLogRepository;

#[cfg(any(test, feature = "mocks"))]
pub use authentication_log_mock::MockAuthenticationLogRepository;
