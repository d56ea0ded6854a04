//! `PostgreSQL` storage for audit rows.
//!
//! Enable the `sqlx_postgres` feature to use this backend.

mod authentication_log;
pub mod migrations;

pub use authentication_log::PostgresAuthenticationLogRepository;
