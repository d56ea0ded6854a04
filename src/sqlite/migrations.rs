//! Table setup for `SQLite`.
//!
//! Every bundled statement is `CREATE ... IF NOT EXISTS` and no history table
//! is kept, so [`run`] is safe to call on every start.
//!
//! # Example
//!
//! ```rust,ignore
//! use authlog::sqlite::migrations;
//! use sqlx::SqlitePool;
//!
//! async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
//!     migrations::run(pool).await?;
//!     Ok(())
//! }
//! ```

use sqlx::{Executor, SqlitePool};

const MIGRATIONS: &[(&str, &str)] = &[(
    "20241220000006_create_authentication_logs_table",
    include_str!("../../migrations_sqlite/20241220000006_create_authentication_logs_table.sql"),
)];

/// Creates the `authentication_logs` table and its indexes if absent.
///
/// # Limitations
///
/// Statements are split on `;`, which the bundled SQL never uses inside a
/// literal.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for (name, sql) in MIGRATIONS {
        for statement in sql.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                pool.execute(trimmed).await?;
            }
        }
        log::debug!(target: "authlog", "msg=\"migration applied\", backend=\"sqlite\", name=\"{name}\"");
    }

    Ok(())
}
