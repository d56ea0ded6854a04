use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::AuthRecord;
use crate::AuthLogError;

/// A row of the `authentication_logs` table.
///
/// `email` is set for pre-authentication events, `user_id` for
/// post-authentication ones; either or both may be `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationLog {
    pub id: i64,
    pub event_name: String,
    pub email: Option<String>,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Append-only storage for authentication audit rows.
///
/// Rows are never updated or deleted through this trait; retention is left to
/// whoever owns the database.
#[async_trait]
pub trait AuthenticationLogRepository: Send + Sync {
    /// Inserts one row for `record` and returns it with its assigned id.
    async fn insert(&self, record: &AuthRecord) -> Result<AuthenticationLog, AuthLogError>;

    /// Most recent rows for a user, newest first.
    async fn get_user_events(
        &self,
        user_id: i64,
        limit: usize,
    ) -> Result<Vec<AuthenticationLog>, AuthLogError>;

    /// Most recent rows with the given event name, newest first.
    async fn get_events_by_name(
        &self,
        event_name: &str,
        limit: usize,
    ) -> Result<Vec<AuthenticationLog>, AuthLogError>;
}
