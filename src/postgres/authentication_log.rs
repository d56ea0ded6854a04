use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::events::AuthRecord;
use crate::{AuthLogError, AuthenticationLog, AuthenticationLogRepository};

#[derive(Clone)]
pub struct PostgresAuthenticationLogRepository {
    pool: PgPool,
}

impl PostgresAuthenticationLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AuthenticationLogRecord {
    id: i64,
    event_name: String,
    email: Option<String>,
    user_id: Option<i64>,
    created_at: DateTime<Utc>,
}

impl From<AuthenticationLogRecord> for AuthenticationLog {
    fn from(row: AuthenticationLogRecord) -> Self {
        AuthenticationLog {
            id: row.id,
            event_name: row.event_name,
            email: row.email,
            user_id: row.user_id,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl AuthenticationLogRepository for PostgresAuthenticationLogRepository {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, record), fields(event = record.event_name), err)
    )]
    async fn insert(&self, record: &AuthRecord) -> Result<AuthenticationLog, AuthLogError> {
        let row: AuthenticationLogRecord = sqlx::query_as(
            "INSERT INTO authentication_logs (event_name, email, user_id, created_at) VALUES ($1, $2, $3, $4) RETURNING id, event_name, email, user_id, created_at"
        )
        .bind(record.event_name)
        .bind(record.email.as_deref())
        .bind(record.user_id)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "authlog", "msg=\"database error\", operation=\"insert\", error=\"{e}\"");
            AuthLogError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn get_user_events(
        &self,
        user_id: i64,
        limit: usize,
    ) -> Result<Vec<AuthenticationLog>, AuthLogError> {
        let rows: Vec<AuthenticationLogRecord> = sqlx::query_as(
            "SELECT id, event_name, email, user_id, created_at FROM authentication_logs WHERE user_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2"
        )
        .bind(user_id)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "authlog", "msg=\"database error\", operation=\"get_user_events\", error=\"{e}\"");
            AuthLogError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn get_events_by_name(
        &self,
        event_name: &str,
        limit: usize,
    ) -> Result<Vec<AuthenticationLog>, AuthLogError> {
        let rows: Vec<AuthenticationLogRecord> = sqlx::query_as(
            "SELECT id, event_name, email, user_id, created_at FROM authentication_logs WHERE event_name = $1 ORDER BY created_at DESC, id DESC LIMIT $2"
        )
        .bind(event_name)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "authlog", "msg=\"database error\", operation=\"get_events_by_name\", error=\"{e}\"");
            AuthLogError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
