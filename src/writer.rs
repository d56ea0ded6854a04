//! Gated insertion of audit records.

use crate::events::AuthRecord;
use crate::repository::{AuthenticationLog, AuthenticationLogRepository};
use crate::AuthLogError;

/// Inserts [`AuthRecord`]s into the `authentication_logs` table.
///
/// Failures are returned as-is. There is no retry and no buffering: a record
/// is either inserted by this call or not at all.
pub struct AuditWriter<R: AuthenticationLogRepository> {
    repository: R,
}

impl<R: AuthenticationLogRepository> AuditWriter<R> {
    pub fn new(repository: R) -> Self {
        AuditWriter { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Inserts `record` if `enabled` is true.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(row))` - the inserted row
    /// - `Ok(None)` - writing is disabled, storage was not touched
    /// - `Err(_)` - the insert failed
    pub async fn write(
        &self,
        record: &AuthRecord,
        enabled: bool,
    ) -> Result<Option<AuthenticationLog>, AuthLogError> {
        if !enabled {
            return Ok(None);
        }

        let row = self.repository.insert(record).await?;

        log::debug!(
            target: "authlog",
            "msg=\"audit row inserted\", id={}, event=\"{}\"",
            row.id,
            row.event_name
        );

        Ok(Some(row))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;

    use super::*;
    use crate::repository::MockAuthenticationLogRepository;

    fn record() -> AuthRecord {
        AuthRecord {
            event_name: "Login",
            user_id: Some(1000),
            email: None,
            created_at: Utc::now(),
            metadata: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn test_write_when_enabled() {
        let writer = AuditWriter::new(MockAuthenticationLogRepository::new());
        let record = record();

        let row = writer.write(&record, true).await.unwrap().unwrap();

        assert_eq!(row.event_name, "Login");
        assert_eq!(row.user_id, Some(1000));
        assert_eq!(row.email, None);
        assert_eq!(row.created_at, record.created_at);
        assert_eq!(writer.repository().rows().len(), 1);
    }

    #[tokio::test]
    async fn test_write_when_disabled_is_noop() {
        let writer = AuditWriter::new(MockAuthenticationLogRepository::new());
        writer.repository().fail_inserts(true);

        // storage is never reached, so the failing repository does not matter
        let result = writer.write(&record(), false).await.unwrap();

        assert!(result.is_none());
        assert!(writer.repository().rows().is_empty());
    }

    #[tokio::test]
    async fn test_write_is_not_deduplicated() {
        let writer = AuditWriter::new(MockAuthenticationLogRepository::new());
        let record = record();

        let first = writer.write(&record, true).await.unwrap().unwrap();
        let second = writer.write(&record, true).await.unwrap().unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(writer.repository().rows().len(), 2);
    }

    #[tokio::test]
    async fn test_write_propagates_failure() {
        let writer = AuditWriter::new(MockAuthenticationLogRepository::new());
        writer.repository().fail_inserts(true);

        let result = writer.write(&record(), true).await;

        assert!(matches!(result, Err(AuthLogError::DatabaseError(_))));
    }
}
