#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::authentication_log::{AuthenticationLog, AuthenticationLogRepository};
use crate::events::AuthRecord;
use crate::AuthLogError;

/// In-memory repository. Clones share the same rows.
#[derive(Clone)]
pub struct MockAuthenticationLogRepository {
    pub logs: Arc<Mutex<Vec<AuthenticationLog>>>,
    next_id: Arc<Mutex<i64>>,
    fail_inserts: Arc<AtomicBool>,
}

impl MockAuthenticationLogRepository {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(vec![])),
            next_id: Arc::new(Mutex::new(1)),
            fail_inserts: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Makes every following insert fail with a database error.
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of all rows in insertion order.
    pub fn rows(&self) -> Vec<AuthenticationLog> {
        self.logs.lock().unwrap().clone()
    }

    fn newest_matching<F>(&self, limit: usize, predicate: F) -> Vec<AuthenticationLog>
    where
        F: Fn(&AuthenticationLog) -> bool,
    {
        let logs = self.logs.lock().unwrap();
        logs.iter()
            .filter(|l| predicate(l))
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }
}

impl Default for MockAuthenticationLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthenticationLogRepository for MockAuthenticationLogRepository {
    async fn insert(&self, record: &AuthRecord) -> Result<AuthenticationLog, AuthLogError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AuthLogError::DatabaseError(
                "mock repository is failing inserts".to_owned(),
            ));
        }

        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            let id = *next_id;
            *next_id += 1;
            id
        };

        let log = AuthenticationLog {
            id,
            event_name: record.event_name.to_owned(),
            email: record.email.clone(),
            user_id: record.user_id,
            created_at: record.created_at,
        };

        let mut logs = self.logs.lock().unwrap();
        logs.push(log.clone());
        drop(logs);

        Ok(log)
    }

    async fn get_user_events(
        &self,
        user_id: i64,
        limit: usize,
    ) -> Result<Vec<AuthenticationLog>, AuthLogError> {
        Ok(self.newest_matching(limit, |l| l.user_id == Some(user_id)))
    }

    async fn get_events_by_name(
        &self,
        event_name: &str,
        limit: usize,
    ) -> Result<Vec<AuthenticationLog>, AuthLogError> {
        Ok(self.newest_matching(limit, |l| l.event_name == event_name))
    }
}
