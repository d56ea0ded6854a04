use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::{AuthEvent, AuthRequest};

/// An event reduced to the fields that get persisted and mirrored.
///
/// Pre-authentication events (`Attempting`, `Failed`, `Lockout`) carry an
/// email only, post-authentication events carry a user id only. Both may be
/// absent when the payload did not contain them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthRecord {
    pub event_name: &'static str,
    pub user_id: Option<i64>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Non-identifying context such as the guard. Only written to the log
    /// channel; the table has no column for it.
    pub metadata: BTreeMap<String, String>,
}

/// Maps each [`AuthEvent`] variant to its [`AuthRecord`].
///
/// Normalization never fails: a missing or malformed field becomes `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventRouter;

impl EventRouter {
    pub fn new() -> Self {
        Self
    }

    /// Normalizes `event`, stamping it with the current time.
    ///
    /// Returns `None` for `Authenticated`, which is never recorded: `Login`
    /// already captures the successful sign-in.
    pub fn normalize(&self, event: &AuthEvent) -> Option<AuthRecord> {
        self.normalize_at(event, Utc::now())
    }

    pub fn normalize_at(&self, event: &AuthEvent, at: DateTime<Utc>) -> Option<AuthRecord> {
        let mut metadata = BTreeMap::new();
        if let Some(guard) = event.guard() {
            metadata.insert("guard".to_owned(), guard.to_owned());
        }

        let (user_id, email) = match event {
            AuthEvent::Authenticated { .. } => return None,

            AuthEvent::Attempting {
                credentials,
                remember,
                ..
            } => {
                metadata.insert("remember".to_owned(), remember.to_string());
                (None, email_from(credentials))
            }
            AuthEvent::Failed { credentials, .. } => (None, email_from(credentials)),
            AuthEvent::Lockout { request } => {
                insert_request_metadata(&mut metadata, request);
                (None, email_from(&request.input))
            }

            AuthEvent::Login { user, remember, .. } => {
                metadata.insert("remember".to_owned(), remember.to_string());
                (Some(user.id), None)
            }
            AuthEvent::Logout { user, .. }
            | AuthEvent::OtherDeviceLogout { user, .. }
            | AuthEvent::PasswordReset { user }
            | AuthEvent::Registered { user }
            | AuthEvent::Verified { user } => (Some(user.id), None),
        };

        Some(AuthRecord {
            event_name: event.name(),
            user_id,
            email,
            created_at: at,
            metadata,
        })
    }
}

/// Reads `email` from a submitted payload exactly as sent. Missing or
/// non-string values count as absent.
fn email_from(payload: &Map<String, Value>) -> Option<String> {
    payload
        .get("email")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

fn insert_request_metadata(metadata: &mut BTreeMap<String, String>, request: &AuthRequest) {
    if let Some(ip_address) = &request.ip_address {
        metadata.insert("ip_address".to_owned(), ip_address.clone());
    }
    if let Some(user_agent) = &request.user_agent {
        metadata.insert("user_agent".to_owned(), user_agent.clone());
    }
}
