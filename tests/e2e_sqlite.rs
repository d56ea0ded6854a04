#![allow(clippy::indexing_slicing)]

//! End-to-end tests for the `SQLite` backend.
//!
//! These tests use an in-memory `SQLite` database.
//! Run with: `cargo test --features sqlx_sqlite --test e2e_sqlite`

#![cfg(feature = "sqlx_sqlite")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use authlog::events::{AuthEvent, AuthRequest, AuthSubject, Credentials, EventRegistry};
use authlog::mirror::LogCrateSink;
use authlog::sqlite::{SqliteAuthenticationLogRepository, migrations};
use authlog::{AuthLogConfig, AuthLogListener, AuthenticationLogRepository};
use serde_json::{Map, json};
use serial_test::serial;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

const USER_ID: i64 = 1000;
const EMAIL: &str = "info@example.org";

async fn setup_db() -> SqlitePool {
    // Use in-memory database for testing
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory SQLite database");

    migrations::run(&pool)
        .await
        .expect("Failed to create authentication_logs table");

    pool
}

fn registry(pool: SqlitePool, config: AuthLogConfig) -> EventRegistry {
    let mut registry = EventRegistry::new();
    registry.listen(AuthLogListener::new(
        SqliteAuthenticationLogRepository::new(pool),
        LogCrateSink,
        config,
    ));
    registry
}

fn user() -> AuthSubject {
    AuthSubject::with_email(USER_ID, EMAIL)
}

fn credentials() -> Credentials {
    let mut credentials = Credentials::new();
    credentials.insert("email".to_owned(), json!(EMAIL));
    credentials.insert("password".to_owned(), json!("secret"));
    credentials
}

async fn count_rows(
    pool: &SqlitePool,
    event_name: &str,
    email: Option<&str>,
    user_id: Option<i64>,
) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM authentication_logs WHERE event_name = ? AND email IS ? AND user_id IS ?",
    )
    .bind(event_name)
    .bind(email)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .expect("Failed to count rows")
}

async fn total_rows(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM authentication_logs")
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}

#[tokio::test]
#[serial]
async fn test_migrations_are_idempotent() {
    let pool = setup_db().await;

    migrations::run(&pool)
        .await
        .expect("Second migrations run should succeed");

    assert_eq!(total_rows(&pool).await, 0);
}

#[tokio::test]
#[serial]
async fn test_attempting_records_email() {
    let pool = setup_db().await;
    let registry = registry(pool.clone(), AuthLogConfig::default());

    registry
        .dispatch(&AuthEvent::Attempting {
            guard: "web".to_owned(),
            credentials: credentials(),
            remember: false,
        })
        .await
        .expect("Failed to dispatch");

    assert_eq!(count_rows(&pool, "Attempting", Some(EMAIL), None).await, 1);
}

#[tokio::test]
#[serial]
async fn test_failed_records_email() {
    let pool = setup_db().await;
    let registry = registry(pool.clone(), AuthLogConfig::default());

    registry
        .dispatch(&AuthEvent::Failed {
            guard: "web".to_owned(),
            user: None,
            credentials: credentials(),
        })
        .await
        .expect("Failed to dispatch");

    assert_eq!(count_rows(&pool, "Failed", Some(EMAIL), None).await, 1);
}

#[tokio::test]
#[serial]
async fn test_lockout_records_request_email() {
    let pool = setup_db().await;
    let registry = registry(pool.clone(), AuthLogConfig::default());
    let mut input = Map::new();
    input.insert("email".to_owned(), json!(EMAIL));

    registry
        .dispatch(&AuthEvent::Lockout {
            request: AuthRequest::new(input).with_ip_address("127.0.0.1"),
        })
        .await
        .expect("Failed to dispatch");

    assert_eq!(count_rows(&pool, "Lockout", Some(EMAIL), None).await, 1);
}

#[tokio::test]
#[serial]
async fn test_authenticated_is_not_recorded() {
    let pool = setup_db().await;
    let registry = registry(pool.clone(), AuthLogConfig::default());

    registry
        .dispatch(&AuthEvent::Authenticated {
            guard: "web".to_owned(),
            user: user(),
        })
        .await
        .expect("Failed to dispatch");

    assert_eq!(total_rows(&pool).await, 0);
}

#[tokio::test]
#[serial]
async fn test_post_authentication_events_record_user_id() {
    let pool = setup_db().await;
    let registry = registry(pool.clone(), AuthLogConfig::default());

    let events = [
        AuthEvent::Login {
            guard: "web".to_owned(),
            user: user(),
            remember: false,
        },
        AuthEvent::Logout {
            guard: "web".to_owned(),
            user: user(),
        },
        AuthEvent::OtherDeviceLogout {
            guard: "web".to_owned(),
            user: user(),
        },
        AuthEvent::PasswordReset { user: user() },
        AuthEvent::Registered { user: user() },
        AuthEvent::Verified { user: user() },
    ];

    for event in &events {
        registry.dispatch(event).await.expect("Failed to dispatch");
        assert_eq!(
            count_rows(&pool, event.name(), None, Some(USER_ID)).await,
            1,
            "expected one row for {}",
            event.name()
        );
    }

    assert_eq!(total_rows(&pool).await, 6);
}

#[tokio::test]
#[serial]
async fn test_disabled_writes_nothing() {
    let pool = setup_db().await;
    let registry = registry(
        pool.clone(),
        AuthLogConfig {
            enabled: false,
            ..Default::default()
        },
    );

    registry
        .dispatch(&AuthEvent::Verified { user: user() })
        .await
        .expect("Failed to dispatch");

    assert_eq!(total_rows(&pool).await, 0);
}

#[tokio::test]
#[serial]
async fn test_repeated_events_are_not_deduplicated() {
    let pool = setup_db().await;
    let registry = registry(pool.clone(), AuthLogConfig::default());
    let event = AuthEvent::Login {
        guard: "web".to_owned(),
        user: user(),
        remember: false,
    };

    registry.dispatch(&event).await.expect("Failed to dispatch");
    registry.dispatch(&event).await.expect("Failed to dispatch");

    assert_eq!(count_rows(&pool, "Login", None, Some(USER_ID)).await, 2);
}

#[tokio::test]
#[serial]
async fn test_repository_queries() {
    let pool = setup_db().await;
    let repo = SqliteAuthenticationLogRepository::new(pool.clone());
    let registry = registry(pool, AuthLogConfig::default());

    registry
        .dispatch(&AuthEvent::Registered { user: user() })
        .await
        .expect("Failed to dispatch");
    registry
        .dispatch(&AuthEvent::Login {
            guard: "web".to_owned(),
            user: user(),
            remember: true,
        })
        .await
        .expect("Failed to dispatch");
    registry
        .dispatch(&AuthEvent::Login {
            guard: "web".to_owned(),
            user: AuthSubject::new(2000),
            remember: false,
        })
        .await
        .expect("Failed to dispatch");

    let events = repo
        .get_user_events(USER_ID, 10)
        .await
        .expect("Failed to get user events");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event_name, "Login");
    assert_eq!(events[1].event_name, "Registered");
    assert!(events.iter().all(|e| e.email.is_none()));

    let logins = repo
        .get_events_by_name("Login", 1)
        .await
        .expect("Failed to get events by name");
    assert_eq!(logins.len(), 1);
    assert_eq!(logins[0].user_id, Some(2000));
}

#[tokio::test]
#[serial]
async fn test_insert_failure_is_surfaced() {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory SQLite database");
    // no table: every insert fails
    let registry = registry(pool, AuthLogConfig::default());

    let result = registry
        .dispatch(&AuthEvent::Verified { user: user() })
        .await;

    assert!(matches!(
        result,
        Err(authlog::AuthLogError::DatabaseError(_))
    ));
}

#[tokio::test]
#[serial]
async fn test_email_is_stored_as_submitted() {
    let pool = setup_db().await;
    let registry = registry(pool.clone(), AuthLogConfig::default());
    let padded = "  Admin@Example.org ";

    let mut credentials = Credentials::new();
    credentials.insert("email".to_owned(), json!(padded));
    registry
        .dispatch(&AuthEvent::Failed {
            guard: "web".to_owned(),
            user: None,
            credentials,
        })
        .await
        .expect("Failed to dispatch");

    assert_eq!(count_rows(&pool, "Failed", Some(padded), None).await, 1);
}
