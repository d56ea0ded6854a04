use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Credentials submitted with a login attempt, as sent by the client.
///
/// Only the `email` entry is ever read; everything else (passwords included)
/// stays out of audit records and logs.
pub type Credentials = Map<String, Value>;

/// The user an event is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSubject {
    pub id: i64,
    pub email: Option<String>,
}

impl AuthSubject {
    pub fn new(id: i64) -> Self {
        Self { id, email: None }
    }

    pub fn with_email(id: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: Some(email.into()),
        }
    }
}

/// The request that tripped a lockout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthRequest {
    /// Submitted form or JSON input.
    pub input: Map<String, Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl AuthRequest {
    pub fn new(input: Map<String, Value>) -> Self {
        Self {
            input,
            ..Default::default()
        }
    }

    pub fn with_ip_address(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Authentication lifecycle events understood by authlog.
///
/// The set is closed: each variant carries exactly the payload its
/// extraction rule needs. `guard` names the authentication context the event
/// came from (for example `"web"` or `"api"`).
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    // pre-authentication
    Attempting {
        guard: String,
        credentials: Credentials,
        remember: bool,
    },
    Failed {
        guard: String,
        user: Option<AuthSubject>,
        credentials: Credentials,
    },
    Lockout {
        request: AuthRequest,
    },

    // authentication
    Authenticated {
        guard: String,
        user: AuthSubject,
    },
    Login {
        guard: String,
        user: AuthSubject,
        remember: bool,
    },
    Logout {
        guard: String,
        user: AuthSubject,
    },
    OtherDeviceLogout {
        guard: String,
        user: AuthSubject,
    },

    // account lifecycle
    PasswordReset {
        user: AuthSubject,
    },
    Registered {
        user: AuthSubject,
    },
    Verified {
        user: AuthSubject,
    },
}

impl AuthEvent {
    /// Returns the short type name, stored as `event_name` and used as the
    /// log message.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Attempting { .. } => "Attempting",
            Self::Failed { .. } => "Failed",
            Self::Lockout { .. } => "Lockout",
            Self::Authenticated { .. } => "Authenticated",
            Self::Login { .. } => "Login",
            Self::Logout { .. } => "Logout",
            Self::OtherDeviceLogout { .. } => "OtherDeviceLogout",
            Self::PasswordReset { .. } => "PasswordReset",
            Self::Registered { .. } => "Registered",
            Self::Verified { .. } => "Verified",
        }
    }

    /// Returns the guard the event was raised on, if the event carries one.
    pub fn guard(&self) -> Option<&str> {
        match self {
            Self::Attempting { guard, .. }
            | Self::Failed { guard, .. }
            | Self::Authenticated { guard, .. }
            | Self::Login { guard, .. }
            | Self::Logout { guard, .. }
            | Self::OtherDeviceLogout { guard, .. } => Some(guard),
            Self::Lockout { .. }
            | Self::PasswordReset { .. }
            | Self::Registered { .. }
            | Self::Verified { .. } => None,
        }
    }
}
