//! Authentication events and their routing into audit records.
//!
//! The host application raises an [`AuthEvent`] whenever something happens
//! in its authentication flow and hands it to an [`EventRegistry`]. The
//! [`AuthLogListener`] normalizes it through the [`EventRouter`] and sends
//! the result to the database and the log channel.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use authlog::events::{AuthEvent, AuthSubject, EventRegistry};
//! use authlog::{AuthLogConfig, AuthLogListener};
//!
//! let mut registry = EventRegistry::new();
//! registry.listen(AuthLogListener::new(repository, sink, AuthLogConfig::default()));
//!
//! registry
//!     .dispatch(&AuthEvent::Login {
//!         guard: "web".to_owned(),
//!         user: AuthSubject::new(1000),
//!         remember: false,
//!     })
//!     .await?;
//! ```
//!
//! # What gets recorded
//!
//! | Event | `email` | `user_id` |
//! |-------|---------|-----------|
//! | `Attempting`, `Failed` | credentials `email` | - |
//! | `Lockout` | request input `email` | - |
//! | `Authenticated` | not recorded | |
//! | `Login`, `Logout`, `OtherDeviceLogout`, `PasswordReset`, `Registered`, `Verified` | - | subject id |

mod event;
mod listener;
mod registry;
mod router;

pub use event::{AuthEvent, AuthRequest, AuthSubject, Credentials};
pub use listener::{AuthLogListener, Listener};
pub use registry::EventRegistry;
pub use router::{AuthRecord, EventRouter};
