//! Configuration for authentication audit logging.
//!
//! Two independent switches decide where an event goes: `enabled` gates the
//! database row and `enable_channel` gates the log entry on `channel`.
//!
//! # Example
//!
//! ```rust
//! use authlog::config::{AuthLogConfig, ConfigSource};
//!
//! // Use defaults: both sinks on, channel "authlog"
//! let config = AuthLogConfig::default();
//! assert!(config.enabled);
//!
//! // Or customize
//! let config = AuthLogConfig {
//!     enable_channel: false,
//!     ..Default::default()
//! };
//! assert!(!config.snapshot().enable_channel);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Environment variable read for [`AuthLogConfig::enabled`].
pub const ENV_ENABLED: &str = "AUTHLOG_ENABLED";
/// Environment variable read for [`AuthLogConfig::enable_channel`].
pub const ENV_ENABLE_CHANNEL: &str = "AUTHLOG_ENABLE_CHANNEL";
/// Environment variable read for [`AuthLogConfig::channel`].
pub const ENV_CHANNEL: &str = "AUTHLOG_CHANNEL";

/// Channel used when none is configured.
pub const DEFAULT_CHANNEL: &str = "authlog";

/// Settings consulted once per event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthLogConfig {
    /// Write a row to `authentication_logs` for each event.
    ///
    /// Default: true
    pub enabled: bool,

    /// Mirror each event to the log channel at warning level.
    ///
    /// Default: true
    pub enable_channel: bool,

    /// Name of the log channel. Used as the `log` target.
    ///
    /// Default: `"authlog"`
    pub channel: String,
}

impl Default for AuthLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            enable_channel: true,
            channel: DEFAULT_CHANNEL.to_owned(),
        }
    }
}

impl AuthLogConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with both sinks switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            enable_channel: false,
            ..Self::default()
        }
    }

    /// Reads the configuration from `AUTHLOG_*` environment variables.
    ///
    /// Missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let enabled = lookup_bool(&lookup, ENV_ENABLED).unwrap_or(defaults.enabled);
        let enable_channel =
            lookup_bool(&lookup, ENV_ENABLE_CHANNEL).unwrap_or(defaults.enable_channel);
        let channel = lookup(ENV_CHANNEL)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.channel);

        Self {
            enabled,
            enable_channel,
            channel,
        }
    }
}

fn lookup_bool<F>(lookup: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key)?;
    let parsed = parse_bool(&value);
    if parsed.is_none() {
        log::warn!(target: "authlog", "msg=\"ignoring unparsable boolean\", key=\"{key}\"");
    }
    parsed
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Supplies the configuration for a single event.
///
/// [`snapshot`](ConfigSource::snapshot) is called once at the start of each
/// event, so an event never sees two different settings. Implemented for
/// [`AuthLogConfig`] itself, for `Arc`s of any source, and for closures
/// wrapped in [`FnSource`], which lets callers plug in whatever reloading
/// scheme they already have.
pub trait ConfigSource: Send + Sync + 'static {
    fn snapshot(&self) -> AuthLogConfig;
}

impl ConfigSource for AuthLogConfig {
    fn snapshot(&self) -> AuthLogConfig {
        self.clone()
    }
}

impl<T: ConfigSource> ConfigSource for Arc<T> {
    fn snapshot(&self) -> AuthLogConfig {
        (**self).snapshot()
    }
}

/// A closure that produces the configuration on every call.
///
/// ```rust
/// use authlog::config::{AuthLogConfig, ConfigSource, FnSource};
///
/// let source = FnSource::new(AuthLogConfig::disabled);
/// assert!(!source.snapshot().enabled);
/// ```
pub struct FnSource<F>(F);

impl<F> FnSource<F>
where
    F: Fn() -> AuthLogConfig + Send + Sync + 'static,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> ConfigSource for FnSource<F>
where
    F: Fn() -> AuthLogConfig + Send + Sync + 'static,
{
    fn snapshot(&self) -> AuthLogConfig {
        (self.0)()
    }
}
