//! Immutable process configuration for the maintenance gate.
//!
//! Values are read once from the environment at startup and injected into the
//! gate at construction. There is no runtime toggle: changing the flag or the
//! secret means reconfiguring and restarting the process.

use std::collections::HashMap;
use std::env;
use std::fmt;

/// Environment variable that enables the maintenance gate.
pub const ENV_MAINTENANCE_ENABLED: &str = "MAINTENANCE_MODE_ENABLED";

/// Environment variable holding the operator secret.
pub const ENV_MAINTENANCE_SECRET: &str = "MAINTENANCE_PASSWORD";

/// Fallback secret used when [`ENV_MAINTENANCE_SECRET`] is unset.
///
/// A development convenience, not a security boundary: verification is a
/// plain equality check against one shared static value.
pub const DEFAULT_SECRET: &str = "precure_rainbow";

/// Placeholder shown wherever the secret would otherwise appear.
const REDACTED: &str = "[redacted]";

/// Where an effective configuration value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from the process environment.
    Env,
    /// Supplied by the embedding host through [`GateConfig::new`].
    Programmatic,
    /// Built-in fallback.
    Default,
}

impl ConfigSource {
    /// Stable label for diagnostics output.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Env => "env",
            Self::Programmatic => "programmatic",
            Self::Default => "default",
        }
    }
}

/// Immutable gate configuration: the maintenance flag and the operator secret.
#[derive(Clone)]
pub struct GateConfig {
    maintenance_enabled: bool,
    secret: String,
    enabled_source: ConfigSource,
    secret_source: ConfigSource,
}

impl GateConfig {
    /// Read configuration from the process environment.
    ///
    /// The gate enables only on an explicit affirmative (`true` or `1`,
    /// ASCII case-insensitive). An absent or unreadable flag leaves the gate
    /// off: missing configuration degrades to "not blocked".
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// [`from_env`](Self::from_env) passes the process environment; tests
    /// pass a map.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (maintenance_enabled, enabled_source) = match lookup(ENV_MAINTENANCE_ENABLED) {
            Some(raw) => (parse_affirmative(&raw), ConfigSource::Env),
            None => (false, ConfigSource::Default),
        };

        let (secret, secret_source) = match lookup(ENV_MAINTENANCE_SECRET) {
            Some(raw) if !raw.is_empty() => (raw, ConfigSource::Env),
            _ => (DEFAULT_SECRET.to_string(), ConfigSource::Default),
        };

        Self {
            maintenance_enabled,
            secret,
            enabled_source,
            secret_source,
        }
    }

    /// Build configuration programmatically (embedding hosts and tests).
    #[must_use]
    pub fn new(maintenance_enabled: bool, secret: impl Into<String>) -> Self {
        Self {
            maintenance_enabled,
            secret: secret.into(),
            enabled_source: ConfigSource::Programmatic,
            secret_source: ConfigSource::Programmatic,
        }
    }

    /// Whether the maintenance gate is enabled for this process.
    #[must_use]
    pub fn maintenance_enabled(&self) -> bool {
        self.maintenance_enabled
    }

    /// The configured operator secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Where the maintenance flag came from.
    #[must_use]
    pub fn enabled_source(&self) -> ConfigSource {
        self.enabled_source
    }

    /// Where the secret came from.
    #[must_use]
    pub fn secret_source(&self) -> ConfigSource {
        self.secret_source
    }

    /// Effective configuration as key -> (value, source) pairs for
    /// diagnostics. The secret value is redacted.
    #[must_use]
    pub fn effective(&self) -> HashMap<String, (String, String)> {
        let mut map = HashMap::new();
        map.insert(
            "maintenance_enabled".to_string(),
            (
                self.maintenance_enabled.to_string(),
                self.enabled_source.label().to_string(),
            ),
        );
        map.insert(
            "maintenance_secret".to_string(),
            (REDACTED.to_string(), self.secret_source.label().to_string()),
        );
        map
    }
}

// Manual impl so the secret never reaches logs through `{:?}`.
impl fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateConfig")
            .field("maintenance_enabled", &self.maintenance_enabled)
            .field("secret", &REDACTED)
            .field("enabled_source", &self.enabled_source)
            .field("secret_source", &self.secret_source)
            .finish()
    }
}

/// Only `true` and `1` (ASCII case-insensitive, trimmed) enable the gate.
fn parse_affirmative(raw: &str) -> bool {
    let raw = raw.trim();
    raw.eq_ignore_ascii_case("true") || raw == "1"
}
