//! Client configuration and its resolution.
//!
//! [`ClientConfig::resolve`] is a pure function of an [`EnvSnapshot`] and a set
//! of [`ConfigOverrides`]. Precedence is defaults < environment < overrides.

use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

/// Default provider endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.bls.gov/publicAPI/v2/timeseries/data/";

/// Default cache time-to-live (one hour).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_millis(3_600_000);

/// Default total number of attempts per exchange.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay for exponential backoff.
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_millis(1_000);

/// Environment variable holding the provider credential.
pub const ENV_API_KEY: &str = "BLS_API_KEY";
/// Environment variable toggling the enrichment subsystem.
pub const ENV_ENABLED: &str = "BLS_ENABLED";
/// Environment variable toggling the series cache.
pub const ENV_CACHE_ENABLED: &str = "BLS_CACHE_ENABLED";
/// Environment variable holding the cache TTL in milliseconds.
pub const ENV_CACHE_TTL_MS: &str = "BLS_CACHE_TTL_MS";
/// Environment variable holding the attempt ceiling.
pub const ENV_MAX_RETRIES: &str = "BLS_MAX_RETRIES";
/// Environment variable holding the backoff base delay in milliseconds.
pub const ENV_RETRY_DELAY_MS: &str = "BLS_RETRY_DELAY_MS";
/// Environment variable overriding the provider endpoint.
pub const ENV_BASE_URL: &str = "BLS_BASE_URL";

const ENV_PREFIX: &str = "BLS_";

/// Immutable snapshot of the configuration-relevant environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Captures the process environment, loading `.env` first if present.
    #[must_use]
    pub fn from_process() -> Self {
        dotenvy::dotenv().ok();
        Self {
            vars: std::env::vars()
                .filter(|(k, _)| k.starts_with(ENV_PREFIX))
                .collect(),
        }
    }

    /// Builds a snapshot from explicit key/value pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the trimmed, non-empty value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn flag(&self, key: &str) -> Option<bool> {
        let raw = self.get(key)?;
        match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => {
                warn!(key, value = raw, "Ignoring unparseable boolean");
                None
            }
        }
    }

    fn number(&self, key: &str) -> Option<u64> {
        let raw = self.get(key)?;
        match raw.parse::<u64>() {
            Ok(n) => Some(n),
            Err(_) => {
                warn!(key, value = raw, "Ignoring unparseable number");
                None
            }
        }
    }
}

/// Explicit per-call or per-client configuration overrides.
///
/// Every field left as `None` falls through to the environment and then to
/// the defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Provider credential.
    pub credential: Option<String>,
    /// Provider endpoint.
    pub base_url: Option<String>,
    /// Enrichment subsystem toggle.
    pub enabled: Option<bool>,
    /// Cache toggle.
    pub cache_enabled: Option<bool>,
    /// Cache time-to-live.
    pub cache_ttl: Option<Duration>,
    /// Total attempts per exchange.
    pub max_retries: Option<u32>,
    /// Backoff base delay.
    pub retry_base_delay: Option<Duration>,
}

/// Fully resolved client configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Optional provider credential.
    pub credential: Option<String>,
    /// Provider endpoint.
    pub base_url: String,
    /// Whether economic enrichment is enabled at all.
    pub enabled: bool,
    /// Whether results are cached.
    pub cache_enabled: bool,
    /// Maximum age of a usable cache entry.
    pub cache_ttl: Duration,
    /// Total attempts per exchange, always at least 1.
    pub max_retries: u32,
    /// Base delay for exponential backoff.
    pub retry_base_delay: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("credential", &self.credential.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("enabled", &self.enabled)
            .field("cache_enabled", &self.cache_enabled)
            .field("cache_ttl", &self.cache_ttl)
            .field("max_retries", &self.max_retries)
            .field("retry_base_delay", &self.retry_base_delay)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credential: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            enabled: true,
            cache_enabled: true,
            cache_ttl: DEFAULT_CACHE_TTL,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
        }
    }
}

impl ClientConfig {
    /// Resolves defaults, then `env`, then `overrides`.
    #[must_use]
    pub fn resolve(env: &EnvSnapshot, overrides: &ConfigOverrides) -> Self {
        Self::from_env(env).with_overrides(overrides)
    }

    /// Resolves defaults, then `env`.
    #[must_use]
    pub fn from_env(env: &EnvSnapshot) -> Self {
        let defaults = Self::default();

        let max_retries = env
            .number(ENV_MAX_RETRIES)
            .map_or(defaults.max_retries, |n| u32::try_from(n).unwrap_or(u32::MAX))
            .max(1);

        Self {
            credential: env.get(ENV_API_KEY).map(str::to_string),
            base_url: env
                .get(ENV_BASE_URL)
                .map_or(defaults.base_url, str::to_string),
            enabled: env.flag(ENV_ENABLED).unwrap_or(defaults.enabled),
            cache_enabled: env.flag(ENV_CACHE_ENABLED).unwrap_or(defaults.cache_enabled),
            cache_ttl: env
                .number(ENV_CACHE_TTL_MS)
                .map_or(defaults.cache_ttl, Duration::from_millis),
            max_retries,
            retry_base_delay: env
                .number(ENV_RETRY_DELAY_MS)
                .map_or(defaults.retry_base_delay, Duration::from_millis),
        }
    }

    /// Layers explicit `overrides` on top of an already resolved configuration.
    ///
    /// The environment is not consulted again.
    #[must_use]
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Self {
        let credential = overrides
            .credential
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .or_else(|| self.credential.clone());

        Self {
            credential,
            base_url: overrides
                .base_url
                .clone()
                .unwrap_or_else(|| self.base_url.clone()),
            enabled: overrides.enabled.unwrap_or(self.enabled),
            cache_enabled: overrides.cache_enabled.unwrap_or(self.cache_enabled),
            cache_ttl: overrides.cache_ttl.unwrap_or(self.cache_ttl),
            max_retries: overrides.max_retries.unwrap_or(self.max_retries).max(1),
            retry_base_delay: overrides.retry_base_delay.unwrap_or(self.retry_base_delay),
        }
    }

    /// Returns true if a credential is configured.
    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.credential.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_environment() {
        let config = ClientConfig::resolve(&EnvSnapshot::default(), &ConfigOverrides::default());
        assert_eq!(config, ClientConfig::default());
        assert!(!config.has_credential());
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_environment_beats_defaults() {
        let env = EnvSnapshot::from_pairs([
            (ENV_API_KEY, "abc123"),
            (ENV_CACHE_ENABLED, "false"),
            (ENV_CACHE_TTL_MS, "5000"),
            (ENV_MAX_RETRIES, "5"),
            (ENV_RETRY_DELAY_MS, "250"),
            (ENV_ENABLED, "OFF"),
        ]);

        let config = ClientConfig::resolve(&env, &ConfigOverrides::default());
        assert_eq!(config.credential.as_deref(), Some("abc123"));
        assert!(!config.cache_enabled);
        assert!(!config.enabled);
        assert_eq!(config.cache_ttl, Duration::from_millis(5000));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.retry_base_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_overrides_beat_environment() {
        let env = EnvSnapshot::from_pairs([(ENV_MAX_RETRIES, "5"), (ENV_API_KEY, "env-key")]);
        let overrides = ConfigOverrides {
            max_retries: Some(2),
            credential: Some("explicit-key".to_string()),
            ..Default::default()
        };

        let config = ClientConfig::resolve(&env, &overrides);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.credential.as_deref(), Some("explicit-key"));
    }

    #[test]
    fn test_invalid_values_fall_through() {
        let env = EnvSnapshot::from_pairs([
            (ENV_CACHE_TTL_MS, "soon"),
            (ENV_CACHE_ENABLED, "maybe"),
            (ENV_API_KEY, "   "),
        ]);

        let config = ClientConfig::resolve(&env, &ConfigOverrides::default());
        assert_eq!(config.cache_ttl, DEFAULT_CACHE_TTL);
        assert!(config.cache_enabled);
        assert!(config.credential.is_none());
    }

    #[test]
    fn test_max_retries_is_at_least_one() {
        let overrides = ConfigOverrides {
            max_retries: Some(0),
            ..Default::default()
        };
        let config = ClientConfig::resolve(&EnvSnapshot::default(), &overrides);
        assert_eq!(config.max_retries, 1);
    }

    #[test]
    fn test_with_overrides_layers_on_resolved_config() {
        let env = EnvSnapshot::from_pairs([(ENV_API_KEY, "env-key"), (ENV_MAX_RETRIES, "5")]);
        let base = ClientConfig::from_env(&env);

        let call = ConfigOverrides {
            cache_enabled: Some(false),
            credential: Some("  ".to_string()),
            max_retries: Some(0),
            ..Default::default()
        };
        let layered = base.with_overrides(&call);

        assert!(!layered.cache_enabled);
        assert_eq!(layered.credential.as_deref(), Some("env-key"));
        assert_eq!(layered.max_retries, 1);
        assert_eq!(layered, ClientConfig::resolve(&env, &call));
        assert_eq!(base.with_overrides(&ConfigOverrides::default()), base);
    }

    #[test]
    fn test_debug_redacts_credential() {
        let overrides = ConfigOverrides {
            credential: Some("secret_key_12345".to_string()),
            ..Default::default()
        };
        let config = ClientConfig::resolve(&EnvSnapshot::default(), &overrides);
        let debug_str = format!("{config:?}");
        assert!(!debug_str.contains("secret_key_12345"));
        assert!(debug_str.contains("[REDACTED]"));
    }
}
