use std::fmt;

use thiserror::Error;

use crate::constants::{GOOGLE_CSE_API_BASE, IPGEOLOCATION_API_BASE, OPENWEATHERMAP_API_BASE};

/// Environment variable holding the OpenWeatherMap API key.
pub const ENV_WEATHER_API_KEY: &str = "OPENWEATHERMAP_API_KEY";
/// Environment variable holding the ipgeolocation.io API key.
pub const ENV_IP_API_KEY: &str = "IPINFO_API_KEY";
/// Environment variable holding the Google Custom Search API key.
pub const ENV_SEARCH_API_KEY: &str = "GOOGLE_API_KEY";
/// Environment variable holding the Google Custom Search engine id.
pub const ENV_SEARCH_CX: &str = "GOOGLE_CX";
/// Environment variable holding the shared secret consumed by the dispatch layer.
pub const ENV_SHARED_SECRET: &str = "SHARED_SECRET";

/// Errors while assembling the startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),
}

/// Provider base URLs. Defaults point at production; tests substitute a
/// local mock server.
#[derive(Debug, Clone)]
pub struct ApiBases {
    pub weather: String,
    pub ip: String,
    pub search: String,
}

impl Default for ApiBases {
    fn default() -> Self {
        Self {
            weather: OPENWEATHERMAP_API_BASE.to_string(),
            ip: IPGEOLOCATION_API_BASE.to_string(),
            search: GOOGLE_CSE_API_BASE.to_string(),
        }
    }
}

/// Credentials and provider endpoints, assembled once at startup and
/// read-only afterwards.
///
/// The shared secret is carried for the embedding dispatch layer; this
/// crate never inspects it.
#[derive(Clone)]
pub struct Config {
    pub weather_api_key: String,
    pub ip_api_key: String,
    pub search_api_key: String,
    pub search_cx: String,
    pub shared_secret: String,
    pub bases: ApiBases,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary name-to-value lookup.
    ///
    /// Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        Ok(Self {
            weather_api_key: var(ENV_WEATHER_API_KEY)?,
            ip_api_key: var(ENV_IP_API_KEY)?,
            search_api_key: var(ENV_SEARCH_API_KEY)?,
            search_cx: var(ENV_SEARCH_CX)?,
            shared_secret: var(ENV_SHARED_SECRET)?,
            bases: ApiBases::default(),
        })
    }
}

// Credentials must never reach the logs, so Debug prints placeholders.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("weather_api_key", &"<redacted>")
            .field("ip_api_key", &"<redacted>")
            .field("search_api_key", &"<redacted>")
            .field("search_cx", &self.search_cx)
            .field("shared_secret", &"<redacted>")
            .field("bases", &self.bases)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (ENV_WEATHER_API_KEY, "owm-key"),
            (ENV_IP_API_KEY, "ip-key"),
            (ENV_SEARCH_API_KEY, "cse-key"),
            (ENV_SEARCH_CX, "cx-123"),
            (ENV_SHARED_SECRET, "hunter2"),
        ])
    }

    fn lookup_in<'a>(env: &'a HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| env.get(name).map(|value| value.to_string())
    }

    #[test]
    fn builds_from_complete_lookup() {
        let env = full_env();
        let config = Config::from_lookup(lookup_in(&env)).unwrap();

        assert_eq!(config.weather_api_key, "owm-key");
        assert_eq!(config.search_cx, "cx-123");
        assert_eq!(config.bases.weather, OPENWEATHERMAP_API_BASE);
    }

    #[test]
    fn missing_variable_is_an_error() {
        let mut env = full_env();
        env.remove(ENV_IP_API_KEY);

        let err = Config::from_lookup(lookup_in(&env)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ENV_IP_API_KEY)));
    }

    #[test]
    fn empty_variable_counts_as_missing() {
        let mut env = full_env();
        env.insert(ENV_SHARED_SECRET, "");

        let err = Config::from_lookup(lookup_in(&env)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ENV_SHARED_SECRET)));
    }

    #[test]
    fn debug_output_redacts_credentials() {
        let env = full_env();
        let config = Config::from_lookup(lookup_in(&env)).unwrap();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("owm-key"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
