//! # Configuration
//!
//! Settings are resolved in three layers, later layers winning:
//!
//! 1. Built-in defaults ([`Settings::default`]).
//! 2. An optional TOML file. Every key is optional.
//! 3. Environment variables:
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `ADMIN_API_URL` | `http.base_url` |
//! | `ADMIN_PAGE_LIMIT` | `controller.default_limit` |
//! | `ADMIN_LIST_RETRIES` | `controller.list_retries` |
//! | `ADMIN_RETRY_DELAY_MS` | `controller.retry_delay_ms` |
//!
//! ```toml
//! [controller]
//! default_limit = 20
//! list_retries = 3
//!
//! [http]
//! base_url = "https://admin.example.org/api"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const ENV_API_URL: &str = "ADMIN_API_URL";
pub const ENV_PAGE_LIMIT: &str = "ADMIN_PAGE_LIMIT";
pub const ENV_LIST_RETRIES: &str = "ADMIN_LIST_RETRIES";
pub const ENV_RETRY_DELAY_MS: &str = "ADMIN_RETRY_DELAY_MS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: '{value}'")]
    Env { key: String, value: String },
}

/// Behaviour shared by every controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Page size of a freshly mounted or reset screen.
    pub default_limit: u32,
    /// Automatic retries of a failed list query before it is reported.
    pub list_retries: u32,
    /// Base delay between list retries; attempt `n` waits `n * retry_delay_ms`.
    pub retry_delay_ms: u64,
    pub channel_capacity: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            list_retries: 2,
            retry_delay_ms: 200,
            channel_capacity: 32,
        }
    }
}

impl ControllerConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub controller: ControllerConfig,
    pub http: HttpConfig,
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads `path` (when given) over the defaults, then applies the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };
        settings.apply_env()?;
        Ok(settings)
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup(ENV_API_URL) {
            self.http.base_url = url;
        }
        if let Some(limit) = parse_var::<u32>(&lookup, ENV_PAGE_LIMIT)? {
            if limit == 0 {
                return Err(ConfigError::Env {
                    key: ENV_PAGE_LIMIT.to_string(),
                    value: limit.to_string(),
                });
            }
            self.controller.default_limit = limit;
        }
        if let Some(retries) = parse_var(&lookup, ENV_LIST_RETRIES)? {
            self.controller.list_retries = retries;
        }
        if let Some(delay) = parse_var(&lookup, ENV_RETRY_DELAY_MS)? {
            self.controller.retry_delay_ms = delay;
        }
        Ok(())
    }
}

fn parse_var<V: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<V>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Env {
                key: key.to_string(),
                value,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_keys_take_defaults() {
        let settings = Settings::from_toml_str("[controller]\nlist_retries = 5\n").unwrap();
        assert_eq!(settings.controller.list_retries, 5);
        assert_eq!(settings.controller.default_limit, 10);
        assert_eq!(settings.http, HttpConfig::default());
    }

    #[test]
    fn env_wins_over_file() {
        let mut settings =
            Settings::from_toml_str("[http]\nbase_url = \"http://file\"\n").unwrap();
        settings
            .apply_overrides(env(&[(ENV_API_URL, "http://env"), (ENV_PAGE_LIMIT, "25")]))
            .unwrap();
        assert_eq!(settings.http.base_url, "http://env");
        assert_eq!(settings.controller.default_limit, 25);
    }

    #[test]
    fn malformed_env_values_are_rejected() {
        let mut settings = Settings::default();
        let err = settings
            .apply_overrides(env(&[(ENV_LIST_RETRIES, "many")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { ref key, .. } if key == ENV_LIST_RETRIES));

        let err = settings
            .apply_overrides(env(&[(ENV_PAGE_LIMIT, "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let err = Settings::from_toml_str("[controller]\ndefault_limit = \"ten\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[controller]\nretry_delay_ms = 5\n[http]\ntimeout_ms = 250").unwrap();
        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.controller.retry_delay(), Duration::from_millis(5));
        assert_eq!(settings.http.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
