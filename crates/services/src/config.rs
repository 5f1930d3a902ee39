use std::env;
use std::path::PathBuf;

use url::Url;

use crate::error::ConfigError;

pub const ENV_CONTENT_DIR: &str = "AULA_CONTENT_DIR";
pub const ENV_DB_URL: &str = "AULA_DB_URL";
pub const ENV_API_BASE_URL: &str = "AULA_API_BASE_URL";

pub const DEFAULT_CONTENT_DIR: &str = "content";
pub const DEFAULT_DB_URL: &str = "sqlite://aula.sqlite3";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Runtime settings. Environment first, CLI flags override through the setters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub content_dir: PathBuf,
    pub db_url: String,
    pub api_base_url: Url,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidApiUrl` if `AULA_API_BASE_URL` does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; blank values fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidApiUrl` if the API base url does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };
        let content_dir = PathBuf::from(get(ENV_CONTENT_DIR, DEFAULT_CONTENT_DIR));
        let db_url = get(ENV_DB_URL, DEFAULT_DB_URL);
        let api_base_url = parse_api_url(&get(ENV_API_BASE_URL, DEFAULT_API_BASE_URL))?;
        Ok(Self {
            content_dir,
            db_url,
            api_base_url,
        })
    }

    #[must_use]
    pub fn with_content_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.content_dir = dir.into();
        self
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidDbUrl` for a blank value.
    pub fn with_db_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Err(ConfigError::InvalidDbUrl(raw.to_owned()));
        }
        self.db_url = raw.to_owned();
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidApiUrl` if `raw` does not parse.
    pub fn with_api_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_base_url = parse_api_url(raw)?;
        Ok(self)
    }
}

/// Base urls always end in `/` so relative joins keep any path prefix.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&normalized).map_err(|source| ConfigError::InvalidApiUrl {
        raw: raw.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset_or_blank() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_DB_URL, "  ")])).unwrap();
        assert_eq!(config.content_dir, PathBuf::from(DEFAULT_CONTENT_DIR));
        assert_eq!(config.db_url, DEFAULT_DB_URL);
        assert_eq!(config.api_base_url.as_str(), "http://localhost:8000/");
    }

    #[test]
    fn env_values_are_used() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_CONTENT_DIR, "/srv/aula"),
            (ENV_API_BASE_URL, "https://api.example.org/v1"),
        ]))
        .unwrap();
        assert_eq!(config.content_dir, PathBuf::from("/srv/aula"));
        assert_eq!(config.api_base_url.as_str(), "https://api.example.org/v1/");
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_API_BASE_URL, "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiUrl { .. }));
    }

    #[test]
    fn overrides_replace_env() {
        let defaults = AppConfig::from_lookup(|_| None).unwrap();
        let config = defaults
            .clone()
            .with_db_url("sqlite::memory:")
            .unwrap()
            .with_api_base_url("http://127.0.0.1:9000")
            .unwrap();
        assert_eq!(config.db_url, "sqlite::memory:");
        assert_eq!(config.api_base_url.port(), Some(9000));
        assert!(defaults.with_db_url("").is_err());
    }
}
