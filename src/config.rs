use crate::client::{DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL};
use crate::{Result, WatchLogError};
use std::env;
use std::path::PathBuf;

/// Environment variable naming the database file.
pub const DATABASE_ENV: &str = "WATCHLOG_DATABASE";
/// Environment variable holding the TMDB API key.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";
pub const BASE_URL_ENV: &str = "WATCHLOG_TMDB_BASE_URL";
pub const IMAGE_BASE_URL_ENV: &str = "WATCHLOG_IMAGE_BASE_URL";

const DATABASE_FILE: &str = "media_tracker.db";

/// Runtime configuration for the watch log.
///
/// Values come from the environment (see the `*_ENV` constants) and may be
/// overridden afterwards by command-line flags. The database defaults to
/// `~/.local/share/watchlog/media_tracker.db` (the XDG data directory).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    /// `None` disables catalog lookups; entries are then entered manually
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: String,
    pub image_base_url: String,
}

impl AppConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let database_path = match get(DATABASE_ENV) {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        Ok(Self {
            database_path,
            tmdb_api_key: get(API_KEY_ENV),
            tmdb_base_url: get(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            image_base_url: get(IMAGE_BASE_URL_ENV)
                .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string()),
        })
    }

    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.tmdb_api_key = if api_key.trim().is_empty() {
            None
        } else {
            Some(api_key.trim().to_string())
        };
        self
    }

    pub fn catalog_enabled(&self) -> bool {
        self.tmdb_api_key.is_some()
    }
}

/// The default database location inside the XDG data directory.
///
/// Returns a path like: `~/.local/share/watchlog/media_tracker.db`
pub fn default_database_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| WatchLogError::Config("Cannot determine XDG data directory".to_string()))?;

    Ok(data_dir.join("watchlog").join(DATABASE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(config
            .database_path
            .to_string_lossy()
            .contains("watchlog/media_tracker.db"));
        assert_eq!(config.tmdb_api_key, None);
        assert!(!config.catalog_enabled());
        assert_eq!(config.tmdb_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.image_base_url, DEFAULT_IMAGE_BASE_URL);
    }

    #[test]
    fn test_environment_values() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (DATABASE_ENV, "/tmp/watch.db"),
            (API_KEY_ENV, " abc123 "),
            (BASE_URL_ENV, "http://localhost:8080/3"),
        ]))
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/watch.db"));
        assert_eq!(config.tmdb_api_key.as_deref(), Some("abc123"));
        assert_eq!(config.tmdb_base_url, "http://localhost:8080/3");
    }

    #[test]
    fn test_blank_api_key_disables_catalog() {
        let config = AppConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "   ")])).unwrap();
        assert!(!config.catalog_enabled());

        let config = config.with_api_key("key");
        assert!(config.catalog_enabled());
        assert!(!config.with_api_key("").catalog_enabled());
    }

    #[test]
    fn test_flag_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[(DATABASE_ENV, "/tmp/a.db")]))
            .unwrap()
            .with_database_path("/tmp/b.db");
        assert_eq!(config.database_path, PathBuf::from("/tmp/b.db"));
    }
}
