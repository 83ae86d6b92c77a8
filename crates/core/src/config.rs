//! Console configuration
//!
//! Resolved in three layers: built-in defaults, an optional TOML file, then
//! `BACKOFFICE_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConsoleError, ConsoleResult};
use crate::session::{SESSION_FILE_NAME, SessionStore};

/// Environment variable overriding the API base URL
pub const ENV_API_URL: &str = "BACKOFFICE_API_URL";
/// Environment variable overriding the list page size
pub const ENV_PAGE_SIZE: &str = "BACKOFFICE_PAGE_SIZE";
/// Environment variable overriding the session file location
pub const ENV_SESSION_FILE: &str = "BACKOFFICE_SESSION_FILE";

/// Default number of rows per list page
pub const DEFAULT_PAGE_SIZE: usize = 5;
/// Default pause between a success notice and the redirect
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 1500;
/// Default collaborator API base URL
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// Directory holding config and session files (`~/.config/backoffice`)
pub fn config_dir() -> Option<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()?;
    Some(PathBuf::from(home).join(".config").join("backoffice"))
}

/// Settings shared by the desktop app and the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Base URL of the collaborator REST API
    pub api_base_url: String,

    /// Rows per list page
    pub page_size: usize,

    /// Milliseconds between a save confirmation and the redirect to the list
    pub redirect_delay_ms: u64,

    /// Where the session blob is persisted (defaults to the config directory)
    pub session_file: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY_MS,
            session_file: None,
        }
    }
}

impl ConsoleConfig {
    /// Load the configuration
    ///
    /// Reads `path` when given, otherwise `config.toml` in the config
    /// directory if it exists, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> ConsoleResult<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match config_dir().map(|d| d.join("config.toml")) {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> ConsoleResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConsoleError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    /// Parse TOML text
    pub fn from_toml(contents: &str) -> ConsoleResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `BACKOFFICE_*` overrides using the given variable lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> ConsoleResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(size) = lookup(ENV_PAGE_SIZE) {
            self.page_size = size.trim().parse().map_err(|_| {
                ConsoleError::InvalidConfig(format!("{} must be a number, got '{}'", ENV_PAGE_SIZE, size))
            })?;
        }
        if let Some(file) = lookup(ENV_SESSION_FILE) {
            self.session_file = Some(PathBuf::from(file));
        }
        Ok(())
    }

    /// Check invariants the flows rely on
    pub fn validate(&self) -> ConsoleResult<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConsoleError::InvalidConfig(format!(
                "api_base_url must start with http:// or https://, got '{}'",
                self.api_base_url
            )));
        }
        if self.page_size == 0 {
            return Err(ConsoleError::InvalidConfig(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim().trim_end_matches('/')
    }

    /// Redirect delay as a [`Duration`]
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Session store for the configured location
    pub fn session_store(&self) -> ConsoleResult<SessionStore> {
        let path = match &self.session_file {
            Some(p) => p.clone(),
            None => config_dir()
                .map(|d| d.join(SESSION_FILE_NAME))
                .ok_or_else(|| {
                    ConsoleError::InvalidConfig(
                        "cannot locate a home directory for the session file".to_string(),
                    )
                })?,
        };
        Ok(SessionStore::new(path))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.redirect_delay(), Duration::from_millis(1500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = ConsoleConfig::from_toml(
            r#"
            api_base_url = "https://pgm.example.com/api/"
            page_size = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url(), "https://pgm.example.com/api");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.redirect_delay_ms, DEFAULT_REDIRECT_DELAY_MS);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_API_URL, "https://other.example.com"),
            (ENV_PAGE_SIZE, "3"),
            (ENV_SESSION_FILE, "/tmp/bo-session.json"),
        ]
        .into_iter()
        .collect();

        let mut config = ConsoleConfig::default();
        config
            .apply_env(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api_base_url, "https://other.example.com");
        assert_eq!(config.page_size, 3);
        assert_eq!(
            config.session_store().unwrap().path(),
            Path::new("/tmp/bo-session.json")
        );
    }

    #[test]
    fn test_bad_env_page_size() {
        let mut config = ConsoleConfig::default();
        let err = config
            .apply_env(|k| (k == ENV_PAGE_SIZE).then(|| "many".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidConfig(_)));
    }

    #[test]
    fn test_validation() {
        let config = ConsoleConfig {
            api_base_url: "ftp://nope".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ConsoleConfig {
            page_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = ConsoleConfig::from_toml("page_size = \"five\"").unwrap_err();
        assert!(matches!(err, ConsoleError::ConfigParse(_)));
    }
}
