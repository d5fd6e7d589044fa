//! Server configuration types
//!
//! Contains all configuration structures for the Armory server.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 19600,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path; defaults to `~/.armory/armory.db`
    #[serde(default)]
    pub path: Option<String>,
}

impl DatabaseConfig {
    /// Resolve the database path.
    pub fn resolve_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".armory").join("armory.db"))
    }
}

/// Session cookie configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Cookie carrying the session token
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Add the `Secure` attribute (requires HTTPS)
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_cookie_name() -> String {
    "armory_session".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            secure_cookie: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 19600);
        assert_eq!(config.session.cookie_name, "armory_session");
        assert!(!config.session.secure_cookie);
    }

    #[test]
    fn test_explicit_database_path() {
        let db = DatabaseConfig {
            path: Some("data/test.db".to_string()),
        };
        assert_eq!(db.resolve_path().unwrap(), PathBuf::from("data/test.db"));
    }

    #[test]
    fn test_embedded_defaults_parse() {
        let config: AppConfig = toml::from_str(super::super::loader::DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.database.path.is_none());
    }
}
