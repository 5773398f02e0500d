//! Application settings loaded from config.toml
//!
//! Every field has a default, so a missing config file is not an error. Selected values can
//! be overridden from the environment (`BIND_ADDR`, `UPLOAD_DIR`) after the file is read.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Upload storage settings
    pub storage: StorageConfig,
}

/// `[server]` table
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the API binds to, as `host:port`
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

/// `[storage]` table
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory uploaded images are written to
    pub upload_dir: PathBuf,
    /// URL path prefix the upload directory is served under
    pub public_prefix: String,
    /// Largest accepted request body in bytes
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("data/uploads"),
            public_prefix: "/uploads".to_string(),
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Applies environment overrides using `lookup` to read variables.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup("BIND_ADDR") {
            debug!("BIND_ADDR overrides bind address: {}", addr);
            self.server.bind_addr = addr;
        }
        if let Some(dir) = lookup("UPLOAD_DIR") {
            debug!("UPLOAD_DIR overrides upload directory: {}", dir);
            self.storage.upload_dir = PathBuf::from(dir);
        }
    }
}

/// Loads configuration from a TOML file, falling back to defaults when the file is absent.
///
/// # Errors
/// Returns an error if:
/// - The file exists but cannot be read
/// - The TOML syntax is invalid or a field has the wrong type
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No config file at {:?}, using defaults.", path);
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {path:?}: {e}"),
    })
}

/// Loads configuration from ./config.toml and applies environment overrides.
pub fn load_default_config() -> Result<AppConfig> {
    let mut config = load_config("config.toml")?;
    config.apply_overrides(|key| std::env::var(key).ok());
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [server]
            bind_addr = "0.0.0.0:8080"

            [storage]
            upload_dir = "/var/lib/party/uploads"
            public_prefix = "/media"
            max_upload_bytes = 1024
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(
            config.storage.upload_dir,
            PathBuf::from("/var/lib/party/uploads")
        );
        assert_eq!(config.storage.public_prefix, "/media");
        assert_eq!(config.storage.max_upload_bytes, 1024);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AppConfig = toml::from_str("[server]\nbind_addr = \"[::1]:9000\"\n").unwrap();
        assert_eq!(config.server.bind_addr, "[::1]:9000");
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\nmax_upload_bytes = \"lots\"\n").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = [("BIND_ADDR", "10.0.0.1:80"), ("UPLOAD_DIR", "/tmp/up")]
            .into_iter()
            .collect();
        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.server.bind_addr, "10.0.0.1:80");
        assert_eq!(config.storage.upload_dir, PathBuf::from("/tmp/up"));
        assert_eq!(config.storage.public_prefix, "/uploads");
    }
}
