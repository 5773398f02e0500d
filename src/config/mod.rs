/// Database configuration and connection management
pub mod database;

/// Server and upload settings loaded from config.toml and the environment
pub mod settings;

pub use settings::{AppConfig, ServerConfig, StorageConfig, load_config, load_default_config};
