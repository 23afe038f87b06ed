//! Configuration for the catalog API.

use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file for the racing service
    #[serde(default = "default_racing_db")]
    pub racing_db: String,
    /// SQLite file for the sports service
    #[serde(default = "default_sports_db")]
    pub sports_db: String,
    /// Dummy rows seeded into an empty table on startup (0 disables seeding)
    #[serde(default = "default_seed_rows")]
    pub seed_rows: usize,
}

fn default_racing_db() -> String {
    "data/racing.db".to_string()
}

fn default_sports_db() -> String {
    "data/sports.db".to_string()
}

fn default_seed_rows() -> usize {
    100
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            racing_db: default_racing_db(),
            sports_db: default_sports_db(),
            seed_rows: default_seed_rows(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment and config file
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Add config file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (CATALOG_SERVER__PORT, etc.)
            .add_source(
                config::Environment::with_prefix("CATALOG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.racing_db, "data/racing.db");
        assert_eq!(config.storage.seed_rows, 100);
    }

    #[test]
    fn test_partial_json_uses_field_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"storage": {"seed_rows": 5}}"#).unwrap();
        assert_eq!(config.storage.seed_rows, 5);
        assert_eq!(config.storage.sports_db, "data/sports.db");
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
