//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Moderation configuration.
    #[serde(default)]
    pub moderation: ModerationConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Moderation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ModerationConfig {
    /// Approve new biodata submissions without admin review.
    #[serde(default)]
    pub auto_approve: bool,
    /// Maximum results returned by a single list or browse request.
    #[serde(default = "default_search_limit")]
    pub max_search_limit: u64,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            auto_approve: false,
            max_search_limit: default_search_limit(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    100
}

const fn default_min_connections() -> u32 {
    5
}

const fn default_search_limit() -> u64 {
    100
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `MILAN_ENV`)
    /// 3. Environment variables with `MILAN_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("MILAN_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("MILAN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("MILAN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_database_url_is_the_only_required_field() {
        let config = parse("[database]\nurl = \"postgres://localhost/milan\"\n");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(!config.moderation.auto_approve);
    }

    #[test]
    fn test_absent_moderation_section_keeps_search_limit() {
        let config = parse("[database]\nurl = \"postgres://localhost/milan\"\n");

        assert_eq!(config.moderation.max_search_limit, 100);
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let config = parse(
            "[server]\nport = 8080\n\n\
             [database]\nurl = \"postgres://localhost/milan\"\n\n\
             [moderation]\nauto_approve = true\nmax_search_limit = 50\n",
        );

        assert_eq!(config.server.port, 8080);
        assert!(config.moderation.auto_approve);
        assert_eq!(config.moderation.max_search_limit, 50);
    }
}
