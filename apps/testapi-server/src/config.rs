//! Server configuration module.
//!
//! Configuration is layered: built-in defaults, then an optional
//! `testapi.toml` in the working directory, then `TESTAPI_*` environment
//! variables (e.g. `TESTAPI_PORT=8080`).

use std::net::{IpAddr, SocketAddr};

use config::{Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use testapi_store::StoreConfig;

/// Upper bound for the seed counts.
pub const MAX_SEED_COUNT: usize = 10_000;

/// Default tracing filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str =
    "info,testapi_server=debug,testapi_store=debug,tower_http=debug";

/// Test API server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// Products generated at startup and on reset
    pub product_seed_count: usize,

    /// Users generated at startup and on reset
    pub user_seed_count: usize,

    /// tracing-subscriber filter, overridden by `RUST_LOG`
    pub log_filter: String,

    /// Answer CORS preflights for any origin
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            product_seed_count: 100,
            user_seed_count: 100,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            cors_permissive: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from defaults, `testapi.toml` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            .add_source(File::with_name("testapi").required(false))
            .add_source(Environment::with_prefix("TESTAPI").try_parsing(true));
        Self::from_config(builder.build()?)
    }

    /// A builder holding only the built-in defaults.
    pub fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let defaults = ServerConfig::default();
        let builder = Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("product_seed_count", defaults.product_seed_count as i64)?
            .set_default("user_seed_count", defaults.user_seed_count as i64)?
            .set_default("log_filter", defaults.log_filter)?
            .set_default("cors_permissive", defaults.cors_permissive)?;
        Ok(builder)
    }

    /// Deserializes and validates a built configuration.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let server: ServerConfig = config.try_deserialize()?;
        server.validate()?;
        Ok(server)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue("port".to_string()));
        }
        if self.product_seed_count > MAX_SEED_COUNT {
            return Err(ConfigError::InvalidValue("product_seed_count".to_string()));
        }
        if self.user_seed_count > MAX_SEED_COUNT {
            return Err(ConfigError::InvalidValue("user_seed_count".to_string()));
        }
        self.socket_addr()?;
        Ok(())
    }

    /// Address the listener binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidValue("host".to_string()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Seed settings handed to the store.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default()
            .product_seed_count(self.product_seed_count)
            .user_seed_count(self.user_seed_count)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn with_toml(toml: &str) -> Result<ServerConfig, ConfigError> {
        let config = ServerConfig::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        ServerConfig::from_config(config)
    }

    #[test]
    fn test_defaults() {
        let config = with_toml("").unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = with_toml("port = 8080\nproduct_seed_count = 5\ncors_permissive = false").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.product_seed_count, 5);
        assert!(!config.cors_permissive);
        assert_eq!(config.user_seed_count, 100);
        assert_eq!(config.store_config().product_seed_count, 5);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            with_toml("port = 0"),
            Err(ConfigError::InvalidValue(field)) if field == "port"
        ));
        assert!(matches!(
            with_toml("user_seed_count = 20000"),
            Err(ConfigError::InvalidValue(field)) if field == "user_seed_count"
        ));
        assert!(matches!(
            with_toml("host = \"not an ip\""),
            Err(ConfigError::InvalidValue(field)) if field == "host"
        ));
        assert!(matches!(
            with_toml("port = \"abc\""),
            Err(ConfigError::Source(_))
        ));
    }
}
