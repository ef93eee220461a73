use crate::store::CascadePolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub server: ServerConfig,
}

/// Where the client finds the recipe service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request timeout. Unset means requests may wait indefinitely.
    pub timeout_secs: Option<u64>,
}

/// Settings for the development service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cascade_ingredient_delete: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cascade_ingredient_delete: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name("config").required(false));

        // Add environment variables with prefix "RECIPE_BOOK_", e.g. RECIPE_BOOK_API__BASE_URL
        config = config.add_source(
            config::Environment::with_prefix("RECIPE_BOOK")
                .separator("__")
                .prefix_separator("_"),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.api.timeout_secs.map(Duration::from_secs)
    }

    pub fn cascade_policy(&self) -> CascadePolicy {
        if self.server.cascade_ingredient_delete {
            CascadePolicy::Pull
        } else {
            CascadePolicy::Retain
        }
    }

    /// Get the server bind address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.server_address(), "127.0.0.1:3000");
        assert_eq!(config.cascade_policy(), CascadePolicy::Retain);
    }

    #[test]
    fn test_timeout_and_cascade() {
        let mut config = AppConfig::default();
        config.api.timeout_secs = Some(5);
        config.server.cascade_ingredient_delete = true;
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.cascade_policy(), CascadePolicy::Pull);
    }
}
