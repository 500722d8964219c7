use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for newscheck.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewscheckConfig {
    /// Classification service endpoint
    pub api: ApiConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the classification service
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level
    pub log_level: String,
}

impl Default for NewscheckConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                url: "http://localhost:8000".to_string(),
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
            },
        }
    }
}

impl NewscheckConfig {
    /// Load configuration with precedence:
    /// 1. Default values
    /// 2. Configuration file (newscheck.toml)
    /// 3. Environment variables (prefixed with NEWSCHECK_)
    pub fn load() -> Result<Self> {
        let defaults = NewscheckConfig::default();
        let mut builder = Config::builder()
            .set_default("api.url", defaults.api.url)?
            .set_default("observability.log_level", defaults.observability.log_level)?;

        if Path::new("newscheck.toml").exists() {
            builder = builder.add_source(File::with_name("newscheck"));
        }

        builder = builder.add_source(
            Environment::with_prefix("NEWSCHECK")
                .separator("_")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<NewscheckConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = NewscheckConfig::load_env_file();
        NewscheckConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static NewscheckConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let config = config()?;
    tracing::info!(api_url = %config.api.url, "Configuration loaded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_service() {
        let config = NewscheckConfig::default();
        assert_eq!(config.api.url, "http://localhost:8000");
        assert_eq!(config.observability.log_level, "info");
    }
}
