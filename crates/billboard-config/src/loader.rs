//! Configuration loader with layered sources.

use crate::AppConfig;
use billboard_core::BillboardError;
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Environment variable prefix; nested keys are separated by `__`,
/// e.g. `BILLBOARD__DATABASE__URL`.
pub const ENV_PREFIX: &str = "BILLBOARD";

/// Loaded configuration, shared behind a lock.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with the `BILLBOARD__` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, BillboardError> {
        let config = Self::load_config(&config_dir.into())?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
        })
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, BillboardError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = std::env::var("BILLBOARD_ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string());

        let builder = file_layers(Config::builder(), config_dir, &environment).add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_billboard_error)?;

        validate_config(&app_config)?;

        info!(
            environment = %environment,
            max_per_page = app_config.pagination.max_per_page,
            "Configuration loaded"
        );
        Ok(app_config)
    }

    /// Gets a specific configuration value by key path.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

/// Loads only the file layers of `config_dir` for the given environment,
/// without `.env` or environment variables.
pub fn load_from_files(config_dir: &str, environment: &str) -> Result<AppConfig, BillboardError> {
    let app_config: AppConfig = file_layers(Config::builder(), config_dir, environment)
        .build()
        .and_then(Config::try_deserialize)
        .map_err(config_error_to_billboard_error)?;

    validate_config(&app_config)?;
    Ok(app_config)
}

fn file_layers(
    mut builder: config::ConfigBuilder<config::builder::DefaultState>,
    config_dir: &str,
    environment: &str,
) -> config::ConfigBuilder<config::builder::DefaultState> {
    for name in ["default", environment, "local"] {
        let path = format!("{}/{}.toml", config_dir, name);
        if Path::new(&path).exists() {
            debug!("Loading config from: {}", path);
            builder = builder.add_source(File::with_name(&path).required(false));
        }
    }
    builder
}

/// Validates the configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), BillboardError> {
    if config.database.url.is_empty() {
        return Err(BillboardError::Configuration(
            "Database URL is required".to_string(),
        ));
    }

    let pagination = &config.pagination;
    if pagination.default_per_page == 0 {
        return Err(BillboardError::Configuration(
            "pagination.default_per_page must be at least 1".to_string(),
        ));
    }
    if pagination.default_per_page > pagination.max_per_page {
        return Err(BillboardError::Configuration(format!(
            "pagination.default_per_page ({}) exceeds pagination.max_per_page ({})",
            pagination.default_per_page, pagination.max_per_page
        )));
    }

    Ok(())
}

fn config_error_to_billboard_error(err: ConfigError) -> BillboardError {
    BillboardError::Configuration(err.to_string())
}
