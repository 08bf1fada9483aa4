//! Layered service settings: defaults, optional TOML file, `CLIMATE_API_*`
//! environment variables, then command-line overrides.

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use validator::Validate;

use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_CONFIG_FILE, DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS,
    ENV_PREFIX,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Settings {
    #[validate(length(min = 1))]
    pub database_url: String,

    #[validate(length(min = 1))]
    pub bind_address: String,

    #[validate(range(min = 1, max = 64))]
    pub max_connections: u32,
}

/// Values given on the command line; `None` leaves the layered value alone.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub database_url: Option<String>,
    pub bind_address: Option<String>,
    pub max_connections: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Settings {
    /// Load settings. Without `config_file`, `climate-api.toml` in the working
    /// directory is used if present; an explicit file must exist.
    pub fn load(config_file: Option<&Path>, overrides: SettingsOverrides) -> Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("max_connections", i64::from(DEFAULT_MAX_CONNECTIONS))?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .set_override_option("database_url", overrides.database_url)?
            .set_override_option("bind_address", overrides.bind_address)?
            .set_override_option("max_connections", overrides.max_connections.map(i64::from))?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }
}
