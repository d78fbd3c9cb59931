use anyhow::{Context, Result};
use minutes_core::config::{load_layered, MinutesConfig};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Name used for the config and data directories
pub const APP_NAME: &str = "minutes";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub http_addr: SocketAddr,
    pub record_dir: PathBuf,
    pub minutes: MinutesConfig,
}

impl AppConfig {
    /// Resolve config from defaults, the TOML file and the environment
    pub fn load(config_file: Option<&Path>, http_addr: SocketAddr) -> Result<Self> {
        let minutes = load_layered(config_file, APP_NAME).context("Failed to load configuration")?;
        Self::from_minutes(minutes, http_addr)
    }

    pub fn from_minutes(minutes: MinutesConfig, http_addr: SocketAddr) -> Result<Self> {
        let record_dir = minutes
            .resolved_data_dir(APP_NAME)
            .context("Failed to resolve record directory")?;
        Ok(Self {
            http_addr,
            record_dir,
            minutes,
        })
    }
}
