use crate::constants::{
    DEFAULT_DATA_TIMEOUT_SECS, DEFAULT_DOWNLOAD_BUFFER_SIZE, DEFAULT_LISTEN_ADDRESS,
    DEFAULT_LISTEN_PORT, DEFAULT_PASSWD_FILE, DEFAULT_STORAGE_ROOT, DEFAULT_UPLOAD_BUFFER_SIZE,
};
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_address: String,
    pub listen_port: u16,
    pub storage_root: PathBuf,
    pub passwd_file: PathBuf,
    pub data_timeout_secs: u64,
    pub upload_buffer_size: usize,
    pub download_buffer_size: usize,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: String::from(DEFAULT_LISTEN_ADDRESS),
            listen_port: DEFAULT_LISTEN_PORT,
            storage_root: PathBuf::from(DEFAULT_STORAGE_ROOT),
            passwd_file: PathBuf::from(DEFAULT_PASSWD_FILE),
            data_timeout_secs: DEFAULT_DATA_TIMEOUT_SECS,
            upload_buffer_size: DEFAULT_UPLOAD_BUFFER_SIZE,
            download_buffer_size: DEFAULT_DOWNLOAD_BUFFER_SIZE,
        }
    }
}

impl ServerConfig {
    pub fn data_timeout(&self) -> Duration {
        Duration::from_secs(self.data_timeout_secs)
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))
    }

    pub fn from_toml(config_str: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(config_str)?;

        // A zero-sized buffer would end every transfer on the first read.
        if config.server.upload_buffer_size == 0 {
            config.server.upload_buffer_size = DEFAULT_UPLOAD_BUFFER_SIZE;
        }
        if config.server.download_buffer_size == 0 {
            config.server.download_buffer_size = DEFAULT_DOWNLOAD_BUFFER_SIZE;
        }
        // Likewise a zero timeout would fail every dial that is not instant.
        if config.server.data_timeout_secs == 0 {
            config.server.data_timeout_secs = DEFAULT_DATA_TIMEOUT_SECS;
        }

        Ok(config)
    }
}

// Helper function to log configuration options
pub fn log_config(config: &Config) {
    info!("  Listen Address: {}", config.server.listen_address);
    info!("  Listen Port: {}", config.server.listen_port);
    info!("  Storage Root: {}", config.server.storage_root.display());
    info!("  Passwd File: {}", config.server.passwd_file.display());
    info!("  Data Timeout: {}s", config.server.data_timeout_secs);
    info!(
        "  Upload Buffer Size: {} B",
        config.server.upload_buffer_size
    );
    info!(
        "  Download Buffer Size: {} B",
        config.server.download_buffer_size
    );
}
