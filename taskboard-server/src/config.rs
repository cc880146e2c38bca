/// Configuration for the task-board server.
/// Reads config.json from ~/.config/taskboard/config.json (or platform
/// equivalent); the TASKBOARD_CONFIG env var overrides the path.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_data_file")]
    pub data_file: String,
    /// The one origin allowed cross-origin access.
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

fn default_port() -> u16 {
    8000
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_data_file() -> String {
    "tasks.json".to_string()
}

fn default_allowed_origin() -> String {
    "https://127.0.0.1:5173".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            data_file: default_data_file(),
            allowed_origin: default_allowed_origin(),
        }
    }
}

/// Default config path: ~/.config/taskboard/config.json
pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("TASKBOARD_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskboard")
        .join("config.json")
}

/// Load config from path. Returns defaults if the file doesn't exist.
pub fn load_config(path: &PathBuf) -> ServerConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("Failed to parse config {}: {}", path.display(), e);
            ServerConfig::default()
        }),
        Err(_) => {
            log::info!("No config at {}, using defaults", path.display());
            ServerConfig::default()
        }
    }
}
