use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub location: LocationConfig,
    pub ui: UiConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String, // Overridden by OMDB_API_KEY
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    Ip,
    Manual,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LocationConfig {
    pub permission_granted: bool, // Answer to the startup permission request
    pub source: LocationSource,
    pub manual_lat: f64,
    pub manual_lon: f64,
    pub lookup_ip: String, // Empty means our own public address
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig {
                base_url: "https://www.omdbapi.com/".to_string(),
                api_key: String::new(),
                timeout_seconds: None,
            },
            location: LocationConfig {
                permission_granted: true,
                source: LocationSource::Ip,
                manual_lat: 37.7749,
                manual_lon: -122.4194,
                lookup_ip: String::new(),
            },
            ui: UiConfig { tick_rate_ms: 150 },
        }
    }
}

impl Config {
    /// Loads config.toml from the working directory.
    pub fn load() -> Self {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads the config at `path`, then applies environment overrides.
    /// If the file doesn't exist, writes the defaults there.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let mut config = match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    Config::default()
                }
            },
            Err(_) => {
                let default_config = Config::default();
                // Save default config to disk for the user to edit later
                match toml::to_string_pretty(&default_config) {
                    Ok(toml_string) => {
                        if fs::write(path, toml_string).is_err() {
                            warn!("Could not write default {} to disk.", path.display());
                        }
                    }
                    Err(e) => warn!("Could not serialize default config: {}", e),
                }
                info!("Loaded default configuration.");
                default_config
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Replaces API settings with values from the environment, if set.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("OMDB_API_KEY").filter(|v| !v.is_empty()) {
            self.api.api_key = key;
        }
        if let Some(url) = lookup("OMDB_BASE_URL").filter(|v| !v.is_empty()) {
            self.api.base_url = url;
        }
        if self.api.api_key.is_empty() {
            warn!("No API key configured; set OMDB_API_KEY or api.api_key.");
        }
    }
}
