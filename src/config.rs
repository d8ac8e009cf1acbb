//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! `wave-config.toml` file: cache freshness, HTTP settings, provider endpoints
//! and an optional replacement for the built-in beach directory.
//!
//! Provider credentials are never read from the file. They come from the
//! environment (`OPENWEATHERMAP_API_KEY`, `STORMGLASS_API_KEY`), optionally
//! populated from a `.env` file by the binary.

use crate::locations::Directory;
use crate::Location;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "wave-config.toml";

pub const OPENWEATHER_KEY_VAR: &str = "OPENWEATHERMAP_API_KEY";
pub const STORMGLASS_KEY_VAR: &str = "STORMGLASS_API_KEY";

/// Application configuration loaded from wave-config.toml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Observation cache settings
    #[serde(default)]
    pub cache: CacheConfig,
    /// Outbound HTTP settings shared by all providers
    #[serde(default)]
    pub http: HttpConfig,
    /// Provider endpoints
    #[serde(default)]
    pub providers: ProviderConfig,
    /// Replaces the built-in Rio de Janeiro beaches when non-empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long an observation is served without re-fetching
    pub freshness_minutes: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout; 0 leaves requests unbounded
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Serves both the current-weather and One Call APIs
    pub openweather_base_url: String,
    pub stormglass_base_url: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            freshness_minutes: 60,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            timeout_secs: 15,
            user_agent: concat!("wave-tracker/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            openweather_base_url: "https://api.openweathermap.org".to_string(),
            stormglass_base_url: "https://api.stormglass.io".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from wave-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded configuration");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "no config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Save current configuration to `path`
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }

    /// Freshness window as a chrono duration.
    pub fn freshness(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.cache.freshness_minutes.min(i32::MAX as u64) as i64)
    }

    /// Beach directory: the configured list, or the built-in one.
    pub fn directory(&self) -> Directory {
        if self.locations.is_empty() {
            Directory::rio()
        } else {
            Directory::from_locations(self.locations.iter().cloned())
        }
    }
}

/// Provider API keys. An absent key disables that provider.
#[derive(Clone, Default)]
pub struct Credentials {
    pub openweather: Option<String>,
    pub stormglass: Option<String>,
}

impl Credentials {
    /// Read keys from the process environment.
    pub fn from_env() -> Self {
        let read = |var: &str| std::env::var(var).ok().filter(|v| !v.trim().is_empty());
        let creds = Credentials {
            openweather: read(OPENWEATHER_KEY_VAR),
            stormglass: read(STORMGLASS_KEY_VAR),
        };
        if creds.openweather.is_none() {
            warn!("{} not set, OpenWeatherMap providers disabled", OPENWEATHER_KEY_VAR);
        }
        if creds.stormglass.is_none() {
            warn!("{} not set, Stormglass provider disabled", STORMGLASS_KEY_VAR);
        }
        creds
    }
}

// Keys stay out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openweather", &self.openweather.as_ref().map(|_| "<set>"))
            .field("stormglass", &self.stormglass.as_ref().map(|_| "<set>"))
            .finish()
    }
}
