use crate::domain::error::NearbyError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_enable_emoji")]
    pub enable_emoji: bool,
    pub database_path: Option<String>,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_events_path")]
    pub events_path: String,
    #[serde(default = "default_genres_path")]
    pub genres_path: String,
    #[serde(default = "default_favorites_path")]
    pub favorites_path: String,
    #[serde(default = "default_me_path")]
    pub me_path: String,
    #[serde(default = "default_identity_header")]
    pub identity_header: String,
    /// No timeout unless set.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeocoderConfig {
    #[serde(default = "default_geocoder_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AuthConfig {
    pub uid: Option<String>,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: default_log_level(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            events_path: default_events_path(),
            genres_path: default_genres_path(),
            favorites_path: default_favorites_path(),
            me_path: default_me_path(),
            identity_header: default_identity_header(),
            timeout_secs: None,
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_geocoder_endpoint(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            enable_emoji: true,
            database_path: None,
            logging: Logging::default(),
            backend: BackendConfig::default(),
            geocoder: GeocoderConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

// Defaults
fn default_theme() -> String {
    "temp".to_string()
}
fn default_enable_emoji() -> bool {
    true
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}
fn default_base_url() -> String {
    "http://localhost/web-proj1/api/".to_string()
}
fn default_events_path() -> String {
    "events.php".to_string()
}
fn default_genres_path() -> String {
    "genres.php".to_string()
}
fn default_favorites_path() -> String {
    "favorites.php".to_string()
}
fn default_me_path() -> String {
    "me.php".to_string()
}
fn default_identity_header() -> String {
    "X-Firebase-UID".to_string()
}
fn default_geocoder_endpoint() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}
fn default_user_agent() -> String {
    concat!("nearby/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Config {
    /// Parse a TOML document; missing fields take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, NearbyError> {
        Ok(toml::from_str(content)?)
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("nearby").join("config.toml"))
}

/// Database path: `database_path` from config, else ~/.config/nearby/nearby.db (Linux)
pub fn get_database_path(config: &Config) -> PathBuf {
    if let Some(path) = config.database_path.as_deref().filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nearby")
        .join("nearby.db")
}

pub fn load_config() -> Result<Config, NearbyError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match Config::from_toml(&content) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    Ok(Config::default())
}

pub fn generate_config_sample() -> Result<(), NearbyError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            eprintln!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let sample = Config::default();
        let toml_content = toml::to_string_pretty(&sample)
            .map_err(|e| NearbyError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, toml_content)
            .map_err(|e| NearbyError::Config(format!("Failed to write config file: {}", e)))?;
        println!("Generated config file at: {}", path.display());
    } else {
        return Err(NearbyError::Config(
            "Cannot determine config directory".to_string(),
        ));
    }

    Ok(())
}
