//! Configuration service implementation.
//!
//! Loads the client configuration from the configuration file
//! (~/.config/cropmate/config.toml), with environment overrides.

use crate::paths::CropmatePaths;
use cropmate_core::config::ClientConfig;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Environment override for the API base URL.
pub const ENV_API_URL: &str = "CROPMATE_API_URL";
/// Environment override for the request timeout.
pub const ENV_TIMEOUT_SECS: &str = "CROPMATE_TIMEOUT_SECS";

/// Configuration service that loads and caches the client configuration.
///
/// Reads config.toml once and caches it to avoid repeated file I/O. A
/// missing file is created with defaults; a malformed file falls back to
/// defaults rather than failing startup.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Creates a service reading from the default config path.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading from an explicit path. Used by tests.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the client configuration, loading from file if not cached.
    pub fn get_config(&self) -> ClientConfig {
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load_config();

        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }

    fn config_path(&self) -> Option<PathBuf> {
        match &self.path {
            Some(path) => Some(path.clone()),
            None => CropmatePaths::config_file().ok(),
        }
    }

    fn load_config(&self) -> ClientConfig {
        let mut config = match self.config_path() {
            Some(path) => Self::load_or_create(&path),
            None => {
                tracing::warn!(target: "config", "Config path unavailable, using defaults");
                ClientConfig::default()
            }
        };
        apply_env_overrides(&mut config);
        config
    }

    fn load_or_create(path: &PathBuf) -> ClientConfig {
        if !path.exists() {
            let default_config = ClientConfig::default();
            if let Err(e) = Self::write_default(path, &default_config) {
                tracing::warn!(target: "config", "Failed to write default config: {}", e);
            }
            return default_config;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(
                        target: "config",
                        "Malformed config at {}, using defaults: {}",
                        path.display(),
                        e
                    );
                    ClientConfig::default()
                }
            },
            Err(e) => {
                tracing::warn!(target: "config", "Failed to read config: {}", e);
                ClientConfig::default()
            }
        }
    }

    fn write_default(path: &PathBuf, config: &ClientConfig) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_env_overrides(config: &mut ClientConfig) {
    if let Ok(url) = std::env::var(ENV_API_URL) {
        if !url.trim().is_empty() {
            config.api_base_url = url;
        }
    }
    if let Ok(secs) = std::env::var(ENV_TIMEOUT_SECS) {
        match secs.parse::<u64>() {
            Ok(parsed) if parsed > 0 => config.request_timeout_secs = parsed,
            _ => {
                tracing::warn!(target: "config", "Ignoring invalid {}: {}", ENV_TIMEOUT_SECS, secs)
            }
        }
    }
}
