//! Unified path management for cropmate configuration files.
//!
//! This ensures consistency across all platforms (Linux, macOS, Windows).

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for cropmate.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/cropmate/          # Config directory
/// ├── config.toml              # Application configuration
/// └── credentials.json         # Auth token + cached profile
/// ```
pub struct CropmatePaths;

impl CropmatePaths {
    /// Returns the cropmate configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/cropmate/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("cropmate"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the credentials file.
    ///
    /// # Security Note
    ///
    /// The credential store creates this file with mode 600 (user
    /// read/write only) on Unix systems.
    pub fn credentials_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("credentials.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = CropmatePaths::config_dir().unwrap();
        assert!(config_dir.ends_with("cropmate"));
    }

    #[test]
    fn test_config_file() {
        let config_file = CropmatePaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = CropmatePaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_credentials_file() {
        let credentials_file = CropmatePaths::credentials_file().unwrap();
        assert!(credentials_file.ends_with("credentials.json"));
        let config_dir = CropmatePaths::config_dir().unwrap();
        assert!(credentials_file.starts_with(&config_dir));
    }
}
