//! Application configuration persistence.
//!
//! Stores the configuration in the platform-specific config directory:
//! - Linux/macOS: ~/.config/vestibule/config.json
//! - Windows: %APPDATA%/vestibule/config.json

use std::path::PathBuf;

use tokio::fs;

use vestibule_domain::AppConfig;

/// Error type for configuration persistence.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Repository for application configuration persistence.
#[derive(Debug, Clone, Default)]
pub struct ConfigRepository {
    path: Option<PathBuf>,
}

impl ConfigRepository {
    /// Creates a repository using the platform config directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { path: None }
    }

    /// Creates a repository reading and writing a fixed file.
    #[must_use]
    pub const fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// Returns the path the configuration is stored at, if resolvable.
    #[must_use]
    pub fn config_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(|| {
            dirs::config_dir().map(|p| p.join("vestibule").join("config.json"))
        })
    }

    /// Loads the configuration from disk.
    ///
    /// Returns the default configuration if the file doesn't exist.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub async fn load(&self) -> Result<AppConfig, ConfigError> {
        let Some(path) = self.config_path() else {
            return Ok(AppConfig::default());
        };

        if !path.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read(&path).await?;
        let config = serde_json::from_slice(&content)?;
        Ok(config)
    }

    /// Saves the configuration to disk.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the config directory cannot be
    /// determined or the file cannot be written.
    pub async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let Some(path) = self.config_path() else {
            return Err(ConfigError::NoConfigDir);
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_vec_pretty(config)?;
        fs::write(&path, content).await?;

        Ok(())
    }
}
