//! Configuration service implementation.
//!
//! Loads `ShowcaseConfig` from `config.toml`, either at an explicit path or in
//! the platform config directory, and caches it.

use showcase_core::config::ShowcaseConfig;
use showcase_core::error::{Result, ShowcaseError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::paths::ShowcasePaths;

/// Configuration service that loads and caches the showcase configuration.
///
/// A missing or empty file yields the default configuration; a malformed one
/// is an error.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    /// Explicit config file, or `None` for the platform default
    path: Option<PathBuf>,
    config: Arc<RwLock<Option<ShowcaseConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the platform default location.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service reading `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::default(),
        }
    }

    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => ShowcasePaths::config_file().map_err(|e| ShowcaseError::config(e.to_string())),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<ShowcaseConfig> {
        {
            let cached = self
                .config
                .read()
                .map_err(|_| ShowcaseError::internal("config cache lock poisoned"))?;
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = Self::load_from(&self.config_path()?)?;

        let mut cached = self
            .config
            .write()
            .map_err(|_| ShowcaseError::internal("config cache lock poisoned"))?;
        *cached = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut cached) = self.config.write() {
            *cached = None;
        }
    }

    /// Writes `config` to the service's path, creating parent directories.
    pub fn save(&self, config: &ShowcaseConfig) -> Result<PathBuf> {
        let path = self.config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, Self::render(config)?)?;
        self.invalidate_cache();
        tracing::info!("[ConfigService] Saved configuration to {:?}", path);
        Ok(path)
    }

    /// Serializes `config` as TOML.
    pub fn render(config: &ShowcaseConfig) -> Result<String> {
        Ok(toml::to_string_pretty(config)?)
    }

    fn load_from(path: &Path) -> Result<ShowcaseConfig> {
        if !path.exists() {
            tracing::info!(
                "[ConfigService] No config at {:?}, using defaults",
                path
            );
            return Ok(ShowcaseConfig::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(ShowcaseConfig::default());
        }

        let config: ShowcaseConfig = toml::from_str(&content).map_err(|e| {
            ShowcaseError::config(format!("Failed to parse {:?}: {}", path, e))
        })?;
        tracing::debug!("[ConfigService] Loaded configuration from {:?}", path);
        Ok(config)
    }
}
