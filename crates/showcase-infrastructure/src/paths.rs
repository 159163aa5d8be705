//! Path resolution for showcase configuration files.
//!
//! ```text
//! ~/.config/cx-showcase/       # Config directory (platform config dir)
//! └── config.toml              # Showcase configuration
//! ```

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

pub struct ShowcasePaths;

impl ShowcasePaths {
    const APP_DIR: &'static str = "cx-showcase";

    /// Returns the showcase configuration directory (e.g. `~/.config/cx-showcase/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_lives_in_config_dir() {
        if let (Ok(dir), Ok(file)) = (ShowcasePaths::config_dir(), ShowcasePaths::config_file()) {
            assert_eq!(file.parent(), Some(dir.as_path()));
            assert!(dir.ends_with("cx-showcase"));
        }
    }
}
