//! Unified path management for RADIX files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/radix/             # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/radix/        # Data directory (overridable)
//! ├── users/                   # One versioned TOML file per user
//! │   └── <username>.toml
//! ├── exports/                 # Plain-text session and history exports
//! └── logs/                    # Rolling application logs
//!     └── radix.log.YYYY-MM-DD
//! ```

use radix_core::RadixError;
use radix_core::config::RadixConfig;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "radix";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform exposes no config or data directory.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for RadixError {
    fn from(e: PathError) -> Self {
        RadixError::config(e.to_string())
    }
}

/// Platform default locations.
pub struct RadixPaths;

impl RadixPaths {
    /// `~/.config/radix` on Linux, the platform equivalent elsewhere.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// `~/.local/share/radix` on Linux, the platform equivalent elsewhere.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

/// Directories used by one run, rooted at a single data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    data_dir: PathBuf,
    export_dir: PathBuf,
}

impl DataLayout {
    /// Exports go to `<data_dir>/exports`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            export_dir: data_dir.join("exports"),
            data_dir,
        }
    }

    /// Applies the `data_dir` and `export_dir` overrides from `config`,
    /// falling back to the platform data directory.
    pub fn from_config(config: &RadixConfig) -> Result<Self, PathError> {
        let data_dir = match &config.data_dir {
            Some(dir) => dir.clone(),
            None => RadixPaths::data_dir()?,
        };

        let mut layout = Self::new(data_dir);
        if let Some(export_dir) = &config.export_dir {
            layout.export_dir = export_dir.clone();
        }
        Ok(layout)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn users_dir(&self) -> PathBuf {
        self.data_dir.join("users")
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_defaults_under_data_dir() {
        let layout = DataLayout::new("/tmp/radix-data");

        assert_eq!(layout.users_dir(), PathBuf::from("/tmp/radix-data/users"));
        assert_eq!(layout.export_dir(), Path::new("/tmp/radix-data/exports"));
        assert_eq!(layout.logs_dir(), PathBuf::from("/tmp/radix-data/logs"));
    }

    #[test]
    fn test_layout_honours_config_overrides() {
        let config = RadixConfig {
            data_dir: Some(PathBuf::from("/srv/radix")),
            export_dir: Some(PathBuf::from("/srv/out")),
            ..RadixConfig::default()
        };

        let layout = DataLayout::from_config(&config).unwrap();

        assert_eq!(layout.data_dir(), Path::new("/srv/radix"));
        assert_eq!(layout.export_dir(), Path::new("/srv/out"));
    }
}
