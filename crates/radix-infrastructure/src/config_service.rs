//! Configuration loading.
//!
//! Reads `RadixConfig` from `~/.config/radix/config.toml`, or from an
//! explicit path given on the command line.

use crate::paths::RadixPaths;
use crate::storage::AtomicTomlFile;
use radix_core::RadixError;
use radix_core::config::RadixConfig;
use radix_core::error::Result;
use std::path::{Path, PathBuf};

pub struct ConfigService;

impl ConfigService {
    /// Loads the configuration.
    ///
    /// With `explicit = None` the platform config file is used and a
    /// missing or blank file yields the defaults. An explicit path must
    /// exist.
    ///
    /// # Errors
    ///
    /// - `RadixError::Config` for a missing explicit file or invalid values
    /// - `RadixError::Serialization` if the file is not valid TOML
    pub fn load(explicit: Option<&Path>) -> Result<RadixConfig> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(RadixError::config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => RadixPaths::config_file()?,
        };

        Self::load_from(path)
    }

    /// Loads `path`, falling back to defaults when it is missing or blank.
    pub fn load_from(path: PathBuf) -> Result<RadixConfig> {
        let config = AtomicTomlFile::<RadixConfig>::new(path.clone())
            .load()
            .map_err(|e| match RadixError::from(e) {
                RadixError::Serialization { format, message } => RadixError::Serialization {
                    format,
                    message: format!("{}: {}", path.display(), message),
                },
                other => other,
            })?;

        let config = match config {
            Some(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                config
            }
            None => {
                tracing::debug!("No config at {}, using defaults", path.display());
                RadixConfig::default()
            }
        };

        config.validate()?;
        Ok(config)
    }
}
