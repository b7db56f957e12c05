//! Application configuration from `lpk.toml` and the environment.

use std::path::{Path, PathBuf};

use lpk_core::Real;
use lpk_project::DEFAULT_PROVISIONS;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

pub const ARCHIVE_DIR_VAR: &str = "LPK_ARCHIVE_DIR";
pub const DEFAULT_PROVISIONS_VAR: &str = "LPK_DEFAULT_PROVISIONS";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where archived reports are kept.
    pub archive_dir: PathBuf,
    /// Provisions (tons) prefilled on new legs.
    pub default_provisions: Real,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            archive_dir: PathBuf::from("lpk-archive"),
            default_provisions: DEFAULT_PROVISIONS,
        }
    }
}

impl AppConfig {
    /// Read the config file when one is given and exists, then apply
    /// environment overrides.
    pub fn resolve(path: Option<&Path>) -> AppResult<Self> {
        let config = match path {
            Some(path) if path.exists() => load_config(path)?,
            _ => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `LPK_ARCHIVE_DIR` / `LPK_DEFAULT_PROVISIONS` from `lookup`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        if let Some(dir) = lookup(ARCHIVE_DIR_VAR) {
            self.archive_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(DEFAULT_PROVISIONS_VAR) {
            self.default_provisions = raw.trim().parse().map_err(|e| AppError::Config {
                message: format!("{DEFAULT_PROVISIONS_VAR}={raw:?} is not a number: {e}"),
            })?;
        }
        Ok(self)
    }
}

pub fn load_config(path: &Path) -> AppResult<AppConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| AppError::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    toml::from_str(&contents).map_err(|e| AppError::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })
}
