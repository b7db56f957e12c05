//! lpk-project: canonical voyage report format and validation.

pub mod migrate;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_snapshot};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage encoding of a working report file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// `.json` means JSON; anything else is treated as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

pub fn load_yaml(path: &Path) -> ProjectResult<VoyageSnapshot> {
    let content = std::fs::read_to_string(path)?;
    let snapshot: VoyageSnapshot = serde_yaml::from_str(&content)?;
    finish_load(snapshot)
}

pub fn save_yaml(path: &Path, snapshot: &VoyageSnapshot) -> ProjectResult<()> {
    validate_snapshot(snapshot)?;
    let content = serde_yaml::to_string(snapshot)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<VoyageSnapshot> {
    let content = std::fs::read_to_string(path)?;
    let snapshot: VoyageSnapshot = serde_json::from_str(&content)?;
    finish_load(snapshot)
}

pub fn save_json(path: &Path, snapshot: &VoyageSnapshot) -> ProjectResult<()> {
    validate_snapshot(snapshot)?;
    let content = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a working report, picking the encoding from the file extension.
pub fn load(path: &Path) -> ProjectResult<VoyageSnapshot> {
    match Format::from_path(path) {
        Format::Json => load_json(path),
        Format::Yaml => load_yaml(path),
    }
}

/// Save a working report, picking the encoding from the file extension.
pub fn save(path: &Path, snapshot: &VoyageSnapshot) -> ProjectResult<()> {
    match Format::from_path(path) {
        Format::Json => save_json(path, snapshot),
        Format::Yaml => save_yaml(path, snapshot),
    }
}

fn finish_load(snapshot: VoyageSnapshot) -> ProjectResult<VoyageSnapshot> {
    let from_version = snapshot.version;
    let snapshot = migrate_to_latest(snapshot)?;
    if from_version != snapshot.version {
        tracing::info!(from_version, to_version = snapshot.version, "migrated report");
    }
    validate_snapshot(&snapshot)?;
    Ok(snapshot)
}
