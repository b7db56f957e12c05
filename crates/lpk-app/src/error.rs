//! Error types for the lpk-app service layer.

use std::path::PathBuf;

use lpk_calc::CalcError;

/// Unified error for every frontend.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Report error: {0}")]
    Project(String),

    #[error("Failed to read report file: {path}")]
    ReportFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write report file: {path}")]
    ReportFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Report validation failed: {0}")]
    Validation(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("{0}")]
    Calc(#[from] CalcError),

    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<lpk_project::ProjectError> for AppError {
    fn from(err: lpk_project::ProjectError) -> Self {
        match err {
            lpk_project::ProjectError::Validation(inner) => AppError::Validation(inner.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<lpk_project::ValidationError> for AppError {
    fn from(err: lpk_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<lpk_archive::ArchiveError> for AppError {
    fn from(err: lpk_archive::ArchiveError) -> Self {
        match err {
            lpk_archive::ArchiveError::ReportNotFound { id } => AppError::NotFound {
                what: "Archived report",
                id,
            },
            other => AppError::Archive(other.to_string()),
        }
    }
}
