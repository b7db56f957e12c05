//! lpk-archive: named snapshots of complete voyage reports.

pub mod store;

pub use store::ReportArchive;

pub type ArchiveResult<T> = Result<T, ArchiveError>;

#[derive(thiserror::Error, Debug)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archived report is not usable: {0}")]
    Project(#[from] lpk_project::ProjectError),

    #[error("Report not found: {id}")]
    ReportNotFound { id: String },

    #[error("Archive is empty")]
    Empty,

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
}
