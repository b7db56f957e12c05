//! Shared application service layer for voyage reports.
//!
//! Frontends go through this crate for loading and saving working reports,
//! editing them with derived fields kept current, and archiving finished
//! voyages.

pub mod config;
pub mod error;
pub mod report_service;
pub mod session;

pub use config::{AppConfig, load_config};
pub use error::{AppError, AppResult};
pub use report_service::{
    ArchiveSummary, archive_report, list_archived, load_archived, load_report, next_voyage,
    save_report, validate_report,
};
pub use session::VoyageSession;
