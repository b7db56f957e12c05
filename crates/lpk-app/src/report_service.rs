//! Working-report files and the report archive.

use std::path::Path;

use chrono::{DateTime, Utc};
use lpk_archive::ReportArchive;
use lpk_calc::seed_next_voyage;
use lpk_core::RecordId;
use lpk_project::{SavedReport, VoyageSnapshot};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Archive listing row.
#[derive(Debug, Clone)]
pub struct ArchiveSummary {
    pub id: RecordId,
    pub name: String,
    pub last_modified: i64,
    pub voyage_number: String,
    pub ship_name: String,
    pub leg_count: usize,
}

impl ArchiveSummary {
    /// `lastModified` as a UTC timestamp, when it is in range.
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.last_modified)
    }
}

impl From<&SavedReport> for ArchiveSummary {
    fn from(report: &SavedReport) -> Self {
        Self {
            id: report.id.clone(),
            name: report.name.clone(),
            last_modified: report.last_modified,
            voyage_number: report.data.header.voyage_number.clone(),
            ship_name: report.data.header.ship_name.clone(),
            leg_count: report.data.legs.len(),
        }
    }
}

/// Load a working report (YAML, or JSON by extension), migrating older
/// formats.
pub fn load_report(path: &Path) -> AppResult<VoyageSnapshot> {
    if !path.exists() {
        return Err(AppError::ReportFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }
    Ok(lpk_project::load(path)?)
}

pub fn save_report(path: &Path, snapshot: &VoyageSnapshot) -> AppResult<()> {
    lpk_project::save(path, snapshot)?;
    info!(path = %path.display(), legs = snapshot.legs.len(), "saved report");
    Ok(())
}

pub fn validate_report(snapshot: &VoyageSnapshot) -> AppResult<()> {
    lpk_project::validate_snapshot(snapshot)?;
    Ok(())
}

pub fn archive_report(
    archive: &ReportArchive,
    name: &str,
    snapshot: &VoyageSnapshot,
) -> AppResult<ArchiveSummary> {
    let saved = archive.save_new(name, snapshot)?;
    Ok(ArchiveSummary::from(&saved))
}

/// Archived reports, newest first.
pub fn list_archived(archive: &ReportArchive) -> AppResult<Vec<ArchiveSummary>> {
    Ok(archive.list()?.iter().map(ArchiveSummary::from).collect())
}

pub fn load_archived(archive: &ReportArchive, id: &RecordId) -> AppResult<SavedReport> {
    Ok(archive.load(id)?)
}

/// Working report for the voyage after an archived one: `from`, or the most
/// recently modified archive when not given.
pub fn next_voyage(archive: &ReportArchive, from: Option<&RecordId>) -> AppResult<VoyageSnapshot> {
    let previous = match from {
        Some(id) => archive.load(id)?,
        None => archive.latest().map_err(|err| match err {
            lpk_archive::ArchiveError::Empty => AppError::Archive(
                "no archived report to continue from".to_string(),
            ),
            other => other.into(),
        })?,
    };
    info!(id = %previous.id, name = %previous.name, "starting next voyage");
    Ok(seed_next_voyage(&previous.data).into_snapshot())
}
