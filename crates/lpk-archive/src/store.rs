//! Report archive storage API.
//!
//! One `<id>.json` file per [`SavedReport`] under the archive root.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use lpk_core::RecordId;
use lpk_project::{ProjectError, SavedReport, VoyageSnapshot, migrate_to_latest, validate_snapshot};
use tracing::{info, warn};

use crate::{ArchiveError, ArchiveResult};

#[derive(Clone, Debug)]
pub struct ReportArchive {
    root_dir: PathBuf,
}

impl ReportArchive {
    pub fn new(root_dir: PathBuf) -> ArchiveResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Archive kept next to a working report file, in `.lpk/archive`.
    pub fn beside(report_path: &Path) -> ArchiveResult<Self> {
        let report_dir = report_path
            .parent()
            .ok_or_else(|| ArchiveError::InvalidPath {
                message: "report path has no parent directory".to_string(),
            })?;
        Self::new(report_dir.join(".lpk").join("archive"))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Ids name files directly under the root; anything that could leave
    /// it is rejected.
    fn report_path(&self, id: &RecordId) -> ArchiveResult<PathBuf> {
        let raw = id.as_str();
        if raw.is_empty() || raw.contains(['/', '\\']) || raw.contains("..") {
            return Err(ArchiveError::InvalidPath {
                message: format!("'{raw}' is not a valid report id"),
            });
        }
        Ok(self.root_dir.join(format!("{raw}.json")))
    }

    pub fn has_report(&self, id: &RecordId) -> bool {
        self.report_path(id).is_ok_and(|path| path.exists())
    }

    /// Archive a copy of `data` under a fresh id.
    pub fn save_new(&self, name: &str, data: &VoyageSnapshot) -> ArchiveResult<SavedReport> {
        validate_snapshot(data).map_err(ProjectError::from)?;
        let report = SavedReport {
            id: RecordId::generate(),
            name: name.to_string(),
            last_modified: self.next_timestamp()?,
            data: data.clone(),
        };
        self.write(&report)?;
        info!(id = %report.id, name = %report.name, "archived report");
        Ok(report)
    }

    /// Replace the data of an existing archived report, keeping its name.
    pub fn overwrite(&self, id: &RecordId, data: &VoyageSnapshot) -> ArchiveResult<SavedReport> {
        validate_snapshot(data).map_err(ProjectError::from)?;
        let existing = self.read(id)?;
        let report = SavedReport {
            last_modified: self.next_timestamp()?,
            data: data.clone(),
            ..existing
        };
        self.write(&report)?;
        info!(id = %report.id, name = %report.name, "overwrote archived report");
        Ok(report)
    }

    /// Load an archived report, upgrading its data to the current format.
    pub fn load(&self, id: &RecordId) -> ArchiveResult<SavedReport> {
        let mut report = self.read(id)?;
        report.data = migrate_to_latest(report.data)?;
        validate_snapshot(&report.data).map_err(ProjectError::from)?;
        Ok(report)
    }

    /// All archived reports, most recently modified first.
    ///
    /// Files that do not parse are skipped with a warning.
    pub fn list(&self) -> ArchiveResult<Vec<SavedReport>> {
        let mut reports = Vec::new();

        if !self.root_dir.exists() {
            return Ok(reports);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match read_report(&path) {
                Ok(report) => reports.push(report),
                Err(err) => warn!(path = %path.display(), error = %err, "skipping unreadable archive entry"),
            }
        }

        reports.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        Ok(reports)
    }

    /// The most recently modified report: where a new voyage continues from.
    pub fn latest(&self) -> ArchiveResult<SavedReport> {
        let newest = self.list()?.into_iter().next().ok_or(ArchiveError::Empty)?;
        self.load(&newest.id)
    }

    pub fn delete(&self, id: &RecordId) -> ArchiveResult<()> {
        let path = self.report_path(id)?;
        if !path.exists() {
            return Err(ArchiveError::ReportNotFound { id: id.to_string() });
        }
        fs::remove_file(path)?;
        info!(id = %id, "deleted archived report");
        Ok(())
    }

    fn read(&self, id: &RecordId) -> ArchiveResult<SavedReport> {
        let path = self.report_path(id)?;
        if !path.exists() {
            return Err(ArchiveError::ReportNotFound { id: id.to_string() });
        }
        read_report(&path)
    }

    fn write(&self, report: &SavedReport) -> ArchiveResult<()> {
        let json = serde_json::to_string_pretty(report)?;
        fs::write(self.report_path(&report.id)?, json)?;
        Ok(())
    }

    /// Wall-clock milliseconds, bumped past the newest entry so that
    /// modification order survives saves within the same millisecond.
    fn next_timestamp(&self) -> ArchiveResult<i64> {
        let now = Utc::now().timestamp_millis();
        let newest = self
            .list()?
            .first()
            .map_or(i64::MIN, |report| report.last_modified);
        Ok(now.max(newest.saturating_add(1)))
    }
}

fn read_report(path: &Path) -> ArchiveResult<SavedReport> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
