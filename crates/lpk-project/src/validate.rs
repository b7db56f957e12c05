//! Snapshot validation logic.

use crate::schema::VoyageSnapshot;
use lpk_core::RecordId;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_snapshot(snapshot: &VoyageSnapshot) -> Result<(), ValidationError> {
    if snapshot.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: snapshot.version,
        });
    }

    ensure_unique(snapshot.legs.iter().map(|leg| &leg.id), "legs")?;
    ensure_unique(
        snapshot.fresh_water.entries.iter().map(|entry| &entry.id),
        "fresh water entries",
    )?;
    ensure_unique(snapshot.cargo_logs.iter().map(|log| &log.id), "cargo logs")?;

    Ok(())
}

/// Rows saved before an identifier was assigned carry an empty id; those are
/// not compared.
fn ensure_unique<'a>(
    ids: impl Iterator<Item = &'a RecordId>,
    context: &str,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for id in ids.filter(|id| !id.is_empty()) {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId {
                id: id.to_string(),
                context: context.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FreshWaterEntry, VoyageLeg};

    #[test]
    fn default_snapshot_is_valid() {
        validate_snapshot(&VoyageSnapshot::default()).unwrap();
    }

    #[test]
    fn duplicate_leg_id_rejected() {
        let leg = VoyageLeg {
            id: RecordId::from("a"),
            ..VoyageLeg::default()
        };
        let snapshot = VoyageSnapshot {
            legs: vec![leg.clone(), leg],
            ..VoyageSnapshot::default()
        };
        let err = validate_snapshot(&snapshot).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateId { ref context, .. } if context == "legs"));
    }

    #[test]
    fn empty_ids_are_not_compared() {
        let mut snapshot = VoyageSnapshot::default();
        snapshot.fresh_water.entries = vec![FreshWaterEntry::default(), FreshWaterEntry::default()];
        validate_snapshot(&snapshot).unwrap();
    }

    #[test]
    fn future_version_rejected() {
        let snapshot = VoyageSnapshot {
            version: 99,
            ..VoyageSnapshot::default()
        };
        assert!(matches!(
            validate_snapshot(&snapshot),
            Err(ValidationError::UnsupportedVersion { version: 99 })
        ));
    }
}
