//! Schema migration framework.

use crate::ProjectError;
use crate::schema::{VoyageSnapshot, default_crew_list};

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut snapshot: VoyageSnapshot) -> Result<VoyageSnapshot, ProjectError> {
    while snapshot.version < LATEST_VERSION {
        snapshot = migrate_one_version(snapshot)?;
    }
    Ok(snapshot)
}

fn migrate_one_version(snapshot: VoyageSnapshot) -> Result<VoyageSnapshot, ProjectError> {
    match snapshot.version {
        0 => migrate_v0_to_v1(snapshot),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Unversioned bundles come from the browser-based tool. Some of them carry a
/// duplicated "Cadet Deck" roster row; only the first one is kept.
fn migrate_v0_to_v1(mut snapshot: VoyageSnapshot) -> Result<VoyageSnapshot, ProjectError> {
    if snapshot.crew.is_empty() {
        snapshot.crew = default_crew_list();
    } else {
        let mut seen_cadet = false;
        snapshot.crew.retain(|member| {
            if member.office != "Cadet Deck" {
                return true;
            }
            let keep = !seen_cadet;
            seen_cadet = true;
            keep
        });
    }

    snapshot.version = 1;
    Ok(snapshot)
}
