//! Crew roster upkeep.
//!
//! The captain and chief officer rows mirror the report header. The header
//! is the source of truth: syncing copies header to roster, never back.

use lpk_project::{
    CAPTAIN_OFFICE, CHIEF_OFFICER_OFFICE, CrewMember, ReportHeader, SafetyData,
};
use tracing::debug;

use crate::error::{CalcError, CalcResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrewField {
    Name,
    StaffId,
    PostedOn,
    TransferredOn,
}

impl CrewField {
    /// Name and staff id of the mirrored rows come from the header.
    fn is_mirrored(self) -> bool {
        matches!(self, CrewField::Name | CrewField::StaffId)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrewEdit {
    pub field: CrewField,
    pub value: String,
}

impl CrewEdit {
    pub fn new(field: CrewField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

fn is_mirrored_office(office: &str) -> bool {
    office == CAPTAIN_OFFICE || office == CHIEF_OFFICER_OFFICE
}

/// Copy the header's captain and chief officer into roster rows 0 and 1.
///
/// A row is only touched when it still holds its fixed office; a roster
/// that was reordered by hand is left alone.
pub fn sync_roster(header: &ReportHeader, crew: &[CrewMember]) -> Vec<CrewMember> {
    let mut out = crew.to_vec();
    let slots = [
        (0, CAPTAIN_OFFICE, &header.captain_name, &header.captain_id),
        (
            1,
            CHIEF_OFFICER_OFFICE,
            &header.chief_officer_name,
            &header.chief_officer_id,
        ),
    ];
    for (index, office, name, id) in slots {
        if let Some(row) = out.get_mut(index).filter(|row| row.office == office) {
            row.name = name.clone();
            row.staff_id = id.clone();
        }
    }
    out
}

/// Mirror the chief officer into the safety page's signature block.
pub fn sync_safety_signature(header: &ReportHeader, safety: &SafetyData) -> SafetyData {
    SafetyData {
        chief_officer_name: header.chief_officer_name.clone(),
        chief_officer_id: header.chief_officer_id.clone(),
        ..safety.clone()
    }
}

/// Edit one roster cell. Text is stored upper-cased.
///
/// Name and staff id of the captain and chief officer rows are refused;
/// change them on the header instead.
pub fn edit_crew_member(
    crew: &[CrewMember],
    index: usize,
    edit: CrewEdit,
) -> CalcResult<Vec<CrewMember>> {
    let len = crew.len();
    let row = crew.get(index).ok_or(CalcError::IndexOob {
        what: "crew",
        index,
        len,
    })?;

    if edit.field.is_mirrored() && is_mirrored_office(&row.office) {
        return Err(CalcError::MirroredRosterRow {
            office: row.office.clone(),
        });
    }

    let mut out = crew.to_vec();
    let row = &mut out[index];
    let value = edit.value.to_uppercase();
    match edit.field {
        CrewField::Name => row.name = value,
        CrewField::StaffId => row.staff_id = value,
        CrewField::PostedOn => row.posted_on = Some(value),
        CrewField::TransferredOn => row.transferred_on = Some(value),
    }
    debug!(index, office = %out[index].office, "edited crew row");
    Ok(out)
}

/// Crew counted on board: rows with a name that is not the dash placeholder.
pub fn crew_on_board(crew: &[CrewMember]) -> usize {
    crew.iter()
        .filter(|member| {
            let name = member.name.trim();
            !name.is_empty() && name != "-"
        })
        .count()
}
