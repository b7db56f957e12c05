//! Seeding a new voyage from an archived one.

use lpk_core::{Coerce, FieldValue, Real, RecordId, round_to};
use lpk_project::{
    FreshWaterData, FreshWaterEntry, ReportHeader, SupplyMethod, VoyageSnapshot,
    default_crew_list,
};
use tracing::info;

use crate::roster::{sync_roster, sync_safety_signature};

/// Header and fresh-water page of the voyage that follows an archived one.
#[derive(Debug, Clone, PartialEq)]
pub struct NextVoyage {
    pub header: ReportHeader,
    pub fresh_water: FreshWaterData,
}

impl NextVoyage {
    /// Full working report for the new voyage: legs, cargo log, safety
    /// checklist and roster start empty, with the roster's mirrored rows
    /// filled from the carried header.
    pub fn into_snapshot(self) -> VoyageSnapshot {
        let mut snapshot = VoyageSnapshot {
            header: self.header,
            fresh_water: self.fresh_water,
            crew: default_crew_list(),
            ..VoyageSnapshot::default()
        };
        snapshot.crew = sync_roster(&snapshot.header, &snapshot.crew);
        snapshot.safety = sync_safety_signature(&snapshot.header, &snapshot.safety);
        snapshot
    }
}

/// The previous voyage's ending fresh-water reserve: first entry's reserve
/// before filling, plus everything filled, minus everything consumed.
pub fn closing_reserve(fresh_water: &FreshWaterData) -> Real {
    let entries = &fresh_water.entries;
    let opening = entries.first().map_or(0.0, |e| e.reserve_before.coerce());
    let filled: Real = entries.iter().map(|e| e.amount_filled.coerce()).sum();
    let consumed: Real = entries.iter().map(|e| e.amount_consumed.coerce()).sum();
    opening + filled - consumed
}

/// Carry the ship's identity and the fresh-water reserve forward.
///
/// The new voyage gets a single fresh-water row whose reserve before filling
/// is the previous voyage's closing reserve (two decimals). Tank capacity and
/// dock reserve are copied; everything else on the page starts blank.
pub fn seed_next_voyage(previous: &VoyageSnapshot) -> NextVoyage {
    let old = &previous.header;
    let header = ReportHeader {
        is_first_entry: Some(false),
        previous_voyage_number: Some(old.voyage_number.clone()),
        ship_name: old.ship_name.clone(),
        callsign: old.callsign.clone(),
        ship_type: old.ship_type.clone(),
        dwt: old.dwt.clone(),
        service: old.service.clone(),
        company: old.company.clone(),
        captain_name: old.captain_name.clone(),
        captain_id: old.captain_id.clone(),
        chief_officer_name: old.chief_officer_name.clone(),
        chief_officer_id: old.chief_officer_id.clone(),
        logo_left: old.logo_left.clone(),
        logo_right: old.logo_right.clone(),
        ..ReportHeader::default()
    };

    let old_water = &previous.fresh_water;
    let reserve = round_to(closing_reserve(old_water), 2);

    let fresh_water = FreshWaterData {
        tank_capacity: old_water.tank_capacity.clone(),
        dock_reserve: if old_water.dock_reserve.is_placeholder() {
            FieldValue::dash()
        } else {
            old_water.dock_reserve.clone()
        },
        entries: vec![FreshWaterEntry {
            id: RecordId::generate(),
            no: 1,
            reserve_before: FieldValue::Number(reserve),
            supply_method: SupplyMethod::Quay,
            ..FreshWaterEntry::default()
        }],
        ..FreshWaterData::default()
    };

    info!(
        previous_voyage = %old.voyage_number,
        opening_reserve = reserve,
        "seeded next voyage"
    );

    NextVoyage {
        header,
        fresh_water,
    }
}
