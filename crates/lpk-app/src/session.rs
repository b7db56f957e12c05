//! Single-user editing session over one working report.
//!
//! Each edit runs to completion, including every derivation it affects,
//! before the next one is accepted. Callers never see a half-updated report.

use lpk_calc::{
    CrewEdit, FreshWaterEdit, LegEdit, ReportTotals, aggregate_report, apply_leg_edit,
    compute_underway, derive_leg_chain, edit_crew_member, new_leg, recalculate_fresh_water_list,
    recompute_consumption, sync_roster, sync_safety_signature,
};
use lpk_core::{Real, RecordId};
use lpk_project::{CargoActivity, ReportHeader, SafetyData, VoyageLeg, VoyageSnapshot};
use tracing::info;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct VoyageSession {
    snapshot: VoyageSnapshot,
    default_provisions: Real,
}

impl VoyageSession {
    pub fn new(snapshot: VoyageSnapshot) -> Self {
        Self {
            snapshot,
            default_provisions: lpk_project::DEFAULT_PROVISIONS,
        }
    }

    /// Provisions prefilled on legs added from now on.
    pub fn with_default_provisions(mut self, provisions: Real) -> Self {
        self.default_provisions = provisions;
        self
    }

    pub fn snapshot(&self) -> &VoyageSnapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> VoyageSnapshot {
        self.snapshot
    }

    /// Re-run every derivation over the whole report.
    pub fn rederive_all(&mut self) {
        let s = &mut self.snapshot;
        s.legs = derive_leg_chain(&s.legs);
        s.fresh_water.entries = recompute_consumption(&s.fresh_water.entries);
        s.crew = sync_roster(&s.header, &s.crew);
        s.safety = sync_safety_signature(&s.header, &s.safety);
    }

    // ---- legs ----

    fn leg_index(&self, id: &RecordId) -> AppResult<usize> {
        self.snapshot
            .legs
            .iter()
            .position(|leg| &leg.id == id)
            .ok_or_else(|| AppError::NotFound {
                what: "Leg",
                id: id.to_string(),
            })
    }

    fn previous_leg(&self, index: usize) -> Option<&VoyageLeg> {
        index.checked_sub(1).and_then(|i| self.snapshot.legs.get(i))
    }

    /// Cargo on board runs through the chain, so any leg change re-derives
    /// the legs after it.
    fn rederive_legs(&mut self) {
        self.snapshot.legs = derive_leg_chain(&self.snapshot.legs);
    }

    /// Append a leg continuing from the last one.
    pub fn add_leg(&mut self) -> RecordId {
        let legs = &self.snapshot.legs;
        let mut leg = new_leg(legs.last(), legs.len() as u32 + 1);
        leg.provisions = self.default_provisions;
        let id = leg.id.clone();
        self.snapshot.legs.push(leg);
        self.rederive_legs();
        info!(id = %id, legs = self.snapshot.legs.len(), "added leg");
        id
    }

    pub fn edit_leg(&mut self, id: &RecordId, edit: LegEdit) -> AppResult<&VoyageLeg> {
        let index = self.leg_index(id)?;
        let edited = apply_leg_edit(&self.snapshot.legs[index], edit, self.previous_leg(index));
        self.snapshot.legs[index] = edited;
        self.rederive_legs();
        Ok(&self.snapshot.legs[index])
    }

    /// Replace a leg wholesale, as when a leg form is submitted.
    pub fn update_leg(&mut self, leg: VoyageLeg) -> AppResult<&VoyageLeg> {
        let index = self.leg_index(&leg.id)?;
        self.snapshot.legs[index] = leg;
        self.rederive_legs();
        Ok(&self.snapshot.legs[index])
    }

    pub fn delete_leg(&mut self, id: &RecordId) -> AppResult<()> {
        let index = self.leg_index(id)?;
        self.snapshot.legs.remove(index);
        self.rederive_legs();
        info!(id = %id, legs = self.snapshot.legs.len(), "deleted leg");
        Ok(())
    }

    /// The explicit "compute duration" action: fills the underway duration
    /// from the leg's timestamps, or reports why it cannot and leaves the leg
    /// unchanged.
    pub fn compute_leg_duration(&mut self, id: &RecordId) -> AppResult<&VoyageLeg> {
        let index = self.leg_index(id)?;
        let computed = compute_underway(&self.snapshot.legs[index], self.previous_leg(index))?;
        self.snapshot.legs[index] = computed;
        self.rederive_legs();
        Ok(&self.snapshot.legs[index])
    }

    // ---- fresh water ----

    pub fn add_fresh_water_entry(&mut self) -> RecordId {
        let entries = lpk_calc::add_entry(&self.snapshot.fresh_water.entries);
        let id = entries
            .last()
            .map(|entry| entry.id.clone())
            .unwrap_or_default();
        self.snapshot.fresh_water.entries = entries;
        id
    }

    pub fn edit_fresh_water(&mut self, id: &RecordId, edit: FreshWaterEdit) -> AppResult<()> {
        let entries = &self.snapshot.fresh_water.entries;
        if !entries.iter().any(|entry| &entry.id == id) {
            return Err(AppError::NotFound {
                what: "Fresh water entry",
                id: id.to_string(),
            });
        }
        self.snapshot.fresh_water.entries = recalculate_fresh_water_list(entries, id, edit);
        Ok(())
    }

    pub fn delete_fresh_water_entry(&mut self, id: &RecordId) {
        let entries = &self.snapshot.fresh_water.entries;
        self.snapshot.fresh_water.entries = lpk_calc::delete_entry(entries, id);
    }

    // ---- header, roster, safety ----

    /// Replace the header and propagate the captain and chief officer into
    /// the roster and the safety signature block.
    pub fn set_header(&mut self, header: ReportHeader) {
        let s = &mut self.snapshot;
        s.header = header;
        s.crew = sync_roster(&s.header, &s.crew);
        s.safety = sync_safety_signature(&s.header, &s.safety);
    }

    pub fn edit_crew(&mut self, index: usize, edit: CrewEdit) -> AppResult<()> {
        self.snapshot.crew = edit_crew_member(&self.snapshot.crew, index, edit)?;
        Ok(())
    }

    /// Replace the safety page; the signature block stays tied to the header.
    pub fn set_safety(&mut self, safety: SafetyData) {
        self.snapshot.safety = sync_safety_signature(&self.snapshot.header, &safety);
    }

    // ---- cargo log ----

    pub fn add_cargo_log(&mut self) -> RecordId {
        let row = CargoActivity {
            id: RecordId::generate(),
            ..CargoActivity::default()
        };
        let id = row.id.clone();
        self.snapshot.cargo_logs.push(row);
        id
    }

    pub fn update_cargo_log(&mut self, row: CargoActivity) -> AppResult<()> {
        let slot = self
            .snapshot
            .cargo_logs
            .iter_mut()
            .find(|log| log.id == row.id)
            .ok_or_else(|| AppError::NotFound {
                what: "Cargo log",
                id: row.id.to_string(),
            })?;
        *slot = row;
        Ok(())
    }

    pub fn delete_cargo_log(&mut self, id: &RecordId) {
        self.snapshot.cargo_logs.retain(|log| &log.id != id);
    }

    // ---- report ----

    pub fn totals(&self) -> ReportTotals {
        aggregate_report(&self.snapshot.legs, &self.snapshot.fresh_water)
    }
}
