//! lpk-calc: derived-field computation for voyage reports.
//!
//! Every function here is a pure transformation of plain records: a leg and
//! its predecessor, the ordered fresh-water list, or the whole report. Calling
//! any of them again on their own output changes nothing.

pub mod aggregate;
pub mod carry_forward;
pub mod error;
pub mod fresh_water;
pub mod leg;
pub mod roster;

pub use aggregate::{FreshWaterTotals, ReportTotals, aggregate_report, fresh_water_totals};
pub use carry_forward::{NextVoyage, closing_reserve, seed_next_voyage};
pub use error::{CalcError, CalcResult};
pub use fresh_water::{
    FreshWaterEdit, add_entry, delete_entry, recalculate_fresh_water_list, recompute_consumption,
};
pub use leg::{
    LegEdit, LegFigures, LegMixed, LegNumber, LegText, apply_leg_edit, compute_underway,
    derive_leg, derive_leg_chain, leg_figures, new_leg, underway,
};
pub use roster::{
    CrewEdit, CrewField, crew_on_board, edit_crew_member, sync_roster, sync_safety_signature,
};
