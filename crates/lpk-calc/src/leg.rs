//! Per-leg derivations.
//!
//! Raw fields are entered on the leg form; the functions here fill in the
//! dependent ones (cargo totals, total weight, passenger total, speed) and
//! keep the three distance columns consistent.

use lpk_core::{
    Coerce, Elapsed, FieldValue, Real, RecordId, clock_span, elapsed, elapsed_checked, round_to,
    safe_div,
};
use lpk_project::VoyageLeg;
use tracing::debug;

use crate::error::CalcResult;

/// Free-text leg fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegText {
    FromPort,
    ToPort,
    DepartureDate,
    DepartureTime,
    ArrivalDate,
    ArrivalTime,
    /// Underway duration remainder, `HH.MM`.
    DurationHours,
    EngineRpm,
    AnchorStartDate,
    AnchorStartTime,
    AnchorEndDate,
    AnchorEndTime,
    CargoPort,
    CargoActivity,
    CargoStart,
    CargoEnd,
}

/// Numeric leg fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegNumber {
    DurationDays,
    TotalDistance,
    ChannelDistance,
    OpenSeaDistance,
    ArrivalFuelRob,
    ArrivalWaterRob,
    FuelRob,
    WaterRob,
    BallastRob,
    Provisions,
    FuelUsed,
    WaterUsed,
    DraftFore,
    DraftAft,
    Pax1A,
    Pax1B,
    Pax2A,
    Pax2B,
    PaxEconomy,
}

/// Leg fields that hold a figure or a placeholder dash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegMixed {
    CargoLoaded,
    CargoUnloaded,
    FuelReceived,
    WaterReceived,
}

/// A single-field edit made on the leg form.
#[derive(Debug, Clone, PartialEq)]
pub enum LegEdit {
    Text(LegText, String),
    Number(LegNumber, Real),
    Mixed(LegMixed, FieldValue),
}

/// Start a new leg after `previous`: it departs from where the previous leg
/// arrived and carries its cargo on board.
pub fn new_leg(previous: Option<&VoyageLeg>, no: u32) -> VoyageLeg {
    let mut leg = VoyageLeg {
        id: RecordId::generate(),
        no,
        ..VoyageLeg::default()
    };
    if let Some(prev) = previous {
        leg.from_port = prev.to_port.clone();
        leg.cargo_on_board = prev.cargo_on_board.coerce();
    }
    derive_leg(&leg, previous)
}

/// Apply one form edit, then recompute the leg's dependent fields.
///
/// Editing the total or channel distance re-derives the open-sea distance;
/// editing the open-sea distance re-derives the total. The channel distance
/// is never derived.
pub fn apply_leg_edit(leg: &VoyageLeg, edit: LegEdit, previous: Option<&VoyageLeg>) -> VoyageLeg {
    let mut next = leg.clone();

    match edit {
        LegEdit::Text(field, value) => set_text(&mut next, field, value),
        LegEdit::Number(field, value) => {
            let value = value.coerce();
            match field {
                LegNumber::TotalDistance => {
                    next.total_distance = value;
                    next.open_sea_distance = value - next.channel_distance.coerce();
                }
                LegNumber::ChannelDistance => {
                    next.channel_distance = value;
                    next.open_sea_distance = next.total_distance.coerce() - value;
                }
                LegNumber::OpenSeaDistance => {
                    next.open_sea_distance = value;
                    next.total_distance = value + next.channel_distance.coerce();
                }
                other => set_number(&mut next, other, value),
            }
        }
        LegEdit::Mixed(field, value) => match field {
            LegMixed::CargoLoaded => next.cargo_loaded = value,
            LegMixed::CargoUnloaded => next.cargo_unloaded = value,
            LegMixed::FuelReceived => next.fuel_received = value,
            LegMixed::WaterReceived => next.water_received = value,
        },
    }

    derive_leg(&next, previous)
}

fn set_text(leg: &mut VoyageLeg, field: LegText, value: String) {
    match field {
        LegText::FromPort => leg.from_port = value.to_uppercase(),
        LegText::ToPort => leg.to_port = value.to_uppercase(),
        LegText::DepartureDate => leg.departure_date = value,
        LegText::DepartureTime => leg.departure_time = value,
        LegText::ArrivalDate => leg.arrival_date = value,
        LegText::ArrivalTime => leg.arrival_time = value,
        LegText::DurationHours => leg.duration_hours = value,
        LegText::EngineRpm => leg.engine_rpm = value,
        LegText::AnchorStartDate => leg.anchor_start_date = value,
        LegText::AnchorStartTime => leg.anchor_start_time = value,
        LegText::AnchorEndDate => leg.anchor_end_date = value,
        LegText::AnchorEndTime => leg.anchor_end_time = value,
        LegText::CargoPort => leg.cargo_port = value.to_uppercase(),
        LegText::CargoActivity => leg.cargo_activity = value.to_uppercase(),
        LegText::CargoStart => leg.cargo_start = value,
        LegText::CargoEnd => leg.cargo_end = value,
    }
}

fn set_number(leg: &mut VoyageLeg, field: LegNumber, value: Real) {
    let slot = match field {
        LegNumber::DurationDays => &mut leg.duration_days,
        LegNumber::TotalDistance => &mut leg.total_distance,
        LegNumber::ChannelDistance => &mut leg.channel_distance,
        LegNumber::OpenSeaDistance => &mut leg.open_sea_distance,
        LegNumber::ArrivalFuelRob => &mut leg.arrival_fuel_rob,
        LegNumber::ArrivalWaterRob => &mut leg.arrival_water_rob,
        LegNumber::FuelRob => &mut leg.fuel_rob,
        LegNumber::WaterRob => &mut leg.water_rob,
        LegNumber::BallastRob => &mut leg.ballast_rob,
        LegNumber::Provisions => &mut leg.provisions,
        LegNumber::FuelUsed => &mut leg.fuel_used,
        LegNumber::WaterUsed => &mut leg.water_used,
        LegNumber::DraftFore => &mut leg.draft_fore,
        LegNumber::DraftAft => &mut leg.draft_aft,
        LegNumber::Pax1A => &mut leg.pax_1a,
        LegNumber::Pax1B => &mut leg.pax_1b,
        LegNumber::Pax2A => &mut leg.pax_2a,
        LegNumber::Pax2B => &mut leg.pax_2b,
        LegNumber::PaxEconomy => &mut leg.pax_economy,
    };
    *slot = value;
}

/// Recompute a leg's derived fields from its raw fields and its predecessor.
///
/// Distances are left as entered; [`apply_leg_edit`] keeps them consistent.
pub fn derive_leg(leg: &VoyageLeg, previous: Option<&VoyageLeg>) -> VoyageLeg {
    let mut out = leg.clone();

    out.pax_total = [leg.pax_1a, leg.pax_1b, leg.pax_2a, leg.pax_2b, leg.pax_economy]
        .iter()
        .map(Coerce::coerce)
        .sum();

    let loaded = leg.cargo_loaded.coerce();
    let unloaded = leg.cargo_unloaded.coerce();
    // a leg with no cargo work keeps its placeholder
    if loaded > 0.0 || unloaded > 0.0 {
        out.cargo_handled = FieldValue::Number(loaded + unloaded);
    }

    let carried = previous.map_or(0.0, |prev| prev.cargo_on_board.coerce());
    out.cargo_on_board = carried + loaded - unloaded;

    out.total_weight = out.cargo_on_board
        + leg.fuel_rob.coerce()
        + leg.water_rob.coerce()
        + leg.ballast_rob.coerce()
        + leg.fuel_received.coerce()
        + leg.water_received.coerce()
        + leg.provisions.coerce();

    out.speed = speed(leg.open_sea_distance.coerce(), &underway(leg));

    out
}

/// Re-derive every leg against its predecessor and renumber by position.
pub fn derive_leg_chain(legs: &[VoyageLeg]) -> Vec<VoyageLeg> {
    let mut out: Vec<VoyageLeg> = Vec::with_capacity(legs.len());
    for (index, leg) in legs.iter().enumerate() {
        let mut derived = derive_leg(leg, out.last());
        derived.no = index as u32 + 1;
        out.push(derived);
    }
    debug!(legs = out.len(), "derived leg chain");
    out
}

/// Fill the underway duration from the departure and arrival timestamps.
///
/// Refuses (leaving the leg as it was) when a timestamp is missing or
/// malformed, or when arrival precedes departure. Durations typed directly
/// into the form never pass through this check.
pub fn compute_underway(leg: &VoyageLeg, previous: Option<&VoyageLeg>) -> CalcResult<VoyageLeg> {
    let span = elapsed_checked(
        &leg.departure_date,
        &leg.departure_time,
        &leg.arrival_date,
        &leg.arrival_time,
    )?;

    let mut next = leg.clone();
    next.duration_days = span.days as Real;
    next.duration_hours = span.hhmm();
    debug!(leg = next.no, days = span.days, hours = %next.duration_hours, "computed underway duration");
    Ok(derive_leg(&next, previous))
}

/// Underway ("full away") duration as entered on the leg.
pub fn underway(leg: &VoyageLeg) -> Elapsed {
    Elapsed::from_entered(leg.duration_days, &leg.duration_hours)
}

/// Time spent at anchor or in the roadstead.
pub fn anchorage(leg: &VoyageLeg) -> Elapsed {
    elapsed(
        &leg.anchor_start_date,
        &leg.anchor_start_time,
        &leg.anchor_end_date,
        &leg.anchor_end_time,
    )
}

/// Knots over the underway time, to two decimals; zero when no time was
/// spent underway.
pub fn speed(open_sea_distance: Real, underway: &Elapsed) -> Real {
    if underway.total_hours > 0.0 {
        round_to(safe_div(open_sea_distance, underway.total_hours), 2)
    } else {
        0.0
    }
}

/// Figures printed on a leg's report row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegFigures {
    pub no: u32,
    pub anchorage: Elapsed,
    pub underway: Elapsed,
    /// Underway plus anchorage.
    pub total_underway: Elapsed,
    pub speed: Real,
    /// Loading/unloading duration, `HH.MM`.
    pub bm_duration: String,
}

pub fn leg_figures(leg: &VoyageLeg) -> LegFigures {
    let underway = underway(leg);
    let anchorage = anchorage(leg);
    LegFigures {
        no: leg.no,
        anchorage,
        underway,
        total_underway: [underway, anchorage].into_iter().sum(),
        speed: speed(leg.open_sea_distance.coerce(), &underway),
        bm_duration: clock_span(&leg.cargo_start, &leg.cargo_end).hhmm(),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use lpk_core::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    fn distance_edit() -> impl Strategy<Value = LegEdit> {
        (0usize..3, 0.0_f64..5000.0).prop_map(|(which, value)| {
            let field = match which {
                0 => LegNumber::TotalDistance,
                1 => LegNumber::ChannelDistance,
                _ => LegNumber::OpenSeaDistance,
            };
            LegEdit::Number(field, value)
        })
    }

    fn cargo_leg() -> impl Strategy<Value = VoyageLeg> {
        (0.0_f64..1000.0, 0.0_f64..1000.0).prop_map(|(loaded, unloaded)| VoyageLeg {
            cargo_loaded: FieldValue::Number(loaded),
            cargo_unloaded: FieldValue::Number(unloaded),
            ..VoyageLeg::default()
        })
    }

    proptest! {
        #[test]
        fn distance_invariant_holds(edits in prop::collection::vec(distance_edit(), 1..20)) {
            let mut leg = VoyageLeg::default();
            for edit in edits {
                leg = apply_leg_edit(&leg, edit, None);
            }
            let tol = Tolerances { abs: 1e-6, rel: 1e-9 };
            prop_assert!(nearly_equal(
                leg.total_distance,
                leg.open_sea_distance + leg.channel_distance,
                tol
            ));
        }

        #[test]
        fn cargo_running_total(legs in prop::collection::vec(cargo_leg(), 1..12)) {
            let chain = derive_leg_chain(&legs);
            let expected: Real = legs
                .iter()
                .map(|l| l.cargo_loaded.coerce() - l.cargo_unloaded.coerce())
                .sum();
            let tol = Tolerances { abs: 1e-6, rel: 1e-9 };
            prop_assert!(nearly_equal(chain[chain.len() - 1].cargo_on_board, expected, tol));
        }

        #[test]
        fn derive_is_idempotent(
            prev in cargo_leg(),
            leg in cargo_leg(),
            days in 0.0_f64..10.0,
            hours in 0u32..24,
            minutes in 0u32..60,
            open_sea in 0.0_f64..3000.0,
        ) {
            let leg = VoyageLeg {
                duration_days: days.floor(),
                duration_hours: format!("{hours:02}.{minutes:02}"),
                open_sea_distance: open_sea,
                ..leg
            };
            let prev = derive_leg(&prev, None);
            let once = derive_leg(&leg, Some(&prev));
            let twice = derive_leg(&once, Some(&prev));
            prop_assert_eq!(once, twice);
        }
    }
}
