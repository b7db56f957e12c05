//! Report-wide totals.

use lpk_core::{Coerce, Elapsed, Real, round_to, safe_div, sum_elapsed};
use lpk_project::{FreshWaterData, FreshWaterEntry, VoyageLeg};
use tracing::debug;

use crate::carry_forward::closing_reserve;
use crate::leg::{LegFigures, leg_figures};

/// Totals printed on the fresh-water page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FreshWaterTotals {
    pub filled: Real,
    pub consumed: Real,
    pub total_price: Real,
    /// Previous voyage's closing reserve when entered, else the first row's
    /// reserve before filling.
    pub opening_reserve: Real,
    /// First row's reserve plus everything filled minus everything consumed.
    pub closing_reserve: Real,
    /// Closing reserve typed on the report form, when one was entered.
    pub entered_closing_reserve: Option<Real>,
}

/// Everything the report footer rows show.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportTotals {
    pub rows: Vec<LegFigures>,

    pub anchorage: Elapsed,
    pub underway: Elapsed,
    pub total_underway: Elapsed,

    pub open_sea_distance: Real,
    pub total_distance: Real,
    pub channel_distance: Real,
    /// Distance-weighted: total open-sea distance over total underway hours.
    pub average_speed: Real,

    pub cargo_loaded: Real,
    pub cargo_unloaded: Real,
    pub cargo_handled: Real,
    pub cargo_on_board: Real,

    pub arrival_water_rob: Real,
    pub arrival_fuel_rob: Real,
    pub water_rob: Real,
    pub ballast_rob: Real,
    pub fuel_rob: Real,
    pub provisions: Real,
    pub total_weight: Real,
    pub fuel_received: Real,
    pub water_received: Real,
    pub passengers: Real,

    pub fresh_water: FreshWaterTotals,
}

fn column<T: Coerce>(legs: &[VoyageLeg], pick: impl Fn(&VoyageLeg) -> &T) -> Real {
    legs.iter().map(|leg| pick(leg).coerce()).sum()
}

/// Fold the derived legs and the fresh-water page into report totals.
pub fn aggregate_report(legs: &[VoyageLeg], fresh_water: &FreshWaterData) -> ReportTotals {
    let rows: Vec<LegFigures> = legs.iter().map(leg_figures).collect();

    let underway = sum_elapsed(rows.iter().map(|r| r.underway));
    let open_sea_distance = column(legs, |l| &l.open_sea_distance);

    let totals = ReportTotals {
        anchorage: sum_elapsed(rows.iter().map(|r| r.anchorage)),
        total_underway: sum_elapsed(rows.iter().map(|r| r.total_underway)),
        average_speed: round_to(safe_div(open_sea_distance, underway.total_hours), 2),
        underway,

        open_sea_distance,
        total_distance: column(legs, |l| &l.total_distance),
        channel_distance: column(legs, |l| &l.channel_distance),

        cargo_loaded: column(legs, |l| &l.cargo_loaded),
        cargo_unloaded: column(legs, |l| &l.cargo_unloaded),
        cargo_handled: column(legs, |l| &l.cargo_handled),
        cargo_on_board: column(legs, |l| &l.cargo_on_board),

        arrival_water_rob: column(legs, |l| &l.arrival_water_rob),
        arrival_fuel_rob: column(legs, |l| &l.arrival_fuel_rob),
        water_rob: column(legs, |l| &l.water_rob),
        ballast_rob: column(legs, |l| &l.ballast_rob),
        fuel_rob: column(legs, |l| &l.fuel_rob),
        provisions: column(legs, |l| &l.provisions),
        total_weight: column(legs, |l| &l.total_weight),
        fuel_received: column(legs, |l| &l.fuel_received),
        water_received: column(legs, |l| &l.water_received),
        passengers: column(legs, |l| &l.pax_total),

        fresh_water: fresh_water_totals(fresh_water),
        rows,
    };

    debug!(
        legs = legs.len(),
        distance = totals.total_distance,
        average_speed = totals.average_speed,
        "aggregated report"
    );
    totals
}

pub fn fresh_water_totals(data: &FreshWaterData) -> FreshWaterTotals {
    let entries = &data.entries;
    let sum = |pick: fn(&FreshWaterEntry) -> Real| -> Real { entries.iter().map(pick).sum() };

    let filled = sum(|e| e.amount_filled.coerce());
    let consumed = sum(|e| e.amount_consumed.coerce());
    let first_reserve = entries.first().map_or(0.0, |e| e.reserve_before.coerce());

    let opening_reserve = if data.previous_voyage_reserve.is_placeholder() {
        first_reserve
    } else {
        data.previous_voyage_reserve.coerce()
    };

    FreshWaterTotals {
        filled,
        consumed,
        total_price: sum(|e| e.total_price.coerce()),
        opening_reserve,
        closing_reserve: closing_reserve(data),
        entered_closing_reserve: (!data.closing_reserve.is_placeholder())
            .then(|| data.closing_reserve.coerce()),
    }
}
