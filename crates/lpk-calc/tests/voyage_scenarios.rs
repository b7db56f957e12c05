use lpk_calc::*;
use lpk_core::{FieldValue, RecordId};
use lpk_project::{FreshWaterData, VoyageLeg, VoyageSnapshot};

fn edit(leg: &VoyageLeg, e: LegEdit, prev: Option<&VoyageLeg>) -> VoyageLeg {
    apply_leg_edit(leg, e, prev)
}

fn text(field: LegText, value: &str) -> LegEdit {
    LegEdit::Text(field, value.to_string())
}

/// Two legs entered field by field, the way the leg form produces them.
fn two_leg_voyage() -> Vec<VoyageLeg> {
    let mut first = new_leg(None, 1);
    first = edit(&first, text(LegText::FromPort, "surabaya"), None);
    first = edit(&first, text(LegText::ToPort, "kumai"), None);
    first = edit(&first, text(LegText::DepartureDate, "2024-01-01"), None);
    first = edit(&first, text(LegText::DepartureTime, "08.00"), None);
    first = edit(&first, text(LegText::ArrivalDate, "2024-01-02"), None);
    first = edit(&first, text(LegText::ArrivalTime, "14.30"), None);
    first = edit(&first, LegEdit::Number(LegNumber::TotalDistance, 347.0), None);
    first = edit(&first, LegEdit::Number(LegNumber::ChannelDistance, 42.0), None);
    first = edit(
        &first,
        LegEdit::Mixed(LegMixed::CargoLoaded, FieldValue::from("120")),
        None,
    );
    first = compute_underway(&first, None).unwrap();

    let mut second = new_leg(Some(&first), 2);
    second = edit(&second, text(LegText::ToPort, "semarang"), Some(&first));
    second = edit(
        &second,
        LegEdit::Number(LegNumber::DurationDays, 1.0),
        Some(&first),
    );
    second = edit(&second, text(LegText::DurationHours, "00.00"), Some(&first));
    second = edit(
        &second,
        LegEdit::Number(LegNumber::OpenSeaDistance, 240.0),
        Some(&first),
    );
    second = edit(
        &second,
        LegEdit::Mixed(LegMixed::CargoUnloaded, FieldValue::Number(70.0)),
        Some(&first),
    );

    vec![first, second]
}

#[test]
fn leg_chain_carries_port_and_cargo() {
    let legs = two_leg_voyage();

    assert_eq!(legs[0].from_port, "SURABAYA");
    assert_eq!(legs[0].open_sea_distance, 305.0);
    assert_eq!(legs[0].speed, 10.0);
    assert_eq!(legs[0].cargo_on_board, 120.0);

    assert_eq!(legs[1].from_port, "KUMAI");
    assert_eq!(legs[1].to_port, "SEMARANG");
    assert_eq!(legs[1].cargo_on_board, 50.0);
    assert_eq!(legs[1].speed, 10.0);

    // re-deriving the stored chain is a no-op
    assert_eq!(derive_leg_chain(&legs), legs);
}

#[test]
fn report_totals_for_two_legs() {
    let legs = two_leg_voyage();
    let totals = aggregate_report(&legs, &FreshWaterData::default());

    assert_eq!(totals.rows.len(), 2);
    assert_eq!(totals.open_sea_distance, 545.0);
    assert_eq!(totals.total_distance, 587.0);
    let u = totals.underway;
    assert_eq!((u.days, u.hours, u.minutes), (2, 6, 30));
    // 545 NM over 54.5 h
    assert_eq!(totals.average_speed, 10.0);
    assert_eq!(totals.cargo_loaded, 120.0);
    assert_eq!(totals.cargo_unloaded, 70.0);
    assert_eq!(totals.cargo_handled, 190.0);
}

#[test]
fn fresh_water_through_voyage_and_carry_forward() {
    let mut entries = Vec::new();
    for _ in 0..3 {
        entries = add_entry(&entries);
    }
    let ids: Vec<RecordId> = entries.iter().map(|e| e.id.clone()).collect();

    let figures = [(50.0, 20.0), (60.0, 10.0), (55.0, 0.0)];
    for (id, (reserve, filled)) in ids.iter().zip(figures) {
        entries = recalculate_fresh_water_list(
            &entries,
            id,
            FreshWaterEdit::ReserveBefore(FieldValue::Number(reserve)),
        );
        entries = recalculate_fresh_water_list(
            &entries,
            id,
            FreshWaterEdit::AmountFilled(FieldValue::Number(filled)),
        );
    }
    entries = recalculate_fresh_water_list(
        &entries,
        &ids[2],
        FreshWaterEdit::AmountConsumed(FieldValue::Number(5.0)),
    );

    assert_eq!(entries[0].amount_consumed, FieldValue::Number(10.0));
    assert_eq!(entries[1].amount_consumed, FieldValue::Number(15.0));
    assert_eq!(entries[2].amount_consumed, FieldValue::Number(5.0));

    let mut previous = VoyageSnapshot::default();
    previous.header.voyage_number = "12".to_string();
    previous.fresh_water.entries = entries;

    let totals = fresh_water_totals(&previous.fresh_water);
    assert_eq!(totals.filled, 30.0);
    assert_eq!(totals.consumed, 30.0);
    assert_eq!(totals.closing_reserve, 50.0);

    let next = seed_next_voyage(&previous).into_snapshot();
    assert_eq!(
        next.fresh_water.entries[0].reserve_before,
        FieldValue::Number(50.0)
    );
    assert_eq!(next.header.previous_voyage_number.as_deref(), Some("12"));
}

#[test]
fn inverted_timestamps_leave_hand_entry_alone() {
    let mut leg = new_leg(None, 1);
    leg = edit(&leg, LegEdit::Number(LegNumber::DurationDays, 2.0), None);
    leg = edit(&leg, text(LegText::DurationHours, "03.15"), None);
    leg = edit(&leg, text(LegText::DepartureDate, "2024-03-05"), None);
    leg = edit(&leg, text(LegText::DepartureTime, "10:00"), None);
    leg = edit(&leg, text(LegText::ArrivalDate, "2024-03-04"), None);
    leg = edit(&leg, text(LegText::ArrivalTime, "10:00"), None);

    assert!(compute_underway(&leg, None).is_err());
    let figures = leg_figures(&leg);
    assert_eq!(figures.underway.total_hours, 51.25);
}
