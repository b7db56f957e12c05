//! Editing a report through the session the way a frontend does.

use lpk_app::{AppError, VoyageSession};
use lpk_calc::{CalcError, CrewEdit, CrewField, FreshWaterEdit, LegEdit, LegMixed, LegNumber, LegText};
use lpk_core::{CoreError, FieldValue};
use lpk_project::{CargoActivity, ReportHeader, VoyageSnapshot};

fn text(field: LegText, value: &str) -> LegEdit {
    LegEdit::Text(field, value.to_string())
}

#[test]
fn editing_an_early_leg_ripples_cargo_forward() {
    let mut session = VoyageSession::new(VoyageSnapshot::default());
    let first = session.add_leg();
    let second = session.add_leg();

    session
        .edit_leg(&first, LegEdit::Mixed(LegMixed::CargoLoaded, FieldValue::Number(100.0)))
        .unwrap();
    session
        .edit_leg(&second, LegEdit::Mixed(LegMixed::CargoUnloaded, FieldValue::Number(30.0)))
        .unwrap();
    assert_eq!(session.snapshot().legs[1].cargo_on_board, 70.0);

    session
        .edit_leg(&first, LegEdit::Mixed(LegMixed::CargoLoaded, FieldValue::Number(150.0)))
        .unwrap();
    assert_eq!(session.snapshot().legs[1].cargo_on_board, 120.0);

    session.delete_leg(&first).unwrap();
    let legs = &session.snapshot().legs;
    assert_eq!(legs.len(), 1);
    assert_eq!(legs[0].no, 1);
    assert_eq!(legs[0].cargo_on_board, -30.0);
}

#[test]
fn new_legs_use_configured_provisions() {
    let mut session = VoyageSession::new(VoyageSnapshot::default()).with_default_provisions(35.0);
    let id = session.add_leg();
    let leg = session
        .edit_leg(&id, LegEdit::Number(LegNumber::FuelRob, 10.0))
        .unwrap();
    assert_eq!(leg.provisions, 35.0);
    assert_eq!(leg.total_weight, 45.0);
}

#[test]
fn compute_duration_reports_inverted_range() {
    let mut session = VoyageSession::new(VoyageSnapshot::default());
    let id = session.add_leg();
    for edit in [
        text(LegText::DepartureDate, "2024-01-01"),
        text(LegText::DepartureTime, "08.00"),
        text(LegText::ArrivalDate, "2024-01-02"),
        text(LegText::ArrivalTime, "14.30"),
    ] {
        session.edit_leg(&id, edit).unwrap();
    }
    session
        .edit_leg(&id, LegEdit::Number(LegNumber::OpenSeaDistance, 305.0))
        .unwrap();

    let leg = session.compute_leg_duration(&id).unwrap();
    assert_eq!(leg.duration_hours, "06.30");
    assert_eq!(leg.speed, 10.0);

    session
        .edit_leg(&id, text(LegText::ArrivalDate, "2023-12-31"))
        .unwrap();
    let err = session.compute_leg_duration(&id).unwrap_err();
    assert!(matches!(
        err,
        AppError::Calc(CalcError::Duration(CoreError::ArrivalBeforeDeparture { .. }))
    ));
    assert_eq!(session.snapshot().legs[0].duration_hours, "06.30");
}

#[test]
fn unknown_leg_is_not_found() {
    let mut session = VoyageSession::new(VoyageSnapshot::default());
    let err = session
        .edit_leg(&"missing".into(), text(LegText::ToPort, "AMBON"))
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { what: "Leg", .. }));
}

#[test]
fn fresh_water_edits_recompute_neighbours() {
    let mut session = VoyageSession::new(VoyageSnapshot::default());
    let a = session.add_fresh_water_entry();
    let b = session.add_fresh_water_entry();

    session
        .edit_fresh_water(&a, FreshWaterEdit::ReserveBefore(FieldValue::Number(50.0)))
        .unwrap();
    session
        .edit_fresh_water(&a, FreshWaterEdit::AmountFilled(FieldValue::Number(20.0)))
        .unwrap();
    session
        .edit_fresh_water(&b, FreshWaterEdit::ReserveBefore(FieldValue::from("60")))
        .unwrap();

    let entries = &session.snapshot().fresh_water.entries;
    assert_eq!(entries[0].amount_consumed, FieldValue::Number(10.0));
    assert_eq!(session.totals().fresh_water.filled, 20.0);

    session.delete_fresh_water_entry(&a);
    let entries = &session.snapshot().fresh_water.entries;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].no, 1);

    assert!(session
        .edit_fresh_water(&a, FreshWaterEdit::Port("x".to_string()))
        .is_err());
}

#[test]
fn header_drives_roster_and_signature() {
    let mut session = VoyageSession::new(VoyageSnapshot::default());
    session.set_header(ReportHeader {
        captain_name: "BUDI".to_string(),
        captain_id: "1234".to_string(),
        chief_officer_name: "SITI".to_string(),
        chief_officer_id: "5678".to_string(),
        ..ReportHeader::default()
    });

    let snapshot = session.snapshot();
    assert_eq!(snapshot.crew[0].name, "BUDI");
    assert_eq!(snapshot.crew[1].staff_id, "5678");
    assert_eq!(snapshot.safety.chief_officer_name, "SITI");

    let err = session
        .edit_crew(1, CrewEdit::new(CrewField::Name, "LAIN"))
        .unwrap_err();
    assert!(matches!(err, AppError::Calc(CalcError::MirroredRosterRow { .. })));

    session
        .edit_crew(5, CrewEdit::new(CrewField::Name, "joko"))
        .unwrap();
    assert_eq!(session.snapshot().crew[5].name, "JOKO");

    let mut safety = session.snapshot().safety.clone();
    safety.chief_officer_name = "ORANG LAIN".to_string();
    safety.hydrant_pump = "BAIK".to_string();
    session.set_safety(safety);
    assert_eq!(session.snapshot().safety.chief_officer_name, "SITI");
    assert_eq!(session.snapshot().safety.hydrant_pump, "BAIK");
}

#[test]
fn cargo_log_rows() {
    let mut session = VoyageSession::new(VoyageSnapshot::default());
    let id = session.add_cargo_log();
    session
        .update_cargo_log(CargoActivity {
            id: id.clone(),
            port: "BITUNG".to_string(),
            activity: "MUAT".to_string(),
            ..CargoActivity::default()
        })
        .unwrap();
    assert_eq!(session.snapshot().cargo_logs[0].port, "BITUNG");

    assert!(session
        .update_cargo_log(CargoActivity {
            id: "other".into(),
            ..CargoActivity::default()
        })
        .is_err());

    session.delete_cargo_log(&id);
    assert!(session.snapshot().cargo_logs.is_empty());
}
