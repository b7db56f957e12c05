//! Fresh-water table derivations.
//!
//! An entry's consumption depends on the *next* entry's opening reserve, so
//! any edit can change the row above it. Every operation here therefore
//! returns a fully recomputed list rather than patching single rows.

use lpk_core::{Coerce, FieldValue, RecordId};
use lpk_project::{FreshWaterEntry, SupplyMethod};
use tracing::{debug, warn};

/// A single-field edit on one fresh-water row.
#[derive(Debug, Clone, PartialEq)]
pub enum FreshWaterEdit {
    Port(String),
    Date(String),
    ReserveBefore(FieldValue),
    AmountFilled(FieldValue),
    /// Only sticks on the last row; earlier rows are derived.
    AmountConsumed(FieldValue),
    SupplyMethod(SupplyMethod),
    PricePerTon(FieldValue),
    PortTime(String),
}

/// Apply one edit to the entry with `edited_id` and return the recomputed
/// list.
///
/// An unknown id leaves the rows as they were (still recomputed).
pub fn recalculate_fresh_water_list(
    entries: &[FreshWaterEntry],
    edited_id: &RecordId,
    edit: FreshWaterEdit,
) -> Vec<FreshWaterEntry> {
    let mut updated = entries.to_vec();

    match updated.iter_mut().find(|entry| &entry.id == edited_id) {
        Some(entry) => apply_edit(entry, edit),
        None => warn!(id = %edited_id, "fresh water edit for unknown entry ignored"),
    }

    recompute_consumption(&updated)
}

fn apply_edit(entry: &mut FreshWaterEntry, edit: FreshWaterEdit) {
    let reprice = matches!(
        edit,
        FreshWaterEdit::AmountFilled(_) | FreshWaterEdit::PricePerTon(_)
    );

    match edit {
        FreshWaterEdit::Port(port) => entry.port = port.to_uppercase(),
        FreshWaterEdit::Date(date) => entry.date = date,
        FreshWaterEdit::ReserveBefore(value) => entry.reserve_before = value,
        FreshWaterEdit::AmountFilled(value) => entry.amount_filled = value,
        FreshWaterEdit::AmountConsumed(value) => entry.amount_consumed = value,
        FreshWaterEdit::SupplyMethod(method) => entry.supply_method = method,
        FreshWaterEdit::PricePerTon(value) => entry.price_per_ton = value,
        FreshWaterEdit::PortTime(time) => entry.port_time = time,
    }

    if reprice {
        entry.total_price =
            FieldValue::Number(entry.amount_filled.coerce() * entry.price_per_ton.coerce());
    }
}

/// Derive every row's consumption from its successor:
/// `reserve_before(i) + amount_filled(i) - reserve_before(i + 1)`.
///
/// The last row has no successor and keeps whatever was entered.
pub fn recompute_consumption(entries: &[FreshWaterEntry]) -> Vec<FreshWaterEntry> {
    let mut out = entries.to_vec();
    for (entry, next) in out.iter_mut().zip(entries.iter().skip(1)) {
        let consumed = entry.reserve_before.coerce() + entry.amount_filled.coerce()
            - next.reserve_before.coerce();
        entry.amount_consumed = FieldValue::Number(consumed);
    }
    debug!(entries = out.len(), "recomputed fresh water consumption");
    out
}

/// Append an empty row numbered after the existing ones.
pub fn add_entry(entries: &[FreshWaterEntry]) -> Vec<FreshWaterEntry> {
    let mut out = entries.to_vec();
    out.push(FreshWaterEntry {
        id: RecordId::generate(),
        no: entries.len() as u32 + 1,
        ..FreshWaterEntry::default()
    });
    recompute_consumption(&out)
}

/// Remove a row, renumber the rest from 1, and recompute.
pub fn delete_entry(entries: &[FreshWaterEntry], id: &RecordId) -> Vec<FreshWaterEntry> {
    let remaining: Vec<FreshWaterEntry> = entries
        .iter()
        .filter(|entry| &entry.id != id)
        .enumerate()
        .map(|(index, entry)| FreshWaterEntry {
            no: index as u32 + 1,
            ..entry.clone()
        })
        .collect();
    if remaining.len() == entries.len() {
        warn!(id = %id, "fresh water delete for unknown entry ignored");
    }
    recompute_consumption(&remaining)
}
