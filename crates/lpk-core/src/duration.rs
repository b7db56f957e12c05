//! Elapsed time between entered (date, time) pairs.
//!
//! Dates are `YYYY-MM-DD`; times are `HH:MM` or `HH.MM` (seconds optional).
//! Data entry is progressive, so the passive path treats missing or
//! malformed input as a zero duration. The checked path is used by the
//! explicit "compute duration" action and reports what is wrong instead.

use core::iter::Sum;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{CoreError, CoreResult};
use crate::numeric::{Coerce, Real, coerce_str};

const MINUTES_PER_HOUR: Real = 60.0;
const MINUTES_PER_DAY: Real = 24.0 * 60.0;

/// A duration broken down for display, plus its exact length in hours.
///
/// `total_hours` is kept separately because speed computations need the
/// unrounded value, not one rebuilt from the day/hour/minute breakdown.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Elapsed {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub total_hours: Real,
}

impl Elapsed {
    pub const ZERO: Elapsed = Elapsed {
        days: 0,
        hours: 0,
        minutes: 0,
        total_hours: 0.0,
    };

    pub fn new(days: i64, hours: i64, minutes: i64) -> Self {
        let total = days
            .saturating_mul(24 * 60)
            .saturating_add(hours.saturating_mul(60))
            .saturating_add(minutes);
        Self::from_minutes(total as Real)
    }

    /// Decompose a (possibly fractional) minute count with 24h/60m carrying.
    /// Negative counts clamp to zero.
    pub fn from_minutes(total_minutes: Real) -> Self {
        let total = if total_minutes.is_finite() {
            total_minutes.max(0.0)
        } else {
            0.0
        };
        // hours * 60 round trips can land an ulp below a whole minute
        let total = if (total - total.round()).abs() < 1e-6 {
            total.round()
        } else {
            total
        };
        let days = (total / MINUTES_PER_DAY).floor();
        let hours = ((total % MINUTES_PER_DAY) / MINUTES_PER_HOUR).floor();
        let minutes = (total % MINUTES_PER_HOUR).floor();
        Self {
            days: days as i64,
            hours: hours as i64,
            minutes: minutes as i64,
            total_hours: total / MINUTES_PER_HOUR,
        }
    }

    /// A duration typed by hand: whole days plus an `HH.MM` hours field.
    ///
    /// The hours part is whatever precedes the first `.`, the minutes part
    /// whatever follows it; both go through the usual field coercion.
    pub fn from_entered(days: impl Coerce, hhmm: &str) -> Self {
        let mut parts = hhmm.split('.');
        let hours = parts.next().map(coerce_str).unwrap_or(0.0);
        let minutes = parts.next().map(coerce_str).unwrap_or(0.0);
        Self::from_minutes(days.coerce() * MINUTES_PER_DAY + hours * MINUTES_PER_HOUR + minutes)
    }

    pub fn total_minutes(&self) -> Real {
        self.total_hours * MINUTES_PER_HOUR
    }

    pub fn is_zero(&self) -> bool {
        self.total_hours <= 0.0
    }

    /// Hours and minutes as `HH.MM`, the report's notation. Days are shown
    /// in their own column.
    pub fn hhmm(&self) -> String {
        format!("{:02}.{:02}", self.hours, self.minutes)
    }
}

impl Sum for Elapsed {
    fn sum<I: Iterator<Item = Elapsed>>(iter: I) -> Self {
        sum_elapsed(iter)
    }
}

impl<'a> Sum<&'a Elapsed> for Elapsed {
    fn sum<I: Iterator<Item = &'a Elapsed>>(iter: I) -> Self {
        sum_elapsed(iter.copied())
    }
}

/// Sum durations as minutes, then decompose back into days/hours/minutes.
pub fn sum_elapsed(items: impl IntoIterator<Item = Elapsed>) -> Elapsed {
    let total: Real = items.into_iter().map(|e| e.total_minutes()).sum();
    Elapsed::from_minutes(total)
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Parse a clock time, accepting `.` as the hour/minute separator.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let normalized = raw.trim().replacen('.', ":", 1);
    NaiveTime::parse_from_str(&normalized, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(&normalized, "%H:%M:%S"))
        .ok()
}

pub fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    Some(parse_date(date)?.and_time(parse_time(time)?))
}

/// Elapsed time from `(date1, time1)` to `(date2, time2)`.
///
/// Missing or malformed input yields [`Elapsed::ZERO`]; an end before the
/// start clamps to zero.
pub fn elapsed(date1: &str, time1: &str, date2: &str, time2: &str) -> Elapsed {
    match (parse_timestamp(date1, time1), parse_timestamp(date2, time2)) {
        (Some(start), Some(end)) => {
            Elapsed::from_minutes((end - start).num_minutes() as Real)
        }
        _ => Elapsed::ZERO,
    }
}

/// Checked variant of [`elapsed`] for the explicit compute-duration action.
///
/// Every field must be present and parseable, and the end may not precede
/// the start.
pub fn elapsed_checked(date1: &str, time1: &str, date2: &str, time2: &str) -> CoreResult<Elapsed> {
    let start = checked_timestamp(date1, time1, "departure")?;
    let end = checked_timestamp(date2, time2, "arrival")?;

    if end < start {
        return Err(CoreError::ArrivalBeforeDeparture {
            departure: start.format("%Y-%m-%dT%H:%M").to_string(),
            arrival: end.format("%Y-%m-%dT%H:%M").to_string(),
        });
    }

    Ok(Elapsed::from_minutes((end - start).num_minutes() as Real))
}

fn checked_timestamp(date: &str, time: &str, what: &'static str) -> CoreResult<NaiveDateTime> {
    if date.trim().is_empty() || time.trim().is_empty() {
        return Err(CoreError::MissingTimestamp { what });
    }
    parse_timestamp(date, time).ok_or_else(|| CoreError::InvalidTimestamp {
        what,
        value: format!("{} {}", date.trim(), time.trim()),
    })
}

/// Span between two clock times on the same nominal day.
///
/// An end before the start clamps to zero rather than wrapping past
/// midnight.
pub fn clock_span(start: &str, end: &str) -> Elapsed {
    match (parse_time(start), parse_time(end)) {
        (Some(start), Some(end)) => Elapsed::from_minutes((end - start).num_minutes() as Real),
        _ => Elapsed::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn departure_to_arrival() {
        let e = elapsed("2024-01-01", "08.00", "2024-01-02", "14.30");
        assert_eq!((e.days, e.hours, e.minutes), (1, 6, 30));
        assert_eq!(e.total_hours, 30.5);
    }

    #[test]
    fn colon_and_dot_separators_agree() {
        let a = elapsed("2024-03-10", "23:15", "2024-03-11", "01:45");
        let b = elapsed("2024-03-10", "23.15", "2024-03-11", "01.45");
        assert_eq!(a, b);
        assert_eq!(a.hhmm(), "02.30");
    }

    #[test]
    fn missing_fields_give_zero() {
        assert_eq!(elapsed("", "", "", ""), Elapsed::ZERO);
        assert_eq!(elapsed("2024-01-01", "", "2024-01-02", "10:00"), Elapsed::ZERO);
        assert_eq!(elapsed("01/01/2024", "08:00", "2024-01-02", "10:00"), Elapsed::ZERO);
    }

    #[test]
    fn negative_span_clamps_to_zero() {
        let e = elapsed("2024-01-02", "08:00", "2024-01-01", "08:00");
        assert_eq!(e, Elapsed::ZERO);
    }

    #[test]
    fn checked_rejects_inverted_range() {
        let err = elapsed_checked("2024-01-02", "08:00", "2024-01-01", "08:00").unwrap_err();
        assert!(matches!(err, CoreError::ArrivalBeforeDeparture { .. }));
    }

    #[test]
    fn checked_reports_missing_and_malformed() {
        let err = elapsed_checked("", "08:00", "2024-01-01", "09:00").unwrap_err();
        assert_eq!(err, CoreError::MissingTimestamp { what: "departure" });

        let err = elapsed_checked("2024-01-01", "08:00", "2024-01-01", "9x").unwrap_err();
        assert!(matches!(err, CoreError::InvalidTimestamp { what: "arrival", .. }));
    }

    #[test]
    fn sum_carries_across_hour_and_day() {
        let total = sum_elapsed([Elapsed::new(1, 23, 50), Elapsed::new(0, 0, 20)]);
        assert_eq!((total.days, total.hours, total.minutes), (2, 0, 10));
        assert!((total.total_hours - 48.0 - 10.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn huge_inputs_do_not_overflow() {
        let e = Elapsed::new(i64::MAX, i64::MAX, i64::MAX);
        assert!(e.total_hours.is_finite());
        assert!(e.total_hours > 0.0);
        assert_eq!(Elapsed::new(i64::MIN, 0, 0), Elapsed::ZERO);
    }

    #[test]
    fn sum_of_nothing_is_zero() {
        let total: Elapsed = Vec::<Elapsed>::new().into_iter().sum();
        assert_eq!(total, Elapsed::ZERO);
    }

    #[test]
    fn entered_duration_reads_hours_and_minutes() {
        let e = Elapsed::from_entered(1.0, "06.30");
        assert_eq!((e.days, e.hours, e.minutes), (1, 6, 30));
        assert_eq!(e.total_hours, 30.5);

        let e = Elapsed::from_entered(0.0, "12");
        assert_eq!(e.total_hours, 12.0);

        let e = Elapsed::from_entered("", "");
        assert_eq!(e, Elapsed::ZERO);
    }

    #[test]
    fn clock_span_same_day() {
        assert_eq!(clock_span("08.00", "13.45").hhmm(), "05.45");
        assert_eq!(clock_span("13.45", "08.00"), Elapsed::ZERO);
        assert_eq!(clock_span("", "08.00"), Elapsed::ZERO);
    }
}
