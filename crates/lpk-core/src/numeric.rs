/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-9,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Lenient conversion of an entered field into a number.
///
/// Empty input, the `"-"` placeholder and anything without digits become `0`.
/// A comma decimal separator is accepted, and every character other than
/// digits and `.` is dropped before parsing, so `"1.250 MT"` reads as `1.25`
/// and `"-5"` reads as `5`. Only the leading `digits[.digits]` run is used.
pub fn coerce_str(raw: &str) -> Real {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return 0.0;
    }

    let normalized = trimmed.replacen(',', ".", 1);
    let cleaned: String = normalized
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut number = String::with_capacity(cleaned.len() + 1);
    let mut seen_dot = false;
    for c in cleaned.chars() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        number.push(c);
    }

    if !number.chars().any(|c| c.is_ascii_digit()) {
        return 0.0;
    }
    if number.starts_with('.') {
        number.insert(0, '0');
    }
    if number.ends_with('.') {
        number.pop();
    }

    number.parse::<Real>().map(finite_or_zero).unwrap_or(0.0)
}

/// Maps NaN and infinities to zero.
pub fn finite_or_zero(v: Real) -> Real {
    if v.is_finite() { v } else { 0.0 }
}

/// Division that yields zero instead of NaN or infinity.
pub fn safe_div(numerator: Real, denominator: Real) -> Real {
    if denominator > 0.0 || denominator < 0.0 {
        finite_or_zero(numerator / denominator)
    } else {
        0.0
    }
}

/// Round half away from zero to a fixed number of decimals.
pub fn round_to(v: Real, decimals: u32) -> Real {
    let factor = 10_f64.powi(decimals as i32);
    finite_or_zero((v * factor).round() / factor)
}

/// Anything that can be read as a number for arithmetic on report fields.
pub trait Coerce {
    fn coerce(&self) -> Real;
}

impl Coerce for Real {
    fn coerce(&self) -> Real {
        finite_or_zero(*self)
    }
}

impl Coerce for str {
    fn coerce(&self) -> Real {
        coerce_str(self)
    }
}

impl Coerce for String {
    fn coerce(&self) -> Real {
        coerce_str(self)
    }
}

impl<T: Coerce + ?Sized> Coerce for &T {
    fn coerce(&self) -> Real {
        (**self).coerce()
    }
}

impl<T: Coerce> Coerce for Option<T> {
    fn coerce(&self) -> Real {
        self.as_ref().map_or(0.0, Coerce::coerce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn placeholders_read_as_zero() {
        assert_eq!(coerce_str(""), 0.0);
        assert_eq!(coerce_str("   "), 0.0);
        assert_eq!(coerce_str("-"), 0.0);
        assert_eq!(coerce_str("n/a"), 0.0);
        assert_eq!(coerce_str("."), 0.0);
    }

    #[test]
    fn comma_decimal_and_decoration() {
        assert_eq!(coerce_str("12,5"), 12.5);
        assert_eq!(coerce_str("1.250 MT"), 1.25);
        assert_eq!(coerce_str("Rp 45000"), 45000.0);
        assert_eq!(coerce_str(".5"), 0.5);
        assert_eq!(coerce_str("7."), 7.0);
    }

    #[test]
    fn only_leading_number_is_used() {
        assert_eq!(coerce_str("1.2.3"), 1.2);
        // second comma is stripped, not normalized
        assert_eq!(coerce_str("1,2,3"), 1.23);
    }

    #[test]
    fn sign_is_dropped_from_text() {
        assert_eq!(coerce_str("-5"), 5.0);
        assert_eq!((-5.0_f64).coerce(), -5.0);
    }

    #[test]
    fn non_finite_numbers_read_as_zero() {
        assert_eq!(Real::NAN.coerce(), 0.0);
        assert_eq!(Real::INFINITY.coerce(), 0.0);
        assert_eq!(None::<Real>.coerce(), 0.0);
        assert_eq!(Some("3,5").coerce(), 3.5);
    }

    #[test]
    fn safe_div_never_produces_nan() {
        assert_eq!(safe_div(305.0, 0.0), 0.0);
        assert_eq!(safe_div(0.0, 0.0), 0.0);
        assert_eq!(safe_div(305.0, 30.5), 10.0);
    }

    #[test]
    fn round_to_two_decimals() {
        assert_eq!(round_to(10.004, 2), 10.0);
        assert_eq!(round_to(9.876, 2), 9.88);
        assert_eq!(round_to(Real::NAN, 2), 0.0);
    }
}
