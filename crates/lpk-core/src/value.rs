//! Field values that are either a number or free text.
//!
//! Report columns such as cargo loaded or fuel received hold a placeholder
//! dash until a figure is entered, so the stored value is a number or a string
//! depending on entry state.

use core::fmt;

use crate::numeric::{Coerce, Real, coerce_str, finite_or_zero};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldValue {
    Number(Real),
    Text(String),
}

/// Accepts a number, a string, or `null`. Older files store `null` where a
/// computed figure came out as NaN; it reads back as the empty placeholder.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FieldValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Stored {
            Number(Real),
            Text(String),
            Null,
        }

        Ok(match Stored::deserialize(deserializer)? {
            Stored::Number(n) => Self::Number(n),
            Stored::Text(text) => Self::Text(text),
            Stored::Null => Self::empty(),
        })
    }
}

impl FieldValue {
    /// The `"-"` placeholder shown for columns with nothing entered.
    pub fn dash() -> Self {
        Self::Text("-".to_string())
    }

    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    /// True for an empty string or the dash placeholder.
    pub fn is_placeholder(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Text(text) => {
                let text = text.trim();
                text.is_empty() || text == "-"
            }
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl Coerce for FieldValue {
    fn coerce(&self) -> Real {
        match self {
            Self::Number(n) => finite_or_zero(*n),
            Self::Text(text) => coerce_str(text),
        }
    }
}

impl From<Real> for FieldValue {
    fn from(value: Real) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_detection() {
        assert!(FieldValue::dash().is_placeholder());
        assert!(FieldValue::empty().is_placeholder());
        assert!(!FieldValue::from("12").is_placeholder());
        assert!(!FieldValue::Number(0.0).is_placeholder());
    }

    #[test]
    fn coerce_both_shapes() {
        assert_eq!(FieldValue::Number(42.5).coerce(), 42.5);
        assert_eq!(FieldValue::from("42,5").coerce(), 42.5);
        assert_eq!(FieldValue::dash().coerce(), 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn untagged_json_shapes() {
        let n: FieldValue = serde_json::from_str("12.5").unwrap();
        assert_eq!(n, FieldValue::Number(12.5));
        let t: FieldValue = serde_json::from_str("\"-\"").unwrap();
        assert_eq!(t, FieldValue::dash());
        assert_eq!(serde_json::to_string(&FieldValue::dash()).unwrap(), "\"-\"");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn null_reads_as_empty() {
        let v: FieldValue = serde_json::from_str("null").unwrap();
        assert_eq!(v, FieldValue::empty());
        assert_eq!(v.coerce(), 0.0);

        let row: Vec<FieldValue> = serde_json::from_str("[1, null, \"-\"]").unwrap();
        assert_eq!(row, [FieldValue::Number(1.0), FieldValue::empty(), FieldValue::dash()]);
    }
}
