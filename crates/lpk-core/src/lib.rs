//! lpk-core: stable foundation for voyage log computation.
//!
//! Contains:
//! - numeric (Real + tolerances + lenient field coercion)
//! - value (mixed number/placeholder field values)
//! - duration (elapsed time between date/time pairs, duration sums)
//! - ids (generated record identifiers)
//! - error (shared error types)

pub mod duration;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod value;

// Re-exports: nice ergonomics for downstream crates
pub use duration::*;
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use value::FieldValue;
