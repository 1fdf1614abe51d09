//! tse-core: stable foundation for the thermodynamic simulation engine.
//!
//! Contains:
//! - units (uom SI types + constructors, Celsius/Kelvin helpers)
//! - numeric (Real + tolerances + float helpers)
//! - ids (stable compact IDs for species/experiment records)
//! - error (shared error types)
//! - constants (physical constants and tunable defaults, all in one place)

pub mod constants;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{TfError, TfResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
