//! Runtime quantity and unit arithmetic for kitchen measurements.
//!
//! This crate provides the measurement primitives the rest of the workspace
//! builds on: dimensional signatures (mass, length, time with rational
//! exponents), named and compound units, and quantities that can be parsed
//! from strings, combined arithmetically, and converted within a dimension.
//!
//! Cross-dimension conversion (volume to mass via a density) lives
//! elsewhere; this crate only knows about dimensionally-valid algebra.
//!
//! # Example
//!
//! ```
//! use kitchen_units::UnitRegistry;
//!
//! let units = UnitRegistry::new();
//! let q = units.parse_quantity("2 cups").unwrap();
//! let tsp = units.parse_unit("tsp").unwrap();
//! let converted = q.to(&tsp).unwrap();
//! assert!((converted.magnitude() - 96.0).abs() < 1e-9);
//! ```

mod dimension;
mod quantity;
mod registry;

pub use dimension::{BaseDimension, Dimension, Exponent};
pub use quantity::{Quantity, Unit};
pub use registry::{UnitError, UnitRegistry};
