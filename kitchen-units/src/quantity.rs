//! Units and quantities.
//!
//! A [`Unit`] couples a display label with a dimensional signature and a
//! scale factor to coherent base units (gram, meter, second). A
//! [`Quantity`] is a magnitude expressed in some unit. Both are immutable
//! value types; arithmetic always produces fresh values.

use std::fmt;
use std::ops::{Div, Mul};

use crate::dimension::Dimension;
use crate::registry::UnitError;

/// A named or compound measurement unit.
#[derive(Clone, PartialEq, Debug)]
pub struct Unit {
    label: String,
    dimension: Dimension,
    factor: f64,
}

impl Unit {
    pub(crate) fn new(label: impl Into<String>, dimension: Dimension, factor: f64) -> Unit {
        Unit {
            label: label.into(),
            dimension,
            factor,
        }
    }

    /// The dimensionless identity unit.
    pub fn dimensionless() -> Unit {
        Unit::new("", Dimension::DIMENSIONLESS, 1.0)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Multiplier from this unit to coherent base units.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Compound unit `self * other`, e.g. `g * cup` -> `g*cup`.
    pub fn multiply(&self, other: &Unit) -> Unit {
        Unit::new(
            join_labels(&self.label, "*", &other.label),
            self.dimension * other.dimension,
            self.factor * other.factor,
        )
    }

    /// Compound unit `self / other`, e.g. `g / cup` -> `g/cup`.
    pub fn divide(&self, other: &Unit) -> Unit {
        Unit::new(
            join_labels(&self.label, "/", &other.label),
            self.dimension / other.dimension,
            self.factor / other.factor,
        )
    }

    /// Integer power of this unit, e.g. `m.powi(2)` -> `m^2`.
    pub fn powi(&self, n: i16) -> Unit {
        Unit::new(
            format!("{}^{}", self.label, n),
            self.dimension.powi(n),
            self.factor.powi(i32::from(n)),
        )
    }
}

/// Join two unit labels, parenthesizing a compound right-hand side so the
/// result reads unambiguously (`g/(g/cup)` rather than `g/g/cup`).
fn join_labels(left: &str, op: &str, right: &str) -> String {
    if right.contains('/') || right.contains('*') {
        format!("{left}{op}({right})")
    } else {
        format!("{left}{op}{right}")
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// A magnitude in a unit.
///
/// Equality compares the dimensional signature and the value reduced to
/// base units, so `1 cup == 48 tsp` regardless of display unit.
#[derive(Clone, Debug)]
pub struct Quantity {
    magnitude: f64,
    unit: Unit,
}

impl Quantity {
    pub fn new(magnitude: f64, unit: Unit) -> Quantity {
        Quantity { magnitude, unit }
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Value reduced to coherent base units.
    pub fn base_value(&self) -> f64 {
        self.magnitude * self.unit.factor()
    }

    /// Convert to another unit of the same dimension.
    pub fn to(&self, unit: &Unit) -> Result<Quantity, UnitError> {
        if self.dimension() != unit.dimension() {
            return Err(UnitError::DimensionMismatch {
                value: self.to_string(),
                expected: unit.dimension().to_string(),
                actual: self.dimension().to_string(),
            });
        }
        Ok(Quantity::new(self.base_value() / unit.factor(), unit.clone()))
    }

    /// Scale the magnitude, keeping the unit.
    pub fn scale(&self, factor: f64) -> Quantity {
        Quantity::new(self.magnitude * factor, self.unit.clone())
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Quantity) -> bool {
        self.dimension() == other.dimension() && self.base_value() == other.base_value()
    }
}

impl Mul for &Quantity {
    type Output = Quantity;

    fn mul(self, rhs: &Quantity) -> Quantity {
        Quantity::new(self.magnitude * rhs.magnitude, self.unit.multiply(&rhs.unit))
    }
}

impl Div for &Quantity {
    type Output = Quantity;

    fn div(self, rhs: &Quantity) -> Quantity {
        Quantity::new(self.magnitude / rhs.magnitude, self.unit.divide(&rhs.unit))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.label().is_empty() {
            write!(f, "{}", self.magnitude)
        } else {
            write!(f, "{} {}", self.magnitude, self.unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::UnitRegistry;

    #[test]
    fn test_same_dimension_conversion() {
        let units = UnitRegistry::new();
        let q = units.parse_quantity("2 cups").unwrap();
        let tsp = units.parse_unit("tsp").unwrap();
        let converted = q.to(&tsp).unwrap();
        assert!((converted.magnitude() - 96.0).abs() < 1e-9);
        assert_eq!(converted.unit().label(), "tsp");
    }

    #[test]
    fn test_conversion_rejects_dimension_mismatch() {
        let units = UnitRegistry::new();
        let q = units.parse_quantity("1 cup").unwrap();
        let g = units.parse_unit("g").unwrap();
        assert!(matches!(
            q.to(&g),
            Err(UnitError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_value_equality_across_units() {
        let units = UnitRegistry::new();
        let cup = units.parse_quantity("1 cup").unwrap();
        let same = units.parse_quantity("1 cup").unwrap();
        assert_eq!(cup, same);
        let gram = units.parse_quantity("1 g").unwrap();
        assert_ne!(cup, gram);
    }

    #[test]
    fn test_quantity_product_cancels_units() {
        let units = UnitRegistry::new();
        let volume = units.parse_quantity("2 cup").unwrap();
        let density = units.parse_quantity("240 g/cup").unwrap();
        let mass = (&volume * &density).to(&units.parse_unit("g").unwrap()).unwrap();
        assert!((mass.magnitude() - 480.0).abs() < 1e-9);
    }

    #[test]
    fn test_compound_label_parenthesized() {
        let units = UnitRegistry::new();
        let mass = units.parse_quantity("180 g").unwrap();
        let density = units.parse_quantity("180 g/cup").unwrap();
        let ratio = &mass / &density;
        assert_eq!(ratio.unit().label(), "g/(g/cup)");
        assert_eq!(ratio.dimension(), crate::Dimension::VOLUME);
    }

    #[test]
    fn test_display_round_trip() {
        let units = UnitRegistry::new();
        let q = units.parse_quantity("1.5 cup").unwrap();
        assert_eq!(q.to_string(), "1.5 cup");
        let back = units.parse_quantity(&q.to_string()).unwrap();
        assert_eq!(q, back);
    }
}
