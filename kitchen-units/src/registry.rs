//! The unit registry: named unit definitions and expression parsing.
//!
//! A registry is an explicitly constructed context object. Callers build
//! one (usually once, near the program entry point) and pass it wherever
//! quantities are parsed; there is no process-wide default instance.

use std::collections::HashMap;

use thiserror::Error;

use crate::dimension::Dimension;
use crate::quantity::{Quantity, Unit};

#[derive(Error, Debug)]
pub enum UnitError {
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("cannot parse quantity '{0}'")]
    InvalidQuantity(String),

    #[error("dimension mismatch: {value} is {actual}, expected {expected}")]
    DimensionMismatch {
        value: String,
        expected: String,
        actual: String,
    },
}

/// US legal cup in cubic meters; the anchor for the customary volume units.
const CUP_M3: f64 = 236.588_236_5e-6;

/// Builtin unit definitions: aliases (first entry is the canonical label),
/// dimension, factor to base units (gram, meter, second).
const DEFINITIONS: &[(&[&str], Dimension, f64)] = &[
    // Mass, base gram
    (&["g", "gram", "grams"], Dimension::MASS, 1.0),
    (&["kg", "kilogram", "kilograms"], Dimension::MASS, 1000.0),
    (&["mg", "milligram", "milligrams"], Dimension::MASS, 0.001),
    (&["oz", "ounce", "ounces"], Dimension::MASS, 28.349_523_125),
    (&["lb", "pound", "pounds"], Dimension::MASS, 453.592_37),
    // Length, base meter
    (&["m", "meter", "meters"], Dimension::LENGTH, 1.0),
    (&["cm", "centimeter", "centimeters"], Dimension::LENGTH, 0.01),
    (&["mm", "millimeter", "millimeters"], Dimension::LENGTH, 0.001),
    (&["in", "inch", "inches"], Dimension::LENGTH, 0.0254),
    (&["mi", "mile", "miles"], Dimension::LENGTH, 1609.344),
    // Volume, base cubic meter
    (&["cup", "cups", "cp"], Dimension::VOLUME, CUP_M3),
    (
        &["tbsp", "tablespoon", "tablespoons"],
        Dimension::VOLUME,
        CUP_M3 / 16.0,
    ),
    (
        &["tsp", "teaspoon", "teaspoons"],
        Dimension::VOLUME,
        CUP_M3 / 48.0,
    ),
    (&["fl oz", "floz"], Dimension::VOLUME, CUP_M3 / 8.0),
    (&["pint", "pints", "pt"], Dimension::VOLUME, CUP_M3 * 2.0),
    (&["quart", "quarts", "qt"], Dimension::VOLUME, CUP_M3 * 4.0),
    (&["gallon", "gallons", "gal"], Dimension::VOLUME, CUP_M3 * 16.0),
    (&["ml", "milliliter", "milliliters"], Dimension::VOLUME, 1e-6),
    (&["l", "liter", "liters"], Dimension::VOLUME, 1e-3),
    // Time, base second
    (&["s", "sec", "second", "seconds"], Dimension::TIME, 1.0),
    (&["min", "minute", "minutes"], Dimension::TIME, 60.0),
    (&["h", "hr", "hour", "hours"], Dimension::TIME, 3600.0),
];

/// Owns the table of named units and parses unit and quantity expressions.
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    units: HashMap<String, Unit>,
}

impl UnitRegistry {
    /// A registry populated with the builtin kitchen units.
    pub fn new() -> UnitRegistry {
        let mut units = HashMap::new();
        for (names, dimension, factor) in DEFINITIONS {
            let canonical = Unit::new(names[0], *dimension, *factor);
            for name in *names {
                units.insert((*name).to_string(), canonical.clone());
            }
        }
        UnitRegistry { units }
    }

    /// Look up a single named unit (no expression syntax).
    pub fn get_unit(&self, name: &str) -> Option<&Unit> {
        self.units.get(name.trim().to_lowercase().as_str())
    }

    /// Parse a unit expression: names combined with `*` and `/`, with
    /// optional integer powers (`g/cp`, `m^2`, `g*cm^-2`).
    pub fn parse_unit(&self, expression: &str) -> Result<Unit, UnitError> {
        let expression = expression.trim();
        let mut result: Option<Unit> = None;
        let mut rest = expression;
        let mut divide = false;
        loop {
            let (token, next_op, remainder) = match rest.find(['*', '/']) {
                None => (rest, None, ""),
                Some(idx) => (
                    &rest[..idx],
                    rest[idx..].chars().next(),
                    &rest[idx + 1..],
                ),
            };
            let (name, power) = split_power(token)
                .ok_or_else(|| UnitError::InvalidQuantity(expression.to_string()))?;
            let mut unit = self
                .get_unit(name)
                .ok_or_else(|| UnitError::UnknownUnit(name.trim().to_string()))?
                .clone();
            if power != 1 {
                unit = unit.powi(power);
            }
            result = Some(match result.take() {
                None => unit,
                Some(acc) if divide => acc.divide(&unit),
                Some(acc) => acc.multiply(&unit),
            });
            match next_op {
                None => break,
                Some(op) => divide = op == '/',
            }
            rest = remainder;
        }
        result.ok_or_else(|| UnitError::UnknownUnit(expression.to_string()))
    }

    /// Parse a quantity string: `"<decimal> <unit-expr>"`.
    ///
    /// The space is optional (`"1cp"`, `"180g"`); a bare number parses as a
    /// dimensionless quantity.
    pub fn parse_quantity(&self, text: &str) -> Result<Quantity, UnitError> {
        let text = text.trim();
        let split = text
            .char_indices()
            .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && *c == '-')))
            .map_or(text.len(), |(i, _)| i);
        let (number, rest) = text.split_at(split);
        let magnitude: f64 = number
            .parse()
            .map_err(|_| UnitError::InvalidQuantity(text.to_string()))?;
        let rest = rest.trim();
        if rest.is_empty() {
            return Ok(Quantity::new(magnitude, Unit::dimensionless()));
        }
        Ok(Quantity::new(magnitude, self.parse_unit(rest)?))
    }

    /// Parse a quantity and verify its dimensional signature.
    pub fn parse_quantity_checked(
        &self,
        text: &str,
        dimension: Dimension,
    ) -> Result<Quantity, UnitError> {
        let quantity = self.parse_quantity(text)?;
        if quantity.dimension() != dimension {
            return Err(UnitError::DimensionMismatch {
                value: text.trim().to_string(),
                expected: dimension.to_string(),
                actual: quantity.dimension().to_string(),
            });
        }
        Ok(quantity)
    }
}

impl Default for UnitRegistry {
    fn default() -> UnitRegistry {
        UnitRegistry::new()
    }
}

/// Split an optional `^n` power suffix off a token.
fn split_power(token: &str) -> Option<(&str, i16)> {
    match token.split_once('^') {
        None => Some((token, 1)),
        Some((name, power)) => power.trim().parse().ok().map(|p| (name, p)),
    }
}
