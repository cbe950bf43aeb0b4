//! Density registry and dimensional bridging.
//!
//! Same-dimension conversions (cups to teaspoons) go straight through the
//! unit layer. When the requested unit lives in a different dimension
//! (cups of rice to grams), the gap is bridged by a per-ingredient density
//! registered with the converter.

use std::collections::HashMap;

use kitchen_units::{Dimension, Quantity, Unit};

use crate::error::ConvertError;

/// Default relative tolerance for disagreeing density observations.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Owns the known ingredient densities and performs conversions.
///
/// Densities are keyed by a free-form identifier (usually an ingredient
/// name). Each identifier holds at most one value: the first observation
/// wins, later observations are checked against it and either accepted as
/// duplicates or rejected as inconsistent.
#[derive(Debug, Clone)]
pub struct UnitConverter {
    densities: HashMap<String, Quantity>,
    tolerance: f64,
}

impl Default for UnitConverter {
    fn default() -> UnitConverter {
        UnitConverter::new(DEFAULT_TOLERANCE)
    }
}

impl UnitConverter {
    pub fn new(tolerance: f64) -> UnitConverter {
        UnitConverter {
            densities: HashMap::new(),
            tolerance,
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Record a density observation for `identifier`.
    ///
    /// The first observation is stored as-is. A repeat observation is
    /// reduced to the stored orientation and must agree with the stored
    /// value within the relative tolerance; when it does, the original
    /// value is retained unchanged. An identifier keeps the orientation
    /// (mass/volume or volume/mass) it was first registered with; the
    /// inverse orientation is not accepted for the same identifier.
    pub fn add_density(&mut self, identifier: &str, density: Quantity) -> Result<(), ConvertError> {
        let dimension = density.dimension();
        if dimension != Dimension::DENSITY && dimension != Dimension::DENSITY.recip() {
            return Err(ConvertError::InvalidDensityDimension {
                identifier: identifier.to_string(),
                dimension: dimension.to_string(),
            });
        }
        let Some(current) = self.densities.get(identifier) else {
            tracing::debug!(identifier, density = %density, "registered density");
            self.densities.insert(identifier.to_string(), density);
            return Ok(());
        };
        if dimension != current.dimension() {
            return Err(ConvertError::InvalidDensityDimension {
                identifier: identifier.to_string(),
                dimension: dimension.to_string(),
            });
        }
        let offered = density.to(current.unit())?;
        // Asymmetric on purpose: the discrepancy is measured relative to the
        // first-registered value, not the incoming one.
        if (current.magnitude() - offered.magnitude()).abs()
            > self.tolerance * current.magnitude()
        {
            return Err(ConvertError::InconsistentDensity {
                identifier: identifier.to_string(),
                current: current.to_string(),
                offered: density.to_string(),
            });
        }
        Ok(())
    }

    /// Look up the registered density for `identifier`.
    pub fn get_density(&self, identifier: &str) -> Option<&Quantity> {
        self.densities.get(identifier)
    }

    /// Drop every registered density.
    pub fn clear_densities(&mut self) {
        self.densities.clear();
    }

    /// All registered (identifier, density) pairs, for serialization.
    pub fn densities(&self) -> impl Iterator<Item = (&str, &Quantity)> {
        self.densities.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.densities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.densities.is_empty()
    }

    /// Convert `quantity` to `unit`, bridging a dimensionality gap through
    /// the density registered for `identifier` when one is needed.
    ///
    /// The registry is never mutated; every failure is deterministic for
    /// the given inputs.
    pub fn convert(
        &self,
        quantity: &Quantity,
        unit: &Unit,
        identifier: Option<&str>,
    ) -> Result<Quantity, ConvertError> {
        if quantity.dimension() == unit.dimension() {
            return Ok(quantity.to(unit)?);
        }
        let density = identifier
            .and_then(|id| self.densities.get(id))
            .ok_or_else(|| ConvertError::NoDensityKnown {
                identifier: identifier.map(str::to_string),
            })?;
        if quantity.dimension() / unit.dimension() == density.dimension() {
            // volume -> mass with a volume/mass density, or the mirror case
            return Ok((quantity / density).to(unit)?);
        }
        if unit.dimension() / quantity.dimension() == density.dimension() {
            return Ok((quantity * density).to(unit)?);
        }
        Err(ConvertError::UnconvertibleDimensions {
            from: quantity.to_string(),
            to: unit.to_string(),
            density: density.to_string(),
        })
    }
}
