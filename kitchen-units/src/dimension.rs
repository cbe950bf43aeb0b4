//! Dimensional signatures.
//!
//! A [`Dimension`] records the exponent of each base dimension (mass,
//! length, time) carried by a unit or quantity. Exponents are exact
//! rationals, and signature comparison is exact, never approximate.

use std::fmt;
use std::ops::{Div, Mul};

/// A rational exponent, kept in reduced form with a positive denominator.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Exponent {
    num: i16,
    den: i16,
}

impl Exponent {
    pub const ZERO: Exponent = Exponent { num: 0, den: 1 };
    pub const ONE: Exponent = Exponent { num: 1, den: 1 };

    /// Build a reduced exponent. Panics on a zero denominator.
    pub fn new(num: i16, den: i16) -> Exponent {
        assert!(den != 0, "exponent denominator must be nonzero");
        let sign = if den < 0 { -1 } else { 1 };
        let g = gcd(num.unsigned_abs(), den.unsigned_abs()) as i16;
        Exponent {
            num: sign * num / g,
            den: sign * den / g,
        }
    }

    pub fn integer(n: i16) -> Exponent {
        Exponent { num: n, den: 1 }
    }

    pub fn is_zero(self) -> bool {
        self.num == 0
    }

    fn add(self, other: Exponent) -> Exponent {
        Exponent::new(
            self.num * other.den + other.num * self.den,
            self.den * other.den,
        )
    }

    fn neg(self) -> Exponent {
        Exponent {
            num: -self.num,
            den: self.den,
        }
    }

    fn scale(self, num: i16, den: i16) -> Exponent {
        Exponent::new(self.num * num, self.den * den)
    }

    /// Exponent value as a float, for unit scale-factor arithmetic.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

fn gcd(a: u16, b: u16) -> u16 {
    if b == 0 {
        a.max(1)
    } else {
        gcd(b, a % b)
    }
}

impl fmt::Display for Exponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "({}/{})", self.num, self.den)
        }
    }
}

/// The base dimensions tracked by this crate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BaseDimension {
    Mass,
    Length,
    Time,
}

impl BaseDimension {
    pub const ALL: [BaseDimension; 3] =
        [BaseDimension::Mass, BaseDimension::Length, BaseDimension::Time];

    fn name(self) -> &'static str {
        match self {
            BaseDimension::Mass => "mass",
            BaseDimension::Length => "length",
            BaseDimension::Time => "time",
        }
    }
}

/// The dimensional signature of a unit or quantity.
///
/// Two quantities are dimension-compatible exactly when their signatures
/// compare equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Dimension {
    exponents: [Exponent; 3],
}

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension {
        exponents: [Exponent::ZERO; 3],
    };
    pub const MASS: Dimension = Dimension::base(BaseDimension::Mass);
    pub const LENGTH: Dimension = Dimension::base(BaseDimension::Length);
    pub const TIME: Dimension = Dimension::base(BaseDimension::Time);
    /// Volume is length cubed.
    pub const VOLUME: Dimension = Dimension {
        exponents: [Exponent::ZERO, Exponent { num: 3, den: 1 }, Exponent::ZERO],
    };
    /// Mass per volume, the signature of a density observation.
    pub const DENSITY: Dimension = Dimension {
        exponents: [Exponent::ONE, Exponent { num: -3, den: 1 }, Exponent::ZERO],
    };

    const fn base(dim: BaseDimension) -> Dimension {
        let exponents = match dim {
            BaseDimension::Mass => [Exponent::ONE, Exponent::ZERO, Exponent::ZERO],
            BaseDimension::Length => [Exponent::ZERO, Exponent::ONE, Exponent::ZERO],
            BaseDimension::Time => [Exponent::ZERO, Exponent::ZERO, Exponent::ONE],
        };
        Dimension { exponents }
    }

    pub fn exponent(&self, dim: BaseDimension) -> Exponent {
        self.exponents[dim as usize]
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|e| e.is_zero())
    }

    /// Reciprocal signature (all exponents negated).
    pub fn recip(&self) -> Dimension {
        let mut exponents = self.exponents;
        for e in &mut exponents {
            *e = e.neg();
        }
        Dimension { exponents }
    }

    /// Raise to a rational power `num/den`.
    pub fn pow(&self, num: i16, den: i16) -> Dimension {
        let mut exponents = self.exponents;
        for e in &mut exponents {
            *e = e.scale(num, den);
        }
        Dimension { exponents }
    }

    pub fn powi(&self, n: i16) -> Dimension {
        self.pow(n, 1)
    }
}

impl Mul for Dimension {
    type Output = Dimension;

    fn mul(self, rhs: Dimension) -> Dimension {
        let mut exponents = self.exponents;
        for (e, r) in exponents.iter_mut().zip(rhs.exponents) {
            *e = e.add(r);
        }
        Dimension { exponents }
    }
}

impl Div for Dimension {
    type Output = Dimension;

    fn div(self, rhs: Dimension) -> Dimension {
        self * rhs.recip()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "dimensionless");
        }
        let mut first = true;
        for dim in BaseDimension::ALL {
            let e = self.exponent(dim);
            if e.is_zero() {
                continue;
            }
            if !first {
                write!(f, "*")?;
            }
            first = false;
            if e == Exponent::ONE {
                write!(f, "{}", dim.name())?;
            } else {
                write!(f, "{}^{}", dim.name(), e)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponent_reduction() {
        assert_eq!(Exponent::new(2, 4), Exponent::new(1, 2));
        assert_eq!(Exponent::new(-3, -1), Exponent::integer(3));
        assert_eq!(Exponent::new(3, -1), Exponent::integer(-3));
    }

    #[test]
    fn test_density_signature() {
        assert_eq!(Dimension::MASS / Dimension::VOLUME, Dimension::DENSITY);
        assert_eq!(Dimension::DENSITY.recip(), Dimension::VOLUME / Dimension::MASS);
    }

    #[test]
    fn test_volume_is_length_cubed() {
        assert_eq!(Dimension::LENGTH.powi(3), Dimension::VOLUME);
        assert_eq!(Dimension::VOLUME.pow(1, 3), Dimension::LENGTH);
    }

    #[test]
    fn test_mul_div_cancel() {
        let d = Dimension::MASS * Dimension::TIME / Dimension::MASS;
        assert_eq!(d, Dimension::TIME);
        assert!((d / Dimension::TIME).is_dimensionless());
    }

    #[test]
    fn test_rational_exponents_compare_exactly() {
        // length^(1/2) * length^(1/2) collapses back to length
        let half = Dimension::LENGTH.pow(1, 2);
        assert_eq!(half * half, Dimension::LENGTH);
        assert_ne!(half, Dimension::LENGTH);
    }

    #[test]
    fn test_display() {
        assert_eq!(Dimension::DENSITY.to_string(), "mass*length^-3");
        assert_eq!(Dimension::VOLUME.to_string(), "length^3");
        assert_eq!(Dimension::DIMENSIONLESS.to_string(), "dimensionless");
    }
}
