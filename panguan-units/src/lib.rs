//! Unit conversion for panguan.
//!
//! Units come from closed tables grouped into families: length (`mm`, `cm`, `m`, `km`) and angle
//! (`deg`, `rad`). Units of the same family convert through the family's base unit; converting
//! between families is an error.
//!
//! ```
//! use panguan_units::{Length, Measurement};
//!
//! let m = Measurement::new(2.5, Length::Kilometer);
//! assert_eq!(*m.convert(Length::Meter).unwrap().value(), 2500.0);
//! ```

pub mod convert;
pub mod unit;

use std::ops::Mul;
pub use unit::{Angle, ConversionError, InvalidUnit, Length, Unit};

/// A value and the unit it represents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement<T> {
    value: T,
    unit: Unit,
}

impl<T> Measurement<T> {
    /// Create a new measurement.
    pub fn new(value: T, unit: impl Into<Unit>) -> Self {
        Self { value, unit: unit.into() }
    }

    /// Get the value of this measurement.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Get the unit of this measurement.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Convert this measurement to another unit. Returns [`Err`] if the conversion is not
    /// possible.
    pub fn convert(&self, target: impl Into<Unit>) -> Result<Self, ConversionError>
        where T: Copy + Mul<f64, Output = T>,
    {
        let target = target.into();
        Ok(Self {
            value: self.value * self.unit.conversion_factor(target)?,
            unit: target,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        assert_float_relative_eq,
    };
    use super::*;

    #[test]
    fn identity_length() {
        let m = Measurement::new(2.0, Length::Centimeter);
        let m2 = m.convert(Length::Centimeter).unwrap();
        assert_float_relative_eq!(*m2.value(), 2.0);
    }

    #[test]
    fn convert_length() {
        let m = Measurement::new(1.0, Length::Kilometer);
        let m2 = m.convert(Length::Meter).unwrap();
        assert_float_relative_eq!(*m2.value(), 1000.0);

        let m = Measurement::new(25.4, Length::Millimeter);
        let m2 = m.convert(Length::Centimeter).unwrap();
        assert_float_relative_eq!(*m2.value(), 2.54);
    }

    #[test]
    fn convert_angle() {
        let m = Measurement::new(180.0, Angle::Degree);
        let m2 = m.convert(Angle::Radian).unwrap();
        assert_float_relative_eq!(*m2.value(), std::f64::consts::PI);

        let m = Measurement::new(std::f64::consts::FRAC_PI_2, Angle::Radian);
        let m2 = m.convert(Angle::Degree).unwrap();
        assert_float_relative_eq!(*m2.value(), 90.0);
    }

    #[test]
    fn cross_family_is_an_error() {
        let m = Measurement::new(1.0, Length::Meter);
        assert!(m.convert(Angle::Degree).is_err());
    }
}
