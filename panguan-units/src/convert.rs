//! Provides the [`Convert`] trait, which is implemented by every unit family.

/// A trait implemented by every unit family, providing the information needed to convert between
/// units of the same family.
pub trait Convert {
    /// The base unit of this family.
    ///
    /// The base unit is the unit in which conversions to other units of the same family are
    /// defined. The base unit of length is the meter, and the base unit of angle is the radian.
    const BASE: Self;

    /// Returns the conversion factor from `&self` to [`Convert::BASE`], i.e. the value to multiply
    /// a quantity in this unit by, in order to get a quantity in [`Convert::BASE`].
    ///
    /// For example, if [`Convert::BASE`] is the meter, the conversion factor for a centimeter
    /// would be `0.01`.
    fn conversion_factor(&self) -> f64;
}
