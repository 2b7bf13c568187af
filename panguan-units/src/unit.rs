use std::{error::Error, f64::consts::PI, fmt::{self, Display, Formatter}, str::FromStr};
use super::convert::Convert;

/// Provides copy-pasteable impls for unit families.
macro_rules! unit_impl {
    (
        $doc:literal,
        $enum_name:ident, $base_variant:ident: $base_abbr:literal,
        $(
            $($variant_doc:literal,)? $variant:ident: $main_abbr:literal $(, $alt_abbr:literal)* => $factor:expr
        ),*
        $(,)?
    ) => {
        #[doc = $doc]
        ///
        /// The listed abbreviations are the abbreviations used to parse the unit with
        /// [`FromStr`]. The main abbreviation comes first, followed by any alternate
        /// abbreviations that can be used.
        ///
        /// The conversions are listed in terms of the [base unit]. The base unit for
        #[doc = concat!("[`", stringify!($enum_name), "`] is [`", stringify!($enum_name), "::", stringify!($base_variant), "`].")]
        ///
        /// [base unit]: Convert::BASE
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        #[non_exhaustive]
        pub enum $enum_name {
            $(
                $(
                    #[doc = $variant_doc]
                    ///
                )?
                #[doc = concat!("- Abbreviation: `", $main_abbr, "`", $(", `", $alt_abbr, "`")*)]
                ///
                #[doc = concat!("- `1 ", $main_abbr, " = ", stringify!($factor), " ", $base_abbr, "`")]
                $variant,
            )*
        }

        impl FromStr for $enum_name {
            type Err = InvalidUnit;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $(
                        $main_abbr $(| $alt_abbr)* => Ok($enum_name::$variant),
                    )*
                    _ => Err(InvalidUnit { unit: value.to_owned() }),
                }
            }
        }

        impl Display for $enum_name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                match self {
                    $(
                        $enum_name::$variant => write!(f, $main_abbr),
                    )*
                }
            }
        }

        impl Convert for $enum_name {
            const BASE: Self = $enum_name::$base_variant;

            fn conversion_factor(&self) -> f64 {
                match self {
                    $(
                        $enum_name::$variant => $factor,
                    )*
                }
            }
        }

        impl From<$enum_name> for Unit {
            fn from(u: $enum_name) -> Self {
                Self::$enum_name(u)
            }
        }

        impl TryFrom<&str> for $enum_name {
            type Error = InvalidUnit;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    }
}

/// Error returned if a unit cannot be converted to another, because they measure different
/// quantities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    /// The unit that could not be converted.
    pub unit: Unit,

    /// The target unit.
    pub target: Unit,
}

impl Display for ConversionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f,
            "cannot convert from `{}` to `{}`",
            self.unit, self.target
        )
    }
}

impl Error for ConversionError {}

/// Error returned if the given unit abbreviation is not in any unit table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidUnit {
    /// The invalid unit abbreviation.
    pub unit: String,
}

impl Display for InvalidUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "not a valid unit: `{}`", self.unit)
    }
}

impl Error for InvalidUnit {}

/// A unit from one of the supported families.
///
/// See the corresponding enum variants for the available units and their abbreviations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Unit {
    Length(Length),
    Angle(Angle),
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Length(l) => write!(f, "{}", l),
            Unit::Angle(a) => write!(f, "{}", a),
        }
    }
}

/// Try a to convert an abbreviation to a [`Unit`], searching each family in turn.
impl FromStr for Unit {
    type Err = InvalidUnit;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Length::try_from(value).map(Unit::Length)
            .or_else(|_| Angle::try_from(value).map(Unit::Angle))
    }
}

impl TryFrom<&str> for Unit {
    type Error = InvalidUnit;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Unit {
    /// If this unit can be converted to the target unit, returns the conversion factor between
    /// them: the value to multiply a quantity in this unit by to get a quantity in the target.
    pub fn conversion_factor(&self, target: Unit) -> Result<f64, ConversionError> {
        match (self, target) {
            (Unit::Length(l1), Unit::Length(l2)) => {
                Ok(l1.conversion_factor() / l2.conversion_factor())
            },
            (Unit::Angle(a1), Unit::Angle(a2)) => {
                Ok(a1.conversion_factor() / a2.conversion_factor())
            },
            _ => Err(ConversionError { unit: *self, target }),
        }
    }
}

unit_impl!("A unit of length.",
    Length, Meter: "m",
    Kilometer: "km" => 1000.0,
    Meter: "m" => 1.0,
    Centimeter: "cm" => 0.01,
    Millimeter: "mm" => 0.001,
);

unit_impl!("A unit of angle.",
    Angle, Radian: "rad",
    Radian: "rad" => 1.0,
    "A degree (1/360 of a full turn).", Degree: "deg", "°" => PI / 180.0,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_units() {
        assert_eq!("km".parse::<Unit>(), Ok(Unit::Length(Length::Kilometer)));
        assert_eq!(" ° ".parse::<Unit>(), Ok(Unit::Angle(Angle::Degree)));
        assert_eq!("ft".parse::<Unit>(), Err(InvalidUnit { unit: "ft".to_owned() }));
    }

    #[test]
    fn display_uses_main_abbreviation() {
        assert_eq!(Unit::Angle(Angle::Degree).to_string(), "deg");
        assert_eq!(Unit::Length(Length::Millimeter).to_string(), "mm");
    }

    #[test]
    fn conversion_error_names_both_units() {
        let err = Unit::Length(Length::Meter)
            .conversion_factor(Unit::Angle(Angle::Degree))
            .unwrap_err();
        assert_eq!(err.to_string(), "cannot convert from `m` to `deg`");
    }
}
