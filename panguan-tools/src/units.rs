//! Unit conversion.

use crate::{ToolError, ToolErrorKind};
use panguan_units::{Measurement, Unit};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The output of [`convert`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    /// The value, in the target unit.
    pub converted_value: f64,

    /// The factor the value was multiplied by.
    pub factor: f64,
}

/// Converts a value between units of the same family.
///
/// The supported units are `mm`, `cm`, `m` and `km` for length, and `deg` and `rad` for angle.
/// Unknown units and conversions between families are [`ToolErrorKind::UnsupportedConversion`]
/// errors whose message names both units.
pub fn convert(value: f64, src_unit: &str, dst_unit: &str) -> Result<Conversion, ToolError> {
    let unsupported = |reason: String| {
        debug!(src_unit, dst_unit, reason = %reason, "unsupported conversion");
        ToolError::new(ToolErrorKind::UnsupportedConversion, reason)
    };

    let (src, dst) = match (src_unit.parse::<Unit>(), dst_unit.parse::<Unit>()) {
        (Ok(src), Ok(dst)) => (src, dst),
        (Err(err), _) | (_, Err(err)) => {
            return Err(unsupported(format!(
                "cannot convert from `{}` to `{}`: {}",
                src_unit.trim(), dst_unit.trim(), err,
            )));
        },
    };

    let factor = src.conversion_factor(dst).map_err(|err| unsupported(err.to_string()))?;
    let converted = Measurement::new(value, src)
        .convert(dst)
        .map_err(|err| unsupported(err.to_string()))?;
    Ok(Conversion {
        converted_value: *converted.value(),
        factor,
    })
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        assert_float_relative_eq,
    };
    use super::*;

    #[test]
    fn kilometers_to_meters() {
        let conversion = convert(1.0, "km", "m").unwrap();
        assert_float_relative_eq!(conversion.converted_value, 1000.0);
        assert_float_relative_eq!(conversion.factor, 1000.0);
    }

    #[test]
    fn degrees_to_radians() {
        let conversion = convert(180.0, "deg", "rad").unwrap();
        assert_float_relative_eq!(conversion.converted_value, std::f64::consts::PI);
    }

    #[test]
    fn millimeters_to_centimeters() {
        let conversion = convert(25.0, "mm", "cm").unwrap();
        assert_float_relative_eq!(conversion.converted_value, 2.5);
    }

    #[test]
    fn across_families() {
        let err = convert(1.0, "m", "deg").unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::UnsupportedConversion);
        assert!(err.message.contains("`m`") && err.message.contains("`deg`"));
    }

    #[test]
    fn unknown_unit() {
        let err = convert(1.0, "ft", "m").unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::UnsupportedConversion);
        assert_eq!(err.message, "cannot convert from `ft` to `m`: not a valid unit: `ft`");
    }
}
