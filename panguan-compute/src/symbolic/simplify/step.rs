use std::fmt::{self, Display, Formatter};

/// Possible simplification steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `0+a = a`
    /// `a+0 = a`
    AddZero,

    /// `2+3 = 5`
    /// `2*3 = 6`
    Evaluate,

    /// `a+a = 2a`
    /// `a+a+a = 3a`
    /// `2a+3a = 5a`
    /// etc.
    CombineLikeTerms,

    /// `0*a = 0`
    /// `a*0 = 0`
    MultiplyZero,

    /// `1*a = a`
    /// `a*1 = a`
    MultiplyOne,

    /// `a*a = a^2`
    /// `a*a*a = a^3`
    /// `a^2*a^3 = a^5`
    /// etc.
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `0^a = 0`
    PowerZeroLeft,

    /// `1^a = 1`
    PowerOneLeft,

    /// `a^1 = a`
    PowerOne,

    /// `(a^b)^c = a^(b*c)`
    PowerPower,

    /// `2^3 = 8`
    RationalPower,

    /// `12^(1/2) = 2*3^(1/2)`
    ExtractRoot,

    /// `a*(b+c) = a*b + a*c`
    DistributiveProperty,

    /// `(a*b)^c = a^c*b^c`
    DistributePower,

    /// `i^(4n) = 1`
    I0,

    /// `i^(4n+1) = i`
    I1,

    /// `i^(4n+2) = -1`
    I2,

    /// `i^(4n+3) = -i`
    I3,

    /// `sin(x)` identity
    Sin,

    /// `cos(x)` identity
    Cos,

    /// `tan(x)` identity
    Tan,

    /// `asin(1/2) = pi/6`
    InverseTrigonometric,

    /// `sin(x)^2 + cos(x)^2 = 1`
    Pythagorean,

    /// `ln(e^x) = x`
    Logarithm,

    /// `e^ln(x) = x`
    Exponential,

    /// `abs(-2) = 2`
    AbsoluteValue,
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let description = match self {
            Self::AddZero => "remove zero terms",
            Self::Evaluate => "evaluate numbers",
            Self::CombineLikeTerms => "combine like terms",
            Self::MultiplyZero => "multiply by zero",
            Self::MultiplyOne => "remove factors of one",
            Self::CombineLikeFactors => "combine like factors",
            Self::PowerZero => "power of zero",
            Self::PowerZeroLeft => "zero to a power",
            Self::PowerOneLeft => "one to a power",
            Self::PowerOne => "power of one",
            Self::PowerPower => "power of a power",
            Self::RationalPower => "evaluate power",
            Self::ExtractRoot => "extract perfect powers from root",
            Self::DistributiveProperty => "distribute",
            Self::DistributePower => "distribute power over product",
            Self::I0 | Self::I1 | Self::I2 | Self::I3 => "power of the imaginary unit",
            Self::Sin => "sine identity",
            Self::Cos => "cosine identity",
            Self::Tan => "tangent identity",
            Self::InverseTrigonometric => "inverse trigonometric identity",
            Self::Pythagorean => "pythagorean identity",
            Self::Logarithm => "logarithm identity",
            Self::Exponential => "exponential identity",
            Self::AbsoluteValue => "absolute value",
        };
        write!(f, "{}", description)
    }
}
