//! Stateless conversion arithmetic.
//!
//! Two rules cover every family the engine knows about:
//!
//! | Rule        | Used by           | Formula                                   |
//! |-------------|-------------------|-------------------------------------------|
//! | ratio       | pressure, custom  | `value / factor[from] * factor[to]`       |
//! | temperature | temperature       | affine transform pivoting through °C      |
//!
//! Factors and offsets are supplied by the caller; this crate holds no
//! tables.
//!
//! ```
//! use converter::{ratio, TempScale};
//!
//! // 1 MPa → Pa with factors relative to the bar
//! assert_eq!(ratio(1.0, 0.1, 100_000.0), 1_000_000.0);
//!
//! let c = TempScale::Fahrenheit.to_celsius(212.0, 32.0);
//! assert!((c - 100.0).abs() < 1e-12);
//! ```

// ────────────────────────────────────────────────────────────────────
//  Ratio rule
// ────────────────────────────────────────────────────────────────────

/// Ratio conversion between two table units.
///
/// Factors are "table units per base unit", so the value is first brought
/// back to the base (division) and then scaled to the target
/// (multiplication).  Equal factors return `value` untouched, so a unit
/// converted to itself is exact.
pub fn ratio(value: f64, from_factor: f64, to_factor: f64) -> f64 {
    if from_factor == to_factor {
        return value;
    }
    value / from_factor * to_factor
}

// ────────────────────────────────────────────────────────────────────
//  Temperature scales
// ────────────────────────────────────────────────────────────────────

/// Temperature scale recognised from a unit symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempScale {
    /// Degrees Celsius (pivot)
    Celsius,
    /// Degrees Fahrenheit
    Fahrenheit,
    /// Kelvin
    Kelvin,
    /// Degrees Rankine
    Rankine,
}

impl TempScale {
    /// Recognise `"C"`, `"F"`, `"K"` or `"R"`.  Symbols are case-sensitive.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "C" => Some(Self::Celsius),
            "F" => Some(Self::Fahrenheit),
            "K" => Some(Self::Kelvin),
            "R" => Some(Self::Rankine),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
            Self::Kelvin => "K",
            Self::Rankine => "R",
        }
    }

    /// Stage 1: bring `value` (expressed in `self`) to °C.
    ///
    /// `offset` is the signed reference offset of `self`
    /// (`F = 32`, `R = 491.67`, `K = -273.15`).  Kelvin adds its
    /// negative offset; the degree-sized scales subtract theirs and
    /// rescale by 5/9.
    pub fn to_celsius(self, value: f64, offset: f64) -> f64 {
        match self {
            Self::Fahrenheit | Self::Rankine => (value - offset) * 5.0 / 9.0,
            Self::Kelvin => value + offset,
            Self::Celsius => value,
        }
    }

    /// Stage 2: express a °C value in `self`.
    pub fn from_celsius(self, celsius: f64, offset: f64) -> f64 {
        match self {
            Self::Fahrenheit | Self::Rankine => celsius * 9.0 / 5.0 + offset,
            Self::Kelvin => celsius - offset,
            Self::Celsius => celsius,
        }
    }
}

/// Full two-stage temperature conversion.
pub fn temperature(
    value: f64,
    from: TempScale, from_offset: f64,
    to: TempScale, to_offset: f64,
) -> f64 {
    to.from_celsius(from.to_celsius(value, from_offset), to_offset)
}
