use crate::engine::UnitConverter;
use crate::error::*;

/// A value in a known unit, bound to the converter that holds its tables.
///
/// ```
/// use cuc::UnitConverter;
///
/// let cuc = UnitConverter::new();
/// let p = cuc.quantity(1.0, "MPa");
/// assert_eq!(p.convert("bar", None)?, 10.0);
/// # Ok::<(), cuc::CucError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Quantity<'a> {
    conv: &'a UnitConverter,
    value: f64,
    unit: &'a str,
}

impl<'a> Quantity<'a> {
    pub fn new(conv: &'a UnitConverter, value: f64, unit: &'a str) -> Self {
        Self { conv, value, unit: unit.trim() }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &'a str {
        self.unit
    }

    /// Convert the stored value to `to_unit`.
    pub fn convert(&self, to_unit: &str, family: Option<&str>) -> Result<f64> {
        self.conv.convert(self.value, self.unit, to_unit, family)
    }

    /// Convert into a new quantity expressed in `to_unit`.
    pub fn to(&self, to_unit: &'a str) -> Result<Self> {
        let value = self.convert(to_unit, None)?;
        Ok(Self::new(self.conv, value, to_unit))
    }
}

impl std::fmt::Display for Quantity<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn reused_across_targets() {
        let cuc = UnitConverter::new();
        let t = cuc.quantity(358.0, "K");
        assert_relative_eq!(t.convert("C", None).unwrap(), 84.85, epsilon = 1e-9);
        assert_relative_eq!(t.convert("F", None).unwrap(), 184.73, epsilon = 1e-9);
        assert_relative_eq!(t.convert("R", None).unwrap(), 644.4, epsilon = 1e-9);
    }

    #[test]
    fn chained() {
        let cuc = UnitConverter::new();
        let q = cuc.quantity(1.0, " MPa ").to("kPa").unwrap().to("bar").unwrap();
        assert_eq!(q.unit(), "bar");
        assert_relative_eq!(q.value(), 10.0, epsilon = 1e-12);
        assert_eq!(q.to_string(), format!("{} bar", q.value()));
    }
}
