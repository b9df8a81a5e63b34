use std::path::Path;

use converter::TempScale;

use crate::block::ConversionBlock;
use crate::config;
use crate::error::*;
use crate::family::{self, Family};
use crate::loader;
use crate::quantity::Quantity;
use crate::reference::{BuiltinTable, CustomFamilies, ReferenceStore, UnitTable};
use crate::table::Reference;

/// Unit conversion engine.
///
/// Owns its [`ReferenceStore`]: the built-in pressure and temperature
/// tables plus whatever custom units were added or loaded into this
/// instance.  Mutating calls (`add_custom_unit`, `load_custom_unit`)
/// take `&mut self`; share an instance across threads behind your own
/// lock.
///
/// ```
/// use cuc::UnitConverter;
///
/// let cuc = UnitConverter::new();
/// assert_eq!(cuc.convert(1.0, "MPa", "Pa", None)?, 1_000_000.0);
/// assert_eq!(cuc.to(0.0, "C => F", None)?, 32.0);
/// # Ok::<(), cuc::CucError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnitConverter {
    store: ReferenceStore,
}

impl UnitConverter {
    // ── Constructors ─────────────────────────────────────────────────

    /// Converter with the built-in tables and an empty `CUSTOM` table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converter that has already loaded the reference file at `path`.
    pub fn with_reference_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut conv = Self::new();
        conv.load_custom_unit(path)?;
        Ok(conv)
    }

    /// Converter configured from the environment (and `.env`): loads
    /// `CUC_REFERENCE_FILE` when it is set.
    pub fn from_env() -> Result<Self> {
        config::load_dotenv();
        match config::reference_file()? {
            Some(path) => Self::with_reference_file(path),
            None => Ok(Self::new()),
        }
    }

    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    // ── Conversion ───────────────────────────────────────────────────

    /// Convert `value` from `from_unit` to `to_unit`.
    ///
    /// `family` forces `PRESSURE`, `TEMPERATURE`, `CUSTOM` or
    /// `CUSTOM::<name>`; when `None` the family is detected from the two
    /// units.
    pub fn convert(
        &self,
        value: f64,
        from_unit: &str, to_unit: &str,
        family: Option<&str>,
    ) -> Result<f64> {
        let (from_unit, to_unit) = (from_unit.trim(), to_unit.trim());
        let family = match family {
            Some(name) => name.parse::<Family>()?,
            None => self.find_reference(from_unit, to_unit)?,
        };
        self.convert_in(value, from_unit, to_unit, &family)
    }

    /// Same as [`convert`](Self::convert).
    pub fn from_to(
        &self,
        value: f64,
        from_unit: &str, to_unit: &str,
        family: Option<&str>,
    ) -> Result<f64> {
        self.convert(value, from_unit, to_unit, family)
    }

    /// Convert through a `"from => to"` block.
    pub fn to(&self, value: f64, block: &str, family: Option<&str>) -> Result<f64> {
        let block = self.check_conversion_block(block)?;
        self.convert(value, &block.from, &block.to, family)
    }

    /// Convert within an already known family.
    ///
    /// Every failure of the family algorithm is reported as
    /// [`CucError::Conversion`] wrapping the cause.
    pub fn convert_in(
        &self,
        value: f64,
        from_unit: &str, to_unit: &str,
        family: &Family,
    ) -> Result<f64> {
        tracing::debug!(value, from_unit, to_unit, %family, "converting");

        let res = match family {
            Family::Pressure => self.convert_pressure(value, from_unit, to_unit),
            Family::Temperature => self.convert_temperature(value, from_unit, to_unit),
            Family::Custom(sub) => self.convert_custom(value, from_unit, to_unit, sub.as_deref()),
        };

        res.map_err(|cause| CucError::Conversion {
            family: family.to_string(),
            from: from_unit.to_string(),
            to: to_unit.to_string(),
            source: Box::new(cause),
        })
    }

    /// `value / factor[from] * factor[to]` over the pressure table.
    fn convert_pressure(&self, value: f64, from: &str, to: &str) -> Result<f64> {
        let table = self.store.pressure();
        let f = builtin_factor(table, from)?;
        let t = builtin_factor(table, to)?;
        Ok(converter::ratio(value, f, t))
    }

    /// Two-stage transform through °C using the signed offsets.
    fn convert_temperature(&self, value: f64, from: &str, to: &str) -> Result<f64> {
        let table = self.store.temperature();
        let from_offset = builtin_factor(table, from)?;
        let to_offset = builtin_factor(table, to)?;

        let (Some(from_scale), Some(to_scale)) =
            (TempScale::from_symbol(from), TempScale::from_symbol(to))
        else {
            let unit = if TempScale::from_symbol(from).is_none() { from } else { to };
            return Err(CucError::UnitNotInTable {
                unit: unit.to_string(),
                table: table.name().to_string(),
            });
        };

        Ok(converter::temperature(value, from_scale, from_offset, to_scale, to_offset))
    }

    /// Ratio rule over a custom sub-family: the named one, or the first
    /// (in scan order) holding both units.
    fn convert_custom(&self, value: f64, from: &str, to: &str, sub: Option<&str>) -> Result<f64> {
        let families = self.store.custom_families();
        let (name, table) = match sub {
            Some(name) => {
                let table = families.get(name).ok_or_else(|| {
                    CucError::ReferenceNotFound(Family::Custom(Some(name.to_string())).to_string())
                })?;
                (name, table)
            }
            None => families.find_containing(from, to).ok_or_else(|| CucError::UnitsNotFound {
                from: from.to_string(),
                to: to.to_string(),
            })?,
        };

        let f = custom_factor(name, table, from)?;
        let t = custom_factor(name, table, to)?;
        Ok(converter::ratio(value, f, t))
    }

    // ── Reference management ─────────────────────────────────────────

    /// Parse a `"from => to"` block.
    pub fn check_conversion_block(&self, block: &str) -> Result<ConversionBlock> {
        ConversionBlock::parse(block)
    }

    /// Add (or overwrite) a unit of the general `CUSTOM` table.
    ///
    /// Factors must be finite and non-zero.
    pub fn add_custom_unit(&mut self, symbol: &str, factor: f64) -> Result<()> {
        self.store.add_custom_unit(symbol, factor)
    }

    /// Merge the `CUSTOM-UNIT` section of a `.yml` reference file into
    /// the custom family map.
    ///
    /// Returns the updated map, or `None` for an empty document.
    pub fn load_custom_unit(&mut self, path: impl AsRef<Path>) -> Result<Option<&CustomFamilies>> {
        loader::load_into(self.store.custom_families_mut(), path.as_ref())
    }

    /// Look up a reference table by name (`PRESSURE`, `TEMPERATURE`,
    /// `CUSTOM` or `CUSTOM::<name>`), either as a printable
    /// [`ReferenceTable`](crate::ReferenceTable) or as the raw view.
    pub fn check_reference(&self, name: &str, as_table: bool) -> Result<Reference<'_>> {
        let view = self.store.get_table(name)?;
        Ok(if as_table {
            Reference::Table(view.into())
        } else {
            Reference::Raw(view)
        })
    }

    /// Family holding both units.
    pub fn find_reference(&self, from_unit: &str, to_unit: &str) -> Result<Family> {
        family::resolve(&self.store, from_unit.trim(), to_unit.trim())
    }

    /// Bind a value and its unit to this converter.
    pub fn quantity<'a>(&'a self, value: f64, unit: &'a str) -> Quantity<'a> {
        Quantity::new(self, value, unit)
    }
}

fn builtin_factor(table: BuiltinTable, unit: &str) -> Result<f64> {
    table.get(unit).ok_or_else(|| CucError::UnitNotInTable {
        unit: unit.to_string(),
        table: table.name().to_string(),
    })
}

fn custom_factor(name: &str, table: &UnitTable, unit: &str) -> Result<f64> {
    table.get(unit).copied().ok_or_else(|| CucError::UnitNotInTable {
        unit: unit.to_string(),
        table: Family::Custom(Some(name.to_string())).to_string(),
    })
}
