//! Conversion tables.
//!
//! Pressure factors and temperature offsets are process-wide constants.
//! Custom tables live per [`ReferenceStore`] and are grouped by sub-family
//! name; the general `CUSTOM` sub-family always exists.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::*;

/// Name of the general custom sub-family.
pub const GENERAL: &str = "CUSTOM";

/// Separator of compound reference names such as `CUSTOM::ENERGY`.
pub const SUB_FAMILY_SEPARATOR: &str = "::";

/// Unit symbol → factor.
pub type UnitTable = BTreeMap<String, f64>;

// ── Built-in tables ─────────────────────────────────────────────────

/// Pressure factors relative to the bar (`bar = 1`).
pub static PRESSURE_UNITS: BuiltinTable = BuiltinTable {
    name: "PRESSURE",
    entries: &[
        ("bar", 1.0),
        ("mbar", 1000.0),
        ("ubar", 1_000_000.0),
        ("Pa", 100_000.0),
        ("hPa", 1000.0),
        ("kPa", 100.0),
        ("MPa", 0.1),
        ("kgcm2", 1.01972),
        ("atm", 0.986923),
        ("mmHg", 750.062),
        ("mmH2O", 10_197.162_129_779),
        ("mH2O", 10.197_162_129_779),
        ("psi", 14.5038),
        ("ftH2O", 33.455_256_555_148),
        ("inH2O", 401.865),
        ("inHg", 29.53),
    ],
};

/// Signed temperature offsets used by the Celsius pivot.
pub static TEMPERATURE_OFFSETS: BuiltinTable = BuiltinTable {
    name: "TEMPERATURE",
    entries: &[
        ("C", 0.0),
        ("F", 32.0),
        ("K", -273.15),
        ("R", 491.67),
    ],
};

/// Immutable, statically allocated table.  Entries keep declaration order.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTable {
    name: &'static str,
    entries: &'static [(&'static str, f64)],
}

impl BuiltinTable {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, unit: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(symbol, _)| *symbol == unit)
            .map(|&(_, factor)| factor)
    }

    pub fn contains(&self, unit: &str) -> bool {
        self.get(unit).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reject factors that would make the ratio rule divide by zero or
/// propagate NaN/±Infinity.
pub fn validate_factor(unit: &str, factor: f64) -> Result<()> {
    if !factor.is_finite() || factor == 0.0 {
        tracing::warn!(unit, factor, "rejecting custom factor");
        return Err(CucError::InvalidFactor { unit: unit.to_string(), factor });
    }
    Ok(())
}

// ── Custom family map ───────────────────────────────────────────────

/// Sub-family name → [`UnitTable`].
///
/// Names are unique without regard to ASCII case: upserting `energy`
/// after `ENERGY` merges into the existing entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CustomFamilies {
    tables: BTreeMap<String, UnitTable>,
}

impl CustomFamilies {
    /// A map holding only the empty general sub-family.
    pub fn new() -> Self {
        let mut tables = BTreeMap::new();
        tables.insert(GENERAL.to_string(), UnitTable::new());
        Self { tables }
    }

    fn key_of(&self, name: &str) -> Option<&String> {
        self.tables.keys().find(|k| k.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive sub-family lookup.
    pub fn get(&self, name: &str) -> Option<&UnitTable> {
        self.key_of(name.trim()).and_then(|k| self.tables.get(k))
    }

    /// The general `CUSTOM` table.
    pub fn general(&self) -> &UnitTable {
        &self.tables[GENERAL]
    }

    pub(crate) fn general_mut(&mut self) -> &mut UnitTable {
        self.tables.entry(GENERAL.to_string()).or_default()
    }

    /// Merge `entries` into sub-family `name`, creating it if needed.
    /// Colliding symbols are overwritten, the others are kept.
    pub(crate) fn upsert(&mut self, name: &str, entries: UnitTable) {
        let name = name.trim();
        let key = self.key_of(name).cloned().unwrap_or_else(|| name.to_string());
        self.tables.entry(key).or_default().extend(entries);
    }

    /// Sub-families in scan order: `CUSTOM` first, then the others sorted
    /// by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UnitTable)> {
        let general = self.tables.get_key_value(GENERAL);
        let rest = self.tables.iter().filter(|(k, _)| k.as_str() != GENERAL);
        general
            .into_iter()
            .chain(rest)
            .map(|(k, v)| (k.as_str(), v))
    }

    /// First sub-family, in scan order, holding both symbols.
    pub fn find_containing(&self, from: &str, to: &str) -> Option<(&str, &UnitTable)> {
        self.iter()
            .find(|(_, table)| table.contains_key(from) && table.contains_key(to))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Default for CustomFamilies {
    fn default() -> Self {
        Self::new()
    }
}

// ── Store ───────────────────────────────────────────────────────────

/// A table returned by [`ReferenceStore::get_table`].
#[derive(Debug, Clone, Copy)]
pub enum ReferenceView<'a> {
    Builtin(BuiltinTable),
    Custom { name: &'a str, table: &'a UnitTable },
    Families(&'a CustomFamilies),
}

/// All conversion tables of one converter.
#[derive(Debug, Clone, Default)]
pub struct ReferenceStore {
    custom: CustomFamilies,
}

impl ReferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressure(&self) -> BuiltinTable {
        PRESSURE_UNITS
    }

    pub fn temperature(&self) -> BuiltinTable {
        TEMPERATURE_OFFSETS
    }

    /// The whole custom family map.
    pub fn custom_families(&self) -> &CustomFamilies {
        &self.custom
    }

    pub(crate) fn custom_families_mut(&mut self) -> &mut CustomFamilies {
        &mut self.custom
    }

    /// Look up `PRESSURE`, `TEMPERATURE`, `CUSTOM` or `CUSTOM::<name>`,
    /// ignoring ASCII case.
    pub fn get_table(&self, name: &str) -> Result<ReferenceView<'_>> {
        let trimmed = name.trim();
        let upper = trimmed.to_uppercase();

        if let Some((family, sub)) = trimmed.split_once(SUB_FAMILY_SEPARATOR) {
            if !family.trim().eq_ignore_ascii_case(GENERAL) {
                return Err(CucError::ReferenceNotFound(trimmed.to_string()));
            }
            let sub = sub.trim();
            return match self.custom.key_of(sub) {
                Some(key) => Ok(ReferenceView::Custom {
                    name: key.as_str(),
                    table: &self.custom.tables[key],
                }),
                None => Err(CucError::ReferenceNotFound(trimmed.to_string())),
            };
        }

        match upper.as_str() {
            "PRESSURE" => Ok(ReferenceView::Builtin(PRESSURE_UNITS)),
            "TEMPERATURE" => Ok(ReferenceView::Builtin(TEMPERATURE_OFFSETS)),
            GENERAL => Ok(ReferenceView::Families(&self.custom)),
            _ => Err(CucError::ReferenceNotFound(trimmed.to_string())),
        }
    }

    /// Insert or overwrite one unit of the general `CUSTOM` table.
    pub fn add_custom_unit(&mut self, symbol: &str, factor: f64) -> Result<()> {
        let symbol = symbol.trim();
        validate_factor(symbol, factor)?;
        self.custom.general_mut().insert(symbol.to_string(), factor);
        tracing::debug!(symbol, factor, "custom unit added");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, f64)]) -> UnitTable {
        entries.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn builtin_lookup() {
        assert_eq!(PRESSURE_UNITS.get("MPa"), Some(0.1));
        assert_eq!(PRESSURE_UNITS.get("mpa"), None);
        assert_eq!(TEMPERATURE_OFFSETS.get("K"), Some(-273.15));
        assert_eq!(PRESSURE_UNITS.len(), 16);
    }

    #[test]
    fn seeded_with_general_table() {
        let families = CustomFamilies::new();
        assert_eq!(families.len(), 1);
        assert!(families.general().is_empty());
        assert!(families.get("custom").is_some());
    }

    #[test]
    fn upsert_merges_case_insensitively() {
        let mut families = CustomFamilies::new();
        families.upsert("ENERGY", table(&[("J", 1.0)]));
        families.upsert("energy", table(&[("kJ", 0.001)]));
        assert_eq!(families.len(), 2);
        let energy = families.get("Energy").unwrap();
        assert_eq!(energy.len(), 2);
    }

    #[test]
    fn scan_order_puts_general_first() {
        let mut families = CustomFamilies::new();
        families.upsert("ZETA", table(&[("z", 1.0)]));
        families.upsert("ALPHA", table(&[("a", 1.0)]));
        families.upsert("BETA", table(&[("b", 1.0)]));
        let names: Vec<_> = families.names().collect();
        assert_eq!(names, ["CUSTOM", "ALPHA", "BETA", "ZETA"]);
    }

    #[test]
    fn get_table_by_name() {
        let mut store = ReferenceStore::new();
        store.custom_families_mut().upsert("HEAT-CAPACITY", table(&[("J/mol.K", 1.0)]));

        assert!(matches!(store.get_table(" pressure "), Ok(ReferenceView::Builtin(t)) if t.name() == "PRESSURE"));
        assert!(matches!(store.get_table("Temperature"), Ok(ReferenceView::Builtin(_))));
        assert!(matches!(store.get_table("custom"), Ok(ReferenceView::Families(_))));
        assert!(matches!(
            store.get_table("custom::heat-capacity"),
            Ok(ReferenceView::Custom { name: "HEAT-CAPACITY", .. })
        ));
        assert!(matches!(store.get_table("volume"), Err(CucError::ReferenceNotFound(_))));
        assert!(matches!(store.get_table("CUSTOM::VOLUME"), Err(CucError::ReferenceNotFound(_))));
        assert!(matches!(store.get_table("PRESSURE::bar"), Err(CucError::ReferenceNotFound(_))));
    }

    #[test]
    fn add_custom_unit_rejects_zero() {
        let mut store = ReferenceStore::new();
        store.add_custom_unit("J/mol.K", 1.0).unwrap();
        store.add_custom_unit("J/mol.K", 2.0).unwrap();
        assert_eq!(store.custom_families().general()["J/mol.K"], 2.0);

        let err = store.add_custom_unit("bad", 0.0).unwrap_err();
        assert!(matches!(err, CucError::InvalidFactor { .. }));
        assert!(store.add_custom_unit("nan", f64::NAN).is_err());
    }

    #[test]
    fn custom_family_map_in_scan_order() {
        let mut store = ReferenceStore::new();
        store.custom_families_mut().upsert("ENERGY", table(&[("J", 1.0)]));
        store.custom_families_mut().upsert("ALPHA", table(&[("a", 1.0)]));
        store.add_custom_unit("J/mol.K", 1.0).unwrap();

        let families = store.custom_families();
        assert_eq!(families.len(), 3);
        assert_eq!(families.names().collect::<Vec<_>>(), [GENERAL, "ALPHA", "ENERGY"]);
        assert_eq!(families.get("energy").map(|t| t["J"]), Some(1.0));
        assert!(matches!(store.get_table("custom"), Ok(ReferenceView::Families(f)) if std::ptr::eq(f, families)));
    }
}
