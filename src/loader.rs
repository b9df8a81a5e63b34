//! Reference documents.
//!
//! A document is a YAML file with a top-level `CUSTOM-UNIT` mapping:
//!
//! ```yaml
//! CUSTOM-UNIT:
//!   HEAT-CAPACITY:
//!     J/mol.K: 1
//!     kJ/mol.K: 0.001
//!   ENERGY:
//!     J: 1
//!     kJ: 0.001
//! ```
//!
//! Sub-family and unit keys may be any YAML scalar; `1: 1000` names the
//! unit `"1"`.  Factors must be numbers.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::error::*;
use crate::reference::{validate_factor, CustomFamilies, UnitTable};

/// The only accepted file extension.
pub const EXTENSION: &str = "yml";

/// Top-level key holding the sub-families.
pub const CUSTOM_UNIT_KEY: &str = "CUSTOM-UNIT";

#[derive(Debug, Deserialize)]
struct ReferenceDocument {
    #[serde(rename = "CUSTOM-UNIT")]
    custom_unit: Option<Mapping>,
}

/// Parsed `CUSTOM-UNIT` section: sub-family name → unit table.
pub type SubFamilies = BTreeMap<String, UnitTable>;

/// Read and validate a reference document.
///
/// Returns `Ok(None)` when the file holds no document at all.
pub fn read_document(path: &Path) -> Result<Option<SubFamilies>> {
    let not_found = |source| CucError::FileNotFound { path: path.to_path_buf(), source };

    fs::metadata(path).map_err(not_found)?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    if ext != EXTENSION {
        return Err(CucError::UnsupportedFormat {
            path: path.to_path_buf(),
            expected: EXTENSION,
        });
    }

    let raw = fs::read_to_string(path).map_err(not_found)?;
    parse_document(&raw, path)
}

/// Parse document text; `path` is only used in error reports.
pub fn parse_document(raw: &str, path: &Path) -> Result<Option<SubFamilies>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let value: Value = serde_yaml::from_str(raw).map_err(|source| CucError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    match &value {
        Value::Null => return Ok(None),
        Value::Mapping(m) if m.is_empty() => return Ok(None),
        Value::Mapping(_) => {}
        _ => return Err(CucError::Schema("document root must be a mapping".into())),
    }

    let doc: ReferenceDocument = serde_yaml::from_value(value).map_err(|e| {
        CucError::Schema(format!("'{CUSTOM_UNIT_KEY}' must map sub-family → unit → number: {e}"))
    })?;
    let Some(section) = doc.custom_unit else {
        return Err(CucError::Schema(format!("key '{CUSTOM_UNIT_KEY}' not found")));
    };

    let mut families = SubFamilies::new();
    for (name, table) in section {
        let name = scalar_key(&name, "sub-family name")?;
        if name.is_empty() {
            return Err(CucError::Schema("empty sub-family name".into()));
        }
        let Value::Mapping(table) = table else {
            return Err(CucError::Schema(format!("sub-family '{name}' must map unit → number")));
        };
        if table.is_empty() {
            return Err(CucError::Schema(format!("sub-family '{name}' has no units")));
        }
        let mut units = UnitTable::new();
        for (unit, factor) in table {
            let unit = scalar_key(&unit, "unit")?;
            let factor = factor.as_f64().ok_or_else(|| {
                CucError::Schema(format!("sub-family '{name}': factor of '{unit}' is not a number"))
            })?;
            validate_factor(&unit, factor)
                .map_err(|e| CucError::Schema(format!("sub-family '{name}': {e}")))?;
            units.insert(unit, factor);
        }
        families.insert(name, units);
    }
    Ok(Some(families))
}

/// Trimmed text of a scalar mapping key.
fn scalar_key(key: &Value, what: &str) -> Result<String> {
    let text = match key {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return Err(CucError::Schema(format!("{what} must be a scalar, got {key:?}"))),
    };
    Ok(text)
}

/// Load `path` and merge every sub-family into `families`.
///
/// Returns the updated map, or `None` when the document was empty (the
/// map is then left untouched).
pub fn load_into<'a>(
    families: &'a mut CustomFamilies,
    path: &Path,
) -> Result<Option<&'a CustomFamilies>> {
    let Some(document) = read_document(path)? else {
        tracing::info!(path = %path.display(), "reference file is empty");
        return Ok(None);
    };

    for (name, table) in document {
        tracing::debug!(sub_family = %name, units = table.len(), "merging sub-family");
        families.upsert(&name, table);
    }
    tracing::info!(
        path = %path.display(),
        sub_families = families.len(),
        "reference file loaded"
    );
    Ok(Some(&*families))
}
