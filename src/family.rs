//! Conversion families and automatic family detection.

use std::fmt;
use std::str::FromStr;

use crate::error::*;
use crate::reference::{ReferenceStore, GENERAL, SUB_FAMILY_SEPARATOR};

/// The conversion domain a unit pair belongs to.
///
/// `Custom(None)` lets the engine scan every custom sub-family;
/// `Custom(Some(name))` pins one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Family {
    Pressure,
    Temperature,
    Custom(Option<String>),
}

impl Family {
    /// Family id without the sub-family: `PRESSURE`, `TEMPERATURE` or
    /// `CUSTOM`.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Pressure => "PRESSURE",
            Self::Temperature => "TEMPERATURE",
            Self::Custom(_) => GENERAL,
        }
    }

    pub fn sub_family(&self) -> Option<&str> {
        match self {
            Self::Custom(sub) => sub.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_family() {
            Some(sub) => write!(f, "{}{SUB_FAMILY_SEPARATOR}{sub}", self.id()),
            None => f.write_str(self.id()),
        }
    }
}

impl FromStr for Family {
    type Err = CucError;

    /// Accepts `PRESSURE`, `TEMPERATURE`, `CUSTOM` and `CUSTOM::<name>`
    /// in any ASCII case.  Sub-family existence is checked at conversion
    /// time.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some((family, sub)) = trimmed.split_once(SUB_FAMILY_SEPARATOR) {
            let sub = sub.trim();
            if family.trim().eq_ignore_ascii_case(GENERAL) && !sub.is_empty() {
                return Ok(Self::Custom(Some(sub.to_string())));
            }
            return Err(CucError::UnknownFamily(trimmed.to_string()));
        }

        match trimmed.to_uppercase().as_str() {
            "PRESSURE" => Ok(Self::Pressure),
            "TEMPERATURE" => Ok(Self::Temperature),
            GENERAL => Ok(Self::Custom(None)),
            _ => Err(CucError::UnknownFamily(trimmed.to_string())),
        }
    }
}

/// Find the family holding both `from` and `to`.
///
/// Pressure wins over temperature, temperature over the general custom
/// table, which wins over the loaded sub-families (scanned by name).
/// A general-table hit is reported as plain `CUSTOM`.
pub fn resolve(store: &ReferenceStore, from: &str, to: &str) -> Result<Family> {
    let family = if store.pressure().contains(from) && store.pressure().contains(to) {
        Family::Pressure
    } else if store.temperature().contains(from) && store.temperature().contains(to) {
        Family::Temperature
    } else if let Some((name, _)) = store.custom_families().find_containing(from, to) {
        if name == GENERAL {
            Family::Custom(None)
        } else {
            Family::Custom(Some(name.to_string()))
        }
    } else {
        tracing::debug!(from, to, "no family contains both units");
        return Err(CucError::UnresolvedUnits {
            from: from.to_string(),
            to: to.to_string(),
        });
    };

    tracing::debug!(from, to, %family, "family resolved");
    Ok(family)
}
