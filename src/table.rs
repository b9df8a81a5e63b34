// ── Reference listings ──────────────────────────────────────────────

use serde::Serialize;

use crate::reference::ReferenceView;

/// Result of [`UnitConverter::check_reference`](crate::UnitConverter::check_reference)
/// and [`check_reference`](crate::check_reference).
#[derive(Debug, Clone)]
pub enum Reference<'a> {
    /// Flattened `(sub-family, unit, value)` rows.
    Table(ReferenceTable),
    /// The underlying table, borrowed from the converter.
    Raw(ReferenceView<'a>),
}

impl Reference<'_> {
    pub fn as_table(&self) -> Option<&ReferenceTable> {
        match self {
            Self::Table(t) => Some(t),
            Self::Raw(_) => None,
        }
    }
}

/// One row of a [`ReferenceTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceRow {
    /// Set only when listing the whole custom family map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_family: Option<String>,
    pub unit: String,
    pub value: f64,
}

/// Tabular listing of one reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceTable {
    pub name: String,
    pub rows: Vec<ReferenceRow>,
}

impl ReferenceTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of the first row whose unit is `unit`.
    pub fn value(&self, unit: &str) -> Option<f64> {
        self.rows.iter().find(|r| r.unit == unit).map(|r| r.value)
    }
}

impl From<ReferenceView<'_>> for ReferenceTable {
    fn from(view: ReferenceView<'_>) -> Self {
        let row = |sub_family: Option<&str>, unit: &str, value: f64| ReferenceRow {
            sub_family: sub_family.map(str::to_string),
            unit: unit.to_string(),
            value,
        };

        match view {
            ReferenceView::Builtin(table) => Self {
                name: table.name().to_string(),
                rows: table.iter().map(|(u, v)| row(None, u, v)).collect(),
            },
            ReferenceView::Custom { name, table } => Self {
                name: format!("CUSTOM::{name}"),
                rows: table.iter().map(|(u, &v)| row(None, u, v)).collect(),
            },
            ReferenceView::Families(families) => Self {
                name: "CUSTOM".to_string(),
                rows: families
                    .iter()
                    .flat_map(|(sub, table)| table.iter().map(move |(u, &v)| row(Some(sub), u, v)))
                    .collect(),
            },
        }
    }
}

impl std::fmt::Display for ReferenceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let grouped = self.rows.iter().any(|r| r.sub_family.is_some());
        let unit_w = self.rows.iter().map(|r| r.unit.chars().count()).max().unwrap_or(0).max(4);

        writeln!(f, "{}", self.name)?;
        if grouped {
            let sub_w = self
                .rows
                .iter()
                .filter_map(|r| r.sub_family.as_deref())
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
                .max(10);
            write!(f, "{:<sub_w$}  {:<unit_w$}  Value", "Sub-family", "Unit")?;
            for r in &self.rows {
                let sub = r.sub_family.as_deref().unwrap_or("");
                write!(f, "\n{sub:<sub_w$}  {:<unit_w$}  {}", r.unit, r.value)?;
            }
        } else {
            write!(f, "{:<unit_w$}  Value", "Unit")?;
            for r in &self.rows {
                write!(f, "\n{:<unit_w$}  {}", r.unit, r.value)?;
            }
        }
        Ok(())
    }
}
