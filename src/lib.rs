//! # cuc
//!
//! Custom unit converter: pressure, temperature and user-defined unit
//! tables, with the conversion family detected from the two units.
//!
//! ## Highlights
//!
//! * **Built-in pressure** — bar, Pa, kPa, MPa, atm, psi, mmHg, inH2O, …
//! * **Built-in temperature** — C, F, K, R through a Celsius pivot
//! * **Custom units** — `add_custom_unit("kJ/mol.K", 0.001)`
//! * **Reference files** — sub-families such as `HEAT-CAPACITY` loaded
//!   from a `.yml` document
//! * **Block notation** — `cuc.to(125.0, "MPa => Pa", None)`
//!
//! ## Quick example
//!
//! ```
//! use cuc::UnitConverter;
//!
//! let mut cuc = UnitConverter::new();
//!
//! let pa = cuc.convert(1.0, "MPa", "Pa", None)?;
//! assert_eq!(pa, 1_000_000.0);
//!
//! let c = cuc.to(32.0, "F => C", None)?;
//! assert_eq!(c, 0.0);
//!
//! cuc.add_custom_unit("J/mol.K", 1.0)?;
//! cuc.add_custom_unit("kJ/mol.K", 0.001)?;
//! let kj = cuc.from_to(150.0, "J/mol.K", "kJ/mol.K", None)?;
//! assert!((kj - 0.15).abs() < 1e-12);
//! # Ok::<(), cuc::CucError>(())
//! ```
//!
//! ## Reference files
//!
//! ```no_run
//! use cuc::UnitConverter;
//!
//! // CUSTOM-UNIT:
//! //   HEAT-CAPACITY:
//! //     J/mol.K: 1
//! //     J/kmol.K: 1000
//! let cuc = UnitConverter::with_reference_file("custom-unit.yml")?;
//! println!("{}", cuc.find_reference("J/mol.K", "J/kmol.K")?);
//! # Ok::<(), cuc::CucError>(())
//! ```

use std::sync::LazyLock;

// ── Modules ──────────────────────────────────────────────────────────
pub mod block;
pub mod config;
mod engine;
pub mod error;
pub mod family;
pub mod loader;
pub mod logging;
mod quantity;
pub mod reference;
mod table;

// ── Public re-exports ────────────────────────────────────────────────
pub use block::ConversionBlock;
pub use engine::UnitConverter;
pub use error::{CucError, Result};
pub use family::Family;
pub use quantity::Quantity;
pub use reference::{CustomFamilies, ReferenceStore, ReferenceView, UnitTable};
pub use table::{Reference, ReferenceRow, ReferenceTable};

pub use converter::TempScale;

// ── One-shot helpers ─────────────────────────────────────────────────
// Each call works on a fresh converter: only the built-in tables apply.

/// Convert with a fresh converter.
pub fn convert_from_to(value: f64, from_unit: &str, to_unit: &str, family: Option<&str>) -> Result<f64> {
    UnitConverter::new().convert(value, from_unit, to_unit, family)
}

/// Convert a `"from => to"` block with a fresh converter.
pub fn to(value: f64, block: &str, family: Option<&str>) -> Result<f64> {
    UnitConverter::new().to(value, block, family)
}

static FRESH: LazyLock<ReferenceStore> = LazyLock::new(ReferenceStore::new);

/// Look up a reference of a fresh converter, as a printable table or as
/// the raw view.
pub fn check_reference(name: &str, as_table: bool) -> Result<Reference<'static>> {
    let view = FRESH.get_table(name)?;
    Ok(if as_table {
        Reference::Table(view.into())
    } else {
        Reference::Raw(view)
    })
}
