use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CucError {
    /// Malformed `"from => to"` conversion block.
    #[error("Invalid conversion block {block:?}: {reason}")]
    Parse { block: String, reason: &'static str },

    /// Unknown family or sub-family name passed to a reference lookup.
    #[error("Reference not found: {0}")]
    ReferenceNotFound(String),

    /// No family contains both units.
    #[error("No reference contains both '{from}' and '{to}'")]
    UnresolvedUnits { from: String, to: String },

    /// Explicit family override that is not PRESSURE, TEMPERATURE or CUSTOM.
    #[error("Unknown family: {0}")]
    UnknownFamily(String),

    /// The custom scan found no sub-family holding both units.
    #[error("No custom sub-family contains both '{from}' and '{to}'")]
    UnitsNotFound { from: String, to: String },

    /// A unit symbol is absent from the table selected for a conversion.
    #[error("Unit '{unit}' not found in {table} table")]
    UnitNotInTable { unit: String, table: String },

    /// Wraps whatever made a family-specific conversion fail.
    #[error("{family} conversion from '{from}' to '{to}' failed")]
    Conversion {
        family: String,
        from: String,
        to: String,
        #[source]
        source: Box<CucError>,
    },

    /// Custom factors must be finite and non-zero.
    #[error("Invalid factor for '{unit}': {factor}")]
    InvalidFactor { unit: String, factor: f64 },

    #[error("Reference file not found: {}", .path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported reference file format: {} (expected .{expected})", .path.display())]
    UnsupportedFormat { path: PathBuf, expected: &'static str },

    #[error("Malformed reference file {}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document parsed but does not have the expected shape.
    #[error("Invalid reference schema: {0}")]
    Schema(String),
}

pub type Result<T> = std::result::Result<T, CucError>;

impl CucError {
    /// Innermost error of a [`CucError::Conversion`] chain (or `self`).
    pub fn root_cause(&self) -> &CucError {
        match self {
            Self::Conversion { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
