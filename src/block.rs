//! `"from => to"` conversion blocks.

use crate::error::*;

pub const SEPARATOR: &str = "=>";

/// A parsed conversion block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionBlock {
    pub from: String,
    pub to: String,
}

impl ConversionBlock {
    /// Parse `"MPa => Pa"` into `("MPa", "Pa")`.
    ///
    /// Only the first `=>` splits the block; whitespace around the whole
    /// string and around each side is ignored.  Unit syntax is not checked.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let Some((from, to)) = trimmed.split_once(SEPARATOR) else {
            return Err(CucError::Parse {
                block: text.to_string(),
                reason: "missing separator '=>'",
            });
        };

        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() {
            return Err(CucError::Parse {
                block: text.to_string(),
                reason: "empty unit on one side of '=>'",
            });
        }

        Ok(Self { from: from.to_string(), to: to.to_string() })
    }

    pub fn into_pair(self) -> (String, String) {
        (self.from, self.to)
    }
}

impl std::str::FromStr for ConversionBlock {
    type Err = CucError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ConversionBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {SEPARATOR} {}", self.from, self.to)
    }
}
