//! Environment configuration.
//!
//! | Variable             | Meaning                                      |
//! |----------------------|----------------------------------------------|
//! | `CUC_REFERENCE_FILE` | `.yml` reference file loaded by `from_env()` |
//! | `RUST_LOG`           | log filter used by [`crate::logging`]        |

use std::env;
use std::path::PathBuf;
use std::sync::Once;

use crate::error::*;

pub const REFERENCE_FILE_VAR: &str = "CUC_REFERENCE_FILE";

/// Load `.env` once per process: working directory first, then
/// `CARGO_MANIFEST_DIR`, then the executable's directory.
pub fn load_dotenv() {
    static DOTENV_INIT: Once = Once::new();
    DOTENV_INIT.call_once(|| {
        if dotenvy::dotenv().is_ok() { return; }
        if let Ok(dir) = env::var("CARGO_MANIFEST_DIR") {
            let p = PathBuf::from(dir).join(".env");
            if p.exists() { let _ = dotenvy::from_path(&p); return; }
        }
        if let Ok(exe) = env::current_exe() {
            if let Some(dir) = exe.parent() {
                let p = dir.join(".env");
                if p.exists() { let _ = dotenvy::from_path(&p); }
            }
        }
    });
}

/// Path from `CUC_REFERENCE_FILE`, if set and non-blank.
///
/// A path that does not exist is reported as
/// [`CucError::FileNotFound`] rather than silently ignored.
pub fn reference_file() -> Result<Option<PathBuf>> {
    let Ok(raw) = env::var(REFERENCE_FILE_VAR) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let path = PathBuf::from(raw);
    if let Err(source) = path.metadata() {
        tracing::warn!(var = REFERENCE_FILE_VAR, path = %path.display(), "reference file missing");
        return Err(CucError::FileNotFound { path, source });
    }
    tracing::debug!(var = REFERENCE_FILE_VAR, path = %path.display(), "reference file from environment");
    Ok(Some(path))
}
