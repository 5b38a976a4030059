// One-shot JSON dump used by the dashboard's "save" option.

use crate::error::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_RESULTS_FILE: &str = "results.json";

/// Write `data` as pretty-printed JSON (2-space indent), replacing any
/// existing file. Returns the path written.
pub fn save_to_file<T: Serialize + ?Sized>(data: &T, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(path.to_path_buf())
}
