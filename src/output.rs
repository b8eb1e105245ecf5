use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::rows::Row;

pub fn output_path(out_dir: &Path, name: &str) -> PathBuf {
    out_dir.join(format!("{name}.json"))
}

/// Writes rows as a compact JSON array, swapping a temp file into place.
pub fn save_rows(out_dir: &Path, name: &str, rows: &[Row]) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir {}", out_dir.display()))?;
    let path = output_path(out_dir, name);
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(rows).with_context(|| format!("serialize {name}"))?;
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, &path).with_context(|| format!("swap {}", path.display()))?;
    Ok(path)
}
