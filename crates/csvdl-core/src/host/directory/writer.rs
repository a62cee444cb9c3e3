//! File placement for the directory host: pick a final path, write through a
//! `.part` temp file, sync, then rename into place.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::sanitize::{truncate_on_char_boundary, MAX_NAME_BYTES};
use crate::host::HostError;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// What to do when the target file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Pick `name (1).csv`, `name (2).csv`, ... like a browser does.
    #[default]
    Uniquify,
    /// Replace the existing file.
    Overwrite,
}

/// Path for the temp file: appends `.part` to the final path (e.g. `a.csv` → `a.csv.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Final path for `name` inside `dir` under `policy`.
///
/// Uniquified names shorten the stem so `stem (n).ext` stays within
/// [`MAX_NAME_BYTES`].
pub fn resolve_target(dir: &Path, name: &str, policy: ConflictPolicy) -> PathBuf {
    let first = dir.join(name);
    if policy == ConflictPolicy::Overwrite || !first.exists() {
        return first;
    }

    let (stem, ext) = match name.rfind('.') {
        Some(i) if i > 0 => name.split_at(i),
        _ => (name, ""),
    };
    let mut n: u32 = 1;
    loop {
        let marker = format!(" ({n})");
        let budget = MAX_NAME_BYTES.saturating_sub(marker.len() + ext.len());
        let stem = truncate_on_char_boundary(stem, budget);
        let candidate = dir.join(format!("{stem}{marker}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Write `data` to `final_path` via `<final_path>.part`. The temp file is
/// removed if any step fails.
pub fn write_atomic(final_path: &Path, data: &[u8]) -> Result<(), HostError> {
    let tp = temp_path(final_path);
    let result = write_and_sync(&tp, data)
        .and_then(|()| std::fs::rename(&tp, final_path).map_err(|e| HostError::io(final_path, e)));
    if result.is_err() {
        let _ = std::fs::remove_file(&tp);
    }
    result
}

fn write_and_sync(tp: &Path, data: &[u8]) -> Result<(), HostError> {
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(tp)
        .map_err(|e| HostError::io(tp, e))?;
    file.write_all(data).map_err(|e| HostError::io(tp, e))?;
    file.sync_all().map_err(|e| HostError::io(tp, e))?;
    Ok(())
}
