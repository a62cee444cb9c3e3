//! Download-name sanitization, applied by the host when a file hits disk.
//!
//! The suggested filename in a save request is never altered; this mirrors
//! what a browser does to an `<a download>` name before saving it.

/// Name used when sanitization leaves nothing usable.
pub const FALLBACK_FILENAME: &str = "download.csv";

use super::writer::TEMP_SUFFIX;

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Longest final name that still leaves room for the `.part` temp suffix.
pub const MAX_NAME_BYTES: usize = NAME_MAX - TEMP_SUFFIX.len();

/// Longest prefix of `s` that fits in `max` bytes and ends on a char boundary.
pub fn truncate_on_char_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut take = max;
    while take > 0 && !s.is_char_boundary(take) {
        take -= 1;
    }
    &s[..take]
}

/// Sanitizes a suggested download name for use as a single path component.
///
/// - Replaces NUL, `/`, `\`, and control characters with `_`
/// - Trims leading/trailing spaces and dots
/// - Limits length to [`MAX_NAME_BYTES`], keeping the extension when possible
/// - Falls back to `download.csv` for empty, `.` or `..` results
pub fn sanitize_download_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim_matches(|c| c == ' ' || c == '.');
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return FALLBACK_FILENAME.to_string();
    }

    if trimmed.len() <= MAX_NAME_BYTES {
        return trimmed.to_string();
    }

    let (stem, ext) = match trimmed.rfind('.') {
        Some(i) if trimmed.len() - i <= 16 => trimmed.split_at(i),
        _ => (trimmed, ""),
    };
    format!(
        "{}{}",
        truncate_on_char_boundary(stem, MAX_NAME_BYTES - ext.len()),
        ext
    )
}
