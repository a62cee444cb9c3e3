//! Save request: the pure "what to save" half of a CSV download.
//!
//! Nothing here touches the host. A request is computed from explicit
//! inputs and then handed to a [`SaveAdapter`](crate::adapter::SaveAdapter).

use crate::blob::Blob;

/// Extension appended to every CSV filename.
const CSV_EXTENSION: &str = ".csv";

/// Builds `<title>_<kind>.csv`.
///
/// Plain concatenation: no trimming, no sanitization. Characters that are
/// unsafe on a filesystem pass through and are left to the host.
///
/// # Examples
///
/// - `csv_filename("Report", "summary")` → `"Report_summary.csv"`
/// - `csv_filename("", "")` → `"_.csv"`
pub fn csv_filename(title: &str, kind: &str) -> String {
    let mut name = String::with_capacity(title.len() + kind.len() + 1 + CSV_EXTENSION.len());
    name.push_str(title);
    name.push('_');
    name.push_str(kind);
    name.push_str(CSV_EXTENSION);
    name
}

/// A file to hand to the host: suggested filename plus content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub filename: String,
    pub blob: Blob,
}

impl SaveRequest {
    pub fn new(filename: impl Into<String>, blob: Blob) -> Self {
        Self {
            filename: filename.into(),
            blob,
        }
    }

    /// Request for `<title>_<kind>.csv` holding `csv_text` byte-for-byte.
    pub fn csv(title: &str, kind: &str, csv_text: &str) -> Self {
        Self::new(csv_filename(title, kind), Blob::csv(csv_text))
    }
}
