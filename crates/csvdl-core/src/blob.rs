//! In-memory binary objects handed to the host for saving.

use std::fmt;

/// Media type recorded on every CSV blob.
pub const CSV_MEDIA_TYPE: &str = "text/csv;charset=utf-8";

/// Bytes plus the media type they should be served/saved as.
///
/// A blob is built fresh for each save and never reused.
#[derive(Clone, PartialEq, Eq)]
pub struct Blob {
    bytes: Vec<u8>,
    media_type: String,
}

impl Blob {
    pub fn new(bytes: impl Into<Vec<u8>>, media_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
        }
    }

    /// Wrap CSV text as UTF-8 bytes tagged `text/csv;charset=utf-8`.
    /// The text is copied as-is; nothing is escaped or normalized.
    pub fn csv(text: &str) -> Self {
        Self::new(text.as_bytes(), CSV_MEDIA_TYPE)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Payloads can be large; keep Debug output to the shape only.
impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob")
            .field("size", &self.bytes.len())
            .field("media_type", &self.media_type)
            .finish()
    }
}
