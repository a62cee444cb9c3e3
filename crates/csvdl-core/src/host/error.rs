//! Errors raised by hosts and save adapters.

use std::path::PathBuf;

use thiserror::Error;

/// Host-side failure while handing a file over for saving.
///
/// A host that silently drops a synthetic click is not an error; that is
/// reported as [`ClickOutcome::Suppressed`](super::ClickOutcome::Suppressed).
#[derive(Debug, Error)]
pub enum HostError {
    /// The host does not expose a primitive the selected save path needs.
    #[error("host does not support {0}")]
    MissingCapability(&'static str),

    /// A link pointed at an object URL that was never allocated or was already revoked.
    #[error("unknown or revoked object URL: {0}")]
    UnknownObjectUrl(String),

    /// Writing the file failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HostError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HostError::Io {
            path: path.into(),
            source,
        }
    }
}
