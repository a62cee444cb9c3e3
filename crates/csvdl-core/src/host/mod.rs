//! Host capability surface.
//!
//! A host is whatever environment actually puts a file in front of the user:
//! a browser-like runtime, or the [`DirectoryHost`] used by the CLI. Each
//! capability is optional; save adapters probe for what they need and fail
//! with [`HostError::MissingCapability`] when it is absent.

mod error;
mod object_url;

pub mod directory;

use std::fmt;

use crate::blob::Blob;

pub use directory::{ConflictPolicy, DirectoryHost, SaveReceipt};
pub use error::HostError;
pub use object_url::ObjectUrlGuard;

/// Save a blob directly under a suggested filename (the legacy "save as" path).
pub trait LegacySave: Send + Sync {
    fn save_blob(&self, blob: &Blob, filename: &str) -> Result<(), HostError>;
}

/// Allocate and release process-local URLs that address in-memory blobs.
pub trait ObjectUrls: Send + Sync {
    fn create_object_url(&self, blob: &Blob) -> Result<ObjectUrl, HostError>;

    /// Release `url`. Revoking an unknown URL is a no-op.
    fn revoke_object_url(&self, url: &ObjectUrl);
}

/// Dispatch a primary click on a synthetic link element.
pub trait LinkDispatch: Send + Sync {
    fn dispatch_click(&self, link: &DownloadLink) -> Result<ClickOutcome, HostError>;
}

/// Capability probe. Each accessor returns `None` when the host lacks that primitive.
pub trait Host {
    fn legacy_save(&self) -> Option<&dyn LegacySave>;
    fn object_urls(&self) -> Option<&dyn ObjectUrls>;
    fn link_dispatch(&self) -> Option<&dyn LinkDispatch>;
}

/// Opaque object URL, e.g. `blob:csvdl/3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn new(url: impl Into<String>) -> Self {
        ObjectUrl(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Browsing context a link opens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// `_blank`: new tab / background.
    Blank,
}

impl LinkTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkTarget::Blank => "_blank",
        }
    }
}

/// Synthetic anchor used to start a download without a user gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: ObjectUrl,
    /// Suggested filename (`download` attribute).
    pub download: String,
    pub target: LinkTarget,
    /// Not rendered.
    pub hidden: bool,
}

impl DownloadLink {
    /// Hidden `_blank` link pointing at `href` with `filename` as the download name.
    pub fn hidden(href: ObjectUrl, filename: impl Into<String>) -> Self {
        Self {
            href,
            download: filename.into(),
            target: LinkTarget::Blank,
            hidden: true,
        }
    }
}

/// What the host did with a synthetic click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The download flow started.
    Started,
    /// The host swallowed the click (download/pop-up blocking). Nothing was saved.
    Suppressed,
}
