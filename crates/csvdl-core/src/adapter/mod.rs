//! Save adapters: the two ways a save request reaches the host.
//!
//! [`probe`] inspects a [`Host`] once and returns the adapter to use, so the
//! capability branch lives in one place and each path can be tested alone.

mod legacy;
mod object_url;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::host::{Host, HostError};
use crate::request::SaveRequest;

pub use legacy::LegacySaveAdapter;
pub use object_url::ObjectUrlAdapter;

/// Which save path to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostPreference {
    /// Legacy save if the host has it, otherwise object URL + synthetic click.
    #[default]
    Auto,
    Legacy,
    ObjectUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind {
    LegacySave,
    ObjectUrlDownload,
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterKind::LegacySave => write!(f, "legacy-save"),
            AdapterKind::ObjectUrlDownload => write!(f, "object-url-download"),
        }
    }
}

/// Result of handing a request to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Legacy primitive accepted the blob.
    Saved { filename: String },
    /// Synthetic click started a download.
    Downloaded { filename: String },
    /// Host swallowed the click; nothing was saved.
    Suppressed { filename: String },
}

impl SaveOutcome {
    pub fn filename(&self) -> &str {
        match self {
            SaveOutcome::Saved { filename }
            | SaveOutcome::Downloaded { filename }
            | SaveOutcome::Suppressed { filename } => filename,
        }
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, SaveOutcome::Suppressed { .. })
    }
}

pub trait SaveAdapter {
    fn kind(&self) -> AdapterKind;
    fn save(&self, request: &SaveRequest) -> Result<SaveOutcome, HostError>;
}

/// Select a save adapter for `host`.
///
/// `Auto` prefers the legacy primitive when present. A forced preference, or
/// `Auto` on a host with neither path, fails with `MissingCapability`.
pub fn probe<'h, H: Host + ?Sized>(
    host: &'h H,
    preference: HostPreference,
) -> Result<Box<dyn SaveAdapter + 'h>, HostError> {
    let adapter: Box<dyn SaveAdapter + 'h> = match preference {
        HostPreference::Legacy => Box::new(LegacySaveAdapter::from_host(host)?),
        HostPreference::ObjectUrl => Box::new(ObjectUrlAdapter::from_host(host)?),
        HostPreference::Auto => match LegacySaveAdapter::from_host(host) {
            Ok(legacy) => Box::new(legacy),
            Err(HostError::MissingCapability(_)) => Box::new(ObjectUrlAdapter::from_host(host)?),
            Err(e) => return Err(e),
        },
    };
    tracing::debug!(?preference, adapter = %adapter.kind(), "selected save adapter");
    Ok(adapter)
}
