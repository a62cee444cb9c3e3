//! Legacy path: hand the blob straight to the host's save primitive.

use super::{AdapterKind, SaveAdapter, SaveOutcome};
use crate::host::{Host, HostError, LegacySave};
use crate::request::SaveRequest;

pub struct LegacySaveAdapter<'h> {
    saver: &'h dyn LegacySave,
}

impl<'h> LegacySaveAdapter<'h> {
    pub fn new(saver: &'h dyn LegacySave) -> Self {
        Self { saver }
    }

    pub fn from_host<H: Host + ?Sized>(host: &'h H) -> Result<Self, HostError> {
        host.legacy_save()
            .map(Self::new)
            .ok_or(HostError::MissingCapability("legacy save"))
    }
}

impl SaveAdapter for LegacySaveAdapter<'_> {
    fn kind(&self) -> AdapterKind {
        AdapterKind::LegacySave
    }

    fn save(&self, request: &SaveRequest) -> Result<SaveOutcome, HostError> {
        self.saver.save_blob(&request.blob, &request.filename)?;
        Ok(SaveOutcome::Saved {
            filename: request.filename.clone(),
        })
    }
}
