//! The download trigger: echo the payload, build the request, hand it to the
//! host through the adapter chosen at construction.

use crate::adapter::{probe, AdapterKind, HostPreference, SaveAdapter, SaveOutcome};
use crate::diagnostics::{sink_for, PayloadEcho, PayloadSink};
use crate::host::{Host, HostError};
use crate::request::SaveRequest;

pub struct DownloadTrigger<'h> {
    adapter: Box<dyn SaveAdapter + 'h>,
    sink: Box<dyn PayloadSink>,
}

impl<'h> DownloadTrigger<'h> {
    pub fn new(adapter: Box<dyn SaveAdapter + 'h>, sink: Box<dyn PayloadSink>) -> Self {
        Self { adapter, sink }
    }

    /// Probe `host` once and build a trigger around the selected adapter.
    pub fn for_host<H: Host + ?Sized>(
        host: &'h H,
        preference: HostPreference,
        echo: PayloadEcho,
    ) -> Result<Self, HostError> {
        Ok(Self::new(probe(host, preference)?, sink_for(echo)))
    }

    pub fn adapter_kind(&self) -> AdapterKind {
        self.adapter.kind()
    }

    /// Save `csv_text` as `<title>_<kind>.csv`.
    ///
    /// Inputs are not validated. A host that blocks the download yields
    /// `Ok(SaveOutcome::Suppressed)`, not an error.
    pub fn trigger(&self, title: &str, kind: &str, csv_text: &str) -> Result<SaveOutcome, HostError> {
        self.sink.emit(csv_text);

        let request = SaveRequest::csv(title, kind, csv_text);
        tracing::info!(
            filename = %request.filename,
            bytes = request.blob.size(),
            adapter = %self.adapter.kind(),
            "triggering CSV download"
        );
        self.adapter.save(&request)
    }
}
