//! Fake host that records every capability call into a shared event log.
//!
//! Capabilities are switched on individually so both save paths, and hosts
//! missing everything, can be exercised.

use std::sync::{Arc, Mutex};

use csvdl_core::blob::Blob;
use csvdl_core::diagnostics::PayloadSink;
use csvdl_core::host::{
    ClickOutcome, DownloadLink, Host, HostError, LegacySave, LinkDispatch, ObjectUrl, ObjectUrls,
};

pub type EventLog = Arc<Mutex<Vec<Event>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Payload(String),
    LegacySave {
        filename: String,
        bytes: Vec<u8>,
        media_type: String,
    },
    CreateUrl {
        url: String,
        bytes: Vec<u8>,
        media_type: String,
    },
    Click(DownloadLink),
    Revoke(String),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Capabilities {
    pub legacy_save: bool,
    pub object_urls: bool,
    pub link_dispatch: bool,
    pub suppress_clicks: bool,
    pub fail_clicks: bool,
}

impl Capabilities {
    pub fn legacy() -> Self {
        Self {
            legacy_save: true,
            ..Self::default()
        }
    }

    pub fn object_url() -> Self {
        Self {
            object_urls: true,
            link_dispatch: true,
            ..Self::default()
        }
    }

    pub fn both() -> Self {
        Self {
            legacy_save: true,
            ..Self::object_url()
        }
    }
}

pub struct RecordingHost {
    caps: Capabilities,
    log: EventLog,
}

impl RecordingHost {
    pub fn new(caps: Capabilities) -> Self {
        Self {
            caps,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn log(&self) -> EventLog {
        Arc::clone(&self.log)
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.lock().unwrap().clone()
    }

    pub fn sink(&self) -> RecordingSink {
        RecordingSink(self.log())
    }

    fn push(&self, event: Event) {
        self.log.lock().unwrap().push(event);
    }
}

impl Host for RecordingHost {
    fn legacy_save(&self) -> Option<&dyn LegacySave> {
        self.caps.legacy_save.then_some(self as &dyn LegacySave)
    }

    fn object_urls(&self) -> Option<&dyn ObjectUrls> {
        self.caps.object_urls.then_some(self as &dyn ObjectUrls)
    }

    fn link_dispatch(&self) -> Option<&dyn LinkDispatch> {
        self.caps.link_dispatch.then_some(self as &dyn LinkDispatch)
    }
}

impl LegacySave for RecordingHost {
    fn save_blob(&self, blob: &Blob, filename: &str) -> Result<(), HostError> {
        self.push(Event::LegacySave {
            filename: filename.to_string(),
            bytes: blob.as_bytes().to_vec(),
            media_type: blob.media_type().to_string(),
        });
        Ok(())
    }
}

impl ObjectUrls for RecordingHost {
    fn create_object_url(&self, blob: &Blob) -> Result<ObjectUrl, HostError> {
        let n = self
            .events()
            .iter()
            .filter(|e| matches!(e, Event::CreateUrl { .. }))
            .count();
        let url = format!("blob:test/{n}");
        self.push(Event::CreateUrl {
            url: url.clone(),
            bytes: blob.as_bytes().to_vec(),
            media_type: blob.media_type().to_string(),
        });
        Ok(ObjectUrl::new(url))
    }

    fn revoke_object_url(&self, url: &ObjectUrl) {
        self.push(Event::Revoke(url.as_str().to_string()));
    }
}

impl LinkDispatch for RecordingHost {
    fn dispatch_click(&self, link: &DownloadLink) -> Result<ClickOutcome, HostError> {
        self.push(Event::Click(link.clone()));
        if self.caps.fail_clicks {
            return Err(HostError::UnknownObjectUrl(link.href.to_string()));
        }
        if self.caps.suppress_clicks {
            Ok(ClickOutcome::Suppressed)
        } else {
            Ok(ClickOutcome::Started)
        }
    }
}

/// Payload sink writing into the same log as the host.
pub struct RecordingSink(EventLog);

impl PayloadSink for RecordingSink {
    fn emit(&self, csv_text: &str) {
        self.0.lock().unwrap().push(Event::Payload(csv_text.to_string()));
    }
}
