//! Object URL path: allocate a URL for the blob, point a hidden link at it,
//! click it once, then revoke the URL.

use super::{AdapterKind, SaveAdapter, SaveOutcome};
use crate::host::{ClickOutcome, DownloadLink, Host, HostError, LinkDispatch, ObjectUrlGuard, ObjectUrls};
use crate::request::SaveRequest;

pub struct ObjectUrlAdapter<'h> {
    urls: &'h dyn ObjectUrls,
    links: &'h dyn LinkDispatch,
}

impl<'h> ObjectUrlAdapter<'h> {
    pub fn new(urls: &'h dyn ObjectUrls, links: &'h dyn LinkDispatch) -> Self {
        Self { urls, links }
    }

    pub fn from_host<H: Host + ?Sized>(host: &'h H) -> Result<Self, HostError> {
        let urls = host
            .object_urls()
            .ok_or(HostError::MissingCapability("object URLs"))?;
        let links = host
            .link_dispatch()
            .ok_or(HostError::MissingCapability("link dispatch"))?;
        Ok(Self::new(urls, links))
    }
}

impl SaveAdapter for ObjectUrlAdapter<'_> {
    fn kind(&self) -> AdapterKind {
        AdapterKind::ObjectUrlDownload
    }

    fn save(&self, request: &SaveRequest) -> Result<SaveOutcome, HostError> {
        let url = ObjectUrlGuard::create(self.urls, &request.blob)?;
        let link = DownloadLink::hidden(url.url().clone(), request.filename.as_str());
        let filename = request.filename.clone();

        match self.links.dispatch_click(&link)? {
            ClickOutcome::Started => Ok(SaveOutcome::Downloaded { filename }),
            ClickOutcome::Suppressed => {
                tracing::warn!(%filename, "host suppressed download");
                Ok(SaveOutcome::Suppressed { filename })
            }
        }
    }
}
