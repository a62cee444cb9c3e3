//! Scoped object URL allocation.

use std::ops::Deref;

use super::{HostError, ObjectUrl, ObjectUrls};
use crate::blob::Blob;

/// Object URL that is revoked when the guard is dropped, whether the
/// download it served succeeded, was suppressed, or failed.
pub struct ObjectUrlGuard<'a> {
    urls: &'a dyn ObjectUrls,
    url: ObjectUrl,
}

impl<'a> ObjectUrlGuard<'a> {
    /// Allocate a URL for `blob` on `urls`.
    pub fn create(urls: &'a dyn ObjectUrls, blob: &Blob) -> Result<Self, HostError> {
        let url = urls.create_object_url(blob)?;
        tracing::debug!(url = %url, size = blob.size(), "allocated object URL");
        Ok(Self { urls, url })
    }

    pub fn url(&self) -> &ObjectUrl {
        &self.url
    }
}

impl Deref for ObjectUrlGuard<'_> {
    type Target = ObjectUrl;

    fn deref(&self) -> &ObjectUrl {
        &self.url
    }
}

impl Drop for ObjectUrlGuard<'_> {
    fn drop(&mut self) {
        self.urls.revoke_object_url(&self.url);
        tracing::debug!(url = %self.url, "revoked object URL");
    }
}
