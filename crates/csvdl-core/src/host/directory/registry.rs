//! In-process object URL registry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::blob::Blob;
use crate::host::{HostError, ObjectUrl, ObjectUrls};

/// Scheme prefix of URLs handed out by the registry.
pub const URL_PREFIX: &str = "blob:csvdl/";

/// Maps `blob:csvdl/<n>` URLs to the blobs they address.
#[derive(Default)]
pub struct ObjectUrlRegistry {
    next: AtomicU64,
    blobs: RwLock<HashMap<String, Blob>>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blob behind `url`, if it is still live.
    pub fn resolve(&self, url: &ObjectUrl) -> Result<Blob, HostError> {
        self.blobs
            .read()
            .unwrap()
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| HostError::UnknownObjectUrl(url.to_string()))
    }

    /// Number of URLs allocated and not yet revoked.
    pub fn live(&self) -> usize {
        self.blobs.read().unwrap().len()
    }
}

impl ObjectUrls for ObjectUrlRegistry {
    fn create_object_url(&self, blob: &Blob) -> Result<ObjectUrl, HostError> {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        let url = format!("{URL_PREFIX}{n}");
        self.blobs.write().unwrap().insert(url.clone(), blob.clone());
        Ok(ObjectUrl::new(url))
    }

    fn revoke_object_url(&self, url: &ObjectUrl) {
        self.blobs.write().unwrap().remove(url.as_str());
    }
}
