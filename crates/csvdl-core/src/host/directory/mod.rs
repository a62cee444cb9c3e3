//! Native host that saves downloads into a directory.
//!
//! Exposes object URLs and link dispatch always, and the legacy save
//! primitive only when enabled. Every completed write produces a
//! [`SaveReceipt`].

mod registry;
mod sanitize;
mod writer;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::blob::Blob;
use crate::checksum;
use crate::config::CsvdlConfig;
use crate::host::{
    ClickOutcome, DownloadLink, Host, HostError, LegacySave, LinkDispatch, ObjectUrls,
};

pub use registry::{ObjectUrlRegistry, URL_PREFIX};
pub use sanitize::{sanitize_download_name, FALLBACK_FILENAME, MAX_NAME_BYTES};
pub use writer::{resolve_target, temp_path, write_atomic, ConflictPolicy, TEMP_SUFFIX};

/// Record of one file written by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    pub path: PathBuf,
    pub bytes: u64,
    /// Lowercase hex SHA-256 of the bytes written.
    pub sha256: String,
    pub media_type: String,
}

pub struct DirectoryHost {
    dir: PathBuf,
    legacy_save: bool,
    block_clicks: bool,
    on_conflict: ConflictPolicy,
    registry: ObjectUrlRegistry,
    receipts: Mutex<Vec<SaveReceipt>>,
    /// Held from target resolution through rename so concurrent saves of one
    /// name never share a `.part` file or claim the same final path.
    write_lock: Mutex<()>,
}

impl DirectoryHost {
    /// Host writing into `dir`, object-URL path only, uniquifying on conflict.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            legacy_save: false,
            block_clicks: false,
            on_conflict: ConflictPolicy::default(),
            registry: ObjectUrlRegistry::new(),
            receipts: Mutex::new(Vec::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// Host configured from `cfg`, writing into `dir`.
    pub fn from_config(cfg: &CsvdlConfig, dir: impl Into<PathBuf>) -> Self {
        Self::new(dir)
            .with_legacy_save(cfg.legacy_save)
            .with_blocked_clicks(cfg.block_synthetic_clicks)
            .with_conflict_policy(cfg.on_conflict)
    }

    /// Expose the legacy save primitive.
    pub fn with_legacy_save(mut self, enabled: bool) -> Self {
        self.legacy_save = enabled;
        self
    }

    /// Swallow synthetic clicks, as a browser with download blocking would.
    pub fn with_blocked_clicks(mut self, blocked: bool) -> Self {
        self.block_clicks = blocked;
        self
    }

    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.on_conflict = policy;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Live object URLs (allocated, not yet revoked).
    pub fn live_object_urls(&self) -> usize {
        self.registry.live()
    }

    /// All receipts so far, oldest first.
    pub fn receipts(&self) -> Vec<SaveReceipt> {
        self.receipts.lock().unwrap().clone()
    }

    pub fn last_receipt(&self) -> Option<SaveReceipt> {
        self.receipts.lock().unwrap().last().cloned()
    }

    fn write(&self, blob: &Blob, suggested: &str) -> Result<SaveReceipt, HostError> {
        let name = sanitize_download_name(suggested);
        if name != suggested {
            tracing::debug!(suggested, saved_as = %name, "sanitized download name");
        }
        let path = {
            let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
            std::fs::create_dir_all(&self.dir).map_err(|e| HostError::io(&self.dir, e))?;
            let path = resolve_target(&self.dir, &name, self.on_conflict);
            write_atomic(&path, blob.as_bytes())?;
            path
        };

        let receipt = SaveReceipt {
            path,
            bytes: blob.size(),
            sha256: checksum::sha256_bytes(blob.as_bytes()),
            media_type: blob.media_type().to_string(),
        };
        tracing::info!(
            path = %receipt.path.display(),
            bytes = receipt.bytes,
            "saved download"
        );
        self.receipts.lock().unwrap().push(receipt.clone());
        Ok(receipt)
    }
}

impl Host for DirectoryHost {
    fn legacy_save(&self) -> Option<&dyn LegacySave> {
        if self.legacy_save {
            Some(self)
        } else {
            None
        }
    }

    fn object_urls(&self) -> Option<&dyn ObjectUrls> {
        Some(&self.registry)
    }

    fn link_dispatch(&self) -> Option<&dyn LinkDispatch> {
        Some(self)
    }
}

impl LegacySave for DirectoryHost {
    fn save_blob(&self, blob: &Blob, filename: &str) -> Result<(), HostError> {
        self.write(blob, filename).map(|_| ())
    }
}

impl LinkDispatch for DirectoryHost {
    fn dispatch_click(&self, link: &DownloadLink) -> Result<ClickOutcome, HostError> {
        if self.block_clicks {
            tracing::warn!(href = %link.href, download = %link.download, "synthetic click blocked");
            return Ok(ClickOutcome::Suppressed);
        }
        let blob = self.registry.resolve(&link.href)?;
        self.write(&blob, &link.download)?;
        Ok(ClickOutcome::Started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ObjectUrl;

    #[test]
    fn capabilities_follow_settings() {
        let dir = tempfile::tempdir().unwrap();
        let host = DirectoryHost::new(dir.path());
        assert_eq!(host.dir(), dir.path());
        assert!(host.legacy_save().is_none());
        assert!(host.object_urls().is_some());
        assert!(host.link_dispatch().is_some());

        let host = DirectoryHost::new(dir.path()).with_legacy_save(true);
        assert!(host.legacy_save().is_some());
    }

    #[test]
    fn legacy_save_writes_file_and_receipt() {
        let dir = tempfile::tempdir().unwrap();
        let host = DirectoryHost::new(dir.path()).with_legacy_save(true);
        host.save_blob(&Blob::csv("a,b\n1,2\n"), "Report_summary.csv")
            .unwrap();

        let path = dir.path().join("Report_summary.csv");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b\n1,2\n");
        let receipt = host.last_receipt().unwrap();
        assert_eq!(receipt.path, path);
        assert_eq!(receipt.bytes, 8);
        assert_eq!(receipt.media_type, "text/csv;charset=utf-8");
        assert_eq!(receipt.sha256, checksum::sha256_bytes(b"a,b\n1,2\n"));
    }

    #[test]
    fn click_on_live_url_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let host = DirectoryHost::new(dir.path());
        let url = host.registry.create_object_url(&Blob::csv("x\n")).unwrap();
        let link = DownloadLink::hidden(url, "T_iso.csv");
        assert_eq!(host.dispatch_click(&link).unwrap(), ClickOutcome::Started);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("T_iso.csv")).unwrap(),
            "x\n"
        );
    }

    #[test]
    fn click_on_unknown_url_fails() {
        let dir = tempfile::tempdir().unwrap();
        let host = DirectoryHost::new(dir.path());
        let link = DownloadLink::hidden(ObjectUrl::new("blob:csvdl/404"), "T_iso.csv");
        assert!(matches!(
            host.dispatch_click(&link),
            Err(HostError::UnknownObjectUrl(_))
        ));
        assert!(host.receipts().is_empty());
    }

    #[test]
    fn blocked_click_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let host = DirectoryHost::new(dir.path()).with_blocked_clicks(true);
        let url = host.registry.create_object_url(&Blob::csv("x\n")).unwrap();
        let link = DownloadLink::hidden(url, "T_iso.csv");
        assert_eq!(host.dispatch_click(&link).unwrap(), ClickOutcome::Suppressed);
        assert!(!dir.path().join("T_iso.csv").exists());
        assert!(host.receipts().is_empty());
    }

    #[test]
    fn unsafe_name_sanitized_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let host = DirectoryHost::new(dir.path()).with_legacy_save(true);
        host.save_blob(&Blob::csv("1"), "../escape_meas.csv").unwrap();
        assert!(dir.path().join("_escape_meas.csv").exists());
    }

    #[test]
    fn long_title_is_saved_within_name_limit() {
        let dir = tempfile::tempdir().unwrap();
        let host = DirectoryHost::new(dir.path()).with_legacy_save(true);
        let request = crate::request::SaveRequest::csv(&"y".repeat(400), "meas", "a,b\n");
        host.save_blob(&request.blob, &request.filename).unwrap();
        host.save_blob(&request.blob, &request.filename).unwrap();

        let receipts = host.receipts();
        assert_eq!(receipts.len(), 2);
        for r in &receipts {
            let name = r.path.file_name().unwrap().to_string_lossy().into_owned();
            assert!(name.len() <= MAX_NAME_BYTES);
            assert!(name.ends_with(".csv"));
            assert_eq!(std::fs::read_to_string(&r.path).unwrap(), "a,b\n");
        }
        assert_ne!(receipts[0].path, receipts[1].path);
    }

    #[test]
    fn name_of_exactly_255_bytes_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let host = DirectoryHost::new(dir.path()).with_legacy_save(true);
        let request = crate::request::SaveRequest::csv(&"x".repeat(246), "meas", "1;2\n");
        assert_eq!(request.filename.len(), 255);

        host.save_blob(&request.blob, &request.filename).unwrap();
        host.save_blob(&request.blob, &request.filename).unwrap();

        let receipts = host.receipts();
        assert_eq!(receipts.len(), 2);
        assert_ne!(receipts[0].path, receipts[1].path);
        for r in &receipts {
            let name = r.path.file_name().unwrap().to_string_lossy().into_owned();
            assert!(name.len() <= MAX_NAME_BYTES);
            assert!(name.ends_with(".csv"));
            assert_eq!(std::fs::read_to_string(&r.path).unwrap(), "1;2\n");
        }
    }

    #[test]
    fn shared_host_saves_same_name_from_many_threads() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 20;

        let dir = tempfile::tempdir().unwrap();
        let host = DirectoryHost::new(dir.path()).with_legacy_save(true);
        std::thread::scope(|s| {
            for t in 0..THREADS {
                let host = &host;
                s.spawn(move || {
                    for i in 0..PER_THREAD {
                        let text = format!("{t};{i}\n");
                        host.save_blob(&Blob::csv(&text), "S1_meas.csv").unwrap();
                    }
                });
            }
        });

        let receipts = host.receipts();
        assert_eq!(receipts.len(), THREADS * PER_THREAD);
        let mut paths: Vec<_> = receipts.iter().map(|r| r.path.clone()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), THREADS * PER_THREAD);

        let mut contents: Vec<String> = receipts
            .iter()
            .map(|r| std::fs::read_to_string(&r.path).unwrap())
            .collect();
        contents.sort();
        contents.dedup();
        assert_eq!(contents.len(), THREADS * PER_THREAD);

        let leftovers = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(TEMP_SUFFIX))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn creates_missing_download_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports").join("qcm");
        let host = DirectoryHost::new(&nested).with_legacy_save(true);
        host.save_blob(&Blob::csv("1"), "a_b.csv").unwrap();
        assert!(nested.join("a_b.csv").exists());
    }

    #[test]
    fn conflict_policy_from_builder() {
        let dir = tempfile::tempdir().unwrap();
        let host = DirectoryHost::new(dir.path()).with_legacy_save(true);
        host.save_blob(&Blob::csv("first"), "a_b.csv").unwrap();
        host.save_blob(&Blob::csv("second"), "a_b.csv").unwrap();
        assert_eq!(std::fs::read_to_string(dir.path().join("a_b.csv")).unwrap(), "first");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("a_b (1).csv")).unwrap(),
            "second"
        );

        let host = DirectoryHost::new(dir.path())
            .with_legacy_save(true)
            .with_conflict_policy(ConflictPolicy::Overwrite);
        host.save_blob(&Blob::csv("third"), "a_b.csv").unwrap();
        assert_eq!(std::fs::read_to_string(dir.path().join("a_b.csv")).unwrap(), "third");
    }
}
