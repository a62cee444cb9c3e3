//! `csvdl probe` – report which save path the directory host would take.

use anyhow::Result;
use csvdl_core::adapter::{probe, HostPreference};
use csvdl_core::config::CsvdlConfig;
use csvdl_core::host::DirectoryHost;

pub fn run_probe(cfg: &CsvdlConfig, legacy: bool, host: Option<HostPreference>) -> Result<()> {
    let dir = cfg.resolve_download_dir()?;
    let directory_host = DirectoryHost::from_config(cfg, &dir).with_legacy_save(cfg.legacy_save || legacy);
    let preference = host.unwrap_or(cfg.host);
    let adapter = probe(&directory_host, preference)?;
    println!("{} -> {}", directory_host.dir().display(), adapter.kind());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_succeeds_on_directory_host() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = CsvdlConfig {
            download_dir: Some(dir.path().to_path_buf()),
            ..CsvdlConfig::default()
        };
        run_probe(&cfg, false, None).unwrap();
        run_probe(&cfg, true, Some(HostPreference::Legacy)).unwrap();
    }

    #[test]
    fn probe_forced_legacy_without_flag_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = CsvdlConfig {
            download_dir: Some(dir.path().to_path_buf()),
            ..CsvdlConfig::default()
        };
        let err = run_probe(&cfg, false, Some(HostPreference::Legacy)).unwrap_err();
        assert!(err.to_string().contains("legacy save"));
    }
}
