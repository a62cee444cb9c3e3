use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::adapter::HostPreference;
use crate::diagnostics::PayloadEcho;
use crate::host::ConflictPolicy;

/// Global configuration loaded from `~/.config/csvdl/config.toml`.
///
/// Every field has a default, so a partial file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvdlConfig {
    /// Directory downloads are written to (None = current directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
    /// Save path selection: "auto" (default), "legacy" or "object-url".
    pub host: HostPreference,
    /// Whether the directory host exposes the legacy save primitive.
    pub legacy_save: bool,
    /// Whether the directory host swallows synthetic clicks (download blocking).
    pub block_synthetic_clicks: bool,
    /// What to do when the target file exists: "uniquify" (default) or "overwrite".
    pub on_conflict: ConflictPolicy,
    /// Where the raw CSV text is echoed before saving: "log" (default), "console" or "off".
    pub payload_echo: PayloadEcho,
}

impl Default for CsvdlConfig {
    fn default() -> Self {
        Self {
            download_dir: None,
            host: HostPreference::Auto,
            legacy_save: false,
            block_synthetic_clicks: false,
            on_conflict: ConflictPolicy::Uniquify,
            payload_echo: PayloadEcho::Log,
        }
    }
}

impl CsvdlConfig {
    /// Configured download directory, or the current directory.
    pub fn resolve_download_dir(&self) -> Result<PathBuf> {
        match &self.download_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("cannot determine current directory"),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("csvdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CsvdlConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<CsvdlConfig> {
    if !path.exists() {
        let default_cfg = CsvdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)
            .with_context(|| format!("failed to write default config {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: CsvdlConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
