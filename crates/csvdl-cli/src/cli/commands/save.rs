//! `csvdl save <title> <type> [input]` – save CSV text through the directory host.

use anyhow::{Context, Result};
use csvdl_core::adapter::{HostPreference, SaveOutcome};
use csvdl_core::config::CsvdlConfig;
use csvdl_core::diagnostics::PayloadEcho;
use csvdl_core::host::{ConflictPolicy, DirectoryHost, SaveReceipt};
use csvdl_core::DownloadTrigger;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct SaveOverrides {
    pub dir: Option<PathBuf>,
    pub host: Option<HostPreference>,
    pub legacy: bool,
    pub block_clicks: bool,
    pub overwrite: bool,
    pub echo: Option<PayloadEcho>,
}

impl SaveOverrides {
    /// `cfg` with these overrides applied. Boolean flags only ever switch a setting on.
    pub fn apply(&self, cfg: &CsvdlConfig) -> CsvdlConfig {
        let mut out = cfg.clone();
        if let Some(dir) = &self.dir {
            out.download_dir = Some(dir.clone());
        }
        if let Some(host) = self.host {
            out.host = host;
        }
        out.legacy_save |= self.legacy;
        out.block_synthetic_clicks |= self.block_clicks;
        if self.overwrite {
            out.on_conflict = ConflictPolicy::Overwrite;
        }
        if let Some(echo) = self.echo {
            out.payload_echo = echo;
        }
        out
    }
}

/// Read CSV text from `input`, or stdin for `None` / `-`.
pub fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        None => read_stdin(),
        Some(p) if p == Path::new("-") => read_stdin(),
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read CSV input {}", p.display())),
    }
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read CSV input from stdin")?;
    Ok(text)
}

/// Save and return the receipt (None when the host suppressed the download).
pub fn save_text(
    cfg: &CsvdlConfig,
    title: &str,
    kind: &str,
    csv_text: &str,
) -> Result<(SaveOutcome, Option<SaveReceipt>)> {
    let dir = cfg.resolve_download_dir()?;
    let host = DirectoryHost::from_config(cfg, dir);
    let trigger = DownloadTrigger::for_host(&host, cfg.host, cfg.payload_echo)?;
    let outcome = trigger.trigger(title, kind, csv_text)?;
    let receipt = if outcome.is_suppressed() {
        None
    } else {
        host.last_receipt()
    };
    Ok((outcome, receipt))
}

pub fn run_save(
    cfg: &CsvdlConfig,
    overrides: &SaveOverrides,
    title: &str,
    kind: &str,
    input: Option<&Path>,
) -> Result<()> {
    let cfg = overrides.apply(cfg);
    let csv_text = read_input(input)?;

    match save_text(&cfg, title, kind, &csv_text)? {
        (outcome, Some(receipt)) => {
            println!(
                "Saved {} ({} bytes, sha256 {})",
                receipt.path.display(),
                receipt.bytes,
                receipt.sha256
            );
            tracing::debug!(?outcome, "save finished");
        }
        (outcome, None) => {
            println!("Download of {} was blocked by the host", outcome.filename());
        }
    }
    Ok(())
}
