//! CLI for csvdl.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use csvdl_core::adapter::HostPreference;
use csvdl_core::config;
use csvdl_core::diagnostics::PayloadEcho;
use std::path::PathBuf;

use commands::{run_checksum, run_completions, run_probe, run_save, SaveOverrides};

/// Top-level CLI for csvdl.
#[derive(Debug, Parser)]
#[command(name = "csvdl")]
#[command(about = "csvdl: save CSV text as <title>_<type>.csv through a host save path", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// `--host` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HostArg {
    Auto,
    Legacy,
    ObjectUrl,
}

impl From<HostArg> for HostPreference {
    fn from(arg: HostArg) -> Self {
        match arg {
            HostArg::Auto => HostPreference::Auto,
            HostArg::Legacy => HostPreference::Legacy,
            HostArg::ObjectUrl => HostPreference::ObjectUrl,
        }
    }
}

/// `--echo` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EchoArg {
    Log,
    Console,
    Off,
}

impl From<EchoArg> for PayloadEcho {
    fn from(arg: EchoArg) -> Self {
        match arg {
            EchoArg::Log => PayloadEcho::Log,
            EchoArg::Console => PayloadEcho::Console,
            EchoArg::Off => PayloadEcho::Off,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Save CSV text as <TITLE>_<TYPE>.csv.
    Save {
        /// Display title (first part of the filename).
        title: String,

        /// Type tag (second part of the filename), e.g. meas, stat, iso.
        #[arg(value_name = "TYPE")]
        kind: String,

        /// CSV file to read; stdin when omitted or "-".
        input: Option<PathBuf>,

        /// Download directory (overrides config).
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Save path selection (overrides config).
        #[arg(long, value_enum)]
        host: Option<HostArg>,

        /// Expose the legacy save primitive on the host.
        #[arg(long)]
        legacy: bool,

        /// Make the host swallow synthetic clicks (simulates download blocking).
        #[arg(long)]
        block_clicks: bool,

        /// Replace an existing file instead of picking "name (1).csv".
        #[arg(long)]
        overwrite: bool,

        /// Where to echo the raw CSV text before saving (overrides config).
        #[arg(long, value_enum)]
        echo: Option<EchoArg>,
    },

    /// Show which save path the host would take.
    Probe {
        /// Expose the legacy save primitive on the host.
        #[arg(long)]
        legacy: bool,

        /// Save path selection (overrides config).
        #[arg(long, value_enum)]
        host: Option<HostArg>,
    },

    /// Compute SHA-256 of a file (e.g. after a save).
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },

    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Save {
                title,
                kind,
                input,
                dir,
                host,
                legacy,
                block_clicks,
                overwrite,
                echo,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let overrides = SaveOverrides {
                    dir,
                    host: host.map(Into::into),
                    legacy,
                    block_clicks,
                    overwrite,
                    echo: echo.map(Into::into),
                };
                run_save(&cfg, &overrides, &title, &kind, input.as_deref())?;
            }
            CliCommand::Probe { legacy, host } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_probe(&cfg, legacy, host.map(Into::into))?;
            }
            CliCommand::Checksum { path } => run_checksum(&path)?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
