//! Payload echo: the raw CSV text is written to a diagnostic channel before
//! a save, the way a browser page would `console.log` it.
//!
//! The sink is chosen by the caller, so echoing can be redirected or turned
//! off without touching the save path.

use std::io::{self, Write};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// `tracing` target used by [`TracingSink`].
pub const PAYLOAD_TARGET: &str = "csvdl::payload";

/// Where the payload echo goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadEcho {
    /// Debug event on the `csvdl::payload` target.
    #[default]
    Log,
    /// Raw text on stderr.
    Console,
    Off,
}

pub trait PayloadSink: Send + Sync {
    fn emit(&self, csv_text: &str);
}

/// Emits the payload as a `tracing` debug event.
pub struct TracingSink;

impl PayloadSink for TracingSink {
    fn emit(&self, csv_text: &str) {
        tracing::debug!(target: PAYLOAD_TARGET, bytes = csv_text.len(), "{}", csv_text);
    }
}

/// Writes the payload verbatim to a writer (stderr by default).
pub struct ConsoleSink<W: Write + Send = io::Stderr> {
    out: Mutex<W>,
}

impl ConsoleSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> PayloadSink for ConsoleSink<W> {
    fn emit(&self, csv_text: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        // Echo failures are logged, never returned.
        if let Err(e) = write_line(&mut *out, csv_text) {
            tracing::debug!(error = %e, "payload echo failed");
        }
    }
}

fn write_line<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Discards the payload.
pub struct NullSink;

impl PayloadSink for NullSink {
    fn emit(&self, _csv_text: &str) {}
}

/// Sink for a configured [`PayloadEcho`].
pub fn sink_for(echo: PayloadEcho) -> Box<dyn PayloadSink> {
    match echo {
        PayloadEcho::Log => Box::new(TracingSink),
        PayloadEcho::Console => Box::new(ConsoleSink::stderr()),
        PayloadEcho::Off => Box::new(NullSink),
    }
}
