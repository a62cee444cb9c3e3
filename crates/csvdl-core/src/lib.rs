//! csvdl core: turn a title, a type tag and CSV text into `<title>_<type>.csv`
//! and hand it to a host's save mechanism.
//!
//! [`request`] is the pure half; [`adapter`] and [`host`] are the host side;
//! [`trigger::DownloadTrigger`] ties them together.

pub mod config;
pub mod logging;

pub mod adapter;
pub mod blob;
pub mod checksum;
pub mod diagnostics;
pub mod host;
pub mod request;
pub mod trigger;

pub use adapter::{HostPreference, SaveOutcome};
pub use trigger::DownloadTrigger;
