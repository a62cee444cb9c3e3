//! CLI command handlers, one per file.

mod checksum;
mod completions;
mod probe;
mod save;

pub use checksum::run_checksum;
pub use completions::run_completions;
pub use probe::run_probe;
pub use save::{run_save, SaveOverrides};
