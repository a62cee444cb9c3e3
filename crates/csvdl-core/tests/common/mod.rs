pub mod recording_host;
