//! File-based logging for long-lived embedders and the CLI's `--log-dir`.
//!
//! Library code only ever logs through the `log` facade; this module is the
//! optional backend that sends those records to a timestamped file.

pub mod setup;

pub use setup::{log_file_name, setup_file_logging};
