// vidshelf-cli/src/config.rs
//
// Defines default configuration constants for the `vidshelf-cli` application.

/// Prefix of log files written under `--log-dir`.
pub const LOG_FILE_PREFIX: &str = "vidshelf";

/// Format of the capture time used when `--date-time` is omitted.
pub const DEFAULT_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
