// ============================================================================
// vidshelf-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console or file logging for the CLI
//
// Without --log-dir the CLI logs to stderr through env_logger, honouring
// RUST_LOG:
// - RUST_LOG=info (default): Normal operation logs
// - RUST_LOG=debug: Detailed debugging information (also set by --verbose)
// With --log-dir every record goes to a timestamped file through the
// core library's log4rs setup instead.

use crate::config::LOG_FILE_PREFIX;
use crate::error::CliResult;

use log::LevelFilter;
use std::path::{Path, PathBuf};
use vidshelf_core::file_logging::{log_file_name, setup_file_logging};

/// Initialises the global logger. Returns the log file path when logging to a file.
pub fn init_logging(verbose: bool, log_dir: Option<&Path>) -> CliResult<Option<PathBuf>> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    match log_dir {
        Some(dir) => {
            let log_file = dir.join(log_file_name(LOG_FILE_PREFIX));
            setup_file_logging(&log_file, level)?;
            log::debug!("Logging to {}", log_file.display());
            Ok(Some(log_file))
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.to_string()))
                .format_timestamp_secs()
                .try_init()?;
            Ok(None)
        }
    }
}
