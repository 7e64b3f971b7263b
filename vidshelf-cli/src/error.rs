// ============================================================================
// vidshelf-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result alias and process exit codes
//
// Commands return anyhow results for context-rich messages; the exit code is
// derived from the boundary's response code so scripts can tell a rejected
// request from a failed save.

use std::process::ExitCode;
use vidshelf_core::MethodResponse;
use vidshelf_core::channel::INVALID_ARGUMENTS;

/// Type alias for CLI results.
pub type CliResult<T> = anyhow::Result<T>;

/// Exit status for a failed save (`SAVE_ERROR`) or any other runtime error.
pub const EXIT_FAILURE: u8 = 1;

/// Exit status for a request rejected before any work was done.
pub const EXIT_INVALID_ARGUMENTS: u8 = 2;

/// Exit status for a method the channel does not implement.
pub const EXIT_NOT_IMPLEMENTED: u8 = 3;

/// Maps a channel response onto the process exit status.
pub fn exit_code_for(response: &MethodResponse) -> ExitCode {
    match response {
        MethodResponse::Success { .. } => ExitCode::SUCCESS,
        MethodResponse::Error { code, .. } if code == INVALID_ARGUMENTS => {
            ExitCode::from(EXIT_INVALID_ARGUMENTS)
        }
        MethodResponse::Error { .. } => ExitCode::from(EXIT_FAILURE),
        MethodResponse::NotImplemented => ExitCode::from(EXIT_NOT_IMPLEMENTED),
    }
}
