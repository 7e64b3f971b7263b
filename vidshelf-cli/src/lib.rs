// vidshelf-cli/src/lib.rs
//
// Library portion of the vidshelf CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;

// Re-export items needed by the binary or integration tests
pub use cli::{CallArgs, Cli, Commands, GalleryArgs, ListArgs, SaveArgs};
pub use commands::call::run_call;
pub use commands::list::run_list;
pub use commands::save::run_save;
