//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the implementation of the `call` command.
/// This command replays a raw method call through the gallery channel.
pub mod call;

/// Module containing the implementation of the `list` command.
pub mod list;

/// Module containing the implementation of the `save` command.
/// This command moves a recorded clip into a gallery directory.
pub mod save;

use crate::cli::GalleryArgs;
use crate::error::CliResult;

use anyhow::Context;
use vidshelf_core::FsMediaRegistry;

/// Opens the gallery named on the command line, creating its root if needed.
pub fn open_gallery(args: &GalleryArgs) -> CliResult<FsMediaRegistry> {
    FsMediaRegistry::open(&args.gallery_dir).with_context(|| {
        format!("Failed to open gallery '{}'", args.gallery_dir.display())
    })
}
