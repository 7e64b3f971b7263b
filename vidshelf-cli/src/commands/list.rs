//! Implementation of the 'list' subcommand.

use crate::cli::ListArgs;
use crate::commands::open_gallery;
use crate::error::CliResult;
use crate::output::print_entries;

use std::process::ExitCode;
use vidshelf_core::MediaRegistry;

pub fn run_list(args: ListArgs) -> CliResult<ExitCode> {
    let registry = open_gallery(&args.gallery)?;
    let entries = registry.list_entries()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print_entries(&entries);
    }

    Ok(ExitCode::SUCCESS)
}
