// vidshelf-cli/src/main.rs
//
// Entry point for the vidshelf command-line tool.
//
// Responsibilities include:
// - Parsing user-provided arguments (see cli.rs).
// - Setting up logging to the console or to a file.
// - Dispatching to the save, call and list commands.
// - Reporting errors and mapping outcomes to process exit codes.

use clap::Parser;
use log::error;
use std::process::ExitCode;

use vidshelf_cli::error::EXIT_FAILURE;
use vidshelf_cli::logging::init_logging;
use vidshelf_cli::output::print_error;
use vidshelf_cli::{Cli, Commands, run_call, run_list, run_save};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.log_dir.as_deref()) {
        print_error(format!("Failed to initialise logging: {e:#}"));
        return ExitCode::from(EXIT_FAILURE);
    }

    let result = match cli.command {
        Commands::Save(args) => run_save(args),
        Commands::Call(args) => run_call(args),
        Commands::List(args) => run_list(args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            print_error(format!("{e:#}"));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
