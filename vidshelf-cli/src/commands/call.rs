//! Implementation of the 'call' subcommand.
//!
//! Replays a raw method call (name plus JSON argument bundle) through the
//! gallery channel, exactly as the application's cross-platform layer would
//! send it, and prints the JSON response.

use crate::cli::CallArgs;
use crate::commands::open_gallery;
use crate::error::{CliResult, exit_code_for};

use anyhow::Context;
use serde_json::Value;
use std::process::ExitCode;
use vidshelf_core::{GalleryChannel, GallerySaver, MethodCall, SaverConfig};

pub fn run_call(args: CallArgs) -> CliResult<ExitCode> {
    let arguments: Value =
        serde_json::from_str(&args.arguments).context("Method arguments must be valid JSON")?;

    let registry = open_gallery(&args.gallery)?;
    let channel = GalleryChannel::new(GallerySaver::new(registry, SaverConfig::default()));

    let response = channel.handle(&MethodCall::new(args.method, arguments));
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(exit_code_for(&response))
}
