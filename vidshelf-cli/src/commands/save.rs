//! Implementation of the 'save' subcommand.
//!
//! Builds a SaverConfig from the command line, opens the gallery directory
//! and delegates the save to the vidshelf-core library.

use crate::cli::SaveArgs;
use crate::commands::open_gallery;
use crate::config::DEFAULT_DATE_TIME_FORMAT;
use crate::error::CliResult;
use crate::output::{print_info, print_success};

use anyhow::Context;
use log::warn;
use std::process::ExitCode;
use vidshelf_core::{
    GallerySaver, SaveRequest, SaverConfig, SaverConfigBuilder, TransferFailurePolicy,
    format_bytes, is_valid_video_file,
};

/// Creates and configures SaverConfig from CLI arguments.
fn create_saver_config(args: &SaveArgs) -> CliResult<SaverConfig> {
    let mut builder = SaverConfigBuilder::new().staged_visibility(!args.no_staging);

    if let Some(relative_path) = &args.relative_path {
        builder = builder.relative_path(relative_path);
    }

    if args.keep_partial {
        builder = builder.transfer_failure_policy(TransferFailurePolicy::KeepPartial);
    }

    builder.build().context("Invalid save configuration")
}

/// Runs the save command: one clip in, one gallery entry out.
pub fn run_save(args: SaveArgs) -> CliResult<ExitCode> {
    if args.video_path.is_file() && !is_valid_video_file(&args.video_path) {
        warn!(
            "'{}' does not have a video file extension; saving it as video anyway",
            args.video_path.display()
        );
    }

    let config = create_saver_config(&args)?;
    let registry = open_gallery(&args.gallery)?;

    let date_time = args
        .date_time
        .clone()
        .unwrap_or_else(|| chrono::Local::now().format(DEFAULT_DATE_TIME_FORMAT).to_string());
    let request = SaveRequest::new(&args.video_path, date_time, args.latitude, args.longitude);

    print_info("Input", args.video_path.display());
    print_info("Gallery", args.gallery.gallery_dir.display());

    let saved = GallerySaver::new(registry, config)
        .save_video_to_gallery(&request)
        .with_context(|| format!("Failed to save video '{}'", args.video_path.display()))?;

    print_success(&format!("Video saved successfully: {}", saved.handle));
    print_info("Size", format_bytes(saved.bytes_copied));
    match saved.descriptor.location() {
        Some(loc) => print_info("Location", format!("{}, {}", loc.latitude, loc.longitude)),
        None => print_info("Location", "none"),
    }

    Ok(ExitCode::SUCCESS)
}
