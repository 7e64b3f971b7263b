// vidshelf-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use vidshelf_core::channel::SAVE_VIDEO_METHOD;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Vidshelf: save recorded clips into a media gallery",
    long_about = "Moves recorded video clips into a shared gallery directory, tagging them \
                  with a capture time and location, via the vidshelf-core library."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable detailed logging output
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Optional: Directory for log files (logs go to stderr when unset)
    #[arg(long, global = true, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Saves a recorded clip into the gallery and removes the source file
    Save(SaveArgs),
    /// Sends a raw method call through the gallery channel and prints the JSON response
    Call(CallArgs),
    /// Lists the visible entries of a gallery
    List(ListArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GalleryArgs {
    /// Gallery root directory.
    /// Can also be set via the VIDSHELF_GALLERY_DIR environment variable.
    #[arg(short = 'g', long = "gallery", value_name = "GALLERY_DIR", env = "VIDSHELF_GALLERY_DIR")]
    pub gallery_dir: PathBuf,
}

#[derive(Parser, Debug)]
pub struct SaveArgs {
    #[command(flatten)]
    pub gallery: GalleryArgs,

    /// Recorded clip to move into the gallery
    #[arg(short = 'i', long = "input", required = true, value_name = "VIDEO_PATH")]
    pub video_path: PathBuf,

    /// Optional: Display-facing capture time (defaults to now)
    #[arg(long, value_name = "DATE_TIME")]
    pub date_time: Option<String>,

    /// Latitude in decimal degrees (0 means no location)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub latitude: f64,

    /// Longitude in decimal degrees (0 means no location)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub longitude: f64,

    /// Optional: Override the storage location inside the gallery (default: Movies).
    /// Only applies to staged saves; cannot be combined with --no-staging.
    /// Can also be set via the VIDSHELF_RELATIVE_PATH environment variable.
    #[arg(long, value_name = "RELATIVE_PATH", env = "VIDSHELF_RELATIVE_PATH")]
    pub relative_path: Option<String>,

    /// Write the entry visible from the start, at the gallery root, instead of staging it
    #[arg(long, default_value_t = false, conflicts_with = "relative_path")]
    pub no_staging: bool,

    /// Leave a partially written entry in place when the copy fails
    #[arg(long, default_value_t = false)]
    pub keep_partial: bool,
}

#[derive(Parser, Debug)]
pub struct CallArgs {
    #[command(flatten)]
    pub gallery: GalleryArgs,

    /// Method name to invoke
    #[arg(short, long, default_value = SAVE_VIDEO_METHOD)]
    pub method: String,

    /// Argument bundle as a JSON object, e.g. '{"videoPath": "/tmp/clip.mp4", ...}'
    #[arg(short, long, value_name = "JSON", default_value = "{}")]
    pub arguments: String,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub gallery: GalleryArgs,

    /// Print entries as JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
