//! Core library for saving recorded video clips into a shared media gallery.
//!
//! A save registers a new entry in a [`MediaRegistry`](registry::MediaRegistry),
//! streams the clip's bytes into it, publishes the entry once the transfer is
//! complete, and deletes the source file. The [`channel`] module exposes the
//! same operation through the method-call contract used by the application's
//! cross-platform layer.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidshelf_core::{GallerySaver, SaveRequest, SaverConfig};
//! use vidshelf_core::registry::FsMediaRegistry;
//!
//! let registry = FsMediaRegistry::open("/sdcard").unwrap();
//! let saver = GallerySaver::new(registry, SaverConfig::default());
//!
//! let saved = saver
//!     .save_video_to_gallery(&SaveRequest::new(
//!         "/tmp/clip.mp4",
//!         "2024-01-01T10:00:00",
//!         37.7749,
//!         -122.4194,
//!     ))
//!     .unwrap();
//! println!("Saved as {}", saved.handle);
//! ```

pub mod channel;
pub mod clock;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod file_logging;
pub mod location;
pub mod registry;
pub mod saver;
pub mod temp_files;
pub mod utils;

// Re-exports for public API
pub use channel::{GalleryChannel, MethodCall, MethodResponse};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{SaverConfig, SaverConfigBuilder, TransferFailurePolicy};
pub use descriptor::{EntryUpdate, MediaEntryDescriptor};
pub use error::{CoreError, CoreResult};
pub use location::GeoLocation;
pub use registry::{FsMediaRegistry, MediaEntry, MediaHandle, MediaRegistry, MemoryMediaRegistry};
pub use saver::{GallerySaver, SaveRequest, SavedMedia};
pub use utils::{format_bytes, format_epoch_seconds, is_valid_video_file};
