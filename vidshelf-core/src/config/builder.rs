// ============================================================================
// vidshelf-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for SaverConfig
//
// Fluent construction of SaverConfig instances. Every field starts at its
// default; build() validates the result.

use super::{SaverConfig, TransferFailurePolicy};
use crate::error::CoreResult;

/// Builder for creating SaverConfig instances.
///
/// # Examples
///
/// ```rust
/// use vidshelf_core::config::SaverConfigBuilder;
///
/// let config = SaverConfigBuilder::new()
///     .display_name_prefix("clip_")
///     .staged_visibility(false)
///     .copy_buffer_size(8192)
///     .build()
///     .unwrap();
/// assert!(!config.staged_visibility);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SaverConfigBuilder {
    config: SaverConfig,
}

impl SaverConfigBuilder {
    /// Creates a new SaverConfigBuilder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefix of generated display names.
    pub fn display_name_prefix(mut self, prefix: &str) -> Self {
        self.config.display_name_prefix = prefix.to_string();
        self
    }

    /// Sets the extension of generated display names (without the dot).
    pub fn extension(mut self, extension: &str) -> Self {
        self.config.extension = extension.to_string();
        self
    }

    /// Sets the MIME type recorded on saved entries.
    pub fn mime_type(mut self, mime_type: &str) -> Self {
        self.config.mime_type = mime_type.to_string();
        self
    }

    /// Sets the storage-location hint for staged entries.
    pub fn relative_path(mut self, path: &str) -> Self {
        self.config.relative_path = Some(path.to_string());
        self
    }

    /// Removes the storage-location hint; entries land at the gallery root.
    pub fn no_relative_path(mut self) -> Self {
        self.config.relative_path = None;
        self
    }

    /// Sets whether entries are created pending and published after the transfer.
    pub fn staged_visibility(mut self, enabled: bool) -> Self {
        self.config.staged_visibility = enabled;
        self
    }

    /// Sets the cleanup behavior after a failed transfer.
    pub fn transfer_failure_policy(mut self, policy: TransferFailurePolicy) -> Self {
        self.config.transfer_failure_policy = policy;
        self
    }

    /// Sets the copy buffer size in bytes.
    pub fn copy_buffer_size(mut self, size: usize) -> Self {
        self.config.copy_buffer_size = size;
        self
    }

    /// Builds and validates a SaverConfig instance.
    pub fn build(self) -> CoreResult<SaverConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
