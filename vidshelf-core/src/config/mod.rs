//! Configuration structures and constants for the vidshelf-core library.
//!
//! This module controls how saved entries are named, typed and staged in the
//! media registry, and what happens to a half-written entry when the byte
//! transfer fails.

mod builder;

use crate::error::{CoreError, CoreResult};

pub use builder::SaverConfigBuilder;

// Default constants

/// Prefix of every generated display name (`video_<millis>.mp4`).
pub const DEFAULT_DISPLAY_NAME_PREFIX: &str = "video_";

/// File extension of every generated display name.
pub const DEFAULT_EXTENSION: &str = "mp4";

/// MIME type recorded on every saved entry.
pub const DEFAULT_MIME_TYPE: &str = "video/mp4";

/// Storage-location hint for staged entries, relative to the gallery root.
pub const DEFAULT_RELATIVE_PATH: &str = "Movies";

/// Buffer size used when streaming the source file into the entry.
pub const DEFAULT_COPY_BUFFER_SIZE: usize = 64 * 1024;

/// What to do with a registry entry whose byte transfer failed partway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferFailurePolicy {
    /// Delete the partially-written entry before reporting the failure.
    #[default]
    RemoveEntry,
    /// Leave the partial entry in the registry.
    KeepPartial,
}

/// Main configuration structure for the gallery saver.
///
/// All fields have sensible defaults matching a stock Android gallery
/// (`video_<millis>.mp4`, `video/mp4`, staged under `Movies`).
///
/// # Examples
///
/// ```rust
/// use vidshelf_core::config::{SaverConfigBuilder, TransferFailurePolicy};
///
/// let config = SaverConfigBuilder::new()
///     .relative_path("DCIM/Camera")
///     .transfer_failure_policy(TransferFailurePolicy::KeepPartial)
///     .build()
///     .unwrap();
/// assert_eq!(config.relative_path.as_deref(), Some("DCIM/Camera"));
/// ```
#[derive(Debug, Clone)]
pub struct SaverConfig {
    /// Prefix of generated display names
    pub display_name_prefix: String,

    /// Extension of generated display names, without the dot
    pub extension: String,

    /// MIME type recorded on the entry
    pub mime_type: String,

    /// Storage-location hint, only applied when staged visibility is on
    pub relative_path: Option<String>,

    /// Create entries as pending and publish them after the full transfer
    pub staged_visibility: bool,

    /// Cleanup behavior after a failed transfer
    pub transfer_failure_policy: TransferFailurePolicy,

    /// Copy buffer size in bytes
    pub copy_buffer_size: usize,
}

impl Default for SaverConfig {
    fn default() -> Self {
        Self {
            display_name_prefix: DEFAULT_DISPLAY_NAME_PREFIX.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            mime_type: DEFAULT_MIME_TYPE.to_string(),
            relative_path: Some(DEFAULT_RELATIVE_PATH.to_string()),
            staged_visibility: true,
            transfer_failure_policy: TransferFailurePolicy::default(),
            copy_buffer_size: DEFAULT_COPY_BUFFER_SIZE,
        }
    }
}

impl SaverConfig {
    /// Checks the configuration for values that would produce unusable entries.
    pub fn validate(&self) -> CoreResult<()> {
        if self.display_name_prefix.is_empty() {
            return Err(CoreError::Config(
                "display name prefix must not be empty".to_string(),
            ));
        }
        // Leading dots are reserved for pending content and metadata sidecars
        if self.display_name_prefix.starts_with('.')
            || self.display_name_prefix.contains(['/', '\\'])
        {
            return Err(CoreError::Config(format!(
                "invalid display name prefix '{}'",
                self.display_name_prefix
            )));
        }
        if self.extension.is_empty()
            || self.extension.contains(['.', '/', '\\'])
            || self.extension.eq_ignore_ascii_case("json")
        {
            return Err(CoreError::Config(format!(
                "invalid file extension '{}'",
                self.extension
            )));
        }
        if !self.mime_type.starts_with("video/") {
            return Err(CoreError::Config(format!(
                "MIME type '{}' is not a video type",
                self.mime_type
            )));
        }
        if let Some(path) = &self.relative_path {
            if path.split(['/', '\\']).any(|part| part == "..") {
                return Err(CoreError::Config(format!(
                    "relative path '{path}' must stay inside the gallery"
                )));
            }
        }
        if self.copy_buffer_size == 0 {
            return Err(CoreError::Config(
                "copy buffer size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SaverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mime_type, "video/mp4");
        assert_eq!(config.relative_path.as_deref(), Some("Movies"));
        assert!(config.staged_visibility);
        assert_eq!(config.transfer_failure_policy, TransferFailurePolicy::RemoveEntry);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SaverConfig::default();
        config.mime_type = "image/jpeg".to_string();
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        let mut config = SaverConfig::default();
        config.extension = ".mp4".to_string();
        assert!(config.validate().is_err());

        let mut config = SaverConfig::default();
        config.relative_path = Some("../outside".to_string());
        assert!(config.validate().is_err());

        let mut config = SaverConfig::default();
        config.copy_buffer_size = 0;
        assert!(config.validate().is_err());

        let mut config = SaverConfig::default();
        config.display_name_prefix.clear();
        assert!(config.validate().is_err());
        for prefix in [".hidden_", "clips/video_", "clips\\video_"] {
            let mut config = SaverConfig::default();
            config.display_name_prefix = prefix.to_string();
            assert!(config.validate().is_err(), "accepted prefix {prefix}");
        }

        let mut config = SaverConfig::default();
        config.extension = "JSON".to_string();
        assert!(config.validate().is_err());

        // Looks like the pending marker but stays a plain visible name
        let mut config = SaverConfig::default();
        config.display_name_prefix = "pending-".to_string();
        assert!(config.validate().is_ok());
    }
}
