//! Metadata submitted to the media registry when an entry is created.
//!
//! A [`MediaEntryDescriptor`] is built fresh for every save request, handed to
//! [`MediaRegistry::create_entry`](crate::registry::MediaRegistry::create_entry)
//! once, and then discarded. Later changes to the entry go through the
//! partial [`EntryUpdate`].

use crate::config::SaverConfig;
use crate::location::GeoLocation;

use serde::{Deserialize, Serialize};

/// Builds the display name for an entry created at `timestamp_millis`.
///
/// Uniqueness relies on millisecond granularity; callers save at most one
/// user-initiated clip at a time.
#[must_use]
pub fn generate_display_name(prefix: &str, timestamp_millis: i64, extension: &str) -> String {
    format!("{prefix}{timestamp_millis}.{extension}")
}

/// The full set of fields written to the registry before any data transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaEntryDescriptor {
    /// Generated file name, never user supplied
    pub display_name: String,

    pub mime_type: String,

    /// Seconds since the Unix epoch
    pub date_added: i64,

    /// Seconds since the Unix epoch
    pub date_modified: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Storage-location hint relative to the gallery root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,

    /// Display-facing capture time as reported by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<String>,

    /// Hidden from other readers until cleared
    #[serde(default)]
    pub pending: bool,
}

impl MediaEntryDescriptor {
    /// Builds the descriptor for a clip saved at `timestamp_millis`.
    ///
    /// The storage hint and the pending flag are only set when the config
    /// asks for staged visibility.
    #[must_use]
    pub fn for_clip(
        config: &SaverConfig,
        timestamp_millis: i64,
        captured_at: Option<&str>,
        location: Option<GeoLocation>,
    ) -> Self {
        let seconds = timestamp_millis / 1000;
        let (relative_path, pending) = if config.staged_visibility {
            (config.relative_path.clone(), true)
        } else {
            (None, false)
        };

        Self {
            display_name: generate_display_name(
                &config.display_name_prefix,
                timestamp_millis,
                &config.extension,
            ),
            mime_type: config.mime_type.clone(),
            date_added: seconds,
            date_modified: seconds,
            latitude: location.map(|loc| loc.latitude),
            longitude: location.map(|loc| loc.longitude),
            relative_path,
            captured_at: captured_at.map(str::to_string),
            pending,
        }
    }

    /// Returns the stored location, if both coordinates are present.
    #[must_use]
    pub fn location(&self) -> Option<GeoLocation> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoLocation { latitude, longitude }),
            _ => None,
        }
    }

    /// Applies the fields set in `update`, leaving the rest untouched.
    pub fn apply(&mut self, update: &EntryUpdate) {
        if let Some(pending) = update.pending {
            self.pending = pending;
        }
    }
}

/// A partial descriptor submitted against an existing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<bool>,
}

impl EntryUpdate {
    /// The update that makes a staged entry visible to other readers.
    #[must_use]
    pub fn publish() -> Self {
        Self {
            pending: Some(false),
        }
    }
}
