// ============================================================================
// vidshelf-core/src/saver.rs
// ============================================================================
//
// GALLERY SAVER: Persist a recorded clip into a media registry
//
// One synchronous operation: register a new entry, stream the source file's
// bytes into it, publish it if it was staged, delete the source and hand back
// the entry's handle. Runs on whatever thread the caller supplies; nothing in
// here spawns work or retries.
//
// KEY COMPONENTS:
// - SaveRequest: the typed request (source path, capture time, coordinates)
// - SavedMedia: what a successful save produces
// - GallerySaver: the save procedure, generic over registry and clock

use crate::clock::{Clock, SystemClock};
use crate::config::{SaverConfig, TransferFailurePolicy};
use crate::descriptor::{EntryUpdate, MediaEntryDescriptor};
use crate::error::{CoreError, CoreResult};
use crate::location::GeoLocation;
use crate::registry::{MediaHandle, MediaRegistry};
use crate::utils::format_bytes;

use log::{debug, error, info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// A request to move a recorded clip into the gallery.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    /// Must reference an existing, readable file
    pub source_path: PathBuf,
    /// Display-facing capture time, stored verbatim
    pub captured_at: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Wire shape of the `saveVideoToGallery` argument bundle.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveVideoArguments {
    video_path: String,
    date_time: String,
    latitude: f64,
    longitude: f64,
}

impl SaveRequest {
    pub fn new(
        source_path: impl Into<PathBuf>,
        captured_at: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            captured_at: captured_at.into(),
            latitude,
            longitude,
        }
    }

    /// Parses a `{videoPath, dateTime, latitude, longitude}` argument bundle.
    ///
    /// Any absent, null or mistyped field yields [`CoreError::MissingArguments`].
    pub fn from_arguments(arguments: &Value) -> CoreResult<Self> {
        let args = SaveVideoArguments::deserialize(arguments).map_err(|e| {
            debug!("Rejected save arguments: {}", e);
            CoreError::MissingArguments
        })?;
        Ok(Self::new(args.video_path, args.date_time, args.latitude, args.longitude))
    }

    /// The location to record, or `None` when the coordinates carry no fix.
    #[must_use]
    pub fn location(&self) -> Option<GeoLocation> {
        GeoLocation::from_coordinates(self.latitude, self.longitude)
    }
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedMedia {
    pub handle: MediaHandle,
    /// The descriptor as submitted at creation time
    pub descriptor: MediaEntryDescriptor,
    pub bytes_copied: u64,
}

/// Saves recorded clips into a [`MediaRegistry`].
///
/// # Examples
///
/// ```rust
/// use vidshelf_core::{GallerySaver, SaveRequest, SaverConfig};
/// use vidshelf_core::registry::{MediaRegistry, MemoryMediaRegistry};
///
/// let dir = tempfile::tempdir().unwrap();
/// let clip = dir.path().join("clip.mp4");
/// std::fs::write(&clip, b"not really a video").unwrap();
///
/// let saver = GallerySaver::new(MemoryMediaRegistry::new(), SaverConfig::default());
/// let saved = saver
///     .save_video_to_gallery(&SaveRequest::new(&clip, "2024-01-01T10:00:00", 0.0, 0.0))
///     .unwrap();
///
/// assert!(!clip.exists());
/// assert_eq!(saver.registry().list_entries().unwrap()[0].handle, saved.handle);
/// ```
#[derive(Debug, Clone)]
pub struct GallerySaver<R, C = SystemClock> {
    registry: R,
    config: SaverConfig,
    clock: C,
}

impl<R: MediaRegistry> GallerySaver<R> {
    pub fn new(registry: R, config: SaverConfig) -> Self {
        Self {
            registry,
            config,
            clock: SystemClock,
        }
    }
}

impl<R: MediaRegistry, C: Clock> GallerySaver<R, C> {
    /// Replaces the clock used for display names and timestamps.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> GallerySaver<R, C2> {
        GallerySaver {
            registry: self.registry,
            config: self.config,
            clock,
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn config(&self) -> &SaverConfig {
        &self.config
    }

    /// Persists `request.source_path` into the registry and deletes the source.
    ///
    /// The source file is left untouched on every failure path, so the
    /// caller can retry. Once the entry is published the save counts as
    /// successful even if deleting the source fails.
    ///
    /// # Errors
    ///
    /// * `SourceNotFound` - the source is missing; the registry is not touched
    /// * `RegistryInsertFailed` - the registry refused to create the entry
    /// * `TransferFailed` - reading the source or writing the entry failed
    /// * `RegistryUpdateFailed` - the staged entry could not be published
    pub fn save_video_to_gallery(&self, request: &SaveRequest) -> CoreResult<SavedMedia> {
        let source = request.source_path.as_path();
        if !source.is_file() {
            return Err(CoreError::SourceNotFound(source.to_path_buf()));
        }

        let timestamp_millis = self.clock.now_millis();
        let descriptor = MediaEntryDescriptor::for_clip(
            &self.config,
            timestamp_millis,
            Some(&request.captured_at),
            request.location(),
        );
        debug!(
            "Saving {} as {} (location: {}, staged: {})",
            source.display(),
            descriptor.display_name,
            if descriptor.location().is_some() { "yes" } else { "no" },
            descriptor.pending
        );

        let handle = self
            .registry
            .create_entry(&descriptor)
            .map_err(|e| match e {
                CoreError::RegistryInsertFailed(_) => e,
                other => CoreError::RegistryInsertFailed(other.to_string()),
            })?;

        let bytes_copied = match self.transfer(source, &handle) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Copying {} into {} failed: {}", source.display(), handle, e);
                self.discard_entry(&handle);
                return Err(CoreError::TransferFailed(e));
            }
        };

        if descriptor.pending {
            if let Err(e) = self.registry.update_entry(&handle, &EntryUpdate::publish()) {
                error!("Publishing {} failed: {}", handle, e);
                self.discard_entry(&handle);
                return Err(match e {
                    CoreError::RegistryUpdateFailed(_) => e,
                    other => CoreError::RegistryUpdateFailed(other.to_string()),
                });
            }
        }

        if let Err(e) = fs::remove_file(source) {
            warn!("Could not remove source file {}: {}", source.display(), e);
        }

        info!(
            "Saved {} to gallery as {} ({})",
            descriptor.display_name,
            handle,
            format_bytes(bytes_copied)
        );

        Ok(SavedMedia {
            handle,
            descriptor,
            bytes_copied,
        })
    }

    fn transfer(&self, source: &Path, handle: &MediaHandle) -> io::Result<u64> {
        let output = self.registry.open_write_stream(handle)?;
        let input = File::open(source)?;

        let mut reader = BufReader::with_capacity(self.config.copy_buffer_size, input);
        let mut writer = BufWriter::with_capacity(self.config.copy_buffer_size, output);
        let copied = io::copy(&mut reader, &mut writer)?;
        writer.flush()?;
        Ok(copied)
    }

    fn discard_entry(&self, handle: &MediaHandle) {
        match self.config.transfer_failure_policy {
            TransferFailurePolicy::KeepPartial => {
                warn!("Leaving partial entry {} in the registry", handle);
            }
            TransferFailurePolicy::RemoveEntry => {
                if let Err(e) = self.registry.delete_entry(handle) {
                    warn!("Could not remove partial entry {}: {}", handle, e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::SaverConfigBuilder;
    use crate::registry::{MediaEntry, MemoryMediaRegistry};
    use serde_json::json;
    use tempfile::tempdir;

    /// Removes the source file behind the saver's back while publishing.
    struct SourceStealingRegistry {
        inner: MemoryMediaRegistry,
        source: PathBuf,
    }

    impl MediaRegistry for SourceStealingRegistry {
        fn create_entry(&self, descriptor: &MediaEntryDescriptor) -> CoreResult<MediaHandle> {
            self.inner.create_entry(descriptor)
        }

        fn open_write_stream(&self, handle: &MediaHandle) -> io::Result<Box<dyn Write + Send>> {
            self.inner.open_write_stream(handle)
        }

        fn update_entry(&self, handle: &MediaHandle, update: &EntryUpdate) -> CoreResult<()> {
            fs::remove_file(&self.source)?;
            self.inner.update_entry(handle, update)
        }

        fn delete_entry(&self, handle: &MediaHandle) -> CoreResult<()> {
            self.inner.delete_entry(handle)
        }

        fn entry(&self, handle: &MediaHandle) -> CoreResult<MediaEntry> {
            self.inner.entry(handle)
        }

        fn list_entries(&self) -> CoreResult<Vec<MediaEntry>> {
            self.inner.list_entries()
        }
    }

    fn saver(registry: MemoryMediaRegistry) -> GallerySaver<MemoryMediaRegistry, FixedClock> {
        GallerySaver::new(registry, SaverConfig::default()).with_clock(FixedClock(1_704_103_200_000))
    }

    #[test]
    fn test_from_arguments() {
        let request = SaveRequest::from_arguments(&json!({
            "videoPath": "/tmp/clip.mp4",
            "dateTime": "2024-01-01T10:00:00",
            "latitude": 37.7749,
            "longitude": -122.4194,
        }))
        .unwrap();
        assert_eq!(request.source_path, PathBuf::from("/tmp/clip.mp4"));
        assert_eq!(request.captured_at, "2024-01-01T10:00:00");
        assert_eq!(request.latitude, 37.7749);

        // Integer coordinates are accepted as numbers
        let request = SaveRequest::from_arguments(&json!({
            "videoPath": "a.mp4", "dateTime": "x", "latitude": 10, "longitude": 20,
        }))
        .unwrap();
        assert_eq!(request.longitude, 20.0);
    }

    #[test]
    fn test_from_arguments_rejects_missing_or_mistyped_fields() {
        let cases = [
            json!({"dateTime": "x", "latitude": 1.0, "longitude": 1.0}),
            json!({"videoPath": "a", "latitude": 1.0, "longitude": 1.0}),
            json!({"videoPath": "a", "dateTime": "x", "longitude": 1.0}),
            json!({"videoPath": "a", "dateTime": "x", "latitude": 1.0}),
            json!({"videoPath": null, "dateTime": "x", "latitude": 1.0, "longitude": 1.0}),
            json!({"videoPath": "a", "dateTime": "x", "latitude": "north", "longitude": 1.0}),
            json!({"videoPath": 5, "dateTime": "x", "latitude": 1.0, "longitude": 1.0}),
            json!(null),
            json!([]),
        ];
        for args in cases {
            assert!(
                matches!(SaveRequest::from_arguments(&args), Err(CoreError::MissingArguments)),
                "accepted {args}"
            );
        }
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempdir().unwrap();
        let clip = dir.path().join("clip.mp4");
        let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&clip, &data).unwrap();

        let registry = MemoryMediaRegistry::new();
        let saver = saver(registry.clone());
        let saved = saver
            .save_video_to_gallery(&SaveRequest::new(&clip, "2024-01-01T10:00:00", 37.7749, -122.4194))
            .unwrap();

        assert_eq!(saved.bytes_copied, data.len() as u64);
        assert_eq!(saved.descriptor.display_name, "video_1704103200000.mp4");
        assert_eq!(registry.contents(&saved.handle).unwrap(), data);
        assert!(!clip.exists());

        let entry = registry.entry(&saved.handle).unwrap();
        assert!(!entry.descriptor.pending);
        assert_eq!(entry.descriptor.latitude, Some(37.7749));
        assert_eq!(entry.descriptor.longitude, Some(-122.4194));
    }

    #[test]
    fn test_missing_source_never_touches_registry() {
        let dir = tempdir().unwrap();
        let registry = MemoryMediaRegistry::new();
        let result = saver(registry.clone())
            .save_video_to_gallery(&SaveRequest::new(dir.path().join("gone.mp4"), "t", 1.0, 1.0));

        assert!(matches!(result, Err(CoreError::SourceNotFound(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_insert_failure_keeps_source() {
        let dir = tempdir().unwrap();
        let clip = dir.path().join("clip.mp4");
        fs::write(&clip, b"data").unwrap();

        let registry = MemoryMediaRegistry::new();
        registry.fail_inserts();
        let result = saver(registry).save_video_to_gallery(&SaveRequest::new(&clip, "t", 0.0, 0.0));

        assert!(matches!(result, Err(CoreError::RegistryInsertFailed(_))));
        assert!(clip.exists());
    }

    #[test]
    fn test_transfer_failure_removes_partial_entry_by_default() {
        let dir = tempdir().unwrap();
        let clip = dir.path().join("clip.mp4");
        fs::write(&clip, vec![7u8; 10_000]).unwrap();

        let registry = MemoryMediaRegistry::new();
        registry.fail_writes_after(1_000);
        let result = saver(registry.clone()).save_video_to_gallery(&SaveRequest::new(&clip, "t", 0.0, 0.0));

        assert!(matches!(result, Err(CoreError::TransferFailed(_))));
        assert!(registry.is_empty());
        assert!(clip.exists());
    }

    #[test]
    fn test_transfer_failure_can_keep_partial_entry() {
        let dir = tempdir().unwrap();
        let clip = dir.path().join("clip.mp4");
        fs::write(&clip, vec![7u8; 10_000]).unwrap();

        let registry = MemoryMediaRegistry::new();
        registry.fail_writes_after(1_000);
        let config = SaverConfigBuilder::new()
            .transfer_failure_policy(TransferFailurePolicy::KeepPartial)
            .copy_buffer_size(512)
            .build()
            .unwrap();
        let saver = GallerySaver::new(registry.clone(), config);
        let result = saver.save_video_to_gallery(&SaveRequest::new(&clip, "t", 0.0, 0.0));

        assert!(matches!(result, Err(CoreError::TransferFailed(_))));
        assert_eq!(registry.len(), 1);
        // The partial entry stays pending, so no reader ever sees it
        assert!(registry.list_entries().unwrap().is_empty());
    }

    #[test]
    fn test_publish_failure_is_reported() {
        let dir = tempdir().unwrap();
        let clip = dir.path().join("clip.mp4");
        fs::write(&clip, b"data").unwrap();

        let registry = MemoryMediaRegistry::new();
        registry.fail_updates();
        let result = saver(registry.clone()).save_video_to_gallery(&SaveRequest::new(&clip, "t", 0.0, 0.0));

        assert!(matches!(result, Err(CoreError::RegistryUpdateFailed(_))));
        assert!(registry.is_empty());
        assert!(clip.exists());
    }

    #[test]
    fn test_unstaged_save_skips_publish() {
        let dir = tempdir().unwrap();
        let clip = dir.path().join("clip.mp4");
        fs::write(&clip, b"data").unwrap();

        let registry = MemoryMediaRegistry::new();
        // Updates would fail, so a successful save proves none was issued
        registry.fail_updates();
        let config = SaverConfigBuilder::new().staged_visibility(false).build().unwrap();
        let saved = GallerySaver::new(registry.clone(), config)
            .save_video_to_gallery(&SaveRequest::new(&clip, "t", 0.0, 0.0))
            .unwrap();

        assert!(!saved.descriptor.pending);
        assert!(saved.descriptor.relative_path.is_none());
        assert_eq!(registry.list_entries().unwrap().len(), 1);
    }

    #[test]
    fn test_source_removal_failure_does_not_fail_save() {
        let dir = tempdir().unwrap();
        let clip = dir.path().join("clip.mp4");
        fs::write(&clip, b"frames").unwrap();

        let registry = MemoryMediaRegistry::new();
        let stealing = SourceStealingRegistry {
            inner: registry.clone(),
            source: clip.clone(),
        };
        let saved = GallerySaver::new(stealing, SaverConfig::default())
            .with_clock(FixedClock(42))
            .save_video_to_gallery(&SaveRequest::new(&clip, "t", 0.0, 0.0))
            .unwrap();

        assert_eq!(saved.bytes_copied, 6);
        assert!(!clip.exists());
        let entry = registry.entry(&saved.handle).unwrap();
        assert!(!entry.descriptor.pending);
        assert_eq!(registry.contents(&saved.handle).unwrap(), b"frames");
        assert_eq!(registry.list_entries().unwrap().len(), 1);
    }
}
