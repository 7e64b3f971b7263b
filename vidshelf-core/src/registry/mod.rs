// ============================================================================
// vidshelf-core/src/registry/mod.rs
// ============================================================================
//
// MEDIA REGISTRY: Abstraction over a shared media store
//
// The gallery saver never touches the destination storage directly. It talks
// to a MediaRegistry, which owns entry creation, the write stream into an
// entry, partial updates (used to flip an entry from pending to visible) and
// deletion.
//
// KEY COMPONENTS:
// - MediaHandle: opaque identifier of a created entry
// - MediaEntry: a handle with its stored metadata and content size
// - MediaRegistry: the trait every backend implements
// - FsMediaRegistry: directory-backed gallery (registry/fs.rs)
// - MemoryMediaRegistry: in-process registry with fault injection (registry/memory.rs)

pub mod fs;
pub mod memory;

use crate::descriptor::{EntryUpdate, MediaEntryDescriptor};
use crate::error::CoreResult;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

pub use fs::FsMediaRegistry;
pub use memory::MemoryMediaRegistry;

/// Opaque reference to a registry entry.
///
/// Backends render handles as URI-like strings (`gallery://Movies/video_1.mp4`,
/// `memory://media/3`); callers should treat the text as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaHandle(String);

impl MediaHandle {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored entry as reported by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaEntry {
    pub handle: MediaHandle,
    pub descriptor: MediaEntryDescriptor,
    /// Content size in bytes
    pub size: u64,
}

/// A shared media store that other applications can read from.
///
/// Transactional guarantees are backend-defined. The only isolation the
/// saver relies on is that entries created with `pending = true` are not
/// reported by [`list_entries`](MediaRegistry::list_entries) until an update
/// clears the flag.
pub trait MediaRegistry: Send + Sync {
    /// Creates a new entry from `descriptor` and returns its handle.
    fn create_entry(&self, descriptor: &MediaEntryDescriptor) -> CoreResult<MediaHandle>;

    /// Opens a stream that replaces the entry's content.
    fn open_write_stream(&self, handle: &MediaHandle) -> std::io::Result<Box<dyn Write + Send>>;

    /// Applies a partial descriptor to an existing entry.
    fn update_entry(&self, handle: &MediaHandle, update: &EntryUpdate) -> CoreResult<()>;

    /// Removes an entry and its content.
    fn delete_entry(&self, handle: &MediaHandle) -> CoreResult<()>;

    /// Looks up a single entry, pending or not.
    fn entry(&self, handle: &MediaHandle) -> CoreResult<MediaEntry>;

    /// Lists every visible entry, ordered by display name.
    fn list_entries(&self) -> CoreResult<Vec<MediaEntry>>;
}

impl<R: MediaRegistry + ?Sized> MediaRegistry for &R {
    fn create_entry(&self, descriptor: &MediaEntryDescriptor) -> CoreResult<MediaHandle> {
        (**self).create_entry(descriptor)
    }

    fn open_write_stream(&self, handle: &MediaHandle) -> std::io::Result<Box<dyn Write + Send>> {
        (**self).open_write_stream(handle)
    }

    fn update_entry(&self, handle: &MediaHandle, update: &EntryUpdate) -> CoreResult<()> {
        (**self).update_entry(handle, update)
    }

    fn delete_entry(&self, handle: &MediaHandle) -> CoreResult<()> {
        (**self).delete_entry(handle)
    }

    fn entry(&self, handle: &MediaHandle) -> CoreResult<MediaEntry> {
        (**self).entry(handle)
    }

    fn list_entries(&self) -> CoreResult<Vec<MediaEntry>> {
        (**self).list_entries()
    }
}
