//! In-process media registry.
//!
//! Keeps every entry in memory behind a mutex. Useful for embedding the saver
//! where no shared gallery exists, and for tests: inserts, writes and updates
//! can be made to fail on demand.

use super::{MediaEntry, MediaHandle, MediaRegistry};
use crate::descriptor::{EntryUpdate, MediaEntryDescriptor};
use crate::error::{CoreError, CoreResult};

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Scheme prefix of handles issued by [`MemoryMediaRegistry`].
pub const MEMORY_HANDLE_SCHEME: &str = "memory://media/";

#[derive(Debug)]
struct StoredEntry {
    descriptor: MediaEntryDescriptor,
    data: Vec<u8>,
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: u64,
    entries: BTreeMap<u64, StoredEntry>,
    fail_inserts: bool,
    fail_updates: bool,
    write_limit: Option<usize>,
}

/// A cloneable handle to a shared in-memory registry.
#[derive(Debug, Clone, Default)]
pub struct MemoryMediaRegistry {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryMediaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `create_entry` fail, as a full or
    /// permission-denied store would.
    pub fn fail_inserts(&self) {
        self.lock().fail_inserts = true;
    }

    /// Makes every subsequent `update_entry` fail.
    pub fn fail_updates(&self) {
        self.lock().fail_updates = true;
    }

    /// Makes write streams fail once `limit` bytes have been accepted.
    pub fn fail_writes_after(&self, limit: usize) {
        self.lock().write_limit = Some(limit);
    }

    /// Number of entries, pending ones included.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of an entry's content.
    pub fn contents(&self, handle: &MediaHandle) -> Option<Vec<u8>> {
        let id = parse_id(handle)?;
        self.lock().entries.get(&id).map(|entry| entry.data.clone())
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MediaRegistry for MemoryMediaRegistry {
    fn create_entry(&self, descriptor: &MediaEntryDescriptor) -> CoreResult<MediaHandle> {
        let mut state = self.lock();
        if state.fail_inserts {
            return Err(CoreError::RegistryInsertFailed(
                "media store refused the entry".to_string(),
            ));
        }

        state.next_id += 1;
        let id = state.next_id;
        state.entries.insert(
            id,
            StoredEntry {
                descriptor: descriptor.clone(),
                data: Vec::new(),
            },
        );
        Ok(MediaHandle::new(format!("{MEMORY_HANDLE_SCHEME}{id}")))
    }

    fn open_write_stream(&self, handle: &MediaHandle) -> io::Result<Box<dyn Write + Send>> {
        let not_found = || io::Error::new(io::ErrorKind::NotFound, handle.to_string());
        let id = parse_id(handle).ok_or_else(not_found)?;

        let mut state = self.lock();
        let entry = state.entries.get_mut(&id).ok_or_else(not_found)?;
        entry.data.clear();

        Ok(Box::new(MemoryWriter {
            state: Arc::clone(&self.state),
            id,
            written: 0,
        }))
    }

    fn update_entry(&self, handle: &MediaHandle, update: &EntryUpdate) -> CoreResult<()> {
        let id = parse_id(handle).ok_or_else(|| CoreError::EntryNotFound(handle.to_string()))?;
        let mut state = self.lock();
        if state.fail_updates {
            return Err(CoreError::RegistryUpdateFailed(
                "media store refused the update".to_string(),
            ));
        }
        let entry = state
            .entries
            .get_mut(&id)
            .ok_or_else(|| CoreError::EntryNotFound(handle.to_string()))?;
        entry.descriptor.apply(update);
        Ok(())
    }

    fn delete_entry(&self, handle: &MediaHandle) -> CoreResult<()> {
        let id = parse_id(handle).ok_or_else(|| CoreError::EntryNotFound(handle.to_string()))?;
        self.lock()
            .entries
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CoreError::EntryNotFound(handle.to_string()))
    }

    fn entry(&self, handle: &MediaHandle) -> CoreResult<MediaEntry> {
        let id = parse_id(handle).ok_or_else(|| CoreError::EntryNotFound(handle.to_string()))?;
        let state = self.lock();
        let stored = state
            .entries
            .get(&id)
            .ok_or_else(|| CoreError::EntryNotFound(handle.to_string()))?;
        Ok(MediaEntry {
            handle: handle.clone(),
            descriptor: stored.descriptor.clone(),
            size: stored.data.len() as u64,
        })
    }

    fn list_entries(&self) -> CoreResult<Vec<MediaEntry>> {
        let state = self.lock();
        let mut entries: Vec<MediaEntry> = state
            .entries
            .iter()
            .filter(|(_, stored)| !stored.descriptor.pending)
            .map(|(id, stored)| MediaEntry {
                handle: MediaHandle::new(format!("{MEMORY_HANDLE_SCHEME}{id}")),
                descriptor: stored.descriptor.clone(),
                size: stored.data.len() as u64,
            })
            .collect();
        entries.sort_by(|a, b| a.descriptor.display_name.cmp(&b.descriptor.display_name));
        Ok(entries)
    }
}

/// Write stream that appends into a shared entry.
struct MemoryWriter {
    state: Arc<Mutex<MemoryState>>,
    id: u64,
    written: usize,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let accepted = match state.write_limit {
            Some(limit) if self.written >= limit => {
                return Err(io::Error::other("injected write failure"));
            }
            Some(limit) => buf.len().min(limit - self.written),
            None => buf.len(),
        };

        let entry = state
            .entries
            .get_mut(&self.id)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "entry was deleted"))?;
        entry.data.extend_from_slice(&buf[..accepted]);
        self.written += accepted;
        Ok(accepted)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn parse_id(handle: &MediaHandle) -> Option<u64> {
    handle
        .as_str()
        .strip_prefix(MEMORY_HANDLE_SCHEME)?
        .parse()
        .ok()
}
