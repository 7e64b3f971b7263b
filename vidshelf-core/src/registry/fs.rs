//! Directory-backed media registry.
//!
//! Layout for an entry `video_1.mp4` with storage hint `Movies`:
//!
//! ```text
//! <root>/Movies/video_1.mp4          visible content
//! <root>/Movies/.pending-video_1.mp4 content while the entry is pending
//! <root>/Movies/.video_1.mp4.json    metadata sidecar (MediaEntryDescriptor)
//! ```
//!
//! Pending content lives under a hidden name, so gallery readers that skip
//! dot-files never observe a partially written clip. Publishing is a rename.

use super::{MediaEntry, MediaHandle, MediaRegistry};
use crate::descriptor::{EntryUpdate, MediaEntryDescriptor};
use crate::error::{CoreError, CoreResult};
use crate::temp_files::write_atomically;

use log::{debug, warn};
use std::ffi::OsStr;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Scheme prefix of handles issued by [`FsMediaRegistry`].
pub const FS_HANDLE_SCHEME: &str = "gallery://";

const PENDING_PREFIX: &str = ".pending-";
const SIDECAR_SUFFIX: &str = ".json";

/// A media gallery rooted at a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsMediaRegistry {
    root: PathBuf,
}

struct EntryPaths {
    dir: PathBuf,
    visible: PathBuf,
    pending: PathBuf,
    sidecar: PathBuf,
}

impl EntryPaths {
    fn content(&self, pending: bool) -> &Path {
        if pending { &self.pending } else { &self.visible }
    }
}

impl FsMediaRegistry {
    /// Opens the gallery at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> CoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the current on-disk location of an entry's content.
    pub fn content_path(&self, handle: &MediaHandle) -> CoreResult<PathBuf> {
        let (relative, name) = parse_handle(handle)?;
        let paths = self.paths(&relative, &name);
        let descriptor = read_descriptor(&paths.sidecar, handle)?;
        Ok(paths.content(descriptor.pending).to_path_buf())
    }

    fn paths(&self, relative: &str, name: &str) -> EntryPaths {
        let dir = if relative.is_empty() {
            self.root.clone()
        } else {
            relative.split('/').fold(self.root.clone(), |acc, part| acc.join(part))
        };
        EntryPaths {
            visible: dir.join(name),
            pending: dir.join(format!("{PENDING_PREFIX}{name}")),
            sidecar: dir.join(format!(".{name}{SIDECAR_SUFFIX}")),
            dir,
        }
    }

    fn load(&self, sidecar: &Path, dir: &Path) -> CoreResult<Option<MediaEntry>> {
        let Some(name) = sidecar_entry_name(sidecar.file_name()) else {
            return Ok(None);
        };
        let relative = dir
            .strip_prefix(&self.root)
            .map(|rel| {
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default();
        let handle = build_handle(&relative, &name);
        let descriptor = read_descriptor(sidecar, &handle)?;
        if descriptor.pending {
            return Ok(None);
        }
        let paths = self.paths(&relative, &name);
        let size = fs::metadata(&paths.visible)?.len();
        Ok(Some(MediaEntry { handle, descriptor, size }))
    }
}

impl MediaRegistry for FsMediaRegistry {
    fn create_entry(&self, descriptor: &MediaEntryDescriptor) -> CoreResult<MediaHandle> {
        let name = &descriptor.display_name;
        validate_name(name).map_err(CoreError::RegistryInsertFailed)?;
        let relative = normalize_relative(descriptor.relative_path.as_deref())
            .map_err(CoreError::RegistryInsertFailed)?;
        let paths = self.paths(&relative, name);

        fs::create_dir_all(&paths.dir).map_err(|e| {
            CoreError::RegistryInsertFailed(format!(
                "cannot create '{}': {e}",
                paths.dir.display()
            ))
        })?;

        if paths.visible.exists() || paths.pending.exists() || paths.sidecar.exists() {
            return Err(CoreError::RegistryInsertFailed(format!(
                "entry '{name}' already exists"
            )));
        }

        let content = paths.content(descriptor.pending);
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(content)
            .map_err(|e| {
                CoreError::RegistryInsertFailed(format!(
                    "cannot create '{}': {e}",
                    content.display()
                ))
            })?;

        let mut stored = descriptor.clone();
        stored.relative_path = (!relative.is_empty()).then(|| relative.clone());
        if let Err(e) = write_descriptor(&paths.sidecar, &stored) {
            let _ = fs::remove_file(content);
            return Err(CoreError::RegistryInsertFailed(e.to_string()));
        }

        let handle = build_handle(&relative, name);
        debug!("Created gallery entry {} (pending: {})", handle, descriptor.pending);
        Ok(handle)
    }

    fn open_write_stream(&self, handle: &MediaHandle) -> io::Result<Box<dyn Write + Send>> {
        let path = self
            .content_path(handle)
            .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e.to_string()))?;
        let file = OpenOptions::new().write(true).truncate(true).open(path)?;
        Ok(Box::new(file))
    }

    fn update_entry(&self, handle: &MediaHandle, update: &EntryUpdate) -> CoreResult<()> {
        let (relative, name) = parse_handle(handle)?;
        let paths = self.paths(&relative, &name);
        let mut descriptor = read_descriptor(&paths.sidecar, handle)?;

        let was_pending = descriptor.pending;
        descriptor.apply(update);
        if was_pending != descriptor.pending {
            fs::rename(paths.content(was_pending), paths.content(descriptor.pending))?;
            debug!(
                "Entry {} is now {}",
                handle,
                if descriptor.pending { "pending" } else { "visible" }
            );
        }

        write_descriptor(&paths.sidecar, &descriptor)
    }

    fn delete_entry(&self, handle: &MediaHandle) -> CoreResult<()> {
        let (relative, name) = parse_handle(handle)?;
        let paths = self.paths(&relative, &name);

        let mut removed = false;
        for path in [&paths.visible, &paths.pending, &paths.sidecar] {
            match fs::remove_file(path) {
                Ok(()) => removed = true,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        if removed {
            debug!("Deleted gallery entry {}", handle);
            Ok(())
        } else {
            Err(CoreError::EntryNotFound(handle.to_string()))
        }
    }

    fn entry(&self, handle: &MediaHandle) -> CoreResult<MediaEntry> {
        let (relative, name) = parse_handle(handle)?;
        let paths = self.paths(&relative, &name);
        let descriptor = read_descriptor(&paths.sidecar, handle)?;
        let size = fs::metadata(paths.content(descriptor.pending))?.len();
        Ok(MediaEntry {
            handle: handle.clone(),
            descriptor,
            size,
        })
    }

    fn list_entries(&self) -> CoreResult<Vec<MediaEntry>> {
        let mut sidecars = Vec::new();
        collect_sidecars(&self.root, &mut sidecars)?;

        let mut entries = Vec::new();
        for (dir, sidecar) in sidecars {
            match self.load(&sidecar, &dir) {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => {}
                Err(e) => warn!("Skipping unreadable entry '{}': {}", sidecar.display(), e),
            }
        }

        entries.sort_by(|a, b| {
            a.descriptor
                .display_name
                .cmp(&b.descriptor.display_name)
                .then_with(|| a.handle.cmp(&b.handle))
        });
        Ok(entries)
    }
}

fn build_handle(relative: &str, name: &str) -> MediaHandle {
    if relative.is_empty() {
        MediaHandle::new(format!("{FS_HANDLE_SCHEME}{name}"))
    } else {
        MediaHandle::new(format!("{FS_HANDLE_SCHEME}{relative}/{name}"))
    }
}

fn parse_handle(handle: &MediaHandle) -> CoreResult<(String, String)> {
    let not_found = || CoreError::EntryNotFound(handle.to_string());
    let path = handle.as_str().strip_prefix(FS_HANDLE_SCHEME).ok_or_else(not_found)?;
    let (relative, name) = path.rsplit_once('/').unwrap_or(("", path));
    validate_name(name).map_err(|_| not_found())?;
    let relative = normalize_relative(Some(relative)).map_err(|_| not_found())?;
    Ok((relative, name.to_string()))
}

fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.ends_with(SIDECAR_SUFFIX)
    {
        return Err(format!("invalid display name '{name}'"));
    }
    Ok(())
}

/// Collapses a storage hint into `a/b/c` form, rejecting anything that could
/// escape the gallery root.
fn normalize_relative(relative: Option<&str>) -> Result<String, String> {
    let Some(relative) = relative else {
        return Ok(String::new());
    };
    let mut parts = Vec::new();
    for part in relative.split(['/', '\\']).filter(|p| !p.is_empty()) {
        if part == "." || part == ".." || part.starts_with('.') {
            return Err(format!("invalid relative path '{relative}'"));
        }
        parts.push(part);
    }
    Ok(parts.join("/"))
}

/// Maps `.<name>.json` back to `<name>`.
///
/// Pending content files never end in the sidecar suffix (display names
/// ending in `.json` are refused), so a display name that itself starts with
/// `pending-` still resolves to its sidecar.
fn sidecar_entry_name(file_name: Option<&OsStr>) -> Option<String> {
    let name = file_name?
        .to_str()?
        .strip_suffix(SIDECAR_SUFFIX)?
        .strip_prefix('.')?;
    validate_name(name).ok()?;
    Some(name.to_string())
}

fn collect_sidecars(dir: &Path, out: &mut Vec<(PathBuf, PathBuf)>) -> CoreResult<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let path = entry.path();
        if file_type.is_dir() {
            collect_sidecars(&path, out)?;
        } else if file_type.is_file() && sidecar_entry_name(path.file_name()).is_some() {
            out.push((dir.to_path_buf(), path));
        }
    }
    Ok(())
}

fn read_descriptor(sidecar: &Path, handle: &MediaHandle) -> CoreResult<MediaEntryDescriptor> {
    let raw = match fs::read(sidecar) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(CoreError::EntryNotFound(handle.to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_slice(&raw)?)
}

fn write_descriptor(sidecar: &Path, descriptor: &MediaEntryDescriptor) -> CoreResult<()> {
    let raw = serde_json::to_vec_pretty(descriptor)?;
    write_atomically(sidecar, &raw)
}
