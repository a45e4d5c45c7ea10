//! Directory reading against the local disk.

use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::{DirEntry, EntryMetadata};
use crate::fs::Filesystem;

/// Reads the immediate contents of a directory.
///
/// The returned entries are **unsorted** and unfiltered. An entry whose
/// `lstat` fails is still returned, with no metadata. `.` and `..` are
/// never included.
///
/// # Errors
///
/// - [`CoreError::NotFound`] — the path does not exist.
/// - [`CoreError::NotADirectory`] — the path is not a directory.
/// - [`CoreError::PermissionDenied`] — read access is denied.
/// - [`CoreError::Io`] — any other I/O error.
///
/// # Examples
///
/// ```no_run
/// use twig_core::read_directory;
/// use std::path::Path;
///
/// let entries = read_directory(Path::new("/home/user")).unwrap();
/// for entry in &entries {
///     println!("{}", entry.name());
/// }
/// ```
pub fn read_directory(path: &Path) -> CoreResult<Vec<DirEntry>> {
    let meta = std::fs::metadata(path).map_err(|e| CoreError::from_io(e, path))?;
    if !meta.is_dir() {
        return Err(CoreError::NotADirectory(path.to_path_buf()));
    }

    let read_dir = std::fs::read_dir(path).map_err(|e| CoreError::from_io(e, path))?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("skipping unreadable entry in {}: {e}", path.display());
                continue;
            }
        };
        let entry_path = dir_entry.path();
        let metadata = std::fs::symlink_metadata(&entry_path)
            .map(|m| EntryMetadata::from_std(&m))
            .ok();
        entries.push(DirEntry::new(entry_path, metadata));
    }

    Ok(entries)
}

/// [`Filesystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Filesystem for LocalFs {
    fn list_directory(&self, path: &Path) -> CoreResult<Vec<DirEntry>> {
        read_directory(path)
    }

    fn stat(&self, path: &Path) -> CoreResult<EntryMetadata> {
        std::fs::symlink_metadata(path)
            .map(|m| EntryMetadata::from_std(&m))
            .map_err(|e| CoreError::from_io(e, path))
    }

    fn open_for_read(&self, path: &Path) -> CoreResult<()> {
        std::fs::File::open(path)
            .map(drop)
            .map_err(|e| CoreError::from_io(e, path))
    }
}
