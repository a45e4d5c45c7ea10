//! File system abstractions for twig.
//!
//! The tree engine reaches the disk only through the [`Filesystem`] trait.
//! [`ops::LocalFs`] is the `std::fs` implementation; tests substitute
//! their own to inject failures.

pub mod entry;
pub mod ops;

use std::path::Path;

use crate::error::CoreResult;

pub use entry::{DirEntry, EntryMetadata, EntryType};
pub use ops::LocalFs;

/// Filesystem capabilities consumed by the tree engine.
pub trait Filesystem {
    /// Lists the immediate children of `path`, excluding `.` and `..`.
    fn list_directory(&self, path: &Path) -> CoreResult<Vec<DirEntry>>;

    /// Returns `lstat`-style metadata for `path`.
    fn stat(&self, path: &Path) -> CoreResult<EntryMetadata>;

    /// Opens `path` (following links) and immediately closes it.
    ///
    /// Used only to tell live symbolic links from broken ones.
    fn open_for_read(&self, path: &Path) -> CoreResult<()>;
}

impl<F: Filesystem + ?Sized> Filesystem for &F {
    fn list_directory(&self, path: &Path) -> CoreResult<Vec<DirEntry>> {
        (**self).list_directory(path)
    }

    fn stat(&self, path: &Path) -> CoreResult<EntryMetadata> {
        (**self).stat(path)
    }

    fn open_for_read(&self, path: &Path) -> CoreResult<()> {
        (**self).open_for_read(path)
    }
}
