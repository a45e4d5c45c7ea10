//! Listed directory entries and the metadata the classifier needs.

use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

/// File type as reported by `lstat` (links are not followed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    Directory,
    Symlink,
    BlockDevice,
    CharDevice,
    Regular,
    /// FIFOs, sockets and anything else.
    Other,
}

/// The subset of `lstat` output used for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMetadata {
    entry_type: EntryType,
    owner_exec: bool,
}

impl EntryMetadata {
    pub fn new(entry_type: EntryType, owner_exec: bool) -> Self {
        Self {
            entry_type,
            owner_exec,
        }
    }

    /// Builds metadata from `std::fs::symlink_metadata` output.
    pub fn from_std(metadata: &std::fs::Metadata) -> Self {
        let ft = metadata.file_type();
        let entry_type = if ft.is_dir() {
            EntryType::Directory
        } else if ft.is_symlink() {
            EntryType::Symlink
        } else if ft.is_file() {
            EntryType::Regular
        } else {
            special_type(&ft)
        };
        Self {
            entry_type,
            owner_exec: owner_exec_bit(metadata),
        }
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    /// Returns `true` if the owner-execute permission bit is set.
    pub fn owner_exec(&self) -> bool {
        self.owner_exec
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }
}

#[cfg(unix)]
fn special_type(ft: &std::fs::FileType) -> EntryType {
    use std::os::unix::fs::FileTypeExt;

    if ft.is_block_device() {
        EntryType::BlockDevice
    } else if ft.is_char_device() {
        EntryType::CharDevice
    } else {
        EntryType::Other
    }
}

#[cfg(not(unix))]
fn special_type(_ft: &std::fs::FileType) -> EntryType {
    EntryType::Other
}

#[cfg(unix)]
fn owner_exec_bit(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;

    metadata.permissions().mode() & 0o100 != 0
}

#[cfg(not(unix))]
fn owner_exec_bit(_metadata: &std::fs::Metadata) -> bool {
    false
}

/// One immediate child returned by a directory listing.
///
/// `metadata` is `None` when the per-entry `lstat` failed; the entry is
/// still listed and later classified as a plain file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    path: PathBuf,
    name: String,
    metadata: Option<EntryMetadata>,
}

impl DirEntry {
    /// Creates an entry for `path`, deriving an NFC-normalised display name.
    ///
    /// macOS stores filenames decomposed; the display name is re-composed
    /// while `path` keeps the on-disk bytes.
    pub fn new(path: PathBuf, metadata: Option<EntryMetadata>) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().nfc().collect::<String>())
            .unwrap_or_default();
        Self {
            path,
            name,
            metadata,
        }
    }

    /// Creates an entry with an explicit display name.
    pub fn with_name(path: PathBuf, name: String, metadata: Option<EntryMetadata>) -> Self {
        Self {
            path,
            name,
            metadata,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> Option<&EntryMetadata> {
        self.metadata.as_ref()
    }

    pub fn into_parts(self) -> (PathBuf, String, Option<EntryMetadata>) {
        (self.path, self.name, self.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn metadata_from_regular_file() {
        let tmp = TempDir::new().unwrap();
        let file_path = tmp.path().join("test.txt");
        fs::write(&file_path, "hello").unwrap();

        let meta = EntryMetadata::from_std(&fs::symlink_metadata(&file_path).unwrap());
        assert_eq!(meta.entry_type(), EntryType::Regular);
        assert!(!meta.is_dir());
    }

    #[test]
    fn metadata_from_directory() {
        let tmp = TempDir::new().unwrap();
        let meta = EntryMetadata::from_std(&fs::symlink_metadata(tmp.path()).unwrap());
        assert_eq!(meta.entry_type(), EntryType::Directory);
        assert!(meta.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn metadata_symlink_is_not_followed() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("dir");
        fs::create_dir(&target).unwrap();
        let link = tmp.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let meta = EntryMetadata::from_std(&fs::symlink_metadata(&link).unwrap());
        assert_eq!(meta.entry_type(), EntryType::Symlink);
    }

    #[cfg(unix)]
    #[test]
    fn metadata_owner_exec_bit() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let script = tmp.path().join("run.sh");
        fs::write(&script, "#!/bin/sh\n").unwrap();

        fs::set_permissions(&script, fs::Permissions::from_mode(0o644)).unwrap();
        let meta = EntryMetadata::from_std(&fs::symlink_metadata(&script).unwrap());
        assert!(!meta.owner_exec());

        fs::set_permissions(&script, fs::Permissions::from_mode(0o744)).unwrap();
        let meta = EntryMetadata::from_std(&fs::symlink_metadata(&script).unwrap());
        assert!(meta.owner_exec());
    }

    #[cfg(unix)]
    #[test]
    fn metadata_char_device() {
        let meta = EntryMetadata::from_std(&fs::symlink_metadata("/dev/null").unwrap());
        assert_eq!(meta.entry_type(), EntryType::CharDevice);
    }

    #[test]
    fn dir_entry_name_from_path() {
        let entry = DirEntry::new(PathBuf::from("/a/b/c.txt"), None);
        assert_eq!(entry.name(), "c.txt");
        assert_eq!(entry.path(), Path::new("/a/b/c.txt"));
        assert!(entry.metadata().is_none());
    }

    #[test]
    fn dir_entry_name_is_nfc() {
        // "한" decomposed into conjoining jamo
        let decomposed = "\u{1112}\u{1161}\u{11ab}.txt";
        let entry = DirEntry::new(PathBuf::from(decomposed), None);
        assert_eq!(entry.name(), "한.txt");
    }

    #[test]
    fn dir_entry_into_parts() {
        let meta = EntryMetadata::new(EntryType::Regular, true);
        let entry = DirEntry::with_name(PathBuf::from("x"), "shown".to_string(), Some(meta));
        let (path, name, metadata) = entry.into_parts();
        assert_eq!(path, PathBuf::from("x"));
        assert_eq!(name, "shown");
        assert_eq!(metadata, Some(meta));
    }
}
