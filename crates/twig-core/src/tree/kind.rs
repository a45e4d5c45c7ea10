//! Entry classification.

use std::fmt;

use crate::config::settings::TreeConfig;
use crate::error::CoreResult;
use crate::fs::entry::{EntryMetadata, EntryType};

/// Semantic kind of a row, used to pick its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    File,
    Directory,
    Image,
    Archive,
    SymLink,
    BrokenSymLink,
    Device,
    Executable,
}

impl Kind {
    pub fn is_dir(self) -> bool {
        self == Kind::Directory
    }

    /// Short lowercase tag, e.g. for status lines and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::File => "file",
            Kind::Directory => "directory",
            Kind::Image => "image",
            Kind::Archive => "archive",
            Kind::SymLink => "symlink",
            Kind::BrokenSymLink => "broken symlink",
            Kind::Device => "device",
            Kind::Executable => "executable",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps names and metadata to a [`Kind`] using the configured suffix lists.
///
/// Suffixes are matched case-sensitively, exactly as configured.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    archive_extensions: Vec<String>,
    image_extensions: Vec<String>,
}

impl Classifier {
    pub fn new(archive_extensions: Vec<String>, image_extensions: Vec<String>) -> Self {
        Self {
            archive_extensions,
            image_extensions,
        }
    }

    pub fn from_config(config: &TreeConfig) -> Self {
        Self::new(
            config.archive_extensions.clone(),
            config.image_extensions.clone(),
        )
    }

    /// Classifies one entry. First match wins:
    ///
    /// directory, symlink (broken when `probe_link` reports not-found),
    /// device, executable regular file, archive suffix, image suffix, file.
    ///
    /// `probe_link` is only called for symbolic links. A missing `stat`
    /// classifies as [`Kind::File`].
    pub fn classify<P>(&self, name: &str, stat: Option<&EntryMetadata>, probe_link: P) -> Kind
    where
        P: FnOnce() -> CoreResult<()>,
    {
        let Some(meta) = stat else {
            return Kind::File;
        };

        match meta.entry_type() {
            EntryType::Directory => return Kind::Directory,
            EntryType::Symlink => {
                return match probe_link() {
                    Err(e) if e.is_not_found() => Kind::BrokenSymLink,
                    _ => Kind::SymLink,
                };
            }
            EntryType::BlockDevice | EntryType::CharDevice => return Kind::Device,
            EntryType::Regular if meta.owner_exec() => return Kind::Executable,
            EntryType::Regular | EntryType::Other => {}
        }

        if has_suffix(name, &self.archive_extensions) {
            Kind::Archive
        } else if has_suffix(name, &self.image_extensions) {
            Kind::Image
        } else {
            Kind::File
        }
    }
}

fn has_suffix(name: &str, suffixes: &[String]) -> bool {
    suffixes
        .iter()
        .any(|ext| !ext.is_empty() && name.ends_with(ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use std::path::PathBuf;

    fn classifier() -> Classifier {
        Classifier::new(
            vec![".zip".to_string(), ".tar.gz".to_string()],
            vec![".png".to_string(), ".jpg".to_string()],
        )
    }

    fn regular(exec: bool) -> EntryMetadata {
        EntryMetadata::new(EntryType::Regular, exec)
    }

    fn live() -> CoreResult<()> {
        Ok(())
    }

    #[test]
    fn directory_wins_over_name() {
        let meta = EntryMetadata::new(EntryType::Directory, true);
        assert_eq!(
            classifier().classify("photos.png", Some(&meta), live),
            Kind::Directory
        );
    }

    #[test]
    fn live_symlink() {
        let meta = EntryMetadata::new(EntryType::Symlink, false);
        assert_eq!(classifier().classify("l", Some(&meta), live), Kind::SymLink);
    }

    #[test]
    fn broken_symlink_when_target_missing() {
        let meta = EntryMetadata::new(EntryType::Symlink, false);
        let kind = classifier().classify("l", Some(&meta), || {
            Err(CoreError::NotFound(PathBuf::from("l")))
        });
        assert_eq!(kind, Kind::BrokenSymLink);
    }

    #[test]
    fn symlink_with_other_error_counts_as_live() {
        let meta = EntryMetadata::new(EntryType::Symlink, false);
        let kind = classifier().classify("l", Some(&meta), || {
            Err(CoreError::PermissionDenied(PathBuf::from("l")))
        });
        assert_eq!(kind, Kind::SymLink);
    }

    #[test]
    fn probe_only_runs_for_symlinks() {
        let mut probed = false;
        let kind = classifier().classify("a.txt", Some(&regular(false)), || {
            probed = true;
            Ok(())
        });
        assert_eq!(kind, Kind::File);
        assert!(!probed);
    }

    #[test]
    fn devices() {
        let block = EntryMetadata::new(EntryType::BlockDevice, false);
        let chr = EntryMetadata::new(EntryType::CharDevice, true);
        assert_eq!(classifier().classify("sda", Some(&block), live), Kind::Device);
        assert_eq!(classifier().classify("null.zip", Some(&chr), live), Kind::Device);
    }

    #[test]
    fn executable_beats_archive_suffix() {
        assert_eq!(
            classifier().classify("run.zip", Some(&regular(true)), live),
            Kind::Executable
        );
        assert_eq!(
            classifier().classify("run.zip", Some(&regular(false)), live),
            Kind::Archive
        );
    }

    #[test]
    fn archive_beats_image() {
        let c = Classifier::new(vec![".png".to_string()], vec![".png".to_string()]);
        assert_eq!(c.classify("a.png", Some(&regular(false)), live), Kind::Archive);
    }

    #[test]
    fn image_suffix() {
        assert_eq!(
            classifier().classify("photo.png", Some(&regular(false)), live),
            Kind::Image
        );
    }

    #[test]
    fn suffix_match_is_case_sensitive() {
        assert_eq!(
            classifier().classify("photo.PNG", Some(&regular(false)), live),
            Kind::File
        );

        let upper = Classifier::new(vec![], vec![".PNG".to_string()]);
        assert_eq!(
            upper.classify("photo.PNG", Some(&regular(false)), live),
            Kind::Image
        );
    }

    #[test]
    fn multi_part_suffix() {
        assert_eq!(
            classifier().classify("src.tar.gz", Some(&regular(false)), live),
            Kind::Archive
        );
    }

    #[test]
    fn suffix_must_be_at_end() {
        assert_eq!(
            classifier().classify("a.zip.txt", Some(&regular(false)), live),
            Kind::File
        );
    }

    #[test]
    fn fifo_falls_through_to_name_rules() {
        let fifo = EntryMetadata::new(EntryType::Other, true);
        assert_eq!(classifier().classify("pipe.zip", Some(&fifo), live), Kind::Archive);
        assert_eq!(classifier().classify("pipe", Some(&fifo), live), Kind::File);
    }

    #[test]
    fn missing_stat_defaults_to_file() {
        assert_eq!(classifier().classify("run.zip", None, live), Kind::File);
    }

    #[test]
    fn from_config_uses_lists() {
        let c = Classifier::from_config(&TreeConfig::default());
        assert_eq!(c.classify("a.7z", Some(&regular(false)), live), Kind::Archive);
        assert_eq!(c.classify("a.gif", Some(&regular(false)), live), Kind::Image);
    }

    #[test]
    fn kind_display() {
        assert_eq!(Kind::BrokenSymLink.to_string(), "broken symlink");
        assert!(Kind::Directory.is_dir());
        assert!(!Kind::SymLink.is_dir());
    }
}
