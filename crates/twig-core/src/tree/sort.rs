//! Sibling ordering.

use std::cmp::Ordering;

/// Precomputed, immutable sort key for one sibling.
///
/// The lowercase name is built once per entry so the comparator itself is
/// pure and allocation-free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    is_dir: bool,
    lower_name: String,
}

impl SortKey {
    pub fn new(name: &str, is_dir: bool) -> Self {
        Self {
            is_dir,
            lower_name: name.to_lowercase(),
        }
    }
}

/// Directories first, then lowercase names compared bytewise.
pub fn compare(a: &SortKey, b: &SortKey) -> Ordering {
    b.is_dir
        .cmp(&a.is_dir)
        .then_with(|| a.lower_name.as_bytes().cmp(b.lower_name.as_bytes()))
}

/// Stable-sorts `items` by the key `key_of` extracts; equal keys keep
/// their original (scan) order.
pub fn sort_siblings<T, F>(items: &mut [T], key_of: F)
where
    F: Fn(&T) -> &SortKey,
{
    items.sort_by(|a, b| compare(key_of(a), key_of(b)));
}
