//! The tree synchronization engine.
//!
//! - [`kind`] — classification of listed entries into a [`kind::Kind`].
//! - [`sort`] — sibling ordering (directories first, case-insensitive names).
//! - [`store`] — the flattened preorder [`store::EntryStore`].
//! - [`render`] — connector prefixes and styling columns.
//! - [`view`] — [`view::TreeView`]: expand, collapse, select, refresh.

pub mod kind;
pub mod render;
pub mod sort;
pub mod store;
pub mod view;
