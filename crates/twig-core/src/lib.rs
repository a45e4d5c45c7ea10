//! twig core library — UI-agnostic tree view logic.
//!
//! `twig-core` maintains a collapsible, preorder-flattened view of a
//! filesystem subtree and mirrors it into a line buffer owned by the host.
//! It never draws anything and never opens files itself; the host supplies
//! a [`LineBuffer`], a [`Navigator`] and forwards events through
//! [`TreeEvents`].
//!
//! # Modules
//!
//! - [`tree`] — Classifier, comparator, entry store, row renderer and the [`TreeView`] engine.
//! - [`fs`] — The [`Filesystem`] trait and its `std::fs` implementation [`LocalFs`].
//! - [`buffer`] — The [`LineBuffer`] trait and the in-memory [`VecBuffer`].
//! - [`config`] — TOML-based settings and per-kind styles.
//! - [`event`] — Host hooks: [`TreeEvents`], [`Navigator`], [`RowStyle`].
//! - [`error`] — Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod buffer;
pub mod config;
pub mod error;
pub mod event;
pub mod fs;
pub mod tree;

pub use buffer::{LineBuffer, VecBuffer};
pub use config::settings::{Config, ConnectorGlyphs, TreeConfig};
pub use config::theme::{parse_color, KindStyle, KindTheme};
pub use error::{CoreError, CoreResult};
pub use event::{Navigator, RowStyle, TreeEvents};
pub use fs::ops::read_directory;
pub use fs::{DirEntry, EntryMetadata, EntryType, Filesystem, LocalFs};
pub use tree::kind::{Classifier, Kind};
pub use tree::render::{RenderedRow, RowRenderer};
pub use tree::store::{Entry, EntryId, EntryStore};
pub use tree::view::TreeView;
