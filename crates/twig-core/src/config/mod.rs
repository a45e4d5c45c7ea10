//! Configuration management for twig.
//!
//! Tree settings ([`settings::TreeConfig`]) and per-kind styles
//! ([`theme::KindTheme`]) are stored as TOML and loaded at startup.

pub mod settings;
pub mod theme;
