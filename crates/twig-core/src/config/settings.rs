//! Application configuration loaded from a TOML file.
//!
//! The default configuration matches the values shown in `config/default.toml`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::theme::KindTheme;
use crate::error::{CoreError, CoreResult};

/// Top-level application configuration.
///
/// All fields have sensible defaults so twig works without a config file.
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tree: TreeConfig,
    #[serde(default)]
    pub theme: KindTheme,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CoreError::from_io(e, path))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// Settings read by the tree engine at the start of every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Entries whose name contains any of these substrings are never shown.
    #[serde(default)]
    pub hidden_items: Vec<String>,
    /// Name suffixes classified as archives (matched case-sensitively).
    #[serde(default = "default_archive_extensions")]
    pub archive_extensions: Vec<String>,
    /// Name suffixes classified as images (matched case-sensitively).
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,
    /// Columns per indentation level, at least 1.
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    #[serde(default)]
    pub glyphs: ConnectorGlyphs,
    /// Seconds between periodic refreshes; `0` disables polling.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            hidden_items: Vec::new(),
            archive_extensions: default_archive_extensions(),
            image_extensions: default_image_extensions(),
            indent_width: default_indent_width(),
            glyphs: ConnectorGlyphs::default(),
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

impl TreeConfig {
    /// Splits a space-separated hidden-item list, dropping empty tokens.
    ///
    /// ```
    /// use twig_core::config::settings::TreeConfig;
    ///
    /// let items = TreeConfig::parse_hidden_items(".git  target ");
    /// assert_eq!(items, vec![".git".to_string(), "target".to_string()]);
    /// ```
    pub fn parse_hidden_items(raw: &str) -> Vec<String> {
        raw.split_whitespace().map(str::to_string).collect()
    }

    /// Returns a copy with `indent_width` clamped to at least 1 and empty
    /// hidden substrings removed (an empty pattern would hide everything).
    pub fn normalized(&self) -> Self {
        let mut cfg = self.clone();
        cfg.indent_width = cfg.indent_width.max(1);
        cfg.hidden_items.retain(|s| !s.is_empty());
        cfg
    }

    /// Returns `true` if `name` contains any configured hidden substring.
    pub fn is_hidden(&self, name: &str) -> bool {
        self.hidden_items
            .iter()
            .any(|pat| !pat.is_empty() && name.contains(pat.as_str()))
    }
}

/// Box-drawing glyphs used to build each row's structural prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorGlyphs {
    #[serde(default = "default_continuation")]
    pub continuation: String,
    #[serde(default = "default_corner")]
    pub corner: String,
    #[serde(default = "default_tee")]
    pub tee: String,
}

impl Default for ConnectorGlyphs {
    fn default() -> Self {
        Self {
            continuation: default_continuation(),
            corner: default_corner(),
            tee: default_tee(),
        }
    }
}

fn default_archive_extensions() -> Vec<String> {
    [".zip", ".tar", ".gz", ".tgz", ".bz2", ".xz", ".7z", ".rar"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_image_extensions() -> Vec<String> {
    [".png", ".jpg", ".jpeg", ".gif", ".bmp", ".svg", ".webp", ".ico"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_indent_width() -> usize {
    4
}

fn default_refresh_interval() -> u64 {
    5
}

fn default_continuation() -> String {
    "│".to_string()
}

fn default_corner() -> String {
    "└".to_string()
}

fn default_tee() -> String {
    "├".to_string()
}
