//! Per-kind row styles.
//!
//! Colors are stored as strings (e.g. `"blue"`, `"#ff5500"`) and converted
//! to [`ratatui::style::Color`] at render time via [`parse_color`]. The tree
//! engine never interprets these; it only hands the style for a row's
//! [`Kind`] to the host.

use std::path::Path;

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::tree::kind::Kind;

/// One style per entry kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindTheme {
    #[serde(default = "default_file")]
    pub file: KindStyle,
    #[serde(default = "default_directory")]
    pub directory: KindStyle,
    #[serde(default = "default_image")]
    pub image: KindStyle,
    #[serde(default = "default_archive")]
    pub archive: KindStyle,
    #[serde(default = "default_symlink")]
    pub symlink: KindStyle,
    #[serde(default = "default_broken_symlink")]
    pub broken_symlink: KindStyle,
    #[serde(default = "default_device")]
    pub device: KindStyle,
    #[serde(default = "default_executable")]
    pub executable: KindStyle,
}

impl Default for KindTheme {
    fn default() -> Self {
        Self {
            file: default_file(),
            directory: default_directory(),
            image: default_image(),
            archive: default_archive(),
            symlink: default_symlink(),
            broken_symlink: default_broken_symlink(),
            device: default_device(),
            executable: default_executable(),
        }
    }
}

impl KindTheme {
    /// Loads a theme from a TOML file at `path`.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CoreError::from_io(e, path))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Returns the style registered for `kind`.
    pub fn style_for(&self, kind: Kind) -> &KindStyle {
        match kind {
            Kind::File => &self.file,
            Kind::Directory => &self.directory,
            Kind::Image => &self.image,
            Kind::Archive => &self.archive,
            Kind::SymLink => &self.symlink,
            Kind::BrokenSymLink => &self.broken_symlink,
            Kind::Device => &self.device,
            Kind::Executable => &self.executable,
        }
    }
}

/// Foreground/background colors plus a bold flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindStyle {
    #[serde(default = "default_reset")]
    pub fg: String,
    #[serde(default = "default_reset")]
    pub bg: String,
    #[serde(default)]
    pub bold: bool,
}

impl KindStyle {
    fn new(fg: &str, bg: &str, bold: bool) -> Self {
        Self {
            fg: fg.to_string(),
            bg: bg.to_string(),
            bold,
        }
    }

    /// Converts into a ratatui [`Style`].
    pub fn to_style(&self) -> Style {
        let mut style = Style::default()
            .fg(parse_color(&self.fg))
            .bg(parse_color(&self.bg));
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }
}

fn default_reset() -> String {
    "reset".to_string()
}

fn default_file() -> KindStyle {
    KindStyle::new("gray", "reset", false)
}

fn default_directory() -> KindStyle {
    KindStyle::new("light_blue", "reset", true)
}

fn default_image() -> KindStyle {
    KindStyle::new("magenta", "reset", false)
}

fn default_archive() -> KindStyle {
    KindStyle::new("light_red", "reset", false)
}

fn default_symlink() -> KindStyle {
    KindStyle::new("light_cyan", "reset", false)
}

fn default_broken_symlink() -> KindStyle {
    KindStyle::new("red", "reset", false)
}

fn default_device() -> KindStyle {
    KindStyle::new("light_yellow", "black", false)
}

fn default_executable() -> KindStyle {
    KindStyle::new("light_green", "reset", false)
}

/// Parses a color string into a `ratatui::style::Color`.
///
/// Supports named colors (`"blue"`, `"dark_gray"`) and hex (`"#rrggbb"`).
/// Returns `Color::Reset` for unrecognised values.
pub fn parse_color(s: &str) -> Color {
    match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => Color::DarkGray,
        "light_red" | "lightred" => Color::LightRed,
        "light_green" | "lightgreen" => Color::LightGreen,
        "light_yellow" | "lightyellow" => Color::LightYellow,
        "light_blue" | "lightblue" => Color::LightBlue,
        "light_magenta" | "lightmagenta" => Color::LightMagenta,
        "light_cyan" | "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "reset" => Color::Reset,
        hex if hex.starts_with('#') && hex.len() == 7 => {
            let r = u8::from_str_radix(&hex[1..3], 16).unwrap_or(0);
            let g = u8::from_str_radix(&hex[3..5], 16).unwrap_or(0);
            let b = u8::from_str_radix(&hex[5..7], 16).unwrap_or(0);
            Color::Rgb(r, g, b)
        }
        _ => Color::Reset,
    }
}
