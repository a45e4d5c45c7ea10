//! Row text and structural prefix.

use crate::config::settings::ConnectorGlyphs;

/// Text for one buffer line plus the column where its name begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub text: String,
    /// 1-based column of the first name character. Columns before it are
    /// structural glyphs and are never styled by kind.
    pub prefix_width: usize,
}

/// Builds indentation and connector prefixes.
#[derive(Debug, Clone)]
pub struct RowRenderer {
    indent_width: usize,
    glyphs: ConnectorGlyphs,
}

impl RowRenderer {
    /// `indent_width` is clamped to at least 1.
    pub fn new(indent_width: usize, glyphs: ConnectorGlyphs) -> Self {
        Self {
            indent_width: indent_width.max(1),
            glyphs,
        }
    }

    /// Renders the root row: no prefix at all.
    pub fn render_root(&self, name: &str) -> RenderedRow {
        RenderedRow {
            text: name.to_string(),
            prefix_width: 1,
        }
    }

    /// Renders a non-root row at `depth` (root's children are depth 1).
    ///
    /// The prefix is `depth` units of continuation glyph plus
    /// `indent_width - 1` spaces, closed by the corner glyph for the last
    /// sibling of a block and the tee glyph otherwise.
    pub fn render(&self, name: &str, depth: usize, is_last_sibling: bool) -> RenderedRow {
        let depth = depth.max(1);
        let mut text = String::with_capacity(depth * (self.indent_width + 2) + name.len() + 4);
        for _ in 0..depth {
            text.push_str(&self.glyphs.continuation);
            text.extend(std::iter::repeat(' ').take(self.indent_width - 1));
        }
        text.push_str(if is_last_sibling {
            &self.glyphs.corner
        } else {
            &self.glyphs.tee
        });
        // glyphs may span several chars, so measure what was built
        let prefix_width = text.chars().count() + 1;
        text.push_str(name);

        RenderedRow { text, prefix_width }
    }
}
