//! Selection reading.
//!
//! Turns an LSP range or cursor position into a [`Selection`]: the selected
//! text plus the character immediately before it. Multi-line ranges are
//! declined outright — navigation only ever acts on a single identifier.

use tower_lsp::lsp_types::*;

use crate::Backend;
use crate::types::Selection;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl Backend {
    /// Build a [`Selection`] from an explicit range.
    ///
    /// Returns `None` when the range spans multiple lines, lies outside the
    /// document, or covers no word. An empty range expands to the word under
    /// the cursor, mirroring an editor's select-word-at-cursor fallback.
    pub fn selection_from_range(content: &str, range: Range) -> Option<Selection> {
        if range.start.line != range.end.line {
            return None;
        }

        if range.start == range.end {
            return Self::selection_at_position(content, range.start);
        }

        let line = content.lines().nth(range.start.line as usize)?;
        let chars: Vec<char> = line.chars().collect();

        let start = range.start.character as usize;
        let end = (range.end.character as usize).min(chars.len());
        if start >= end {
            return None;
        }

        let text: String = chars[start..end].iter().collect();
        if text.trim().is_empty() {
            return None;
        }

        let prefix = if start > 0 { Some(chars[start - 1]) } else { None };

        Some(Selection { text, prefix })
    }

    /// Build a [`Selection`] from the word under the cursor.
    ///
    /// The word boundaries are alphanumerics plus `_`; the prefix is the
    /// character immediately before the word start.
    pub fn selection_at_position(content: &str, position: Position) -> Option<Selection> {
        let line = content.lines().nth(position.line as usize)?;
        let chars: Vec<char> = line.chars().collect();

        let pos = (position.character as usize).min(chars.len());

        let mut start = pos;
        while start > 0 && is_word_char(chars[start - 1]) {
            start -= 1;
        }

        let mut end = pos;
        while end < chars.len() && is_word_char(chars[end]) {
            end += 1;
        }

        if start >= end {
            return None;
        }

        let text: String = chars[start..end].iter().collect();
        let prefix = if start > 0 { Some(chars[start - 1]) } else { None };

        Some(Selection { text, prefix })
    }
}
