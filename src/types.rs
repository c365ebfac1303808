//! Data types used throughout the codeintel-lsp server.

use serde::Deserialize;
use tower_lsp::lsp_types::*;

/// A single-line selection together with the character immediately
/// preceding it. The prefix disambiguates member access (`.` / `>`)
/// from a bare identifier naming a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The selected text (or the word under the cursor when the
    /// selection was empty).
    pub text: String,
    /// The character immediately before the selection start, or `None`
    /// at the start of a line.
    pub prefix: Option<char>,
}

/// How a selection should be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// Prefixed by `.` or `>` — a member access; resolve a method
    /// declaration through the `extends` chain.
    Method,
    /// Anything else — resolve a workspace file by base name.
    File,
}

impl Selection {
    pub fn kind(&self) -> NavigationKind {
        match self.prefix {
            Some('.') | Some('>') => NavigationKind::Method,
            _ => NavigationKind::File,
        }
    }
}

/// Arguments for the `codeintel.navigate` command.
#[derive(Debug, Deserialize)]
pub struct NavigateParams {
    /// The document the selection lives in.
    pub uri: Url,
    /// The selection range. An empty range means "use the word under
    /// the cursor".
    pub range: Range,
}
