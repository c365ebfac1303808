//! Navigation resolution entry points.
//!
//! Given a selection in a document this module:
//!   1. Reads the selection text and its prefix character.
//!   2. Classifies it: `.` / `>` prefix means member access, anything else
//!      means a file reference.
//!   3. Member access — searches for the method declaration through the
//!      document's `extends` chain.
//!   4. File reference — searches the workspace for a file named after the
//!      selection, carrying over the current document's extension.
//!   5. Returns an LSP `Location` the client can jump to, or `None` when
//!      nothing resolved. A prefixed selection never falls back to file
//!      resolution and a bare one never falls back to method resolution.

use tower_lsp::lsp_types::*;

use crate::types::{NavigationKind, Selection};
use crate::{Backend, path_to_url, uri_to_path};

impl Backend {
    /// Resolve the selection at `range` in `uri` to a navigation target.
    ///
    /// Returns `None` when the selection is declined (multi-line, empty)
    /// or nothing matches.
    pub fn resolve_navigation(&self, uri: &str, content: &str, range: Range) -> Option<Location> {
        let selection = Self::selection_from_range(content, range)?;
        self.resolve_selection(uri, content, &selection)
    }

    /// Resolve the word under `position` in `uri` to a navigation target.
    pub fn resolve_at_position(
        &self,
        uri: &str,
        content: &str,
        position: Position,
    ) -> Option<Location> {
        let selection = Self::selection_at_position(content, position)?;
        self.resolve_selection(uri, content, &selection)
    }

    pub(crate) fn resolve_selection(
        &self,
        uri: &str,
        content: &str,
        selection: &Selection,
    ) -> Option<Location> {
        match selection.kind() {
            NavigationKind::Method => self.resolve_method(&selection.text, uri, content),
            NavigationKind::File => self.resolve_file(uri, &selection.text),
        }
    }

    /// Find the workspace file named after `name`, using the current
    /// document's extension, and point at its first line.
    fn resolve_file(&self, uri: &str, name: &str) -> Option<Location> {
        let extension = uri_to_path(uri)
            .and_then(|p| p.extension().map(|e| e.to_string_lossy().into_owned()));
        let target = match extension {
            Some(ext) => format!("{}.{}", name, ext),
            None => name.to_string(),
        };

        let path = self.find_file(&target)?;
        let url = path_to_url(&path)?;
        let start = Position {
            line: 0,
            character: 0,
        };
        Some(Location {
            uri: url,
            range: Range { start, end: start },
        })
    }
}
