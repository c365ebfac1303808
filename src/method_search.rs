//! Method location across an `extends` chain.
//!
//! Resolution is textual by contract: the document is scanned line by line
//! for a `function <name>` declaration, and when the current document has
//! none, the search moves to the parent named by the first `extends` clause
//! and tries again. The chain walk is an iterative worklist with a
//! visited set keyed by canonical document identity, so circular or
//! self-referential `extends` chains terminate with "not found" instead of
//! recursing forever. The first document in chain order that declares the
//! method settles the whole search.
//!
//! When the same document declares the method on several lines, the last
//! declaration wins.

use std::collections::HashSet;

use tower_lsp::lsp_types::*;

use crate::{Backend, canonical_key, path_to_url, uri_to_path};

impl Backend {
    /// Scan `content` for a line declaring `function <name>` and return the
    /// zero-based line number of the last such declaration.
    ///
    /// The name must end at a non-word character, so searching for `run`
    /// does not hit `function runFast`. Line 0 is a valid result.
    pub fn find_method_line(content: &str, name: &str) -> Option<u32> {
        let mut matched_line = None;
        for (index, line) in content.lines().enumerate() {
            if Self::declares_function(line, name) {
                matched_line = Some(index as u32);
            }
        }
        matched_line
    }

    fn declares_function(line: &str, name: &str) -> bool {
        let needle = format!("function {}", name);
        let mut search_from = 0;
        while let Some(found) = line[search_from..].find(&needle) {
            let end = search_from + found + needle.len();
            let boundary = line[end..]
                .chars()
                .next()
                .is_none_or(|c| !c.is_alphanumeric() && c != '_');
            if boundary {
                return true;
            }
            search_from = end;
        }
        false
    }

    /// Extract the parent type name from the first `extends` clause in
    /// `content`: the first identifier after the keyword, so trailing
    /// `implements ...` lists and `{` braces are ignored.
    pub fn parent_class_name(content: &str) -> Option<String> {
        for line in content.lines() {
            let Some(pos) = line.find("extends") else {
                continue;
            };
            let rest = line[pos + "extends".len()..].trim_start();
            let name: String = rest
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            if !name.is_empty() {
                return Some(name);
            }
        }
        None
    }

    /// Walk the `extends` chain starting at `start_uri` and return the
    /// location of the method declaration, or `None` when the whole chain
    /// has been searched without a match.
    ///
    /// Parent documents are fetched through the open-files map first (the
    /// client may hold unsaved edits) and loaded from disk otherwise, with
    /// the parent's file found by base name in the workspace. The file
    /// extension follows the chain: each parent is expected to use the same
    /// extension as the document that named it.
    pub fn resolve_method(
        &self,
        name: &str,
        start_uri: &str,
        start_content: &str,
    ) -> Option<Location> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut current = Some((start_uri.to_string(), start_content.to_string()));

        while let Some((uri, content)) = current.take() {
            if !visited.insert(canonical_key(&uri)) {
                tracing::debug!(uri, "circular extends chain, giving up");
                break;
            }

            if let Some(line) = Self::find_method_line(&content, name) {
                let url = Url::parse(&uri).ok()?;
                let position = Position { line, character: 0 };
                return Some(Location {
                    uri: url,
                    range: Range {
                        start: position,
                        end: position,
                    },
                });
            }

            current = self.load_parent_document(&uri, &content);
        }

        None
    }

    /// Resolve the parent named by `content`'s `extends` clause to a
    /// (URI, text) pair, or `None` when there is no parent or its file
    /// cannot be found.
    fn load_parent_document(&self, uri: &str, content: &str) -> Option<(String, String)> {
        let parent_name = Self::parent_class_name(content)?;

        let extension = uri_to_path(uri)
            .and_then(|p| p.extension().map(|e| e.to_string_lossy().into_owned()));
        let target = match extension {
            Some(ext) => format!("{}.{}", parent_name, ext),
            None => parent_name.clone(),
        };

        let path = self.find_file(&target)?;
        let parent_uri = path_to_url(&path)?.to_string();
        let text = self.document_text(&parent_uri)?;

        tracing::debug!(parent = %parent_name, uri = %parent_uri, "following extends chain");
        Some((parent_uri, text))
    }
}
