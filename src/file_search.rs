//! Workspace file location.
//!
//! Finds the file matching a target file name anywhere under the workspace
//! root. Traversal uses the `ignore` walker, so ignore rules and hidden
//! directories are skipped the same way the rest of the tooling skips them.
//!
//! File names compare case-insensitively. The result is deterministic
//! regardless of directory enumeration order: the shallowest match wins,
//! with ties broken lexicographically by full path.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::Backend;

impl Backend {
    /// Find `file_name` under the configured workspace root.
    pub(crate) fn find_file(&self, file_name: &str) -> Option<PathBuf> {
        let root = self.workspace_root()?;
        Self::find_file_under(&root, file_name)
    }

    /// Find `file_name` (compared case-insensitively) under `root`,
    /// preferring the shallowest path and then the lexicographically
    /// smallest one.
    pub fn find_file_under(root: &Path, file_name: &str) -> Option<PathBuf> {
        let target = file_name.to_lowercase();
        let mut best: Option<(usize, PathBuf)> = None;

        for entry in WalkBuilder::new(root).build().flatten() {
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            if entry.file_name().to_string_lossy().to_lowercase() != target {
                continue;
            }

            let depth = entry.depth();
            let path = entry.into_path();
            let better = match &best {
                None => true,
                Some((best_depth, best_path)) => {
                    depth < *best_depth || (depth == *best_depth && path < *best_path)
                }
            };
            if better {
                best = Some((depth, path));
            }
        }

        if let Some((_, ref path)) = best {
            tracing::debug!(file = %path.display(), "matched workspace file");
        }
        best.map(|(_, path)| path)
    }
}
