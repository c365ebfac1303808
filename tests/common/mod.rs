#![allow(dead_code)]

use std::fs;
use std::path::Path;

use codeintel_lsp::Backend;

pub fn create_test_backend() -> Backend {
    Backend::new_test()
}

/// Helper: create a temp workspace populated with the given files, then
/// return a Backend configured with that workspace root.
pub fn create_workspace(files: &[(&str, &str)]) -> (Backend, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for (rel_path, content) in files {
        let full = dir.path().join(rel_path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("failed to create dirs");
        }
        fs::write(&full, content).expect("failed to write file");
    }

    let root = dir.path().canonicalize().expect("failed to canonicalize root");
    let backend = Backend::new_test_with_workspace(root);
    (backend, dir)
}

/// Canonical file:// URI for a file inside the workspace.
pub fn file_uri(root: &Path, rel_path: &str) -> String {
    let full = root
        .join(rel_path)
        .canonicalize()
        .expect("file should exist");
    format!("file://{}", full.display())
}
