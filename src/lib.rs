use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tower_lsp::Client;
use tower_lsp::lsp_types::*;

pub mod file_search;
pub mod method_search;
pub mod navigate;
pub mod selection;
mod server;
pub mod types;

/// The `workspace/executeCommand` command name for selection-driven
/// navigation. Clients bind their own key combination to this.
pub const NAVIGATE_COMMAND: &str = "codeintel.navigate";

pub struct Backend {
    name: String,
    version: String,
    /// Maps a file URI to the current text of that open document.
    open_files: Arc<Mutex<HashMap<String, String>>>,
    workspace_root: Arc<Mutex<Option<PathBuf>>>,
    client: Option<Client>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            name: "codeintel-lsp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            open_files: Arc::new(Mutex::new(HashMap::new())),
            workspace_root: Arc::new(Mutex::new(None)),
            client: Some(client),
        }
    }

    /// Backend without a connected client, for tests.
    pub fn new_test() -> Self {
        Self {
            name: "codeintel-lsp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            open_files: Arc::new(Mutex::new(HashMap::new())),
            workspace_root: Arc::new(Mutex::new(None)),
            client: None,
        }
    }

    /// Test backend with a pre-set workspace root.
    pub fn new_test_with_workspace(root: PathBuf) -> Self {
        let backend = Self::new_test();
        if let Ok(mut wr) = backend.workspace_root.lock() {
            *wr = Some(root);
        }
        backend
    }

    pub(crate) fn workspace_root(&self) -> Option<PathBuf> {
        self.workspace_root.lock().ok().and_then(|guard| guard.clone())
    }

    pub(crate) fn set_workspace_root(&self, root: PathBuf) {
        if let Ok(mut wr) = self.workspace_root.lock() {
            *wr = Some(root);
        }
    }

    /// Public helper for tests: get the stored text for an open file URI.
    pub fn get_open_file(&self, uri: &str) -> Option<String> {
        self.open_files.lock().ok().and_then(|files| files.get(uri).cloned())
    }

    pub(crate) fn insert_open_file(&self, uri: &str, text: &str) {
        if let Ok(mut files) = self.open_files.lock() {
            files.insert(uri.to_string(), text.to_string());
        }
    }

    pub(crate) fn remove_open_file(&self, uri: &str) {
        if let Ok(mut files) = self.open_files.lock() {
            files.remove(uri);
        }
    }

    /// Fetch document text for a URI: the open-files map first (the client
    /// may hold unsaved edits), then the file on disk.
    pub(crate) fn document_text(&self, uri: &str) -> Option<String> {
        if let Some(text) = self.get_open_file(uri) {
            return Some(text);
        }
        let path = uri_to_path(uri)?;
        std::fs::read_to_string(path).ok()
    }

    pub(crate) async fn log(&self, typ: MessageType, message: String) {
        if let Some(client) = &self.client {
            client.log_message(typ, message).await;
        }
    }
}

/// Convert a `file://` URI string to a filesystem path.
pub(crate) fn uri_to_path(uri: &str) -> Option<PathBuf> {
    Url::parse(uri).ok().and_then(|url| url.to_file_path().ok())
}

/// Convert a filesystem path to a `file://` URI.
pub(crate) fn path_to_url(path: &Path) -> Option<Url> {
    Url::from_file_path(path).ok()
}

/// Stable identity for a document, used by the cycle guard when walking
/// `extends` chains. URIs that map to a file are keyed by canonical path so
/// that the same file reached through different URI spellings is recognised.
pub(crate) fn canonical_key(uri: &str) -> String {
    match uri_to_path(uri) {
        Some(path) => path
            .canonicalize()
            .unwrap_or(path)
            .display()
            .to_string(),
        None => uri.to_string(),
    }
}
