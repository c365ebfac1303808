/// LSP server trait implementation.
///
/// This module contains the `impl LanguageServer for Backend` block, which
/// handles all protocol messages (initialize, didOpen, didChange, didClose,
/// goto definition, executeCommand).
use tower_lsp::LanguageServer;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

use crate::types::NavigateParams;
use crate::{Backend, NAVIGATE_COMMAND};

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        // Extract and store the workspace root path
        let workspace_root = params
            .root_uri
            .as_ref()
            .and_then(|uri| uri.to_file_path().ok());

        if let Some(root) = workspace_root {
            self.set_workspace_root(root);
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                definition_provider: Some(OneOf::Left(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![NAVIGATE_COMMAND.to_string()],
                    work_done_progress_options: WorkDoneProgressOptions {
                        work_done_progress: None,
                    },
                }),
                ..ServerCapabilities::default()
            },
            server_info: Some(ServerInfo {
                name: self.name.clone(),
                version: Some(self.version.clone()),
            }),
            offset_encoding: None,
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.log(MessageType::INFO, "codeintel-lsp initialized!".to_string())
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        let uri = doc.uri.to_string();

        self.insert_open_file(&uri, &doc.text);

        self.log(MessageType::INFO, format!("Opened file: {}", uri))
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.to_string();

        // FULL sync: each change carries the complete document text.
        if let Some(change) = params.content_changes.first() {
            self.insert_open_file(&uri, &change.text);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri.to_string();

        self.remove_open_file(&uri);

        self.log(MessageType::INFO, format!("Closed file: {}", uri))
            .await;
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = params
            .text_document_position_params
            .text_document
            .uri
            .to_string();
        let position = params.text_document_position_params.position;

        if let Some(content) = self.get_open_file(&uri)
            && let Some(location) = self.resolve_at_position(&uri, &content, position)
        {
            return Ok(Some(GotoDefinitionResponse::Scalar(location)));
        }

        Ok(None)
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        if params.command != NAVIGATE_COMMAND {
            return Ok(None);
        }

        let Some(args) = params
            .arguments
            .into_iter()
            .next()
            .and_then(|value| serde_json::from_value::<NavigateParams>(value).ok())
        else {
            self.log(
                MessageType::ERROR,
                format!("{}: malformed arguments", NAVIGATE_COMMAND),
            )
            .await;
            return Ok(None);
        };

        let uri = args.uri.to_string();
        let Some(content) = self.document_text(&uri) else {
            return Ok(None);
        };

        let Some(location) = self.resolve_navigation(&uri, &content, args.range) else {
            self.log(
                MessageType::INFO,
                format!("{}: nothing to navigate to", NAVIGATE_COMMAND),
            )
            .await;
            return Ok(None);
        };

        // Open the target and position the cursor. Side effect only: a
        // declined or failed show is logged, never returned as an error.
        if let Some(client) = &self.client {
            let shown = client
                .show_document(ShowDocumentParams {
                    uri: location.uri.clone(),
                    external: None,
                    take_focus: Some(true),
                    selection: Some(location.range),
                })
                .await;
            match shown {
                Ok(true) => {}
                Ok(false) => {
                    self.log(
                        MessageType::WARNING,
                        format!("client declined to show {}", location.uri),
                    )
                    .await;
                }
                Err(e) => {
                    self.log(
                        MessageType::ERROR,
                        format!("showDocument failed for {}: {}", location.uri, e),
                    )
                    .await;
                }
            }
        }

        Ok(None)
    }
}
