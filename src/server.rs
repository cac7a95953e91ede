/// LSP server trait implementation.
///
/// This module contains the `impl LanguageServer for Backend` block,
/// which handles the LSP protocol messages the server takes part in
/// (initialize, initialized, didOpen, didChange, didClose, definition).
use tower_lsp::LanguageServer;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

use crate::config::{Config, ConfigOverrides};
use crate::definition::DefinitionProvider;
use crate::index::{DefinitionIndex, IndexError};
use crate::locator::locate_stylesheet;
use crate::{Backend, OpenDocument};

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        // Prefer the root URI, fall back to the first workspace folder.
        let workspace_root = params
            .root_uri
            .as_ref()
            .and_then(|uri| uri.to_file_path().ok())
            .or_else(|| {
                params
                    .workspace_folders
                    .as_ref()?
                    .first()
                    .and_then(|folder| folder.uri.to_file_path().ok())
            });

        if let Some(root) = workspace_root {
            *self.workspace_root.lock() = Some(root);
        }

        if let Some(options) = params.initialization_options {
            match ConfigOverrides::from_init_options(options) {
                Ok(overrides) => {
                    self.config.lock().apply(overrides.clone());
                    *self.init_overrides.lock() = overrides;
                }
                Err(e) => tracing::warn!("Ignoring configuration: {}", e),
            }
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                definition_provider: Some(OneOf::Left(true)),
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
        let workspace_root = self.workspace_root();

        // Workspace file first, init options on top.
        let mut config = Config::default();
        if let Some(root) = &workspace_root {
            match ConfigOverrides::from_workspace(root) {
                Ok(Some(overrides)) => config.apply(overrides),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Ignoring configuration: {}", e);
                    self.log(MessageType::WARNING, e.to_string()).await;
                }
            }
        }
        let init_overrides = self.init_overrides.lock().clone();
        config.apply(init_overrides);
        tracing::debug!("Effective configuration: {:?}", config);
        *self.config.lock() = config;

        let located = match locate_stylesheet(workspace_root.as_deref(), &self.bundled) {
            Ok(located) => located,
            Err(e) => {
                self.index_failed(IndexError::from(e)).await;
                return;
            }
        };

        // Reading is synchronous; parsing happens in the background.
        let css = match DefinitionIndex::read_source(&located) {
            Ok(css) => css,
            Err(e) => {
                self.index_failed(e).await;
                return;
            }
        };

        let message = format!(
            "tachyons-lsp initialized! Indexing {} ({})",
            located.path.display(),
            located.source
        );
        tracing::info!("{}", message);
        self.index.spawn_build(located, css);
        self.log(MessageType::INFO, message).await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        let uri = doc.uri.to_string();

        self.open_files.lock().insert(
            uri.clone(),
            OpenDocument {
                language_id: doc.language_id,
                text: doc.text,
            },
        );

        tracing::debug!("Opened file: {}", uri);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.to_string();

        // Full sync: the last change carries the whole document.
        if let Some(change) = params.content_changes.into_iter().last()
            && let Some(doc) = self.open_files.lock().get_mut(&uri)
        {
            doc.text = change.text;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri.to_string();
        self.open_files.lock().remove(&uri);

        tracing::debug!("Closed file: {}", uri);
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

        let document = self.open_files.lock().get(&uri).cloned();
        let Some(document) = document else {
            return Ok(None);
        };

        let config = self.config();
        if !config.serves_language(&document.language_id) {
            return Ok(None);
        }

        let index = if config.wait_for_index {
            self.index.ready().await
        } else {
            self.index.current()
        };

        Ok(index
            .and_then(|index| index.provide_definition(&document.text, position))
            .map(GotoDefinitionResponse::Scalar))
    }
}

impl Backend {
    async fn index_failed(&self, error: IndexError) {
        let message = format!("Tachyons definitions unavailable: {}", error);
        tracing::warn!("{}", message);
        self.index.fail(error);
        self.log(MessageType::WARNING, message).await;
    }
}
