//! # tachyons_lsp
//!
//! A small language server that provides "go to definition" for
//! [Tachyons](https://tachyons.io) utility classes.  Put the cursor on
//! `pa1` in `class="pa1 mb2"` and the editor jumps to the `.pa1` rule in
//! `tachyons.css`.
//!
//! - [`locator`]: picks the project's `node_modules` copy of the
//!   stylesheet, or the [`bundled`] fallback.
//! - [`index`]: parses the stylesheet once with `cssparser` and maps each
//!   class selector to its rule span.
//! - [`word`] and [`resolver`]: find the class under the cursor.
//! - [`definition`]: ties the above together.
//! - `server`: the `tower_lsp::LanguageServer` implementation.
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tower_lsp::Client;
use tower_lsp::lsp_types::MessageType;

pub mod bundled;
pub mod config;
pub mod definition;
pub mod index;
pub mod locator;
pub mod resolver;
mod server;
pub mod word;

use bundled::BundledStylesheet;
use config::{Config, ConfigOverrides};
use index::handle::IndexHandle;

/// An open text document as last synchronised by the client.
#[derive(Debug, Clone)]
pub struct OpenDocument {
    pub language_id: String,
    pub text: String,
}

pub struct Backend {
    name: String,
    version: String,
    /// Maps a document URI to its current text and language.
    open_files: Arc<Mutex<HashMap<String, OpenDocument>>>,
    workspace_root: Arc<Mutex<Option<PathBuf>>>,
    /// Overrides from `initializationOptions`, applied on top of the
    /// workspace config file once it has been read.
    init_overrides: Arc<Mutex<ConfigOverrides>>,
    config: Arc<Mutex<Config>>,
    bundled: BundledStylesheet,
    index: Arc<IndexHandle>,
    client: Option<Client>,
}

impl Backend {
    pub fn new(client: Client, bundled: BundledStylesheet) -> Self {
        Self {
            client: Some(client),
            ..Self::with_bundled(bundled)
        }
    }

    /// Create a backend without an LSP client (for tests).
    pub fn new_test() -> Self {
        Self::with_bundled(BundledStylesheet::Embedded)
    }

    /// Create a test backend with a known workspace root and an explicit
    /// fallback stylesheet, so tests never touch the user's cache directory.
    pub fn new_test_with_workspace(workspace_root: Option<PathBuf>, bundled: PathBuf) -> Self {
        let backend = Self::with_bundled(BundledStylesheet::File(bundled));
        *backend.workspace_root.lock() = workspace_root;
        backend
    }

    fn with_bundled(bundled: BundledStylesheet) -> Self {
        Self {
            name: "tachyons-lsp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            open_files: Arc::new(Mutex::new(HashMap::new())),
            workspace_root: Arc::new(Mutex::new(None)),
            init_overrides: Arc::new(Mutex::new(ConfigOverrides::default())),
            config: Arc::new(Mutex::new(Config::default())),
            bundled,
            index: Arc::new(IndexHandle::new()),
            client: None,
        }
    }

    /// The definition index handle (for tests and diagnostics).
    pub fn index(&self) -> &Arc<IndexHandle> {
        &self.index
    }

    /// The effective configuration.
    pub fn config(&self) -> Config {
        self.config.lock().clone()
    }

    pub fn workspace_root(&self) -> Option<PathBuf> {
        self.workspace_root.lock().clone()
    }

    pub(crate) async fn log(&self, typ: MessageType, message: String) {
        if let Some(client) = &self.client {
            client.log_message(typ, message).await;
        }
    }
}
