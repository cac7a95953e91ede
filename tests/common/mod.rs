#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tachyons_lsp::Backend;
use tachyons_lsp::locator::PROJECT_STYLESHEET;
use tower_lsp::LanguageServer;
use tower_lsp::lsp_types::*;

/// Small stylesheet with `.pa1 { padding: 1rem; }` on line 10, column 1.
pub const FIXTURE_CSS: &str = concat!(
    "/* Fixture stylesheet */\n",
    "html, body { margin: 0; }\n",
    "div { display: block; }\n",
    ".a, .b { color: red; }\n",
    "\n",
    "@media screen and (min-width: 30em) {\n",
    "  .pa1-ns { padding: 1rem; }\n",
    "}\n",
    ".dup { color: blue; }\n",
    ".pa1 { padding: 1rem; }\n",
    ".dup { color: green; }\n",
    ".hover-red:hover, .hover-red:focus { color: red; }\n",
);

/// Stand-in for the copy shipped with the tool.
pub const BUNDLED_FIXTURE_CSS: &str =
    ".bundled-only { color: black; }\n.pa1 { padding: .25rem; }\n";

pub fn create_test_backend() -> Backend {
    Backend::new_test()
}

/// A temp directory holding a `project/` workspace and a `bundled/`
/// fallback stylesheet.
pub struct Workspace {
    pub dir: tempfile::TempDir,
}

impl Workspace {
    /// Create a workspace; `project_css` is installed under
    /// `node_modules/tachyons` when given.
    pub fn new(project_css: Option<&str>) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        fs::create_dir_all(dir.path().join("project")).expect("failed to create project dir");
        write_file(&dir.path().join("bundled/tachyons.css"), BUNDLED_FIXTURE_CSS);
        let workspace = Self { dir };
        if let Some(css) = project_css {
            write_file(&workspace.project_stylesheet(), css);
        }
        workspace
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("project")
    }

    pub fn project_stylesheet(&self) -> PathBuf {
        self.root().join(PROJECT_STYLESHEET)
    }

    pub fn bundled_stylesheet(&self) -> PathBuf {
        self.dir.path().join("bundled/tachyons.css")
    }

    pub fn write_config(&self, toml: &str) {
        write_file(&self.root().join(".tachyons-lsp.toml"), toml);
    }

    pub fn backend(&self) -> Backend {
        Backend::new_test_with_workspace(Some(self.root()), self.bundled_stylesheet())
    }

    /// A backend that never learns about a workspace root.
    pub fn rootless_backend(&self) -> Backend {
        Backend::new_test_with_workspace(None, self.bundled_stylesheet())
    }
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create dirs");
    }
    fs::write(path, content).expect("failed to write file");
}

/// Run initialize + initialized and wait for the index build to finish.
pub async fn start(backend: &Backend, initialization_options: Option<serde_json::Value>) {
    let params = InitializeParams {
        initialization_options,
        ..InitializeParams::default()
    };
    backend.initialize(params).await.unwrap();
    backend.initialized(InitializedParams {}).await;
    backend.index().ready().await;
}

pub async fn open(backend: &Backend, uri: &Url, language_id: &str, text: &str) {
    backend
        .did_open(DidOpenTextDocumentParams {
            text_document: TextDocumentItem {
                uri: uri.clone(),
                language_id: language_id.to_string(),
                version: 1,
                text: text.to_string(),
            },
        })
        .await;
}

pub async fn definition_at(
    backend: &Backend,
    uri: &Url,
    line: u32,
    character: u32,
) -> Option<GotoDefinitionResponse> {
    let params = GotoDefinitionParams {
        text_document_position_params: TextDocumentPositionParams {
            text_document: TextDocumentIdentifier { uri: uri.clone() },
            position: Position { line, character },
        },
        work_done_progress_params: WorkDoneProgressParams::default(),
        partial_result_params: PartialResultParams::default(),
    };
    backend.goto_definition(params).await.unwrap()
}

pub fn scalar_location(response: Option<GotoDefinitionResponse>) -> Location {
    match response {
        Some(GotoDefinitionResponse::Scalar(location)) => location,
        other => panic!("expected a single location, got {:?}", other),
    }
}

pub fn range(start: (u32, u32), end: (u32, u32)) -> Range {
    Range {
        start: Position {
            line: start.0,
            character: start.1,
        },
        end: Position {
            line: end.0,
            character: end.1,
        },
    }
}
