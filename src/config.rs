/// Server configuration.
///
/// Settings are layered, later sources overriding earlier ones:
///
///   1. built-in defaults,
///   2. `.tachyons-lsp.toml` in the workspace root,
///   3. the client's `initializationOptions`.
///
/// Both files and init options use the same keys:
///
/// ```toml
/// languages = ["html", "javascript", "svelte", "vue"]
/// waitForIndex = true
/// ```
///
/// Unknown keys are ignored.  A source that fails to parse is logged and
/// skipped; it never prevents the server from starting.
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Name of the per-workspace configuration file.
pub const CONFIG_FILE: &str = ".tachyons-lsp.toml";

/// Language ids served by default: markup, script and component templates.
pub const DEFAULT_LANGUAGES: &[&str] = &["html", "javascript", "svelte"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid initializationOptions: {0}")]
    InitOptions(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Language ids for which definitions are provided.
    pub languages: Vec<String>,
    /// Whether a definition request waits for an in-progress index build
    /// instead of missing.
    pub wait_for_index: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            wait_for_index: true,
        }
    }
}

/// One configuration source; unset fields keep the lower layer's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub languages: Option<Vec<String>>,
    pub wait_for_index: Option<bool>,
}

impl ConfigOverrides {
    /// Read `.tachyons-lsp.toml` from the workspace root.  A missing file is
    /// not an error.
    pub fn from_workspace(root: &Path) -> Result<Option<Self>, ConfigError> {
        let path = root.join(CONFIG_FILE);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        toml::from_str(&text)
            .map(Some)
            .map_err(|source| ConfigError::Toml { path, source })
    }

    /// Parse LSP `initializationOptions`.  `null` means no overrides.
    pub fn from_init_options(value: serde_json::Value) -> Result<Self, ConfigError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value)?)
    }
}

impl Config {
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(languages) = overrides.languages {
            self.languages = languages;
        }
        if let Some(wait) = overrides.wait_for_index {
            self.wait_for_index = wait;
        }
    }

    pub fn serves_language(&self, language_id: &str) -> bool {
        self.languages.iter().any(|l| l == language_id)
    }
}
