/// Bundled Tachyons stylesheet.
///
/// A copy of `tachyons.css` is embedded into the binary at compile time so
/// the server always has something to index, even in projects that do not
/// depend on Tachyons through npm.
///
/// Editor locations must point at a real file, so the embedded copy is
/// written to the per-user cache directory on first use:
///
/// ```text
/// <cache_dir>/tachyons-lsp/tachyons-<version>.css
/// ```
///
/// The file is rewritten only when it is missing or its content differs
/// from the embedded text (e.g. after an upgrade that changed the bundle
/// without bumping the version).
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use etcetera::BaseStrategy;

/// The embedded stylesheet text.
pub const BUNDLED_CSS: &str = include_str!("../assets/tachyons.css");

/// Directory name used under the user's cache directory.
const CACHE_SUBDIR: &str = "tachyons-lsp";

#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("could not determine the user cache directory: {0}")]
    CacheDir(#[from] etcetera::HomeDirError),
    #[error("could not write bundled stylesheet to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where the fallback stylesheet comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BundledStylesheet {
    /// The copy compiled into the binary, materialised into the cache dir.
    #[default]
    Embedded,
    /// An explicit file shipped next to the tool (`--bundled-stylesheet`).
    File(PathBuf),
}

impl BundledStylesheet {
    /// Resolve the fallback to a path on disk.
    pub fn path(&self) -> Result<PathBuf, BundleError> {
        match self {
            BundledStylesheet::File(path) => Ok(path.clone()),
            BundledStylesheet::Embedded => {
                let strategy = etcetera::choose_base_strategy()?;
                materialize_in(&strategy.cache_dir().join(CACHE_SUBDIR))
            }
        }
    }
}

/// Write the embedded stylesheet into `dir` and return its path.
pub fn materialize_in(dir: &Path) -> Result<PathBuf, BundleError> {
    let path = dir.join(format!("tachyons-{}.css", env!("CARGO_PKG_VERSION")));

    let up_to_date = fs::read_to_string(&path).is_ok_and(|existing| existing == BUNDLED_CSS);
    if up_to_date {
        return Ok(path);
    }

    let write_err = |source| BundleError::Write {
        path: path.clone(),
        source,
    };
    fs::create_dir_all(dir).map_err(write_err)?;
    fs::write(&path, BUNDLED_CSS).map_err(write_err)?;

    tracing::debug!("Wrote bundled stylesheet to {}", path.display());
    Ok(path)
}
