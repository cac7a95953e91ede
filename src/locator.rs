/// Stylesheet location.
///
/// Picks the `tachyons.css` the server indexes.  A project-local copy
/// installed through npm wins, so definitions match the exact Tachyons
/// version the project uses; otherwise the bundled copy is used.
use std::path::{Path, PathBuf};

use crate::bundled::{BundleError, BundledStylesheet};

/// Location of the stylesheet relative to the workspace root.
pub const PROJECT_STYLESHEET: &str = "node_modules/tachyons/css/tachyons.css";

/// Why the bundled stylesheet was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The editor did not report a workspace folder.
    NoWorkspaceRoot,
    /// The project copy could not be found (or stat'ed).
    Missing,
}

/// Where the located stylesheet came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylesheetSource {
    Project,
    Bundled(FallbackReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedStylesheet {
    pub path: PathBuf,
    pub source: StylesheetSource,
}

/// Locate the stylesheet for a workspace.
///
/// Performs a single existence check on
/// `<root>/node_modules/tachyons/css/tachyons.css`.  Any error from that
/// check counts as "not there".  The bundled fallback is only resolved when
/// it is actually needed.
pub fn locate_stylesheet(
    workspace_root: Option<&Path>,
    bundled: &BundledStylesheet,
) -> Result<LocatedStylesheet, BundleError> {
    let reason = match workspace_root {
        Some(root) => {
            let candidate = root.join(PROJECT_STYLESHEET);
            match std::fs::metadata(&candidate) {
                Ok(_) => {
                    return Ok(LocatedStylesheet {
                        path: candidate,
                        source: StylesheetSource::Project,
                    });
                }
                Err(e) => {
                    tracing::debug!("No project stylesheet at {}: {}", candidate.display(), e);
                    FallbackReason::Missing
                }
            }
        }
        None => FallbackReason::NoWorkspaceRoot,
    };

    Ok(LocatedStylesheet {
        path: bundled.path()?,
        source: StylesheetSource::Bundled(reason),
    })
}

impl std::fmt::Display for StylesheetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StylesheetSource::Project => write!(f, "project dependency"),
            StylesheetSource::Bundled(FallbackReason::Missing) => {
                write!(f, "bundled copy (tachyons is not installed in node_modules)")
            }
            StylesheetSource::Bundled(FallbackReason::NoWorkspaceRoot) => {
                write!(f, "bundled copy (no workspace folder)")
            }
        }
    }
}
