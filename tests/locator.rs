mod common;

use std::fs;

use common::{FIXTURE_CSS, Workspace};
use tachyons_lsp::bundled::{BUNDLED_CSS, BundledStylesheet, materialize_in};
use tachyons_lsp::locator::{FallbackReason, StylesheetSource, locate_stylesheet};

// ─── Locator Tests ──────────────────────────────────────────────────────────

#[test]
fn test_project_stylesheet_is_preferred() {
    let workspace = Workspace::new(Some(FIXTURE_CSS));
    let bundled = BundledStylesheet::File(workspace.bundled_stylesheet());

    let located = locate_stylesheet(Some(&workspace.root()), &bundled).unwrap();
    assert_eq!(located.path, workspace.project_stylesheet());
    assert_eq!(located.source, StylesheetSource::Project);
}

#[test]
fn test_missing_project_stylesheet_falls_back() {
    let workspace = Workspace::new(None);
    let bundled = BundledStylesheet::File(workspace.bundled_stylesheet());

    let located = locate_stylesheet(Some(&workspace.root()), &bundled).unwrap();
    assert_eq!(located.path, workspace.bundled_stylesheet());
    assert_eq!(
        located.source,
        StylesheetSource::Bundled(FallbackReason::Missing)
    );
}

#[test]
fn test_no_workspace_root_uses_bundled() {
    let workspace = Workspace::new(Some(FIXTURE_CSS));
    let bundled = BundledStylesheet::File(workspace.bundled_stylesheet());

    let located = locate_stylesheet(None, &bundled).unwrap();
    assert_eq!(located.path, workspace.bundled_stylesheet());
    assert_eq!(
        located.source,
        StylesheetSource::Bundled(FallbackReason::NoWorkspaceRoot)
    );
}

#[test]
fn test_source_descriptions() {
    assert_eq!(StylesheetSource::Project.to_string(), "project dependency");
    assert!(
        StylesheetSource::Bundled(FallbackReason::NoWorkspaceRoot)
            .to_string()
            .contains("no workspace folder")
    );
}

// ─── Bundled Stylesheet Tests ───────────────────────────────────────────────

#[test]
fn test_materialize_writes_embedded_stylesheet() {
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("cache");

    let path = materialize_in(&cache).unwrap();
    assert!(path.starts_with(&cache));
    assert_eq!(fs::read_to_string(&path).unwrap(), BUNDLED_CSS);
}

#[test]
fn test_materialize_repairs_stale_copy() {
    let dir = tempfile::tempdir().unwrap();
    let path = materialize_in(dir.path()).unwrap();

    fs::write(&path, "/* stale */").unwrap();
    let again = materialize_in(dir.path()).unwrap();

    assert_eq!(again, path);
    assert_eq!(fs::read_to_string(&path).unwrap(), BUNDLED_CSS);
}

#[test]
fn test_explicit_bundled_file_is_used_as_is() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shipped.css");
    let bundled = BundledStylesheet::File(path.clone());
    assert_eq!(bundled.path().unwrap(), path);
}
