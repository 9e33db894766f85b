//! Shared library for the tenets catalog tools.
//!
//! The crate exposes the catalog types, the validated index, and rendering
//! utilities used by the helper binaries. Public functions here form the
//! contract the binaries depend on: workspace discovery, default catalog
//! resolution, and the list-splitting helper for CLI filters.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod coverage;
pub mod render;
mod schema_loader;
pub mod validate;

pub use catalog::{
    CatalogIndex, CatalogKey, CatalogMetadata, CodeExample, DocRef, EntryId, EntrySnapshot,
    EntrySource, Language, PrincipleEntry, Scope, TenetCatalog, load_catalog_from_path,
    resolve_catalog_schema_path,
};
pub use coverage::{
    LanguageCoverage, build_language_coverage, unused_languages, validate_coverage_against_scope,
};
pub use render::{
    OutlineEntry, OutlineReadError, read_rendered_outline, render_catalog, render_entry,
};
pub use validate::{collect_violations, validate_catalog_files};

const CATALOG_SENTINEL: &str = "catalog/tenets.json";
const SCHEMA_SENTINEL: &str = "schema/tenet_catalog.schema.json";

/// Returns true when `candidate` looks like a tenets workspace root.
///
/// Root detection is intentionally strict: both the authored catalog and its
/// schema must be present so helpers never bind to a half-assembled tree.
fn is_workspace_root(candidate: &Path) -> bool {
    candidate.join(CATALOG_SENTINEL).is_file() && candidate.join(SCHEMA_SENTINEL).is_file()
}

/// Verifies that an explicit `TENETS_ROOT` hint points at a valid workspace.
fn workspace_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_workspace_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_workspace_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the workspace root holding the catalog and schema.
///
/// Search order: honor `TENETS_ROOT` if it points at a real workspace, climb
/// up from the current directory, then use the build-time hint. Callers can
/// treat failure as fatal because the binaries cannot run without the catalog
/// layout.
pub fn find_workspace_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var("TENETS_ROOT") {
        if let Some(root) = workspace_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(current_dir) = env::current_dir() {
        if let Some(root) = search_upwards(&current_dir) {
            return Ok(root);
        }
    }

    if let Some(hint) = option_env!("TENETS_ROOT_HINT") {
        if let Some(root) = workspace_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate a tenets workspace (catalog/tenets.json plus schema/). Set TENETS_ROOT to the workspace directory."
    );
}

/// Returns the authored catalog path for a workspace root.
pub fn default_catalog_path(root: &Path) -> PathBuf {
    root.join(CATALOG_SENTINEL)
}

/// Resolve the catalog file a binary should read.
///
/// An explicit `--catalog` path wins; otherwise the workspace default is
/// used. Missing explicit paths fail here so every binary reports the same
/// error shape.
pub fn resolve_catalog_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("catalog file not found: {}", path.display());
        }
        return Ok(path.to_path_buf());
    }

    let root = find_workspace_root()?;
    let path = default_catalog_path(&root);
    if !path.is_file() {
        bail!("workspace catalog missing: {}", path.display());
    }
    Ok(path)
}

/// Split comma- or whitespace-delimited CLI lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
