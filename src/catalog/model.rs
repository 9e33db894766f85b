//! Deserializable representation of `catalog/tenets.json`.
//!
//! The types mirror the catalog schema so helpers and tests can reason about
//! entries without ad-hoc JSON handling. Use `CatalogIndex` for validation and
//! id lookup; use these structs when the full catalog surface is required
//! (scope, docs, entry bodies).

use crate::catalog::identity::{CatalogKey, EntryId, EntrySnapshot, Language};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
/// Full tenet catalog as stored on disk.
pub struct TenetCatalog {
    pub schema_version: String,
    pub catalog: CatalogMetadata,
    pub scope: Scope,
    pub docs: BTreeMap<String, DocRef>,
    pub entries: Vec<PrincipleEntry>,
}

#[derive(Clone, Debug, Deserialize)]
/// Identifying metadata for the catalog snapshot.
pub struct CatalogMetadata {
    pub key: CatalogKey,
    pub title: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
/// Top-level scope: what the catalog covers and which language tags entries may use.
pub struct Scope {
    pub description: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub languages: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Deserialize)]
/// Further-reading reference pulled into the catalog for traceability.
pub struct DocRef {
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// One documented design principle: explanation plus illustrative examples.
pub struct PrincipleEntry {
    pub id: EntryId,
    pub title: String,
    pub summary: String,
    pub examples: Vec<CodeExample>,
    #[serde(default)]
    pub sources: Vec<EntrySource>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// A short didactic snippet tagged with the language it illustrates.
pub struct CodeExample {
    pub language: Language,
    pub lines: Vec<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Source citation for an entry; `doc` must name a key in the catalog docs map.
pub struct EntrySource {
    pub doc: String,
    #[serde(default)]
    pub section: Option<String>,
}

impl PrincipleEntry {
    /// Create the compact snapshot used in listings.
    ///
    /// Languages are deduplicated but keep the order in which the examples
    /// introduce them.
    pub fn snapshot(&self) -> EntrySnapshot {
        let mut languages: Vec<Language> = Vec::new();
        for example in &self.examples {
            if !languages.contains(&example.language) {
                languages.push(example.language.clone());
            }
        }
        EntrySnapshot {
            id: self.id.clone(),
            title: self.title.clone(),
            languages,
        }
    }
}

/// Read and parse a tenet catalog from disk without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<TenetCatalog> {
    let data = fs::read_to_string(path)?;
    let catalog: TenetCatalog = serde_json::from_str(&data)?;
    Ok(catalog)
}
