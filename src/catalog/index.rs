//! Indexed view of a tenet catalog instance.
//!
//! The index enforces the expected catalog schema version and provides lookup
//! by entry id or position. It is intentionally strict about duplicates and
//! unknown schema versions so helper binaries cannot silently consume
//! mismatched catalogs.

use crate::catalog::load_catalog_from_path;
use crate::catalog::{CatalogKey, CatalogMetadata, EntryId, PrincipleEntry, TenetCatalog};
use crate::schema_loader::{SchemaLoadOptions, load_json_schema};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

// The tool currently ships a single catalog contract; reject unexpected
// versions rather than risk listing entries under mismatched metadata.
const DEFAULT_SCHEMA_VERSION: &str = "tenet_catalog_v1";

#[derive(Debug)]
/// Tenet catalog plus a derived index keyed by entry id.
///
/// Immutable after construction; `entries()` iterates in authored order while
/// `by_id` positions back lookup by id.
pub struct CatalogIndex {
    catalog_key: CatalogKey,
    catalog: TenetCatalog,
    by_id: BTreeMap<EntryId, usize>,
}

impl CatalogIndex {
    /// Load and validate the catalog from disk.
    ///
    /// Validates the document against the JSON Schema, checks the schema
    /// version and catalog metadata, and builds the id index. The first
    /// violation fails the load.
    pub fn load(path: &Path) -> Result<Self> {
        validate_against_schema(path)?;

        let catalog =
            load_catalog_from_path(path).with_context(|| format!("loading {}", path.display()))?;
        Self::from_catalog(catalog)
    }

    /// Validate an already-parsed catalog and build the index.
    ///
    /// Used for stdin input where no schema file can be resolved relative to
    /// the document; structural validation still applies in full.
    pub fn from_catalog(catalog: TenetCatalog) -> Result<Self> {
        validate_schema_version(&catalog.schema_version)?;
        validate_catalog_metadata(&catalog.catalog)?;
        let by_id = build_index(&catalog)?;
        Ok(Self {
            catalog_key: catalog.catalog.key.clone(),
            catalog,
            by_id,
        })
    }

    /// The catalog key declared in the loaded file.
    pub fn key(&self) -> &CatalogKey {
        &self.catalog_key
    }

    /// Resolve an entry by id.
    ///
    /// Returns `None` instead of erroring; callers that need a hard failure
    /// use [`CatalogIndex::require_entry`].
    pub fn entry(&self, id: &EntryId) -> Option<&PrincipleEntry> {
        self.by_id.get(id).map(|pos| &self.catalog.entries[*pos])
    }

    /// Resolve an entry by id or fail with the unknown id named.
    pub fn require_entry(&self, id: &EntryId) -> Result<&PrincipleEntry> {
        match self.entry(id) {
            Some(entry) => Ok(entry),
            None => bail!(
                "no entry with id '{}' in catalog '{}'. Known ids: {}",
                id.0,
                self.catalog_key.0,
                self.ids().map(|id| id.0.as_str()).collect::<Vec<_>>().join(", ")
            ),
        }
    }

    /// Resolve an entry by zero-based position in authored order.
    pub fn entry_at(&self, position: usize) -> Option<&PrincipleEntry> {
        self.catalog.entries.get(position)
    }

    /// Iterates entries in authored order.
    pub fn entries(&self) -> impl Iterator<Item = &PrincipleEntry> {
        self.catalog.entries.iter()
    }

    /// Iterates entry ids in authored order.
    pub fn ids(&self) -> impl Iterator<Item = &EntryId> {
        self.catalog.entries.iter().map(|entry| &entry.id)
    }

    /// Access the underlying catalog (scope, docs, etc.).
    pub fn catalog(&self) -> &TenetCatalog {
        &self.catalog
    }
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }

    if !schema_version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!(
            "schema_version must match ^[A-Za-z0-9_.-]+$, got {}",
            schema_version
        );
    }

    let allowed = allowed_schema_versions();
    if !allowed.contains(schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed
        );
    }

    Ok(())
}

pub(crate) fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from_iter([default_catalog_schema_version()])
}

fn default_catalog_schema_version() -> String {
    catalog_schema_version_from_disk().unwrap_or_else(|| DEFAULT_SCHEMA_VERSION.to_string())
}

fn catalog_schema_version_from_disk() -> Option<String> {
    let path = canonical_catalog_schema_path();
    let file = File::open(path).ok()?;
    let value: Value = serde_json::from_reader(BufReader::new(file)).ok()?;
    value
        .pointer("/properties/schema_version/const")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn canonical_catalog_schema_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schema/tenet_catalog.schema.json")
}

fn validate_catalog_metadata(meta: &CatalogMetadata) -> Result<()> {
    validate_catalog_key(&meta.key)?;
    if meta.title.trim().is_empty() {
        bail!("catalog.title must not be empty");
    }
    if meta.labels.iter().any(|label| label.trim().is_empty()) {
        bail!("catalog.labels must not contain empty entries");
    }
    Ok(())
}

fn validate_catalog_key(key: &CatalogKey) -> Result<()> {
    if key.0.is_empty() {
        bail!("catalog.key must not be empty");
    }

    if !key
        .0
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!("catalog.key must match ^[A-Za-z0-9_.-]+$, got {}", key.0);
    }

    Ok(())
}

pub(crate) fn valid_entry_id(id: &EntryId) -> bool {
    !id.0.is_empty()
        && id
            .0
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-'))
}

fn build_index(catalog: &TenetCatalog) -> Result<BTreeMap<EntryId, usize>> {
    if catalog.entries.is_empty() {
        bail!("catalog contains no entries");
    }

    let language_tags: BTreeSet<&str> = catalog
        .scope
        .languages
        .keys()
        .map(String::as_str)
        .collect();
    if language_tags.is_empty() {
        bail!("catalog scope must declare at least one language");
    }
    if language_tags.iter().any(|tag| tag.trim().is_empty()) {
        bail!("scope.languages must not contain empty tags");
    }

    let doc_keys: BTreeSet<&str> = catalog.docs.keys().map(String::as_str).collect();

    let mut map = BTreeMap::new();
    for (position, entry) in catalog.entries.iter().enumerate() {
        if !valid_entry_id(&entry.id) {
            bail!(
                "entry id '{}' must match ^[a-z0-9_-]+$ and not be empty",
                entry.id.0
            );
        }
        if map.contains_key(&entry.id) {
            bail!("duplicate entry id {}", entry.id.0);
        }
        if entry.title.trim().is_empty() {
            bail!("entry {} has an empty title", entry.id.0);
        }
        if entry.summary.trim().is_empty() {
            bail!("entry {} has an empty summary", entry.id.0);
        }
        if entry.examples.is_empty() {
            bail!("entry {} has no examples", entry.id.0);
        }
        for example in &entry.examples {
            if !language_tags.contains(example.language.as_str()) {
                bail!(
                    "entry {} uses undeclared language '{}'",
                    entry.id.0,
                    example.language.as_str()
                );
            }
            if example.lines.is_empty() {
                bail!(
                    "entry {} has a {} example with no lines",
                    entry.id.0,
                    example.language.as_str()
                );
            }
        }
        for source in &entry.sources {
            if !doc_keys.contains(source.doc.as_str()) {
                bail!(
                    "entry {} references unknown doc '{}'",
                    entry.id.0,
                    source.doc
                );
            }
        }
        map.insert(entry.id.clone(), position);
    }
    Ok(map)
}

fn validate_against_schema(catalog_path: &Path) -> Result<()> {
    let catalog_file = File::open(catalog_path)
        .with_context(|| format!("opening catalog {}", catalog_path.display()))?;
    let catalog_value: Value = serde_json::from_reader(BufReader::new(catalog_file))
        .with_context(|| format!("parsing catalog {}", catalog_path.display()))?;

    let catalog_version = catalog_value
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let schema_path = resolve_catalog_schema_path(catalog_path);
    let allowed = allowed_schema_versions();
    let schema = load_json_schema(
        &schema_path,
        SchemaLoadOptions {
            allowed_versions: Some(&allowed),
            expected_version: Some(&catalog_version),
            patch_schema_version_const: true,
            ..Default::default()
        },
    )
    .with_context(|| format!("loading catalog schema {}", schema_path.display()))?;

    if let Err(errors) = schema.compiled.validate(&catalog_value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "tenet catalog {} failed schema validation:\n{}",
            catalog_path.display(),
            details
        );
    }
    Ok(())
}

/// Locate the schema document governing a catalog file.
///
/// Prefers the `schema/` directory sitting next to the catalog's `catalog/`
/// directory, falling back to the crate's own copy.
pub fn resolve_catalog_schema_path(catalog_path: &Path) -> PathBuf {
    if let Some(base) = catalog_path.parent().and_then(|p| p.parent()) {
        let candidate = base.join("schema/tenet_catalog.schema.json");
        if candidate.exists() {
            return candidate;
        }
    }

    canonical_catalog_schema_path()
}
