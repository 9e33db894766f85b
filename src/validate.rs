//! Validation helpers that report every catalog violation at once.
//!
//! `CatalogIndex::load` fails fast on the first defect, which is right for
//! consumers; authors fixing a catalog want the whole list. These helpers
//! collect violations as messages so `tenet-check` can print them in one run,
//! and can sweep directories of catalog files for batch checking.

use crate::catalog::index::{allowed_schema_versions, valid_entry_id};
use crate::catalog::{EntryId, TenetCatalog};
use anyhow::Result;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Collect every structural violation in a parsed catalog.
///
/// Returns an empty list when the catalog would pass `CatalogIndex` loading;
/// otherwise each message names the offending entry or field.
pub fn collect_violations(catalog: &TenetCatalog) -> Vec<String> {
    let mut errors = Vec::new();

    let allowed = allowed_schema_versions();
    if catalog.schema_version.is_empty() {
        errors.push("schema_version must not be empty".to_string());
    } else if !allowed.contains(&catalog.schema_version) {
        errors.push(format!(
            "schema_version '{}' not in allowed set {:?}",
            catalog.schema_version, allowed
        ));
    }

    if catalog.catalog.key.0.is_empty() {
        errors.push("catalog.key must not be empty".to_string());
    } else if !catalog
        .catalog
        .key
        .0
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        errors.push(format!(
            "catalog.key must match ^[A-Za-z0-9_.-]+$, got {}",
            catalog.catalog.key.0
        ));
    }
    if catalog.catalog.title.trim().is_empty() {
        errors.push("catalog.title must not be empty".to_string());
    }
    for label in &catalog.catalog.labels {
        if label.trim().is_empty() {
            errors.push("catalog.labels must not contain empty entries".to_string());
        }
    }

    let language_tags: BTreeSet<&str> = catalog
        .scope
        .languages
        .keys()
        .map(String::as_str)
        .collect();
    if language_tags.is_empty() {
        errors.push("scope must declare at least one language".to_string());
    }
    if language_tags.iter().any(|tag| tag.trim().is_empty()) {
        errors.push("scope.languages must not contain empty tags".to_string());
    }

    let doc_keys: BTreeSet<&str> = catalog.docs.keys().map(String::as_str).collect();

    if catalog.entries.is_empty() {
        errors.push("catalog contains no entries".to_string());
    }

    let mut seen: BTreeSet<&EntryId> = BTreeSet::new();
    for entry in &catalog.entries {
        let id = entry.id.0.as_str();
        if !valid_entry_id(&entry.id) {
            errors.push(format!("entry id '{id}' must match ^[a-z0-9_-]+$"));
        }
        if !seen.insert(&entry.id) {
            errors.push(format!("duplicate entry id {id}"));
        }
        if entry.title.trim().is_empty() {
            errors.push(format!("entry {id} has an empty title"));
        }
        if entry.summary.trim().is_empty() {
            errors.push(format!("entry {id} has an empty summary"));
        }
        if entry.examples.is_empty() {
            errors.push(format!("entry {id} has no examples"));
        }
        for example in &entry.examples {
            if !language_tags.contains(example.language.as_str()) {
                errors.push(format!(
                    "entry {id} uses undeclared language '{}'",
                    example.language.as_str()
                ));
            }
            if example.lines.is_empty() {
                errors.push(format!(
                    "entry {id} has a {} example with no lines",
                    example.language.as_str()
                ));
            }
        }
        for source in &entry.sources {
            if !doc_keys.contains(source.doc.as_str()) {
                errors.push(format!(
                    "entry {id} references unknown doc '{}'",
                    source.doc
                ));
            }
        }
    }

    errors
}

/// Sweep directories for catalog files and collect violations per file.
///
/// Unreadable or unparsable files become messages rather than hard errors so
/// one broken file cannot hide problems in its siblings. Schema documents
/// (`*.schema.json`) are skipped.
pub fn validate_catalog_files(dirs: &[PathBuf]) -> Result<Vec<String>> {
    let mut errors = Vec::new();
    let json_files = find_json_files(dirs)?;
    for json_file in json_files {
        let data = match fs::read_to_string(&json_file) {
            Ok(data) => data,
            Err(err) => {
                errors.push(format!("{}: unable to read: {err}", json_file.display()));
                continue;
            }
        };

        let catalog: TenetCatalog = match serde_json::from_str(&data) {
            Ok(catalog) => catalog,
            Err(err) => {
                errors.push(format!("{}: invalid catalog: {err}", json_file.display()));
                continue;
            }
        };

        for violation in collect_violations(&catalog) {
            errors.push(format!("{}: {violation}", json_file.display()));
        }
    }
    Ok(errors)
}

fn find_json_files(dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for dir in dirs {
        collect_json(dir, &mut files)?;
    }
    files.sort();
    Ok(files)
}

fn collect_json(dir: &Path, acc: &mut Vec<PathBuf>) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_json(&path, acc)?;
        } else if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            if path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(".schema.json"))
            {
                continue;
            }
            acc.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn broken_catalog() -> TenetCatalog {
        serde_json::from_value(json!({
            "schema_version": "tenet_catalog_v1",
            "catalog": {"key": "principles_test_v1", "title": "Test", "labels": []},
            "scope": {
                "description": "Fixture.",
                "languages": {"javascript": "Modern JavaScript"}
            },
            "docs": {},
            "entries": [
                {
                    "id": "srp",
                    "title": "Single Responsibility Principle",
                    "summary": "  ",
                    "examples": [{"language": "fortran", "lines": []}],
                    "sources": [{"doc": "missing_doc"}]
                },
                {
                    "id": "srp",
                    "title": "Duplicate",
                    "summary": "Second entry reusing the id.",
                    "examples": [{"language": "javascript", "lines": ["x();"]}]
                }
            ]
        }))
        .expect("fixture parses")
    }

    #[test]
    fn collects_every_violation_instead_of_stopping() {
        let errors = collect_violations(&broken_catalog());
        let joined = errors.join("\n");
        assert!(joined.contains("empty summary"));
        assert!(joined.contains("undeclared language 'fortran'"));
        assert!(joined.contains("example with no lines"));
        assert!(joined.contains("unknown doc 'missing_doc'"));
        assert!(joined.contains("duplicate entry id srp"));
        assert!(errors.len() >= 5, "expected all violations, got {joined}");
    }

    #[test]
    fn sweeps_directories_and_skips_schema_documents() {
        let dir = TempDir::new().expect("allocate temp dir");
        fs::write(dir.path().join("broken.json"), "{ not json").expect("write broken file");
        fs::write(
            dir.path().join("tenet_catalog.schema.json"),
            "{\"type\": \"object\"}",
        )
        .expect("write schema file");

        let errors =
            validate_catalog_files(&[dir.path().to_path_buf()]).expect("sweep succeeds");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("broken.json"));
        assert!(errors[0].contains("invalid catalog"));
    }
}
