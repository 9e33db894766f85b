//! Coverage accounting between declared languages and authored entries.
//!
//! Helpers here build a language→entry mapping used by the list/check
//! binaries to identify declared language tags that no example exercises.

use crate::catalog::CatalogIndex;
use anyhow::{Result, anyhow, bail};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
/// Whether a declared language has one or more examples plus the entries using it.
pub struct LanguageCoverage {
    pub has_example: bool,
    pub entry_ids: Vec<String>,
}

/// Build a mapping of declared language tag to entry coverage.
///
/// Rejects language tags missing from the scope declaration so regressions in
/// catalog validation surface immediately. Duplicate entry ids per language
/// are deduplicated but kept sorted for deterministic output.
pub fn build_language_coverage(
    index: &CatalogIndex,
) -> Result<BTreeMap<String, LanguageCoverage>> {
    let mut map: BTreeMap<String, LanguageCoverage> = index
        .catalog()
        .scope
        .languages
        .keys()
        .map(|tag| {
            (
                tag.clone(),
                LanguageCoverage {
                    has_example: false,
                    entry_ids: Vec::new(),
                },
            )
        })
        .collect();

    for entry in index.entries() {
        for example in &entry.examples {
            let tag = example.language.as_str();
            let coverage = map.get_mut(tag).ok_or_else(|| {
                anyhow!("entry {} uses undeclared language '{tag}'", entry.id.0)
            })?;
            coverage.has_example = true;
            if !coverage.entry_ids.contains(&entry.id.0) {
                coverage.entry_ids.push(entry.id.0.clone());
                coverage.entry_ids.sort();
            }
        }
    }

    Ok(map)
}

/// Declared language tags that no example exercises.
pub fn unused_languages(coverage: &BTreeMap<String, LanguageCoverage>) -> Vec<String> {
    coverage
        .iter()
        .filter(|(_, entry)| !entry.has_example)
        .map(|(tag, _)| tag.clone())
        .collect()
}

/// Sanity-check that the coverage map accounts for every declared language.
pub fn validate_coverage_against_scope(
    coverage: &BTreeMap<String, LanguageCoverage>,
    index: &CatalogIndex,
) -> Result<()> {
    for tag in index.catalog().scope.languages.keys() {
        if !coverage.contains_key(tag) {
            bail!("coverage map missing entry for '{tag}'");
        }
    }
    Ok(())
}
