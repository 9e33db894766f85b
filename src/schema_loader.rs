//! Shared JSON Schema loader for the catalog contract.
//!
//! Callers load the on-disk schema, enforce the allowed `schema_version`
//! values, optionally patch the embedded `schema_version` const, and get back
//! a compiled validator. Keeping this in one place means the check/render
//! binaries and the index agree on how the contract file is interpreted.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// Result of loading and compiling a JSON Schema.
#[derive(Debug)]
pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
    pub raw: Arc<Value>,
}

/// Controls how schemas are normalized before compilation.
pub(crate) struct SchemaLoadOptions<'a> {
    /// Where to find the schema_version const inside the schema payload.
    pub schema_version_pointer: &'a str,
    /// Override schema_version when provided (used to align consts).
    pub expected_version: Option<&'a str>,
    /// Allowed schema_version values; enforced when present.
    pub allowed_versions: Option<&'a BTreeSet<String>>,
    /// Patch the schema_version const in the schema payload to match
    /// `expected_version` (or the extracted version when no override is set).
    pub patch_schema_version_const: bool,
}

impl<'a> Default for SchemaLoadOptions<'a> {
    fn default() -> Self {
        Self {
            schema_version_pointer: "/properties/schema_version/const",
            expected_version: None,
            allowed_versions: None,
            patch_schema_version_const: false,
        }
    }
}

pub(crate) fn load_json_schema(
    path: &Path,
    options: SchemaLoadOptions<'_>,
) -> Result<SchemaLoadResult> {
    let schema_value: Value = serde_json::from_reader(
        File::open(path).with_context(|| format!("opening schema {}", path.display()))?,
    )
    .with_context(|| format!("parsing schema {}", path.display()))?;

    let schema_version = if let Some(version) = options.expected_version {
        version.to_string()
    } else {
        extract_schema_version(&schema_value, options.schema_version_pointer)
            .ok_or_else(|| anyhow!("schema missing schema_version const"))?
    };

    if let Some(allowed) = options.allowed_versions {
        if !allowed.contains(&schema_version) {
            bail!(
                "schema_version '{}' not in allowed set {:?}",
                schema_version,
                allowed
            );
        }
    }

    let mut schema_for_compile = schema_value;
    if options.patch_schema_version_const {
        let target = schema_for_compile
            .pointer_mut(options.schema_version_pointer)
            .ok_or_else(|| {
                anyhow!(
                    "schema missing pointer {} for schema_version const",
                    options.schema_version_pointer
                )
            })?;
        *target = Value::String(schema_version.clone());
    }

    let raw = Arc::new(schema_for_compile);
    let raw_static: &'static Value = unsafe { &*(Arc::as_ptr(&raw)) };
    let compiled = JSONSchema::compile(raw_static)
        .with_context(|| format!("compiling schema {}", path.display()))?;

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
        raw,
    })
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}
