//! Tenet catalog wiring.
//!
//! This module wraps the JSON catalog under `catalog/tenets.json` so helpers
//! can load a validated snapshot and expose consistent identifiers. Types here
//! mirror the schema fields; callers use `CatalogIndex` for lookups by id or
//! position.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{CatalogKey, EntryId, EntrySnapshot, Language};
pub use index::{CatalogIndex, resolve_catalog_schema_path};
pub use model::{
    CatalogMetadata, CodeExample, DocRef, EntrySource, PrincipleEntry, Scope, TenetCatalog,
};

pub use model::load_catalog_from_path;
