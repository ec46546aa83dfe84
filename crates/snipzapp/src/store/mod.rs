//! # Storage Layer
//!
//! Storage is split in two:
//!
//! 1. **Backends** ([`backend::StorageBackend`]): the raw "how". Read the whole
//!    catalog document, write the whole catalog document. Nothing else.
//! 2. **The catalog store** ([`catalog_store::CatalogStore`]): the "what". Owns
//!    the in-memory [`Catalog`], checks invariants, and writes through the backend
//!    after every successful mutation.
//!
//! ## Write-After-Mutate
//!
//! There is no lazy flushing or batching. Each mutating call on the catalog
//! store writes the *entire* document before it returns. If that write fails the
//! in-memory change stays (memory is the source of truth once loaded) and the
//! error is handed back so the caller can retry with
//! [`catalog_store::CatalogStore::persist`].
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: a single JSON file, replaced atomically
//!   (write to a temp file in the same directory, then rename).
//! - [`mem_backend::MemBackend`]: keeps the serialized document in memory, for
//!   tests. It can simulate write failures.
//!
//! ## Document Format
//!
//! [`to_document`] and [`from_document`] are the only codec. Output is pretty
//! printed with four-space indentation, non-ASCII is written as-is and there is
//! no trailing newline, so a document in that format survives
//! `to_document(from_document(doc))` byte for byte.
//!
//! [`from_document`] also rejects documents the store could never have written:
//! an empty category name, a script with an empty name or value, or two scripts
//! sharing a name within one category.

use crate::error::{Result, SnipzError};
use crate::model::Catalog;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

pub mod backend;
pub mod catalog_store;
pub mod fs_backend;
pub mod mem_backend;

/// Document written on first start.
pub const EMPTY_DOCUMENT: &str = "{}";

pub fn to_document(catalog: &Catalog) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    catalog.serialize(&mut serializer)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn from_document(text: &str) -> Result<Catalog> {
    let catalog: Catalog = serde_json::from_str(text)?;
    check_loaded(&catalog)?;
    Ok(catalog)
}

fn check_loaded(catalog: &Catalog) -> Result<()> {
    for category in catalog.categories() {
        if category.name.is_empty() {
            return Err(SnipzError::Validation(
                "catalog document has a category with an empty name".to_string(),
            ));
        }
        for (index, script) in category.scripts.iter().enumerate() {
            if script.name.is_empty() || script.value.is_empty() {
                return Err(SnipzError::Validation(format!(
                    "script #{} in \"{}\" has an empty name or value",
                    index + 1,
                    category.name
                )));
            }
            if category.scripts[..index].iter().any(|s| s.name == script.name) {
                return Err(SnipzError::Validation(format!(
                    "\"{}\" holds two scripts named \"{}\"",
                    category.name, script.name
                )));
            }
        }
    }
    Ok(())
}
