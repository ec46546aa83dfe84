use super::backend::StorageBackend;
use super::{from_document, to_document};
use crate::error::{Result, SnipzError};
use crate::model::Catalog;
use std::cell::RefCell;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Holds the serialized document rather than a `Catalog`, so tests go through
/// the same codec as the file backend. Uses `RefCell` for interior mutability
/// since snipz is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    document: RefCell<Option<String>>,
    saves: RefCell<usize>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds `document`, as if a file existed on disk.
    pub fn with_document(document: impl Into<String>) -> Self {
        let backend = Self::default();
        *backend.document.borrow_mut() = Some(document.into());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// The last document written (or seeded).
    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> Result<Catalog> {
        match self.document.borrow().as_deref() {
            Some(text) => from_document(text),
            None => Err(SnipzError::NotFound("catalog document".to_string())),
        }
    }

    fn save(&self, catalog: &Catalog) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(SnipzError::Store("Simulated write error".to_string()));
        }
        let text = to_document(catalog)?;
        *self.document.borrow_mut() = Some(text);
        *self.saves.borrow_mut() += 1;
        Ok(())
    }

    fn exists(&self) -> bool {
        self.document.borrow().is_some()
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://scripts.json")
    }
}
