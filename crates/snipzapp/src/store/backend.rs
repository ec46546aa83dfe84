use crate::error::Result;
use crate::model::Catalog;
use std::path::PathBuf;

/// Abstract interface for raw catalog I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while CatalogStore handles the "what" (invariants, write-after-mutate).
pub trait StorageBackend {
    /// Read the whole catalog.
    /// Returns `SnipzError::NotFound` if no document exists yet; never invents data.
    fn load(&self) -> Result<Catalog>;

    /// Replace the whole document with `catalog`.
    /// MUST be atomic (e.g. write to tmp then rename) so readers never see a partial file.
    fn save(&self, catalog: &Catalog) -> Result<()>;

    /// Whether a document exists yet.
    fn exists(&self) -> bool;

    /// Where the document lives.
    /// For FsBackend, this is the real path. For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}
