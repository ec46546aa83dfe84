use super::backend::StorageBackend;
use super::{from_document, to_document};
use crate::error::{Result, SnipzError};
use crate::model::Catalog;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Replace `target` with `content` through `tmp_path` in the same directory.
/// The temp file is flushed to disk before the rename and removed on any failure.
pub(crate) fn write_atomically(tmp_path: &Path, target: &Path, content: &str) -> Result<()> {
    let attempt = || -> io::Result<()> {
        let mut file = File::create(tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(tmp_path, target)
    };
    attempt().map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        SnipzError::Io(e)
    })
}

pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(SnipzError::Io)?;
        }
        Ok(())
    }

    fn tmp_path(&self, dir: &Path) -> PathBuf {
        let stem = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("catalog");
        dir.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()))
    }
}

impl StorageBackend for FsBackend {
    fn load(&self) -> Result<Catalog> {
        if !self.path.exists() {
            return Err(SnipzError::NotFound(format!(
                "catalog file {}",
                self.path.display()
            )));
        }
        let content = fs::read_to_string(&self.path).map_err(SnipzError::Io)?;
        tracing::debug!(path = %self.path.display(), bytes = content.len(), "catalog loaded");
        from_document(&content)
    }

    fn save(&self, catalog: &Catalog) -> Result<()> {
        let dir = self.parent_dir();
        self.ensure_dir(&dir)?;

        let content = to_document(catalog)?;

        let tmp_path = self.tmp_path(&dir);
        write_atomically(&tmp_path, &self.path, &content)?;

        tracing::debug!(path = %self.path.display(), bytes = content.len(), "catalog saved");
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
