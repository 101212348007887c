//! File-backed record store: the whole catalog lives in one JSON array.

use super::{RecordStore, StoreError};
use crate::domain::model::Product;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    /// Writes the encoded document to a fresh temp file next to the target and syncs it.
    fn stage(&self, products: &[Product]) -> Result<NamedTempFile, StoreError> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir)
            .map_err(|e| StoreError::storage(format!("failed to create {}: {}", dir.display(), e)))?;

        let content = serde_json::to_string_pretty(products)
            .map_err(|e| StoreError::storage(format!("failed to encode products: {}", e)))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
            StoreError::storage(format!("failed to create temp file in {}: {}", dir.display(), e))
        })?;
        tmp.write_all(content.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| {
                StoreError::storage(format!("failed to write {}: {}", tmp.path().display(), e))
            })?;
        Ok(tmp)
    }

    fn write_document(&self, products: &[Product]) -> Result<(), StoreError> {
        self.stage(products)?.persist(&self.path).map_err(|e| {
            StoreError::storage(format!("failed to replace {}: {}", self.path.display(), e.error))
        })?;
        Ok(())
    }

    /// Creates the empty document unless another writer got there first.
    fn init_document(&self) -> Result<(), StoreError> {
        match self.stage(&[])?.persist_noclobber(&self.path) {
            Ok(_) => {
                tracing::info!(path = %self.path.display(), "products document missing, initialised empty");
                Ok(())
            }
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(StoreError::storage(format!(
                "failed to create {}: {}",
                self.path.display(),
                e.error
            ))),
        }
    }

    /// Reads the raw document; `None` when it does not exist.
    fn read_document(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::storage(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

impl RecordStore for JsonFileStore {
    fn load_all(&self) -> Result<Vec<Product>, StoreError> {
        let content = match self.read_document()? {
            Some(content) => content,
            None => {
                self.init_document()?;
                match self.read_document()? {
                    Some(content) => content,
                    None => return Ok(Vec::new()),
                }
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            StoreError::storage(format!("malformed document {}: {}", self.path.display(), e))
        })
    }

    fn replace_all(&self, products: &[Product]) -> Result<(), StoreError> {
        self.write_document(products)?;
        tracing::debug!(path = %self.path.display(), count = products.len(), "products document written");
        Ok(())
    }
}
