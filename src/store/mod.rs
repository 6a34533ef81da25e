//! Storage backend for configuration files.
//!
//! Paths handed to a [`ConfigStore`] are relative, `/` separated and rooted at
//! the store, e.g. `atcf/config/fixsites.dat`.

use crate::error::StoreError;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::fs;

/// Directory holding the legacy and XML configuration files
pub const ATCF_CONFIG_DIR: &str = "atcf/config";

/// Objective aid profiles
pub const PROFILE_DIR: &str = "atcf/config/profile";

pub const TEMPLATE_DIR: &str = "atcf/config/templates";

pub const JSON_DIR: &str = "atcf/config/json";

pub const GEOGRAPHY_DIR: &str = "atcf/config/geography";

/// Join a store directory and a file name
pub fn store_path(dir: &str, file: &str) -> String {
    if dir.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", dir.trim_end_matches('/'), file)
    }
}

/// Read/write access to configuration files
#[cfg_attr(test, mockall::automock)]
pub trait ConfigStore: Send + Sync {
    /// File contents, `None` when the file does not exist
    fn read(&self, path: &str) -> Result<Option<String>, StoreError>;

    /// Create or replace a file, creating parent directories as needed
    fn write(&self, path: &str, contents: &str) -> Result<(), StoreError>;

    /// Remove a file, returning whether it existed
    fn delete(&self, path: &str) -> Result<bool, StoreError>;

    /// Sorted names of the files directly in `dir` ending with `suffix`
    fn list(&self, dir: &str, suffix: &str) -> Result<Vec<String>, StoreError>;

    /// Absolute location of a store path, if the store is file backed
    fn locate(&self, _path: &str) -> Option<Utf8PathBuf> {
        None
    }
}

/// A store rooted at one directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: Utf8PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Map a store path below the root, rejecting absolute paths and `..`
    fn resolve(&self, path: &str) -> Result<Utf8PathBuf, StoreError> {
        let relative = Utf8Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Utf8Component::Normal(_) | Utf8Component::CurDir));
        if path.is_empty() || escapes {
            return Err(StoreError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl ConfigStore for DirectoryStore {
    fn read(&self, path: &str) -> Result<Option<String>, StoreError> {
        let full = self.resolve(path)?;
        if !full.is_file() {
            return Ok(None);
        }
        fs::read_to_string(&full)
            .map(Some)
            .map_err(|source| StoreError::Read {
                path: full.to_string(),
                source,
            })
    }

    fn write(&self, path: &str, contents: &str) -> Result<(), StoreError> {
        let full = self.resolve(path)?;
        let write_error = |source| StoreError::Write {
            path: full.to_string(),
            source,
        };
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(&full, contents).map_err(write_error)?;
        tracing::debug!("Wrote {} bytes to {}", contents.len(), full);
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<bool, StoreError> {
        let full = self.resolve(path)?;
        if !full.is_file() {
            return Ok(false);
        }
        fs::remove_file(&full).map_err(|source| StoreError::Delete {
            path: full.to_string(),
            source,
        })?;
        Ok(true)
    }

    fn list(&self, dir: &str, suffix: &str) -> Result<Vec<String>, StoreError> {
        let full = self.resolve(dir)?;
        if !full.is_dir() {
            return Ok(Vec::new());
        }
        let list_error = |source| StoreError::List {
            dir: full.to_string(),
            source,
        };

        let mut names = Vec::new();
        for entry in full.read_dir_utf8().map_err(list_error)? {
            let entry = entry.map_err(list_error)?;
            let is_file = entry.file_type().map_err(list_error)?.is_file();
            if is_file && entry.file_name().ends_with(suffix) {
                names.push(entry.file_name().to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn locate(&self, path: &str) -> Option<Utf8PathBuf> {
        self.resolve(path).ok()
    }
}
