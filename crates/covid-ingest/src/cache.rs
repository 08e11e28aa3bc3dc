//! Explicit memoization of loaded datasets.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::debug;

use crate::dataset::Dataset;
use crate::error::{LoadError, Result};
use crate::loader::load_dataset;
use crate::options::LoadOptions;

#[derive(Debug)]
struct CacheEntry {
    modified: Option<SystemTime>,
    options: LoadOptions,
    dataset: Arc<Dataset>,
}

/// Owned cache of datasets keyed by path and modification time.
///
/// A cached dataset is reused only while the file's modification time and
/// the load options are unchanged. Nothing is shared between caches.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached dataset for `path`, loading it on a miss.
    pub fn get_or_load(&mut self, path: &Path, options: &LoadOptions) -> Result<Arc<Dataset>> {
        let key = cache_key(path);
        let modified = modification_time(path)?;
        if let Some(entry) = self.entries.get(&key)
            && entry.modified == modified
            && entry.options == *options
        {
            debug!(path = %key.display(), "dataset cache hit");
            return Ok(Arc::clone(&entry.dataset));
        }

        debug!(path = %key.display(), "dataset cache miss");
        let dataset = Arc::new(load_dataset(path, options)?);
        self.entries.insert(
            key,
            CacheEntry {
                modified,
                options: options.clone(),
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    /// Drops the entry for `path`. Returns true if one was cached.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(&cache_key(path)).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn cache_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn modification_time(path: &Path) -> Result<Option<SystemTime>> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    Ok(metadata.modified().ok())
}
