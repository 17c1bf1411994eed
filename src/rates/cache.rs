//! Shared cache of loaded rate tables
//!
//! A table is reloaded only when its file's modification time changes.
//! Cached tables are handed out as `Arc<RateTable>` and never mutated, so
//! concurrent requests share one immutable snapshot.

use super::loader::load_rate_table_from_path;
use super::table::RateTable;
use crate::error::PricingError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

#[derive(Debug, Clone)]
struct CachedTable {
    modified: SystemTime,
    table: Arc<RateTable>,
}

/// Rate tables keyed by canonical path and modification time
#[derive(Debug)]
pub struct RateTableCache {
    delimiter: u8,
    entries: Mutex<HashMap<PathBuf, CachedTable>>,
}

impl RateTableCache {
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Current table for `path`, loading it if absent or stale
    pub fn get<P: AsRef<Path>>(&self, path: P) -> Result<Arc<RateTable>, PricingError> {
        let path = path.as_ref();
        let key = path
            .canonicalize()
            .map_err(|e| PricingError::source_unavailable(path, e))?;
        let modified = std::fs::metadata(&key)
            .and_then(|m| m.modified())
            .map_err(|e| PricingError::source_unavailable(path, e))?;

        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(cached) = entries.get(&key) {
            if cached.modified == modified {
                log::debug!("rate table cache hit for {}", key.display());
                return Ok(Arc::clone(&cached.table));
            }
            log::info!("rate table {} changed on disk, reloading", key.display());
        }

        let table = Arc::new(load_rate_table_from_path(&key, self.delimiter)?);
        entries.insert(
            key,
            CachedTable {
                modified,
                table: Arc::clone(&table),
            },
        );
        Ok(table)
    }

    /// Drop every cached table
    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RateTableCache {
    fn default() -> Self {
        Self::new(b',')
    }
}
