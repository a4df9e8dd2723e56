//! In-memory table store with swap-and-publish reload.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use super::error::DataError;
use super::loader::load_tables;
use super::provider::{TableProvider, Tables};

/// Holds the published table snapshot.
///
/// Readers clone the inner `Arc` and never block each other; a reload builds
/// the new snapshot entirely outside the lock and swaps the pointer, so
/// requests in flight keep reading the snapshot they started with.
pub struct TableStore {
    inner: RwLock<Arc<Tables>>,
}

impl TableStore {
    pub fn new(tables: Tables) -> Self {
        Self {
            inner: RwLock::new(Arc::new(tables)),
        }
    }

    /// Load from a CSV directory and publish the result.
    pub fn from_dir(dir: &Path) -> Result<Self, DataError> {
        Ok(Self::new(load_tables(dir)?))
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<Tables> {
        Arc::clone(&self.inner.read())
    }

    /// Publish a new snapshot, replacing the current one.
    pub fn publish(&self, tables: Tables) {
        *self.inner.write() = Arc::new(tables);
    }

    /// Reload from a CSV directory. The old snapshot stays published if the
    /// load fails.
    pub fn reload_from_dir(&self, dir: &Path) -> Result<(), DataError> {
        let tables = load_tables(dir)?;
        self.publish(tables);
        Ok(())
    }
}

impl TableProvider for TableStore {
    fn tables(&self) -> Arc<Tables> {
        self.snapshot()
    }
}
