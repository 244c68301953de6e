//! In-memory implementation of TableStore for testing and development

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::core::error::StorageError;
use crate::core::order::OrderTable;
use crate::core::store::TableStore;

/// In-memory table store
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// clones share the same table.
#[derive(Clone, Default)]
pub struct InMemoryTableStore {
    table: Arc<RwLock<OrderTable>>,
    saves: Arc<AtomicUsize>,
}

impl InMemoryTableStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `table`
    pub fn with_table(table: OrderTable) -> Self {
        Self {
            table: Arc::new(RwLock::new(table)),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of completed saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TableStore for InMemoryTableStore {
    async fn load(&self) -> Result<OrderTable, StorageError> {
        let table = self.table.read().map_err(|e| StorageError::Poisoned {
            message: e.to_string(),
        })?;

        Ok(table.clone())
    }

    async fn save(&self, table: &OrderTable) -> Result<(), StorageError> {
        let mut current = self.table.write().map_err(|e| StorageError::Poisoned {
            message: e.to_string(),
        })?;

        *current = table.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
