//! Storage trait for the order table

use async_trait::async_trait;

use crate::core::error::StorageError;
use crate::core::order::OrderTable;

/// Whole-table persistence for orders
///
/// There are no partial updates: every mutation is "load the full table,
/// change it in memory, save the full table". Implementations must make
/// `save` atomic from a reader's point of view, and `load` must create an
/// empty table when none exists yet.
///
/// Callers should not drive a store directly when writes may overlap; go
/// through [`OrderService`](crate::core::service::OrderService), which
/// serialises load-mutate-save sequences.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Read the entire table
    async fn load(&self) -> Result<OrderTable, StorageError>;

    /// Replace the entire table
    async fn save(&self, table: &OrderTable) -> Result<(), StorageError>;

    /// Short description for logs (backend and location)
    fn describe(&self) -> String;
}
