//! Integration tests for InMemoryTableStore using the store test harness.
//!
//! This file invokes `table_store_tests!` and `order_service_tests!` to
//! validate that InMemoryTableStore fully conforms to the TableStore contract.

#[macro_use]
mod store_harness;

use order_desk::storage::InMemoryTableStore;
use store_harness::*;

table_store_tests!(InMemoryTableStore::new());
order_service_tests!(InMemoryTableStore::new());
