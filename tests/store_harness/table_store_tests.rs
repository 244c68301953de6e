//! Macro-generated contract suite for `TableStore` implementations.
//!
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//!
//! use store_harness::*;
//! use order_desk::storage::InMemoryTableStore;
//!
//! table_store_tests!(InMemoryTableStore::new());
//! ```
//!
//! `$factory` is re-evaluated for every test and must yield an empty store.

/// Generate the `TableStore` conformance suite.
#[macro_export]
macro_rules! table_store_tests {
    ($factory:expr) => {
        mod table_store_contract_tests {
            use super::*;
            use order_desk::core::order::{OrderId, OrderStatus, OrderTable};
            use order_desk::core::store::TableStore;

            #[tokio::test]
            async fn test_fresh_store_loads_empty_table() {
                let store = $factory;
                let table = store.load().await.unwrap();
                assert!(table.is_empty());
            }

            #[tokio::test]
            async fn test_save_then_load_returns_same_rows() {
                let store = $factory;
                let table = sample_table();
                store.save(&table).await.unwrap();

                let loaded = store.load().await.unwrap();
                assert_eq!(loaded, table);
            }

            #[tokio::test]
            async fn test_save_of_unmodified_load_is_a_no_op() {
                let store = $factory;
                store.save(&sample_table()).await.unwrap();

                let first = store.load().await.unwrap();
                store.save(&first).await.unwrap();
                let second = store.load().await.unwrap();

                assert_eq!(first, second);
            }

            #[tokio::test]
            async fn test_save_replaces_whole_table() {
                let store = $factory;
                store.save(&sample_table()).await.unwrap();

                let mut smaller = OrderTable::new();
                smaller.push(record("1", "Only", "2024-06-01", OrderStatus::Ready));
                store.save(&smaller).await.unwrap();

                let loaded = store.load().await.unwrap();
                assert_eq!(loaded.len(), 1);
                assert_eq!(loaded.get(OrderId(0)).unwrap().name, "Only");
            }

            #[tokio::test]
            async fn test_special_characters_survive() {
                let store = $factory;
                let mut table = OrderTable::new();
                let mut row = record("1", "Rao, Asha", "2024-05-01", OrderStatus::Pending);
                row.details = "Line one\nLine \"two\", with comma".to_string();
                table.push(row.clone());
                store.save(&table).await.unwrap();

                let loaded = store.load().await.unwrap();
                assert_eq!(loaded.get(OrderId(0)), Some(&row));
            }

            #[tokio::test]
            async fn test_every_status_survives() {
                let store = $factory;
                let rows = OrderStatus::ALL
                    .iter()
                    .map(|s| record("5", "Any", "2024-01-31", *s))
                    .collect();
                let table = OrderTable::from_rows(rows);
                store.save(&table).await.unwrap();

                let statuses: Vec<OrderStatus> = store
                    .load()
                    .await
                    .unwrap()
                    .rows()
                    .iter()
                    .map(|r| r.status)
                    .collect();
                assert_eq!(statuses, OrderStatus::ALL.to_vec());
            }

            #[tokio::test]
            async fn test_describe_is_not_empty() {
                let store = $factory;
                assert!(!store.describe().is_empty());
            }
        }
    };
}
