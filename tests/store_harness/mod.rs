//! Shared test harness for table store and order service testing
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//! use store_harness::*;
//!
//! table_store_tests!(InMemoryTableStore::new());
//! order_service_tests!(InMemoryTableStore::new());
//! ```

#![allow(dead_code)]

pub mod order_service_tests;
pub mod table_store_tests;

use chrono::NaiveDate;
use std::path::PathBuf;

use order_desk::core::order::{NewOrder, OrderRecord, OrderStatus, OrderTable};

/// Path to a not-yet-existing CSV file in a fresh temporary directory
///
/// The directory is kept so the path stays valid for the whole test.
pub fn temp_csv_path() -> PathBuf {
    let dir = tempfile::tempdir().expect("tempdir").keep();
    dir.join("orders.csv")
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// The walkthrough order used across the suites
pub fn asha() -> NewOrder {
    NewOrder::new("9990001111", "Asha Rao", "Progressive lenses", "Tanya")
        .with_date(date("2024-05-01"))
}

pub fn new_order(mobile: &str, name: &str, day: &str) -> NewOrder {
    NewOrder::new(mobile, name, "Single vision", "Ajit").with_date(date(day))
}

pub fn record(mobile: &str, name: &str, day: &str, status: OrderStatus) -> OrderRecord {
    OrderRecord {
        mobile: mobile.to_string(),
        name: name.to_string(),
        date: date(day),
        details: "Frame + lenses".to_string(),
        status,
        salesperson: "Sonu".to_string(),
    }
}

/// Four orders, one per live status bucket plus a delivered one
pub fn sample_table() -> OrderTable {
    OrderTable::from_rows(vec![
        record("9990001111", "Asha Rao", "2024-05-01", OrderStatus::Pending),
        record("8880002222", "Ravi, Kumar", "2024-05-02", OrderStatus::OrderPlaced),
        record("7770003333", "Meera \"Mimi\" Shah", "2024-05-02", OrderStatus::SentForFitting),
        record("6660004444", "Dev", "2024-05-03", OrderStatus::Delivered),
    ])
}
