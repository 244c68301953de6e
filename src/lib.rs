//! # Order Desk
//!
//! Order tracking for a single-store optics shop.
//!
//! ## Features
//!
//! - **CSV Table**: Orders live in one human-editable CSV file, rewritten atomically
//! - **Intake Validation**: Required fields, a fixed salesperson roster and canonical dates
//! - **Search**: By customer name, mobile number or order date
//! - **Fixed Workflow**: `Pending → Order Placed → Sent for Fitting → Ready → Delivered`,
//!   with gated forward actions and an administrative override
//! - **Serialized Writes**: One `OrderService` owns the table and orders every
//!   load-mutate-save sequence
//! - **REST Exposure**: Axum routes for every operation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use order_desk::prelude::*;
//!
//! let service = OrderService::new(
//!     Arc::new(CsvTableStore::new("orders.csv")),
//!     Roster::default(),
//! );
//!
//! let entry = service
//!     .create_order(NewOrder::new("9990001111", "Asha Rao", "Progressive lenses", "Tanya"))
//!     .await?;
//!
//! service.mark_order_placed(entry.id).await?;
//! let ready_eligible = service.list_view(StatusView::ReadyEligible).await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{
            ConfigError, EntityError, FieldValidationError, OrderError, OrderResult,
            StorageError, ValidationError,
        },
        lifecycle::{StatusView, Transition, WorkflowAction, available_actions},
        order::{NewOrder, OrderId, OrderRecord, OrderStatus, OrderTable, Roster},
        query::{OrderEntry, OrderQuery, QueryResult, SearchField, SearchParams},
        service::{OrderService, ViewCount},
        store::TableStore,
    };

    // === Storage ===
    pub use crate::storage::{CsvTableStore, InMemoryTableStore};

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{RestExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
