//! Core module: the order model, lifecycle rules, queries and the service
//! that owns the table

pub mod error;
pub mod lifecycle;
pub mod order;
pub mod query;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{OrderError, OrderResult};
pub use lifecycle::{StatusView, Transition, WorkflowAction, available_actions};
pub use order::{NewOrder, OrderId, OrderRecord, OrderStatus, OrderTable, Roster};
pub use query::{OrderEntry, OrderQuery, QueryResult, SearchField, SearchParams};
pub use service::{OrderService, ViewCount};
pub use store::TableStore;
