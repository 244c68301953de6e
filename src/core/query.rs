//! Order lookups: name, mobile, date and status-set queries
//!
//! Queries run over a snapshot of the table and never fail; an empty
//! [`QueryResult`] is an ordinary outcome the caller reports as
//! "no matching orders".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::error::ValidationError;
use crate::core::lifecycle::{StatusView, WorkflowAction, available_actions};
use crate::core::order::{DATE_FORMAT, OrderId, OrderRecord, OrderStatus, OrderTable};

/// A lookup over the order table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderQuery {
    /// Name contains the needle, case-insensitive
    Name(String),
    /// Mobile contains the needle
    Mobile(String),
    /// Date equals exactly
    Date(NaiveDate),
    /// Status is one of the set
    Statuses(Vec<OrderStatus>),
}

impl OrderQuery {
    pub fn view(view: StatusView) -> Self {
        OrderQuery::Statuses(view.statuses().to_vec())
    }

    /// Whether `record` satisfies this query
    ///
    /// An empty (or all-whitespace) substring needle matches nothing.
    pub fn matches(&self, record: &OrderRecord) -> bool {
        match self {
            OrderQuery::Name(needle) => {
                let needle = needle.trim().to_lowercase();
                !needle.is_empty() && record.name.to_lowercase().contains(&needle)
            }
            OrderQuery::Mobile(needle) => {
                let needle = needle.trim();
                !needle.is_empty() && record.mobile.contains(needle)
            }
            OrderQuery::Date(date) => record.date == *date,
            OrderQuery::Statuses(statuses) => statuses.contains(&record.status),
        }
    }

    /// Run against `table`, keeping table order
    pub fn run(&self, table: &OrderTable) -> QueryResult {
        let entries = table
            .iter()
            .filter(|(_, record)| self.matches(record))
            .map(|(id, record)| OrderEntry::new(id, record.clone()))
            .collect();
        QueryResult { entries }
    }
}

/// One matching order together with the workflow actions it currently allows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderEntry {
    pub id: OrderId,
    #[serde(flatten)]
    pub order: OrderRecord,
    pub actions: Vec<WorkflowAction>,
}

impl OrderEntry {
    pub fn new(id: OrderId, order: OrderRecord) -> Self {
        let actions = available_actions(order.status);
        Self { id, order, actions }
    }
}

/// Matches of a query, ascending by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    entries: Vec<OrderEntry>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[OrderEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<OrderEntry> {
        self.entries
    }

    pub fn ids(&self) -> Vec<OrderId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrderEntry> {
        self.entries.iter()
    }
}

/// Which field a search screen looks in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Name,
    Mobile,
    Date,
}

/// Query string parameters of the search endpoint
///
/// # Example
/// ```text
/// GET /orders/search?by=name&q=asha
/// GET /orders/search?by=mobile&q=999
/// GET /orders/search?by=date&q=2024-05-01
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub by: SearchField,

    #[serde(default)]
    pub q: String,
}

impl SearchParams {
    /// Turn the raw parameters into a query, parsing the date if needed
    pub fn into_query(self) -> Result<OrderQuery, ValidationError> {
        match self.by {
            SearchField::Name => Ok(OrderQuery::Name(self.q)),
            SearchField::Mobile => Ok(OrderQuery::Mobile(self.q)),
            SearchField::Date => parse_date(&self.q).map(OrderQuery::Date),
        }
    }
}

/// Parse a canonical `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            value: value.to_string(),
        }
    })
}
