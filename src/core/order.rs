//! Order entity model: the record schema, workflow status and staff roster

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::ValidationError;

/// Canonical on-disk and on-wire date format (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Staff roster used when no configuration overrides it
pub const DEFAULT_SALESPERSONS: &[&str] = &["Sukrit", "Tanya", "Ajit", "Param", "Parveen", "Sonu"];

/// Stable identifier of an order inside the table
///
/// This is the row position assigned when the order was appended. Rows are
/// never removed or reordered, so an id keeps pointing at the same order for
/// as long as the table lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub usize);

impl OrderId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('#');
        trimmed
            .parse::<usize>()
            .map(OrderId)
            .map_err(|_| ValidationError::InvalidId {
                value: s.to_string(),
            })
    }
}

/// Position of an order in the fulfillment workflow
///
/// The workflow is a single forward path:
/// `Pending → Order Placed → Sent for Fitting → Ready → Delivered`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "Order Placed")]
    OrderPlaced,
    #[serde(rename = "Sent for Fitting")]
    SentForFitting,
    #[serde(rename = "Ready")]
    Ready,
    #[serde(rename = "Delivered")]
    Delivered,
}

impl OrderStatus {
    /// Every status, in workflow order
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::OrderPlaced,
        OrderStatus::SentForFitting,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ];

    /// Human-readable label, also the value stored in the table
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::OrderPlaced => "Order Placed",
            OrderStatus::SentForFitting => "Sent for Fitting",
            OrderStatus::Ready => "Ready",
            OrderStatus::Delivered => "Delivered",
        }
    }

    /// All labels, in workflow order
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    /// Parse a status label, ignoring case and surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::InvalidStatus {
                value: s.to_string(),
            })
    }
}

/// One customer order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub mobile: String,
    pub name: String,
    pub date: NaiveDate,
    pub details: String,
    pub status: OrderStatus,
    pub salesperson: String,
}

impl OrderRecord {
    /// Date rendered in the canonical `YYYY-MM-DD` form
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Creation input for a new order
///
/// Values are accepted as supplied by the caller and checked by
/// [`NewOrder::validate`] before anything touches the table. `date` defaults
/// to today and `status` to [`OrderStatus::Pending`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub salesperson: String,
}

impl NewOrder {
    pub fn new(
        mobile: impl Into<String>,
        name: impl Into<String>,
        details: impl Into<String>,
        salesperson: impl Into<String>,
    ) -> Self {
        Self {
            mobile: mobile.into(),
            name: name.into(),
            date: None,
            details: details.into(),
            status: None,
            salesperson: salesperson.into(),
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Build the record that will be appended, filling in defaults
    pub(crate) fn into_record(self, today: NaiveDate) -> OrderRecord {
        OrderRecord {
            mobile: self.mobile,
            name: self.name,
            date: self.date.unwrap_or(today),
            details: self.details,
            status: self.status.unwrap_or_default(),
            salesperson: self.salesperson,
        }
    }
}

/// Fixed list of staff who can be credited with an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(Vec<String>);

impl Roster {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Exact, case-sensitive membership
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(DEFAULT_SALESPERSONS.iter().copied())
    }
}

/// The whole order table, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderTable {
    rows: Vec<OrderRecord>,
}

impl OrderTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<OrderRecord>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: OrderId) -> Option<&OrderRecord> {
        self.rows.get(id.index())
    }

    pub fn get_mut(&mut self, id: OrderId) -> Option<&mut OrderRecord> {
        self.rows.get_mut(id.index())
    }

    /// Append a record and return the id it was assigned
    pub fn push(&mut self, record: OrderRecord) -> OrderId {
        self.rows.push(record);
        OrderId(self.rows.len() - 1)
    }

    /// Iterate rows with their ids, ascending
    pub fn iter(&self) -> impl Iterator<Item = (OrderId, &OrderRecord)> {
        self.rows.iter().enumerate().map(|(i, r)| (OrderId(i), r))
    }

    pub fn rows(&self) -> &[OrderRecord] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> OrderRecord {
        OrderRecord {
            mobile: "9990001111".to_string(),
            name: name.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            details: "Progressive lenses".to_string(),
            status: OrderStatus::Pending,
            salesperson: "Tanya".to_string(),
        }
    }

    #[test]
    fn test_status_labels_follow_workflow_order() {
        assert_eq!(
            OrderStatus::labels(),
            vec!["Pending", "Order Placed", "Sent for Fitting", "Ready", "Delivered"]
        );
    }

    #[test]
    fn test_status_parse_ignores_case_and_whitespace() {
        assert_eq!(
            "  order placed ".parse::<OrderStatus>().unwrap(),
            OrderStatus::OrderPlaced
        );
        assert_eq!(
            "SENT FOR FITTING".parse::<OrderStatus>().unwrap(),
            OrderStatus::SentForFitting
        );
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        let err = "Shipped".parse::<OrderStatus>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidStatus { .. }));
    }

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_string(&OrderStatus::SentForFitting).unwrap();
        assert_eq!(json, "\"Sent for Fitting\"");
    }

    #[test]
    fn test_order_id_parse() {
        assert_eq!("3".parse::<OrderId>().unwrap(), OrderId(3));
        assert_eq!("#12".parse::<OrderId>().unwrap(), OrderId(12));
        assert!("abc".parse::<OrderId>().is_err());
        assert!("-1".parse::<OrderId>().is_err());
    }

    #[test]
    fn test_table_push_assigns_sequential_ids() {
        let mut table = OrderTable::new();
        assert_eq!(table.push(record("A")), OrderId(0));
        assert_eq!(table.push(record("B")), OrderId(1));
        assert_eq!(table.get(OrderId(1)).unwrap().name, "B");
        assert!(table.get(OrderId(2)).is_none());

        let ids: Vec<OrderId> = table.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![OrderId(0), OrderId(1)]);
    }

    #[test]
    fn test_new_order_defaults() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let record = NewOrder::new("1", "n", "d", "Sonu").into_record(today);
        assert_eq!(record.date, today);
        assert_eq!(record.status, OrderStatus::Pending);
    }

    #[test]
    fn test_default_roster() {
        let roster = Roster::default();
        assert!(roster.contains("Tanya"));
        assert!(!roster.contains("tanya"));
        assert_eq!(roster.names().len(), 6);
    }
}
