//! Order service: the single owner of the order table
//!
//! Every caller-facing operation lives here. Reads take a fresh snapshot of
//! the table; writes hold the service lock across load, mutate and save so
//! two updates can never be computed from the same stale copy.

use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::core::error::{EntityError, OrderError, OrderResult};
use crate::core::lifecycle::{StatusView, Transition, WorkflowAction};
use crate::core::order::{NewOrder, OrderId, OrderRecord, OrderStatus, OrderTable, Roster};
use crate::core::query::{OrderEntry, OrderQuery, QueryResult};
use crate::core::store::TableStore;

/// Number of orders currently in one workflow view
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ViewCount {
    pub view: StatusView,
    pub title: &'static str,
    pub count: usize,
}

/// Service over a [`TableStore`]
pub struct OrderService {
    store: Arc<dyn TableStore>,
    roster: Roster,
    lock: Mutex<()>,
}

impl OrderService {
    pub fn new(store: Arc<dyn TableStore>, roster: Roster) -> Self {
        Self {
            store,
            roster,
            lock: Mutex::new(()),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn store(&self) -> &Arc<dyn TableStore> {
        &self.store
    }

    async fn snapshot(&self) -> OrderResult<OrderTable> {
        let _guard = self.lock.lock().await;
        Ok(self.store.load().await?)
    }

    // === Creation ===

    /// Validate and append a new order, dated today unless a date is given
    pub async fn create_order(&self, new_order: NewOrder) -> OrderResult<OrderEntry> {
        self.create_order_on(new_order, Local::now().date_naive()).await
    }

    /// Same as [`create_order`](Self::create_order) with an explicit "today"
    pub async fn create_order_on(
        &self,
        new_order: NewOrder,
        today: NaiveDate,
    ) -> OrderResult<OrderEntry> {
        let new_order = new_order.validate(&self.roster).inspect_err(|e| {
            tracing::debug!(error = %e, "order rejected");
        })?;
        let record = new_order.into_record(today);

        let _guard = self.lock.lock().await;
        let mut table = self.store.load().await?;
        let id = table.push(record.clone());
        self.store.save(&table).await?;

        tracing::info!(
            id = %id,
            name = %record.name,
            status = %record.status,
            salesperson = %record.salesperson,
            "order created"
        );
        Ok(OrderEntry::new(id, record))
    }

    // === Queries ===

    pub async fn get(&self, id: OrderId) -> OrderResult<OrderEntry> {
        let table = self.snapshot().await?;
        table
            .get(id)
            .cloned()
            .map(|record| OrderEntry::new(id, record))
            .ok_or_else(|| EntityError::NotFound { id }.into())
    }

    pub async fn query(&self, query: &OrderQuery) -> OrderResult<QueryResult> {
        let table = self.snapshot().await?;
        let result = query.run(&table);
        tracing::debug!(?query, matches = result.len(), "order query");
        Ok(result)
    }

    pub async fn find_by_name(&self, needle: &str) -> OrderResult<QueryResult> {
        self.query(&OrderQuery::Name(needle.to_string())).await
    }

    pub async fn find_by_mobile(&self, needle: &str) -> OrderResult<QueryResult> {
        self.query(&OrderQuery::Mobile(needle.to_string())).await
    }

    pub async fn find_by_date(&self, date: NaiveDate) -> OrderResult<QueryResult> {
        self.query(&OrderQuery::Date(date)).await
    }

    pub async fn list_by_status_set(&self, statuses: &[OrderStatus]) -> OrderResult<QueryResult> {
        self.query(&OrderQuery::Statuses(statuses.to_vec())).await
    }

    /// Orders shown on one workflow screen
    pub async fn list_view(&self, view: StatusView) -> OrderResult<QueryResult> {
        self.query(&OrderQuery::view(view)).await
    }

    /// Per-view counts, from a single snapshot
    pub async fn view_summary(&self) -> OrderResult<Vec<ViewCount>> {
        let table = self.snapshot().await?;
        Ok(StatusView::ALL
            .iter()
            .map(|view| ViewCount {
                view: *view,
                title: view.title(),
                count: table.iter().filter(|(_, r)| view.contains(r.status)).count(),
            })
            .collect())
    }

    // === Transitions ===

    /// Administrative override: set any status regardless of the current one
    pub async fn set_status(&self, id: OrderId, status: OrderStatus) -> OrderResult<OrderRecord> {
        self.transition(id, Transition::Override(status)).await
    }

    /// Pending → Order Placed
    pub async fn mark_order_placed(&self, id: OrderId) -> OrderResult<OrderRecord> {
        self.transition(id, WorkflowAction::PlaceOrder.into()).await
    }

    /// Order Placed / Sent for Fitting → Ready
    pub async fn mark_ready(&self, id: OrderId) -> OrderResult<OrderRecord> {
        self.transition(id, WorkflowAction::MarkReady.into()).await
    }

    /// Ready → Delivered
    pub async fn mark_delivered(&self, id: OrderId) -> OrderResult<OrderRecord> {
        self.transition(id, WorkflowAction::MarkDelivered.into()).await
    }

    /// Apply a workflow action by value
    pub async fn apply_action(
        &self,
        id: OrderId,
        action: WorkflowAction,
    ) -> OrderResult<OrderRecord> {
        self.transition(id, action.into()).await
    }

    async fn transition(&self, id: OrderId, transition: Transition) -> OrderResult<OrderRecord> {
        let _guard = self.lock.lock().await;
        let mut table = self.store.load().await?;

        let record = table
            .get_mut(id)
            .ok_or(OrderError::Entity(EntityError::NotFound { id }))?;

        let from = transition.apply(id, record).inspect_err(|e| {
            tracing::warn!(error = %e, "transition rejected");
        })?;
        let updated = record.clone();

        self.store.save(&table).await?;

        tracing::info!(
            id = %id,
            from = %from,
            to = %updated.status,
            overridden = matches!(transition, Transition::Override(_)),
            "order status changed"
        );
        Ok(updated)
    }
}
