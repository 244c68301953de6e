//! HTTP handlers for the order desk
//!
//! Handlers are thin: they parse path and query input, call the
//! [`OrderService`] and shape the JSON reply. Every failure is an
//! [`OrderError`], which renders itself as a JSON error response.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::extract::ValidatedOrder;
use crate::config::AppConfig;
use crate::core::error::{OrderError, ValidationError};
use crate::core::lifecycle::{StatusView, WorkflowAction};
use crate::core::order::{OrderId, OrderRecord, OrderStatus};
use crate::core::query::{OrderEntry, QueryResult, SearchParams};
use crate::core::service::{OrderService, ViewCount};

/// Message returned with an empty search
pub const NO_MATCHES: &str = "No matching orders found.";

/// Application state shared across handlers
#[derive(Clone)]
pub struct OrderAppState {
    pub service: Arc<OrderService>,
    pub config: Arc<AppConfig>,
}

/// Landing page data
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub shop_name: String,
    pub salespersons: Vec<String>,
    pub statuses: Vec<&'static str>,
    pub views: Vec<ViewCount>,
}

/// A list of orders plus an optional note for the empty case
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<StatusView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'static str>,
    pub count: usize,
    pub orders: Vec<OrderEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OrderListResponse {
    fn search(result: QueryResult) -> Self {
        Self {
            view: None,
            title: None,
            count: result.len(),
            message: result.is_empty().then(|| NO_MATCHES.to_string()),
            orders: result.into_entries(),
        }
    }

    fn view(view: StatusView, result: QueryResult) -> Self {
        Self {
            view: Some(view),
            title: Some(view.title()),
            count: result.len(),
            message: result.is_empty().then(|| view.empty_message().to_string()),
            orders: result.into_entries(),
        }
    }
}

/// Result of a create or status change
#[derive(Debug, Serialize)]
pub struct OrderChangeResponse {
    pub message: String,
    pub order: OrderEntry,
}

/// Body of `PUT /orders/{id}/status`
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

fn parse_id(raw: &str) -> Result<OrderId, OrderError> {
    Ok(raw.parse::<OrderId>()?)
}

fn changed(id: OrderId, record: OrderRecord) -> OrderChangeResponse {
    OrderChangeResponse {
        message: format!("Status for {} updated to '{}'", record.name, record.status),
        order: OrderEntry::new(id, record),
    }
}

/// `GET /`
pub async fn dashboard(
    State(state): State<OrderAppState>,
) -> Result<Json<DashboardResponse>, OrderError> {
    let views = state.service.view_summary().await?;
    Ok(Json(DashboardResponse {
        shop_name: state.config.shop_name.clone(),
        salespersons: state.service.roster().names().to_vec(),
        statuses: OrderStatus::labels(),
        views,
    }))
}

/// `POST /orders`
pub async fn create_order(
    State(state): State<OrderAppState>,
    ValidatedOrder(order): ValidatedOrder,
) -> Result<Response, OrderError> {
    let entry = state.service.create_order(order).await?;
    let body = OrderChangeResponse {
        message: "Order added successfully!".to_string(),
        order: entry,
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// `GET /orders/{id}`
pub async fn get_order(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderEntry>, OrderError> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.get(id).await?))
}

/// `GET /orders/search?by=name|mobile|date&q=...`
pub async fn search_orders(
    State(state): State<OrderAppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<OrderListResponse>, OrderError> {
    let Query(params) = params.map_err(|e| ValidationError::InvalidRequest {
        message: e.body_text(),
    })?;
    let query = params.into_query()?;
    let result = state.service.query(&query).await?;
    Ok(Json(OrderListResponse::search(result)))
}

/// `GET /views/{view}`
pub async fn list_view(
    State(state): State<OrderAppState>,
    Path(view): Path<String>,
) -> Result<Json<OrderListResponse>, OrderError> {
    let view = view.parse::<StatusView>()?;
    let result = state.service.list_view(view).await?;
    Ok(Json(OrderListResponse::view(view, result)))
}

/// `PUT /orders/{id}/status`
pub async fn set_status(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
    body: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Result<Json<OrderChangeResponse>, OrderError> {
    let id = parse_id(&id)?;
    let Json(body) = body.map_err(|e| ValidationError::InvalidRequest {
        message: e.body_text(),
    })?;
    let status = body.status.parse::<OrderStatus>()?;

    let record = state.service.set_status(id, status).await?;
    Ok(Json(OrderChangeResponse {
        message: format!("Order {} updated to '{}'", id, record.status),
        order: OrderEntry::new(id, record),
    }))
}

async fn run_action(
    state: &OrderAppState,
    raw_id: &str,
    action: WorkflowAction,
) -> Result<Json<OrderChangeResponse>, OrderError> {
    let id = parse_id(raw_id)?;
    let record = state.service.apply_action(id, action).await?;
    Ok(Json(changed(id, record)))
}

/// `POST /orders/{id}/place`
pub async fn place_order(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderChangeResponse>, OrderError> {
    run_action(&state, &id, WorkflowAction::PlaceOrder).await
}

/// `POST /orders/{id}/ready`
pub async fn mark_ready(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderChangeResponse>, OrderError> {
    run_action(&state, &id, WorkflowAction::MarkReady).await
}

/// `POST /orders/{id}/deliver`
pub async fn mark_delivered(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderChangeResponse>, OrderError> {
    run_action(&state, &id, WorkflowAction::MarkDelivered).await
}
