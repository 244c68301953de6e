//! Axum extractor for validated order intake

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::Value;

use super::handlers::OrderAppState;
use crate::core::error::{OrderError, ValidationError};
use crate::core::order::NewOrder;

/// A creation payload that already passed the order intake rules
///
/// ```rust,ignore
/// async fn create_order(
///     State(state): State<OrderAppState>,
///     ValidatedOrder(order): ValidatedOrder,
/// ) -> Result<Json<OrderEntry>, OrderError> { ... }
/// ```
pub struct ValidatedOrder(pub NewOrder);

impl FromRequest<OrderAppState> for ValidatedOrder {
    type Rejection = OrderError;

    async fn from_request(req: Request, state: &OrderAppState) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> =
            Json::from_request(req, state)
                .await
                .map_err(|e| ValidationError::InvalidRequest {
                    message: e.body_text(),
                })?;

        let order = NewOrder::from_payload(payload, state.service.roster())?;
        Ok(ValidatedOrder(order))
    }
}
