//! Route table for the order desk

use axum::{
    Router,
    routing::{get, post, put},
};

use super::handlers::{self, OrderAppState};

/// Build every order route, already bound to `state`
pub fn build_order_routes(state: OrderAppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/orders", post(handlers::create_order))
        .route("/orders/search", get(handlers::search_orders))
        .route("/orders/{id}", get(handlers::get_order))
        .route("/orders/{id}/status", put(handlers::set_status))
        .route("/orders/{id}/place", post(handlers::place_order))
        .route("/orders/{id}/ready", post(handlers::mark_ready))
        .route("/orders/{id}/deliver", post(handlers::mark_delivered))
        .route("/views/{view}", get(handlers::list_view))
        .with_state(state)
}
