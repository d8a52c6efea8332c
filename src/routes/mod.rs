//! HTTP route handlers.
//!
//! The route table is built once in `create_router`. Every response is marked
//! `Cache-Control: no-store`: the health check must always be fresh and the
//! persist endpoint has a side effect on every call.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod database;
pub mod health;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_NO_STORE;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with both routes.
pub fn create_router(state: AppState) -> Router {
    // Health check - stateless, never touches storage
    let health_routes = Router::new().route("/", get(health::health));

    // Persist-and-report - one write per GET. axum would otherwise serve HEAD
    // through the GET handler, so HEAD gets its own refusal.
    let database_routes = Router::new().route(
        "/database",
        get(database::save_demo_person).head(database::refuse_head),
    );

    Router::new()
        .merge(health_routes)
        .merge(database_routes)
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
