//! Admin API for inspecting the running restriction engine.
//!
//! # Endpoints
//! - `GET /admin/status`  — version, enforcement status, route counts
//! - `GET /admin/rules`   — every loaded rule with its resolved routes
//! - `GET /admin/routes/preview?target=…` — dry-run target resolution
//!
//! All endpoints require `Authorization: Bearer <api_key>`.

pub mod auth;
pub mod handlers;

use axum::{middleware, routing::get, Router};

use crate::http::server::AppState;

/// Build the admin router with authentication applied.
pub fn setup_admin_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/status", get(handlers::get_status))
        .route("/admin/rules", get(handlers::get_rules))
        .route("/admin/routes/preview", get(handlers::preview_routes))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::admin_auth_middleware,
        ))
        .with_state(state)
}
