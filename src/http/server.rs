//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the Axum router from the configured route table
//! - Apply the restriction gate to matched routes only
//! - Wire up middleware (timeout, tracing, request ID)
//! - Swap in a rebuilt engine on config reload
//!
//! # Design Decisions
//! - The route set is fixed at startup; reloads only rebuild rules and
//!   settings. Changing routes needs a restart, and reload logs when the
//!   new file differs.
//! - The engine lives behind an ArcSwap so in-flight requests keep the
//!   snapshot they started with.

use arc_swap::ArcSwap;
use axum::{
    extract::{MatchedPath, State},
    middleware,
    response::IntoResponse,
    routing::any,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin;
use crate::config::schema::WardenConfig;
use crate::http::middleware::gate::restriction_gate;
use crate::observability::diagnostics::TracingSink;
use crate::observability::metrics;
use crate::restrict::engine::RestrictionEngine;
use crate::restrict::rules::ConfigRuleStore;
use crate::routing::table::RouteTable;

/// Application state injected into handlers and the gate.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ArcSwap<RestrictionEngine>>,
    pub table: Arc<RouteTable>,
    pub config: Arc<WardenConfig>,
}

/// HTTP server for the route warden.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: WardenConfig) -> Self {
        let table = Arc::new(RouteTable::from_entries(config.routes.clone()));
        let engine = RestrictionEngine::build(
            &ConfigRuleStore::new(config.rules.clone()),
            config.settings,
            &table,
            &TracingSink,
        );
        tracing::info!(
            routes = table.len(),
            rules = engine.resolved_rules().len(),
            governed_routes = engine.governed_route_names().len(),
            "Restriction engine built"
        );

        let state = AppState {
            engine: Arc::new(ArcSwap::from_pointee(engine)),
            table,
            config: Arc::new(config),
        };
        let router = Self::build_router(&state);
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: &AppState) -> Router {
        let mut protected = Router::new();
        for entry in state.table.iter() {
            protected = protected.route(&entry.path, any(route_handler));
        }
        // route_layer: the gate only runs on matched routes, so unrouted
        // requests get a plain 404 and are never denied.
        let protected = protected
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                restriction_gate,
            ))
            .with_state(state.clone());

        let mut router = Router::new().merge(protected);
        if state.config.admin.enabled {
            router = router.merge(admin::setup_admin_router(state.clone()));
        }

        router
            .layer(TimeoutLayer::new(Duration::from_secs(
                state.config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Apply configuration updates from the watcher.
    ///
    /// Rules and settings are rebuilt against the running route table and
    /// swapped atomically.
    pub fn spawn_reload_task(&self, mut updates: mpsc::UnboundedReceiver<WardenConfig>) {
        let engine = self.state.engine.clone();
        let table = self.state.table.clone();
        tokio::spawn(async move {
            while let Some(new_config) = updates.recv().await {
                if new_config.routes != table.entries() {
                    tracing::warn!("Route table changed on disk; restart to serve new routes");
                }
                let rebuilt = RestrictionEngine::build(
                    &ConfigRuleStore::new(new_config.rules.clone()),
                    new_config.settings,
                    &table,
                    &TracingSink,
                );
                tracing::info!(
                    rules = rebuilt.resolved_rules().len(),
                    governed_routes = rebuilt.governed_route_names().len(),
                    "Restriction engine rebuilt from config reload"
                );
                metrics::record_engine_rebuild("config_reload");
                engine.store(Arc::new(rebuilt));
            }
        });
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Placeholder handler standing in for the application behind the gate.
async fn route_handler(
    State(state): State<AppState>,
    matched: MatchedPath,
) -> impl IntoResponse {
    let name = state
        .table
        .name_for_path(matched.as_str())
        .unwrap_or("unknown");
    Json(serde_json::json!({ "route": name }))
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
