//! Admin API request handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;
use crate::observability::diagnostics::CollectingSink;
use crate::observability::metrics;
use crate::restrict::engine::GuardStatus;
use crate::routing::resolver;

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: GuardStatus,
    pub routes: usize,
    pub governed_routes: usize,
}

#[derive(Debug, Serialize)]
pub struct RuleSummary {
    pub id: String,
    pub target: String,
    pub mode: String,
    pub route_names: Vec<String>,
    pub paths: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub target: String,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub names: Vec<String>,
    pub paths: Vec<String>,
    pub warnings: Vec<String>,
}

pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    let engine = state.engine.load();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: engine.settings().status,
        routes: state.table.len(),
        governed_routes: engine.governed_route_names().len(),
    })
}

pub async fn get_rules(State(state): State<AppState>) -> impl IntoResponse {
    let engine = state.engine.load();
    let rules: Vec<RuleSummary> = engine
        .resolved_rules()
        .iter()
        .map(|resolved| RuleSummary {
            id: resolved.rule.id.clone(),
            target: resolved.rule.target.clone(),
            mode: format!("{:?}", resolved.rule.mode).to_lowercase(),
            route_names: resolved.routes.names.clone(),
            paths: resolved.routes.paths.clone(),
        })
        .collect();
    Json(rules)
}

/// Resolve a target against the live route table without touching any rule.
pub async fn preview_routes(
    State(state): State<AppState>,
    Query(params): Query<PreviewQuery>,
) -> impl IntoResponse {
    if params.target.is_empty() {
        return (StatusCode::BAD_REQUEST, "target must not be empty").into_response();
    }
    metrics::record_preview();

    let sink = CollectingSink::default();
    let resolved = resolver::resolve(&params.target, &state.table, &sink);
    Json(PreviewResponse {
        names: resolved.names,
        paths: resolved.paths,
        warnings: sink.messages(),
    })
    .into_response()
}
