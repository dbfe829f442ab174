//! Route restriction gate.
//!
//! Per-request composition: route name, client IP, method, and query string
//! go through the decision engine; governed-and-denied requests get a 403
//! with a generic body. Diagnostics stay server-side.

use axum::{
    body::Body,
    extract::{ConnectInfo, MatchedPath, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::http::server::AppState;
use crate::observability::metrics;

pub async fn restriction_gate(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    matched: Option<MatchedPath>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let engine = state.engine.load();

    let route_name = matched
        .as_ref()
        .and_then(|m| state.table.name_for_path(m.as_str()))
        .map(str::to_string);
    let client_ip = client_ip(&request, addr, state.config.listener.trust_forwarded_for);
    let method = request.method().as_str().to_string();
    let query = request.uri().query().map(str::to_string);

    if engine.is_request_governed(route_name.as_deref(), &method, query.as_deref())
        && engine.is_client_denied(route_name.as_deref(), &client_ip)
    {
        let route = route_name.as_deref().unwrap_or("unknown");
        metrics::record_gate_decision(route, true);
        return (StatusCode::FORBIDDEN, "Access denied").into_response();
    }

    if let Some(route) = route_name.as_deref() {
        metrics::record_gate_decision(route, false);
    }
    next.run(request).await
}

/// Client IP, optionally trusting the first `X-Forwarded-For` entry.
fn client_ip(request: &Request<Body>, addr: SocketAddr, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        if let Some(forwarded) = request
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            return forwarded.to_string();
        }
    }
    addr.ip().to_string()
}
