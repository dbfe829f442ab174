//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::time::Duration;
use tokio::net::TcpListener;

use route_warden::restrict::rules::{RestrictionRule, RuleMode};
use route_warden::{HttpServer, RouteEntry, WardenConfig};

/// Start a warden on an ephemeral port and return its base URL.
pub async fn spawn_warden(mut config: WardenConfig) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://{}", addr)
}

/// Config with a small fixed route table.
pub fn base_config() -> WardenConfig {
    let mut config = WardenConfig::default();
    config.routes = vec![
        RouteEntry::new("admin.test", "/admin/test"),
        RouteEntry::new("admin.test2", "/admin/test/2"),
        RouteEntry::new("public.home", "/"),
    ];
    config
}

pub fn rule(id: &str, target: &str, ips: &[&str], mode: RuleMode) -> RestrictionRule {
    RestrictionRule {
        id: id.to_string(),
        target: target.to_string(),
        ips: ips.iter().map(|s| s.to_string()).collect(),
        methods: vec!["GET".to_string(), "POST".to_string()],
        params: HashMap::new(),
        mode,
        enabled: true,
    }
}
