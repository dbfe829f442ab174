//! Access decision engine.
//!
//! # Responsibilities
//! - Resolve every enabled rule's target once, against a route table snapshot
//! - Decide per request whether a rule governs it (method + params)
//! - Decide per request whether the client IP must be denied
//!
//! # Design Decisions
//! - Built wholesale and swapped atomically on reload, never patched in place
//! - The first enabled rule matching the current route name governs;
//!   overlapping rules resolve by storage order
//! - A request without a matched route is never governed and never denied

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::observability::diagnostics::DiagnosticSink;
use crate::restrict::range::{ip_in_range, is_loopback};
use crate::restrict::rules::{RestrictionRule, RuleMode, RuleStore};
use crate::routing::resolver::{self, ResolvedRoutes};
use crate::routing::table::RouteTable;

/// Global enforcement switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardStatus {
    #[default]
    Enabled,
    /// No rule governs anything.
    Disabled,
    /// Loopback clients bypass every IP check.
    DisabledOnLocalhost,
}

/// Module-wide settings.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalSettings {
    pub status: GuardStatus,
    /// Emit server-side diagnostics for every denial.
    pub debug_logging: bool,
}

/// A rule together with the route names/paths its target expanded to.
#[derive(Debug, Clone)]
pub struct ResolvedRule {
    pub rule: RestrictionRule,
    pub routes: ResolvedRoutes,
}

/// Immutable decision engine for one route-table generation.
#[derive(Debug, Clone, Default)]
pub struct RestrictionEngine {
    resolved: Vec<ResolvedRule>,
    settings: GlobalSettings,
}

impl RestrictionEngine {
    /// Resolve all enabled rules against `table`.
    ///
    /// With status `Disabled` the resolved set stays empty, making every
    /// route ungoverned.
    pub fn build(
        store: &dyn RuleStore,
        settings: GlobalSettings,
        table: &RouteTable,
        sink: &dyn DiagnosticSink,
    ) -> Self {
        let mut resolved = Vec::new();
        if settings.status != GuardStatus::Disabled {
            for rule in store.enabled_rules() {
                let routes = resolver::resolve(&rule.target, table, sink);
                if routes.is_empty() {
                    tracing::debug!(
                        rule = %rule.id,
                        target = %rule.target,
                        "rule resolves to no routes; inert"
                    );
                }
                resolved.push(ResolvedRule { rule, routes });
            }
        }
        Self { resolved, settings }
    }

    /// First rule whose resolved set contains `route_name`.
    fn governing_rule(&self, route_name: &str) -> Option<&ResolvedRule> {
        self.resolved.iter().find(|r| r.routes.contains(route_name))
    }

    /// Whether the current request falls under a rule at all.
    pub fn is_request_governed(
        &self,
        route_name: Option<&str>,
        method: &str,
        query: Option<&str>,
    ) -> bool {
        let Some(name) = route_name.filter(|n| !n.is_empty()) else {
            return false;
        };
        let Some(resolved) = self.governing_rule(name) else {
            return false;
        };
        let method_match = resolved.rule.methods.iter().any(|m| m == method);
        method_match && params_match(&resolved.rule.params, query)
    }

    /// Whether the client must be denied on this route.
    pub fn is_client_denied(&self, route_name: Option<&str>, client_ip: &str) -> bool {
        let Some(name) = route_name.filter(|n| !n.is_empty()) else {
            return false;
        };
        let Some(resolved) = self.governing_rule(name) else {
            return false;
        };

        let bypass = self.settings.status == GuardStatus::DisabledOnLocalhost;
        if bypass && is_loopback(client_ip) {
            return false;
        }

        let in_list = resolved
            .rule
            .ips
            .iter()
            .any(|spec| ip_in_range(client_ip, spec, bypass));
        let denied = in_list != (resolved.rule.mode == RuleMode::Allow);

        if denied && self.settings.debug_logging {
            tracing::debug!(
                client_ip = %client_ip,
                rule = %resolved.rule.id,
                mode = ?resolved.rule.mode,
                checked = ?resolved.rule.ips,
                in_list,
                "client denied by restriction rule"
            );
        }
        denied
    }

    /// Ordered, de-duplicated union of every rule's resolved route names.
    /// Tells the caller which routes need the gate at all.
    pub fn governed_route_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for resolved in &self.resolved {
            for name in &resolved.routes.names {
                if !names.iter().any(|n| n == name) {
                    names.push(name.clone());
                }
            }
        }
        names
    }

    pub fn resolved_rules(&self) -> &[ResolvedRule] {
        &self.resolved
    }

    pub fn settings(&self) -> GlobalSettings {
        self.settings
    }
}

/// Required params match the request query string.
///
/// A rule with params but a request without a query string counts as a
/// match; extra request params not named by the rule are ignored. Known
/// looseness, kept for compatibility.
fn params_match(required: &HashMap<String, String>, query: Option<&str>) -> bool {
    if required.is_empty() {
        return true;
    }
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return true;
    };
    let current = parse_query(query);
    required
        .iter()
        .all(|(name, value)| current.get(name).is_some_and(|v| v == value))
}

/// Form-decoded query pairs; a repeated name keeps its last value.
fn parse_query(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect()
}
