//! Route target resolution.
//!
//! # Responsibilities
//! - Expand a configured target (route name, path, or `#...#` regex) into the
//!   concrete set of matching route names and paths
//! - Normalize `{param}` placeholders before matching so parameter names
//!   cannot satisfy wildcard patterns
//!
//! # Design Decisions
//! - Regex matching is an unanchored substring search: `/admin/` covers every
//!   route under `/admin/`
//! - An invalid regex aborts only that target: a warning goes to the sink and
//!   whatever was accumulated is returned
//! - Resolution never mutates the table; identical inputs give identical
//!   output

use regex::Regex;
use std::sync::LazyLock;

use crate::observability::diagnostics::DiagnosticSink;
use crate::routing::table::RouteTable;

/// Fixed token substituted for `{param}` segments before matching.
const PARAM_TOKEN: &str = "__routeparam__";

static PARAM_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[_\-0-9a-zA-Z]+\}").expect("param placeholder regex is valid"));

/// Route names and their paths, parallel arrays in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ResolvedRoutes {
    pub names: Vec<String>,
    pub paths: Vec<String>,
}

impl ResolvedRoutes {
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// How a target string is interpreted.
enum TargetKind<'a> {
    /// `#...#` delimited: body used verbatim.
    ExplicitRegex(&'a str),
    /// Contains `/`: a path; `%` wildcards become `.+`.
    Path(&'a str),
    /// Anything else: literal route name.
    Name(&'a str),
}

fn classify(target: &str) -> TargetKind<'_> {
    // A lone "#" has no closing delimiter and stays a literal route name.
    if target.len() >= 2 && target.starts_with('#') && target.ends_with('#') {
        TargetKind::ExplicitRegex(&target[1..target.len() - 1])
    } else if target.contains('/') {
        TargetKind::Path(target)
    } else {
        TargetKind::Name(target)
    }
}

/// Expand `target` into the matching route names and paths from `table`.
pub fn resolve(target: &str, table: &RouteTable, sink: &dyn DiagnosticSink) -> ResolvedRoutes {
    let mut resolved = ResolvedRoutes::default();

    let pattern = match classify(target) {
        TargetKind::ExplicitRegex(body) => Some(body.to_string()),
        TargetKind::Path(path) => Some(path.replace('%', ".+")),
        TargetKind::Name(name) => {
            if let Some(entry) = table.get(name) {
                resolved.names.push(entry.name.clone());
                resolved.paths.push(entry.path.clone());
            }
            None
        }
    };

    let Some(pattern) = pattern else {
        return resolved;
    };

    let regex = match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(_) => {
            sink.warn(format!("invalid regular expression: #{pattern}#"));
            return resolved;
        }
    };

    for entry in table.iter() {
        let normalized = PARAM_PLACEHOLDER.replace_all(&entry.path, PARAM_TOKEN);
        if regex.is_match(&normalized) {
            resolved.names.push(entry.name.clone());
            resolved.paths.push(entry.path.clone());
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::diagnostics::CollectingSink;
    use crate::routing::table::RouteEntry;

    fn table() -> RouteTable {
        RouteTable::from_entries(vec![
            RouteEntry::new("admin.test", "/admin/test"),
            RouteEntry::new("admin.test2", "/admin/test/2"),
            RouteEntry::new("admin.test3", "/my/test/3"),
            RouteEntry::new("route.param", "/my/param/{number}"),
        ])
    }

    #[test]
    fn test_literal_route_name() {
        let resolved = resolve("admin.test2", &table(), &CollectingSink::default());
        assert_eq!(resolved.names, ["admin.test2"]);
        assert_eq!(resolved.paths, ["/admin/test/2"]);
    }

    #[test]
    fn test_missing_route_name_is_empty() {
        let resolved = resolve("admin.test.dummy", &table(), &CollectingSink::default());
        assert!(resolved.names.is_empty());
        assert!(resolved.paths.is_empty());
    }

    #[test]
    fn test_path_with_wildcard() {
        let resolved = resolve("/admin/%", &table(), &CollectingSink::default());
        assert_eq!(resolved.names, ["admin.test", "admin.test2"]);
        assert_eq!(resolved.paths, ["/admin/test", "/admin/test/2"]);
    }

    #[test]
    fn test_path_prefix_without_wildcard() {
        let resolved = resolve("/admin/", &table(), &CollectingSink::default());
        assert_eq!(resolved.names, ["admin.test", "admin.test2"]);
    }

    #[test]
    fn test_regex_looking_path() {
        // Not #-delimited, so it goes down the path-derived branch, where
        // the body still acts as a regex.
        let resolved = resolve("/[a-z]{3,}/test", &table(), &CollectingSink::default());
        assert_eq!(resolved.names, ["admin.test", "admin.test2"]);
        assert_eq!(resolved.paths, ["/admin/test", "/admin/test/2"]);
    }

    #[test]
    fn test_explicit_regex() {
        let resolved = resolve("#^/my/#", &table(), &CollectingSink::default());
        assert_eq!(resolved.names, ["admin.test3", "route.param"]);
    }

    #[test]
    fn test_param_placeholder_cannot_satisfy_pattern() {
        let resolved = resolve("/my/param/number", &table(), &CollectingSink::default());
        assert!(resolved.is_empty());

        let resolved = resolve("/my/param/%", &table(), &CollectingSink::default());
        assert_eq!(resolved.names, ["route.param"]);
        assert_eq!(resolved.paths, ["/my/param/{number}"]);
    }

    #[test]
    fn test_invalid_regex_warns_and_returns_empty() {
        let sink = CollectingSink::default();
        let resolved = resolve("#[#", &table(), &sink);
        assert!(resolved.is_empty());
        let warnings = sink.messages();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("invalid regular expression"));
    }

    #[test]
    fn test_lone_hash_is_a_route_name() {
        let sink = CollectingSink::default();
        let resolved = resolve("#", &table(), &sink);
        assert!(resolved.is_empty());
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let table = table();
        let sink = CollectingSink::default();
        let first = resolve("/admin/%", &table, &sink);
        let second = resolve("/admin/%", &table, &sink);
        assert_eq!(first, second);
    }
}
