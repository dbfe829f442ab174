//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route and rule identifiers for uniqueness
//! - Reject methods outside the supported set
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over the parsed config
//! - An invalid regex target is NOT a validation error: resolution degrades
//!   with a warning at engine-build time instead

use std::collections::HashSet;

use crate::config::schema::WardenConfig;
use crate::restrict::rules::ALLOWED_METHODS;

/// A single semantic problem in the configuration.
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    EmptyBindAddress,
    EmptyRouteName,
    EmptyRoutePath(String),
    RoutePathMissingLeadingSlash(String),
    DuplicateRouteName(String),
    DuplicateRoutePath(String),
    EmptyRuleId,
    DuplicateRuleId(String),
    EmptyRuleTarget(String),
    UnsupportedMethod { rule: String, method: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyBindAddress => write!(f, "listener.bind_address is empty"),
            ValidationError::EmptyRouteName => write!(f, "route with empty name"),
            ValidationError::EmptyRoutePath(name) => {
                write!(f, "route '{}' has an empty path", name)
            }
            ValidationError::RoutePathMissingLeadingSlash(name) => {
                write!(f, "route '{}' has a path that does not start with '/'", name)
            }
            ValidationError::DuplicateRouteName(name) => {
                write!(f, "duplicate route name '{}'", name)
            }
            ValidationError::DuplicateRoutePath(path) => {
                write!(f, "duplicate route path '{}'", path)
            }
            ValidationError::EmptyRuleId => write!(f, "rule with empty id"),
            ValidationError::DuplicateRuleId(id) => write!(f, "duplicate rule id '{}'", id),
            ValidationError::EmptyRuleTarget(id) => {
                write!(f, "rule '{}' has an empty target", id)
            }
            ValidationError::UnsupportedMethod { rule, method } => {
                write!(f, "rule '{}' uses unsupported method '{}'", rule, method)
            }
        }
    }
}

/// Validate the parsed configuration, collecting every error found.
pub fn validate_config(config: &WardenConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }

    let mut route_names = HashSet::new();
    let mut route_paths = HashSet::new();
    for route in &config.routes {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyRouteName);
            continue;
        }
        // The router panics on paths it cannot register, so malformed and
        // duplicate paths must be rejected here.
        if route.path.is_empty() {
            errors.push(ValidationError::EmptyRoutePath(route.name.clone()));
        } else if !route.path.starts_with('/') {
            errors.push(ValidationError::RoutePathMissingLeadingSlash(
                route.name.clone(),
            ));
        } else if !route_paths.insert(route.path.as_str()) {
            errors.push(ValidationError::DuplicateRoutePath(route.path.clone()));
        }
        if !route_names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName(route.name.clone()));
        }
    }

    let mut rule_ids = HashSet::new();
    for rule in &config.rules {
        if rule.id.is_empty() {
            errors.push(ValidationError::EmptyRuleId);
        } else if !rule_ids.insert(rule.id.as_str()) {
            errors.push(ValidationError::DuplicateRuleId(rule.id.clone()));
        }
        if rule.target.is_empty() {
            errors.push(ValidationError::EmptyRuleTarget(rule.id.clone()));
        }
        for method in &rule.methods {
            if !ALLOWED_METHODS.contains(&method.as_str()) {
                errors.push(ValidationError::UnsupportedMethod {
                    rule: rule.id.clone(),
                    method: method.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restrict::rules::{RestrictionRule, RuleMode};
    use crate::routing::table::RouteEntry;
    use std::collections::HashMap;

    fn rule(id: &str, target: &str, methods: &[&str]) -> RestrictionRule {
        RestrictionRule {
            id: id.to_string(),
            target: target.to_string(),
            ips: vec![],
            methods: methods.iter().map(|m| m.to_string()).collect(),
            params: HashMap::new(),
            mode: RuleMode::Restrict,
            enabled: true,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&WardenConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = WardenConfig::default();
        config.routes.push(RouteEntry::new("dup", "/a"));
        config.routes.push(RouteEntry::new("dup", "/b"));
        config.rules.push(rule("r1", "", &["GET", "HEAD"]));
        config.rules.push(rule("r1", "/x", &["POST"]));

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::DuplicateRouteName("dup".to_string())));
        assert!(errors.contains(&ValidationError::EmptyRuleTarget("r1".to_string())));
        assert!(errors.contains(&ValidationError::DuplicateRuleId("r1".to_string())));
        assert!(errors.contains(&ValidationError::UnsupportedMethod {
            rule: "r1".to_string(),
            method: "HEAD".to_string(),
        }));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_route_paths_must_be_registrable() {
        // Distinct names sharing one path would blow up router construction.
        let mut config = WardenConfig::default();
        config.routes.push(RouteEntry::new("admin.test", "/admin/test"));
        config.routes.push(RouteEntry::new("admin.alias", "/admin/test"));
        config.routes.push(RouteEntry::new("bad.path", "admin/other"));

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::DuplicateRoutePath(
            "/admin/test".to_string()
        )));
        assert!(errors.contains(&ValidationError::RoutePathMissingLeadingSlash(
            "bad.path".to_string()
        )));
        assert_eq!(errors.len(), 2);
    }
}
