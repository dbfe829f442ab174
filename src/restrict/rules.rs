//! Restriction rule records and the rule repository seam.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// HTTP methods a rule may cover.
pub const ALLOWED_METHODS: [&str; 4] = ["GET", "POST", "DELETE", "PATCH"];

/// Whether matching IPs are denied or are the only ones allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleMode {
    /// IPs in the list are denied; everyone else passes.
    #[default]
    Restrict,
    /// IPs in the list pass; everyone else is denied.
    Allow,
}

/// One configured restriction.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RestrictionRule {
    /// Stable identifier, unique across the rule set.
    pub id: String,

    /// Route name, path (optionally with `%` wildcards), or `#...#` regex.
    pub target: String,

    /// IP specifications, checked with short-circuit OR.
    #[serde(default)]
    pub ips: Vec<String>,

    /// Methods this rule applies to. Defaults to every supported method.
    #[serde(default = "default_methods")]
    pub methods: Vec<String>,

    /// Required query parameters (name -> exact value).
    #[serde(default)]
    pub params: HashMap<String, String>,

    #[serde(default)]
    pub mode: RuleMode,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_methods() -> Vec<String> {
    ALLOWED_METHODS.iter().map(|m| m.to_string()).collect()
}

fn default_enabled() -> bool {
    true
}

/// Source of enabled rules, in storage iteration order.
///
/// Disabled rules never leave the store; the engine does not re-check the
/// flag.
pub trait RuleStore: Send + Sync {
    fn enabled_rules(&self) -> Vec<RestrictionRule>;
}

/// Rule store backed by the configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigRuleStore {
    rules: Vec<RestrictionRule>,
}

impl ConfigRuleStore {
    pub fn new(rules: Vec<RestrictionRule>) -> Self {
        Self { rules }
    }
}

impl RuleStore for ConfigRuleStore {
    fn enabled_rules(&self) -> Vec<RestrictionRule> {
        self.rules.iter().filter(|r| r.enabled).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, enabled: bool) -> RestrictionRule {
        RestrictionRule {
            id: id.to_string(),
            target: "some.route".to_string(),
            ips: vec![],
            methods: default_methods(),
            params: HashMap::new(),
            mode: RuleMode::Restrict,
            enabled,
        }
    }

    #[test]
    fn test_store_filters_disabled_and_keeps_order() {
        let store = ConfigRuleStore::new(vec![rule("a", true), rule("b", false), rule("c", true)]);
        let ids: Vec<_> = store.enabled_rules().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_rule_defaults() {
        let rule: RestrictionRule = toml::from_str("id = \"r1\"\ntarget = \"/admin/%\"").unwrap();
        assert!(rule.enabled);
        assert_eq!(rule.mode, RuleMode::Restrict);
        assert_eq!(rule.methods, ALLOWED_METHODS);
        assert!(rule.ips.is_empty());
        assert!(rule.params.is_empty());
    }
}
