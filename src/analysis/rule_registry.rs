use crate::analysis::rule::SemanticRule;
use std::collections::HashMap;

/// The immutable set of rules a `SemanticAnalyzer` runs. Built once at
/// construction and never mutated afterwards.
pub struct RuleRegistry {
    rules: HashMap<&'static str, Box<dyn SemanticRule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    pub fn register<R: SemanticRule + 'static>(&mut self, rule: R) {
        self.rules.insert(rule.id(), Box::new(rule));
    }

    pub fn get_rule(&self, rule_id: &str) -> Option<&dyn SemanticRule> {
        self.rules.get(rule_id).map(|r| r.as_ref())
    }

    pub fn get_all_rules(&self) -> Vec<&dyn SemanticRule> {
        self.rules.values().map(|r| r.as_ref()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
