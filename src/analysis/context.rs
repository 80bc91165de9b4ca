use crate::analysis::diagnostic::DiagnosticCollector;
use crate::types::TypeInfo;
use std::collections::HashSet;

/// Per-run state handed to every rule: the type facts resolved for the tree
/// being walked, and the sink for whatever the rules find. The type index is
/// resolved in full before any rule runs; rules only read it.
#[derive(Debug)]
pub struct AnalysisContext<'a> {
    pub diagnostics: DiagnosticCollector,
    pub types: &'a TypeInfo,
    pub disabled_rules: HashSet<String>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(types: &'a TypeInfo) -> Self {
        Self {
            diagnostics: DiagnosticCollector::new(),
            types,
            disabled_rules: HashSet::new(),
        }
    }

    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        !self.disabled_rules.contains(rule_id)
    }
}
