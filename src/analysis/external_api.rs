use log::trace;

use crate::analysis::context::AnalysisContext;
use crate::analysis::diagnostic::{Diagnostic, DiagnosticSeverity};
use crate::analysis::SemanticAnalyzer;
use crate::syntax::ast::{Program, SourceSpan};
use crate::types::TypeInfo;
use crate::GlintError;

/// Knobs the front end exposes; rule selection and presentation live there,
/// not in the rules.
pub struct AnalyzerConfig {
    pub disabled_rules: Vec<String>,
    pub warnings_as_errors: bool,
    pub diagnostic_limit: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            disabled_rules: Vec::new(),
            warnings_as_errors: false,
            diagnostic_limit: None,
        }
    }
}

impl SemanticAnalyzer {
    pub fn analyze_with_config(
        &self,
        program: &Program,
        types: &TypeInfo,
        config: AnalyzerConfig,
    ) -> Result<Vec<Diagnostic>, GlintError> {
        for rule_id in &config.disabled_rules {
            if self.rule_registry.get_rule(rule_id).is_none() {
                return Err(GlintError::UnknownRule(rule_id.clone()));
            }
            trace!("rule {} disabled by config", rule_id);
        }

        let mut ctx = AnalysisContext::new(types);
        ctx.disabled_rules.extend(config.disabled_rules.iter().cloned());
        self.visit_program(&mut ctx, program);
        let mut diagnostics = ctx.diagnostics.into_diagnostics();

        if config.warnings_as_errors {
            for diag in &mut diagnostics {
                if diag.severity == DiagnosticSeverity::Warning {
                    diag.severity = DiagnosticSeverity::Error;
                }
            }
        }

        if let Some(limit) = config.diagnostic_limit {
            if diagnostics.len() > limit {
                let suppressed = diagnostics.len() - limit;
                diagnostics.truncate(limit);
                diagnostics.push(Diagnostic {
                    message: format!(
                        "diagnostic limit reached, {} more suppressed",
                        suppressed
                    ),
                    span: SourceSpan::empty(),
                    severity: DiagnosticSeverity::Info,
                    rule_id: "diagnostic-limit".to_string(),
                    related_info: Vec::new(),
                });
            }
        }

        Ok(diagnostics)
    }

    // Method to get all available rules
    pub fn list_rules(&self) -> Vec<(&'static str, &'static str, DiagnosticSeverity)> {
        self.rule_registry
            .get_all_rules()
            .iter()
            .map(|rule| (rule.id(), rule.description(), rule.severity()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::rules::fixtures::AstBuilder;
    use crate::syntax::ast::{
        Block, Declaration, FunctionDeclaration, Signature, Statement,
    };
    use crate::types::ConstantValue;

    /// One regexp bug and one sleep bug in a single function.
    fn two_bug_program() -> (Program, TypeInfo) {
        let mut b = AstBuilder::new();
        let mut types = TypeInfo::new();

        let pattern = b.string("[a-z");
        types.record_constant(pattern.id(), ConstantValue::Str("[a-z".to_string()));
        let compile = Statement::Expression(b.pkg_call("regexp", "Compile", vec![pattern]));

        let count = b.int("5");
        let sleep = Statement::Expression(b.pkg_call("time", "Sleep", vec![count]));

        let program = Program {
            declarations: vec![Declaration::Function(FunctionDeclaration {
                name: "main".to_string(),
                signature: Signature {
                    params: Vec::new(),
                    results: Vec::new(),
                    span: SourceSpan::empty(),
                },
                body: Block {
                    statements: vec![compile, sleep],
                    span: SourceSpan::empty(),
                },
                span: SourceSpan::empty(),
            })],
        };
        (program, types)
    }

    #[test]
    fn disabling_a_rule_suppresses_only_its_diagnostics() {
        let (program, types) = two_bug_program();
        let config = AnalyzerConfig {
            disabled_rules: vec!["regexp-compile".to_string()],
            ..Default::default()
        };
        let diagnostics = SemanticAnalyzer::new()
            .analyze_with_config(&program, &types, config)
            .unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule_id, "sleep-constant");
    }

    #[test]
    fn unknown_rule_ids_are_rejected() {
        let (program, types) = two_bug_program();
        let config = AnalyzerConfig {
            disabled_rules: vec!["no-such-rule".to_string()],
            ..Default::default()
        };
        let err = SemanticAnalyzer::new()
            .analyze_with_config(&program, &types, config)
            .unwrap_err();
        assert!(matches!(err, GlintError::UnknownRule(id) if id == "no-such-rule"));
    }

    #[test]
    fn warnings_can_be_promoted_to_errors() {
        let (program, types) = two_bug_program();
        let config = AnalyzerConfig {
            warnings_as_errors: true,
            ..Default::default()
        };
        let diagnostics = SemanticAnalyzer::new()
            .analyze_with_config(&program, &types, config)
            .unwrap();
        assert!(diagnostics
            .iter()
            .all(|d| d.severity == DiagnosticSeverity::Error));
    }

    #[test]
    fn the_diagnostic_limit_truncates_with_a_notice() {
        let (program, types) = two_bug_program();
        let config = AnalyzerConfig {
            diagnostic_limit: Some(1),
            ..Default::default()
        };
        let diagnostics = SemanticAnalyzer::new()
            .analyze_with_config(&program, &types, config)
            .unwrap();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[1].rule_id, "diagnostic-limit");
        assert_eq!(diagnostics[1].severity, DiagnosticSeverity::Info);
    }

    #[test]
    fn every_builtin_rule_is_listed() {
        let rules = SemanticAnalyzer::new().list_rules();
        assert_eq!(rules.len(), 8);
        assert!(rules.iter().all(|(_, desc, _)| !desc.is_empty()));
    }
}
