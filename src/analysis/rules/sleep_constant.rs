use crate::analysis::constant::integer_literal;
use crate::analysis::context::AnalysisContext;
use crate::analysis::diagnostic::DiagnosticSeverity;
use crate::analysis::rule::SemanticRule;
use crate::analysis::rules::is_pkg_call;
use crate::syntax::ast::{AstNode, Expression};

// a raw count above this could plausibly be a deliberate duration (the user
// may have meant two minutes); below it, the literal almost certainly meant a
// larger unit than the nanosecond it denotes
const MAX_SUSPICIOUS_NANOSECONDS: i64 = 120;

// Rule to check for bare integer literals passed to time.Sleep
pub struct SleepConstantRule;

impl SemanticRule for SleepConstantRule {
    fn id(&self) -> &'static str {
        "sleep-constant"
    }

    fn description(&self) -> &'static str {
        "Checks for time.Sleep calls with a unitless integer literal"
    }

    fn severity(&self) -> DiagnosticSeverity {
        DiagnosticSeverity::Warning
    }

    fn check(&self, ctx: &mut AnalysisContext, node: &AstNode) {
        let AstNode::Expression(Expression::Call(call)) = node else {
            return;
        };
        if !is_pkg_call(call, "time", "Sleep") {
            return;
        }
        if call.arguments.len() != 1 {
            return;
        }
        let arg = &call.arguments[0];
        let Some(n) = integer_literal(arg) else {
            return;
        };
        if n == 0 || n > MAX_SUSPICIOUS_NANOSECONDS {
            // Sleep(0) is a deliberate yield in some scheduler-heavy tests
            return;
        }
        let recommendation = if n == 1 {
            "time.Sleep(time.Nanosecond)".to_string()
        } else {
            format!("time.Sleep({} * time.Nanosecond)", n)
        };
        ctx.diagnostics.report_warning(
            self.id(),
            format!(
                "sleeping for {} nanoseconds is probably a bug. Be explicit if it isn't: {}",
                n, recommendation
            ),
            arg.span(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::diagnostic::Diagnostic;
    use crate::analysis::rules::fixtures::AstBuilder;
    use crate::types::TypeInfo;

    fn sleep_call(token: &str) -> Expression {
        let mut b = AstBuilder::new();
        let arg = b.int(token);
        b.pkg_call("time", "Sleep", vec![arg])
    }

    fn run(expr: &Expression) -> Vec<Diagnostic> {
        let types = TypeInfo::new();
        let mut ctx = AnalysisContext::new(&types);
        SleepConstantRule.check(&mut ctx, &AstNode::Expression(expr));
        ctx.diagnostics.into_diagnostics()
    }

    #[test]
    fn small_positive_counts_are_reported() {
        for token in ["1", "5", "120"] {
            let diags = run(&sleep_call(token));
            assert_eq!(diags.len(), 1, "{}", token);
        }
        assert!(run(&sleep_call("5"))[0]
            .message
            .contains("time.Sleep(5 * time.Nanosecond)"));
        assert!(run(&sleep_call("1"))[0]
            .message
            .contains("time.Sleep(time.Nanosecond)"));
    }

    #[test]
    fn zero_and_large_counts_stay_silent() {
        for token in ["0", "121", "200", "1000000000"] {
            assert!(run(&sleep_call(token)).is_empty(), "{}", token);
        }
    }

    #[test]
    fn non_literal_arguments_are_skipped() {
        let mut b = AstBuilder::new();
        let unit = b.ident("time");
        let arg = b.selector(unit, "Nanosecond");
        let call = b.pkg_call("time", "Sleep", vec![arg]);
        assert!(run(&call).is_empty());
    }
}
