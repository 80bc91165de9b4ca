use crate::analysis::constant::string_constant;
use crate::analysis::context::AnalysisContext;
use crate::analysis::diagnostic::DiagnosticSeverity;
use crate::analysis::rule::SemanticRule;
use crate::analysis::rules::is_pkg_call;
use crate::formats::timefmt;
use crate::syntax::ast::{AstNode, Expression};

// Rule to check for malformed reference layouts passed to time.Parse
pub struct TimeLayoutRule;

impl SemanticRule for TimeLayoutRule {
    fn id(&self) -> &'static str {
        "time-layout"
    }

    fn description(&self) -> &'static str {
        "Checks layout constants passed to time.Parse"
    }

    fn severity(&self) -> DiagnosticSeverity {
        DiagnosticSeverity::Warning
    }

    fn check(&self, ctx: &mut AnalysisContext, node: &AstNode) {
        let AstNode::Expression(Expression::Call(call)) = node else {
            return;
        };
        if !is_pkg_call(call, "time", "Parse") {
            return;
        }
        if call.arguments.len() != 2 {
            return;
        }
        let arg = &call.arguments[0];
        let Some(layout) = string_constant(ctx.types, arg) else {
            return;
        };
        // a valid layout is its own valid value, once the padding marker and
        // the ISO zone marker are rewritten to their formatted shape
        let layout = layout.replace('_', " ").replace('Z', "-");
        if let Err(err) = timefmt::parse(&layout, &layout) {
            ctx.diagnostics
                .report_warning(self.id(), err.to_string(), arg.span());
        }
    }
}
