use regex::Regex;

use crate::analysis::constant::string_constant;
use crate::analysis::context::AnalysisContext;
use crate::analysis::diagnostic::DiagnosticSeverity;
use crate::analysis::rule::SemanticRule;
use crate::analysis::rules::is_pkg_call;
use crate::syntax::ast::{AstNode, Expression};

// both entry points compile their argument with the same pattern grammar
const COMPILE_FUNCTIONS: [&str; 2] = ["Compile", "MustCompile"];

// Rule to check for pattern literals that can never compile
pub struct RegexpCompileRule;

impl SemanticRule for RegexpCompileRule {
    fn id(&self) -> &'static str {
        "regexp-compile"
    }

    fn description(&self) -> &'static str {
        "Checks string constants passed to regexp.Compile and regexp.MustCompile"
    }

    fn severity(&self) -> DiagnosticSeverity {
        DiagnosticSeverity::Warning
    }

    fn check(&self, ctx: &mut AnalysisContext, node: &AstNode) {
        let AstNode::Expression(Expression::Call(call)) = node else {
            return;
        };
        if !COMPILE_FUNCTIONS
            .iter()
            .any(|name| is_pkg_call(call, "regexp", name))
        {
            return;
        }
        if call.arguments.len() != 1 {
            return;
        }
        let arg = &call.arguments[0];
        let Some(pattern) = string_constant(ctx.types, arg) else {
            return;
        };
        if let Err(err) = Regex::new(&pattern) {
            ctx.diagnostics
                .report_warning(self.id(), err.to_string(), arg.span());
        }
    }
}
