use crate::analysis::context::AnalysisContext;
use crate::analysis::diagnostic::DiagnosticSeverity;
use crate::analysis::rule::SemanticRule;
use crate::syntax::ast::AstNode;

// the wait counter only works as a single shared instance
const WAITGROUP_TYPE: &str = "sync.WaitGroup";

// Rule to check for wait counters passed by value
pub struct WaitgroupCopyRule;

impl SemanticRule for WaitgroupCopyRule {
    fn id(&self) -> &'static str {
        "waitgroup-by-value"
    }

    fn description(&self) -> &'static str {
        "Checks for function parameters that copy a sync.WaitGroup"
    }

    fn severity(&self) -> DiagnosticSeverity {
        DiagnosticSeverity::Warning
    }

    fn check(&self, ctx: &mut AnalysisContext, node: &AstNode) {
        let AstNode::Signature(signature) = node else {
            return;
        };
        for param in &signature.params {
            let Some(ty) = ctx.types.type_of(param.id) else {
                continue;
            };
            // a pointer to the counter renders as *sync.WaitGroup and passes
            if ty.to_string() == WAITGROUP_TYPE {
                ctx.diagnostics.report_warning(
                    self.id(),
                    "should pass sync.WaitGroup by pointer".to_string(),
                    param.span,
                );
            }
        }
    }
}
