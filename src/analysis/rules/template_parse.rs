use crate::analysis::constant::string_constant;
use crate::analysis::context::AnalysisContext;
use crate::analysis::diagnostic::DiagnosticSeverity;
use crate::analysis::rule::SemanticRule;
use crate::formats::template;
use crate::syntax::ast::{AstNode, Expression};

// receivers whose Parse method takes a template source string; both flavors
// share the action grammar checked here
const TEXT_TEMPLATE: &str = "*text/template.Template";
const HTML_TEMPLATE: &str = "*html/template.Template";

// only parser complaints of this shape are precise enough to report; the
// remaining wordings are too often recoverable to be worth the noise
const REPORTABLE: &str = "unexpected";

// Rule to check for template sources that can never parse
pub struct TemplateParseRule;

impl SemanticRule for TemplateParseRule {
    fn id(&self) -> &'static str {
        "template-parse"
    }

    fn description(&self) -> &'static str {
        "Checks string constants passed to Parse on text and HTML templates"
    }

    fn severity(&self) -> DiagnosticSeverity {
        DiagnosticSeverity::Warning
    }

    fn check(&self, ctx: &mut AnalysisContext, node: &AstNode) {
        let AstNode::Expression(Expression::Call(call)) = node else {
            return;
        };
        if call.arguments.len() != 1 {
            return;
        }
        let Expression::Selector(sel) = call.callee.as_ref() else {
            return;
        };
        if sel.field != "Parse" {
            return;
        }
        let Some(receiver_ty) = ctx.types.type_of(sel.receiver.id()) else {
            return;
        };
        let receiver_ty = receiver_ty.to_string();
        if receiver_ty != TEXT_TEMPLATE && receiver_ty != HTML_TEMPLATE {
            return;
        }
        let arg = &call.arguments[0];
        let Some(source) = string_constant(ctx.types, arg) else {
            return;
        };
        if let Err(err) = template::parse(&source) {
            let message = err.to_string();
            if message.contains(REPORTABLE) {
                ctx.diagnostics.report_warning(self.id(), message, arg.span());
            }
        }
    }
}
