use crate::analysis::context::AnalysisContext;
use crate::analysis::diagnostic::DiagnosticSeverity;
use crate::analysis::rule::SemanticRule;
use crate::analysis::rules::is_pkg_call;
use crate::syntax::ast::{AstNode, Expression};
use crate::types::encoding::is_binary_safe;
use crate::types::Type;

// Rule to check the data argument of binary.Write for encodable shape
pub struct BinaryWriteRule;

impl SemanticRule for BinaryWriteRule {
    fn id(&self) -> &'static str {
        "binary-write-type"
    }

    fn description(&self) -> &'static str {
        "Checks that the value passed to binary.Write has a fixed-width encoding"
    }

    fn severity(&self) -> DiagnosticSeverity {
        DiagnosticSeverity::Warning
    }

    fn check(&self, ctx: &mut AnalysisContext, node: &AstNode) {
        let AstNode::Expression(Expression::Call(call)) = node else {
            return;
        };
        if !is_pkg_call(call, "binary", "Write") {
            return;
        }
        if call.arguments.len() != 3 {
            return;
        }
        let data = &call.arguments[2];
        let Some(data_ty) = ctx.types.type_of(data.id()) else {
            return;
        };

        // the encoder writes through one indirection, and writing a slice or
        // array encodes each element in turn
        let mut target = data_ty.underlying();
        if let Type::Pointer(elem) = target {
            target = elem.underlying();
        }
        if !matches!(target, Type::Pointer(_)) {
            if let Some(elem) = target.elem() {
                target = elem;
            }
        }

        if is_binary_safe(target) {
            return;
        }
        ctx.diagnostics.report_warning(
            self.id(),
            format!("type {} cannot be used with binary.Write", data_ty),
            data.span(),
        );
    }
}
