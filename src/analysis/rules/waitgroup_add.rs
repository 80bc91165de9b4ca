use crate::analysis::context::AnalysisContext;
use crate::analysis::diagnostic::DiagnosticSeverity;
use crate::analysis::rule::SemanticRule;
use crate::syntax::ast::{AstNode, Expression, Statement};

// the resolved identity of the wait counter's increment method
const WAITGROUP_ADD: &str = "(*sync.WaitGroup).Add";

// Rule to check for wait-counter registration inside the spawned task. The
// match is deliberately shallow: only the first statement of a literal task
// body is inspected, anything deeper would need data-flow analysis.
pub struct WaitgroupAddRule;

impl SemanticRule for WaitgroupAddRule {
    fn id(&self) -> &'static str {
        "waitgroup-add-race"
    }

    fn description(&self) -> &'static str {
        "Checks for WaitGroup.Add calls racing the goroutine they count"
    }

    fn severity(&self) -> DiagnosticSeverity {
        DiagnosticSeverity::Warning
    }

    fn check(&self, ctx: &mut AnalysisContext, node: &AstNode) {
        let AstNode::Statement(Statement::Go(go_stmt)) = node else {
            return;
        };
        let Expression::Call(spawned) = &go_stmt.call else {
            return;
        };
        let Expression::FunctionLit(task) = spawned.callee.as_ref() else {
            return;
        };
        let Some(first) = task.body.statements.first() else {
            return;
        };
        let Statement::Expression(Expression::Call(call)) = first else {
            return;
        };
        let Expression::Selector(sel) = call.callee.as_ref() else {
            return;
        };
        let Some(callee) = ctx.types.callee_of(sel.id) else {
            return;
        };
        if callee == WAITGROUP_ADD {
            ctx.diagnostics.report_warning(
                self.id(),
                format!(
                    "should call {} before starting the goroutine to avoid a race",
                    first
                ),
                sel.span,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::diagnostic::Diagnostic;
    use crate::analysis::rules::fixtures::AstBuilder;
    use crate::syntax::ast::{GoStatement, SourceSpan};
    use crate::types::TypeInfo;

    // go func() { wg.Add(1); ... }()
    fn spawn(b: &mut AstBuilder, body: Vec<Statement>) -> Statement {
        let task = b.func_lit(body);
        let call = b.call(task, vec![]);
        Statement::Go(GoStatement {
            call,
            span: SourceSpan::empty(),
        })
    }

    fn add_call(b: &mut AstBuilder, types: &mut TypeInfo) -> Statement {
        let receiver = b.ident("wg");
        let sel = b.selector(receiver, "Add");
        types.record_callee(sel.id(), WAITGROUP_ADD);
        let one = b.int("1");
        Statement::Expression(b.call(sel, vec![one]))
    }

    fn run(stmt: &Statement, types: &TypeInfo) -> Vec<Diagnostic> {
        let mut ctx = AnalysisContext::new(types);
        WaitgroupAddRule.check(&mut ctx, &AstNode::Statement(stmt));
        ctx.diagnostics.into_diagnostics()
    }

    #[test]
    fn add_as_first_statement_is_reported() {
        let mut b = AstBuilder::new();
        let mut types = TypeInfo::new();
        let first = add_call(&mut b, &mut types);
        let stmt = spawn(&mut b, vec![first]);
        let diags = run(&stmt, &types);
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].message,
            "should call wg.Add(1) before starting the goroutine to avoid a race"
        );
    }

    #[test]
    fn add_later_in_the_body_stays_silent() {
        let mut b = AstBuilder::new();
        let mut types = TypeInfo::new();
        let work = Statement::Expression(b.ident("work"));
        let add = add_call(&mut b, &mut types);
        let stmt = spawn(&mut b, vec![work, add]);
        assert!(run(&stmt, &types).is_empty());
    }

    #[test]
    fn empty_task_bodies_stay_silent() {
        let mut b = AstBuilder::new();
        let stmt = spawn(&mut b, vec![]);
        assert!(run(&stmt, &TypeInfo::new()).is_empty());
    }

    #[test]
    fn other_methods_stay_silent() {
        let mut b = AstBuilder::new();
        let mut types = TypeInfo::new();
        let receiver = b.ident("wg");
        let sel = b.selector(receiver, "Done");
        types.record_callee(sel.id(), "(*sync.WaitGroup).Done");
        let first = Statement::Expression(b.call(sel, vec![]));
        let stmt = spawn(&mut b, vec![first]);
        assert!(run(&stmt, &types).is_empty());
    }

    #[test]
    fn unresolved_callees_are_skipped() {
        let mut b = AstBuilder::new();
        let receiver = b.ident("wg");
        let sel = b.selector(receiver, "Add");
        let one = b.int("1");
        let first = Statement::Expression(b.call(sel, vec![one]));
        let stmt = spawn(&mut b, vec![first]);
        assert!(run(&stmt, &TypeInfo::new()).is_empty());
    }
}
