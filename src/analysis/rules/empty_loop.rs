use crate::analysis::context::AnalysisContext;
use crate::analysis::diagnostic::DiagnosticSeverity;
use crate::analysis::rule::SemanticRule;
use crate::syntax::ast::{AstNode, Statement};

// Rule to check for infinite loops with nothing to do
pub struct EmptyLoopRule;

impl SemanticRule for EmptyLoopRule {
    fn id(&self) -> &'static str {
        "empty-infinite-loop"
    }

    fn description(&self) -> &'static str {
        "Checks for unconditional loops with an empty body"
    }

    fn severity(&self) -> DiagnosticSeverity {
        DiagnosticSeverity::Warning
    }

    fn check(&self, ctx: &mut AnalysisContext, node: &AstNode) {
        let AstNode::Statement(Statement::For(loop_stmt)) = node else {
            return;
        };
        if loop_stmt.init.is_some()
            || loop_stmt.condition.is_some()
            || !loop_stmt.body.statements.is_empty()
        {
            return;
        }
        ctx.diagnostics.report_warning(
            self.id(),
            "should not use an infinite empty loop. It will spin. Consider select{} instead."
                .to_string(),
            loop_stmt.span,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::diagnostic::Diagnostic;
    use crate::analysis::rules::fixtures::AstBuilder;
    use crate::syntax::ast::{Block, Expression, ForStatement, SourceSpan};
    use crate::types::TypeInfo;

    fn for_loop(
        init: Option<Statement>,
        condition: Option<Expression>,
        body: Vec<Statement>,
    ) -> Statement {
        Statement::For(ForStatement {
            init: init.map(Box::new),
            condition,
            post: None,
            body: Block {
                statements: body,
                span: SourceSpan::empty(),
            },
            span: SourceSpan::empty(),
        })
    }

    fn run(stmt: &Statement) -> Vec<Diagnostic> {
        let types = TypeInfo::new();
        let mut ctx = AnalysisContext::new(&types);
        EmptyLoopRule.check(&mut ctx, &AstNode::Statement(stmt));
        ctx.diagnostics.into_diagnostics()
    }

    #[test]
    fn bare_empty_loop_is_reported() {
        let diags = run(&for_loop(None, None, vec![]));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule_id, "empty-infinite-loop");
    }

    #[test]
    fn conditional_loops_stay_silent() {
        let mut b = AstBuilder::new();
        let cond = b.ident("running");
        assert!(run(&for_loop(None, Some(cond), vec![])).is_empty());
    }

    #[test]
    fn loops_with_an_initializer_stay_silent() {
        let mut b = AstBuilder::new();
        let init = Statement::Expression(b.ident("setup"));
        assert!(run(&for_loop(Some(init), None, vec![])).is_empty());
    }

    #[test]
    fn loops_with_a_body_stay_silent() {
        let mut b = AstBuilder::new();
        let work = Statement::Expression(b.ident("work"));
        assert!(run(&for_loop(None, None, vec![work])).is_empty());
    }
}
