pub mod constant;
pub mod context;
pub mod diagnostic;
pub mod external_api;
pub mod rule;
pub mod rule_registry;
pub mod rules;

use log::debug;

use crate::analysis::context::AnalysisContext;
use crate::analysis::diagnostic::Diagnostic;
use crate::analysis::rule_registry::RuleRegistry;
use crate::analysis::rules::binary_write::BinaryWriteRule;
use crate::analysis::rules::empty_loop::EmptyLoopRule;
use crate::analysis::rules::regexp_compile::RegexpCompileRule;
use crate::analysis::rules::sleep_constant::SleepConstantRule;
use crate::analysis::rules::template_parse::TemplateParseRule;
use crate::analysis::rules::time_layout::TimeLayoutRule;
use crate::analysis::rules::waitgroup_add::WaitgroupAddRule;
use crate::analysis::rules::waitgroup_copy::WaitgroupCopyRule;
use crate::syntax::ast::*;
use crate::types::TypeInfo;

pub struct SemanticAnalyzer {
    rule_registry: RuleRegistry,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        let mut registry = RuleRegistry::new();

        // Register built-in rules
        registry.register(RegexpCompileRule);
        registry.register(TemplateParseRule);
        registry.register(TimeLayoutRule);
        registry.register(BinaryWriteRule);
        registry.register(SleepConstantRule);
        registry.register(WaitgroupAddRule);
        registry.register(WaitgroupCopyRule);
        registry.register(EmptyLoopRule);

        Self {
            rule_registry: registry,
        }
    }

    /// Walks the program once, offering every node to every enabled rule.
    /// The type index must be fully resolved before this is called; rules
    /// read it but never write it.
    pub fn analyze(&self, program: &Program, types: &TypeInfo) -> Vec<Diagnostic> {
        let mut ctx = AnalysisContext::new(types);
        self.visit_program(&mut ctx, program);
        debug!(
            "analysis finished with {} diagnostics",
            ctx.diagnostics.diagnostics().len()
        );
        ctx.diagnostics.into_diagnostics()
    }

    fn apply(&self, ctx: &mut AnalysisContext, node: &AstNode) {
        for rule in self.rule_registry.get_all_rules() {
            if ctx.is_rule_enabled(rule.id()) {
                rule.check(ctx, node);
            }
        }
    }

    fn visit_program(&self, ctx: &mut AnalysisContext, program: &Program) {
        self.apply(ctx, &AstNode::Program(program));
        for decl in &program.declarations {
            self.visit_declaration(ctx, decl);
        }
    }

    fn visit_declaration(&self, ctx: &mut AnalysisContext, decl: &Declaration) {
        self.apply(ctx, &AstNode::Declaration(decl));
        match decl {
            Declaration::Function(fun_decl) => {
                self.visit_signature(ctx, &fun_decl.signature);
                self.visit_block(ctx, &fun_decl.body);
            }
            Declaration::Variable(var_decl) => {
                if let Some(init) = &var_decl.initializer {
                    self.visit_expression(ctx, init);
                }
            }
        }
    }

    fn visit_signature(&self, ctx: &mut AnalysisContext, signature: &Signature) {
        self.apply(ctx, &AstNode::Signature(signature));
    }

    fn visit_block(&self, ctx: &mut AnalysisContext, block: &Block) {
        for stmt in &block.statements {
            self.visit_statement(ctx, stmt);
        }
    }

    fn visit_statement(&self, ctx: &mut AnalysisContext, stmt: &Statement) {
        self.apply(ctx, &AstNode::Statement(stmt));
        match stmt {
            Statement::Expression(expr) => self.visit_expression(ctx, expr),
            Statement::Assignment(assign) => {
                self.visit_expression(ctx, &assign.target);
                self.visit_expression(ctx, &assign.value);
            }
            Statement::Return(ret) => {
                for value in &ret.values {
                    self.visit_expression(ctx, value);
                }
            }
            Statement::If(if_stmt) => {
                self.visit_expression(ctx, &if_stmt.condition);
                self.visit_block(ctx, &if_stmt.then_branch);
                if let Some(else_branch) = &if_stmt.else_branch {
                    self.visit_statement(ctx, else_branch);
                }
            }
            Statement::For(for_stmt) => {
                if let Some(init) = &for_stmt.init {
                    self.visit_statement(ctx, init);
                }
                if let Some(condition) = &for_stmt.condition {
                    self.visit_expression(ctx, condition);
                }
                if let Some(post) = &for_stmt.post {
                    self.visit_statement(ctx, post);
                }
                self.visit_block(ctx, &for_stmt.body);
            }
            Statement::Go(go_stmt) => self.visit_expression(ctx, &go_stmt.call),
            Statement::Block(block) => self.visit_block(ctx, block),
        }
    }

    fn visit_expression(&self, ctx: &mut AnalysisContext, expr: &Expression) {
        self.apply(ctx, &AstNode::Expression(expr));
        match expr {
            Expression::Call(call) => {
                self.visit_expression(ctx, &call.callee);
                for arg in &call.arguments {
                    self.visit_expression(ctx, arg);
                }
            }
            Expression::Selector(sel) => self.visit_expression(ctx, &sel.receiver),
            Expression::Binary(bin) => {
                self.visit_expression(ctx, &bin.left);
                self.visit_expression(ctx, &bin.right);
            }
            Expression::FunctionLit(fun_lit) => {
                self.visit_signature(ctx, &fun_lit.signature);
                self.visit_block(ctx, &fun_lit.body);
            }
            Expression::Identifier(_) | Expression::Basic(_) => {}
        }
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::rules::fixtures::AstBuilder;
    use crate::types::ConstantValue;

    fn function(name: &str, statements: Vec<Statement>) -> Declaration {
        Declaration::Function(FunctionDeclaration {
            name: name.to_string(),
            signature: Signature {
                params: Vec::new(),
                results: Vec::new(),
                span: SourceSpan::empty(),
            },
            body: Block {
                statements,
                span: SourceSpan::empty(),
            },
            span: SourceSpan::empty(),
        })
    }

    /// A program with one of everything the rules look for:
    /// an unbalanced regex, a unitless sleep, an empty spin loop, and a
    /// wait-counter incremented inside the goroutine it counts.
    fn buggy_program() -> (Program, TypeInfo) {
        let mut b = AstBuilder::new();
        let mut types = TypeInfo::new();

        let pattern = b.string("[a-z");
        types.record_constant(pattern.id(), ConstantValue::Str("[a-z".to_string()));
        let compile = Statement::Expression(b.pkg_call("regexp", "Compile", vec![pattern]));

        let count = b.int("5");
        let sleep = Statement::Expression(b.pkg_call("time", "Sleep", vec![count]));

        let spin = Statement::For(ForStatement {
            init: None,
            condition: None,
            post: None,
            body: Block {
                statements: vec![],
                span: SourceSpan::empty(),
            },
            span: SourceSpan::empty(),
        });

        let receiver = b.ident("wg");
        let sel = b.selector(receiver, "Add");
        types.record_callee(sel.id(), "(*sync.WaitGroup).Add");
        let one = b.int("1");
        let add = Statement::Expression(b.call(sel, vec![one]));
        let task = b.func_lit(vec![add]);
        let spawned = b.call(task, vec![]);
        let go_stmt = Statement::Go(GoStatement {
            call: spawned,
            span: SourceSpan::empty(),
        });

        let program = Program {
            declarations: vec![function("main", vec![compile, sleep, spin, go_stmt])],
        };
        (program, types)
    }

    #[test]
    fn all_four_bugs_are_found_in_one_walk() {
        let (program, types) = buggy_program();
        let diagnostics = SemanticAnalyzer::new().analyze(&program, &types);
        assert_eq!(diagnostics.len(), 4);

        let mut rule_ids: Vec<&str> = diagnostics.iter().map(|d| d.rule_id.as_str()).collect();
        rule_ids.sort_unstable();
        assert_eq!(
            rule_ids,
            vec![
                "empty-infinite-loop",
                "regexp-compile",
                "sleep-constant",
                "waitgroup-add-race"
            ]
        );
    }

    #[test]
    fn a_clean_program_produces_nothing() {
        let mut b = AstBuilder::new();
        let mut types = TypeInfo::new();

        let pattern = b.string("[a-z]+");
        types.record_constant(pattern.id(), ConstantValue::Str("[a-z]+".to_string()));
        let compile = Statement::Expression(b.pkg_call("regexp", "Compile", vec![pattern]));

        let count = b.int("200");
        let sleep = Statement::Expression(b.pkg_call("time", "Sleep", vec![count]));

        let program = Program {
            declarations: vec![function("main", vec![compile, sleep])],
        };
        assert!(SemanticAnalyzer::new().analyze(&program, &types).is_empty());
    }

    #[test]
    fn rules_reach_nested_function_literals() {
        let mut b = AstBuilder::new();
        let types = TypeInfo::new();

        // the buggy sleep lives inside a function literal inside a loop body
        let count = b.int("5");
        let sleep = Statement::Expression(b.pkg_call("time", "Sleep", vec![count]));
        let closure = b.func_lit(vec![sleep]);
        let invoke = Statement::Expression(b.call(closure, vec![]));
        let cond = b.ident("running");
        let looped = Statement::For(ForStatement {
            init: None,
            condition: Some(cond),
            post: None,
            body: Block {
                statements: vec![invoke],
                span: SourceSpan::empty(),
            },
            span: SourceSpan::empty(),
        });

        let program = Program {
            declarations: vec![function("poll", vec![looped])],
        };
        let diagnostics = SemanticAnalyzer::new().analyze(&program, &types);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule_id, "sleep-constant");
    }

    #[test]
    fn spawned_calls_are_offered_to_expression_rules() {
        let mut b = AstBuilder::new();
        let types = TypeInfo::new();

        // go time.Sleep(5) is just as suspicious as the plain call
        let count = b.int("5");
        let sleep = b.pkg_call("time", "Sleep", vec![count]);
        let go_stmt = Statement::Go(GoStatement {
            call: sleep,
            span: SourceSpan::empty(),
        });

        let program = Program {
            declarations: vec![function("main", vec![go_stmt])],
        };
        let diagnostics = SemanticAnalyzer::new().analyze(&program, &types);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule_id, "sleep-constant");
    }
}
