use std::fmt;

/// Represents a position in the source code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

/// Represents a span in the source code (start and end positions)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl SourceSpan {
    pub fn empty() -> Self {
        Self {
            start: SourcePosition { line: 0, column: 0 },
            end: SourcePosition { line: 0, column: 0 },
        }
    }
}

/// Identity of an expression or parameter node, assigned by the parser.
/// This is the key into the externally supplied type index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// The root of the AST, containing all top-level declarations
#[derive(Debug, Clone)]
pub struct Program {
    pub declarations: Vec<Declaration>,
}

/// tracks ast node types, in a single enum
pub enum AstNode<'a> {
    Program(&'a Program),
    Declaration(&'a Declaration),
    Signature(&'a Signature),
    Statement(&'a Statement),
    Expression(&'a Expression),
}

/// Top-level declarations in the program
#[derive(Debug, Clone)]
pub enum Declaration {
    Function(FunctionDeclaration),
    Variable(VariableDeclaration),
}

/// A function declaration
#[derive(Debug, Clone)]
pub struct FunctionDeclaration {
    pub name: String,
    pub signature: Signature,
    pub body: Block,
    pub span: SourceSpan,
}

/// A variable declaration
#[derive(Debug, Clone)]
pub struct VariableDeclaration {
    pub name: String,
    pub initializer: Option<Expression>,
    pub span: SourceSpan,
}

/// A function signature. Signatures appear both on declarations and on
/// function literals; parameter types live in the type index, keyed by the
/// parameter's `NodeId`.
#[derive(Debug, Clone)]
pub struct Signature {
    pub params: Vec<Parameter>,
    pub results: Vec<Parameter>,
    pub span: SourceSpan,
}

/// A parameter in a function signature
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub id: NodeId,
    pub span: SourceSpan,
}

/// A block of statements
#[derive(Debug, Clone)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: SourceSpan,
}

/// Statements in a `Block`
#[derive(Debug, Clone)]
pub enum Statement {
    Expression(Expression),
    Assignment(Assignment),
    Return(ReturnStatement),
    If(IfStatement),
    For(ForStatement),
    Go(GoStatement),
    Block(Block),
}

impl Statement {
    pub fn span(&self) -> SourceSpan {
        match self {
            Statement::Expression(expr) => expr.span(),
            Statement::Assignment(assign) => assign.span,
            Statement::Return(ret) => ret.span,
            Statement::If(stmt) => stmt.span,
            Statement::For(stmt) => stmt.span,
            Statement::Go(stmt) => stmt.span,
            Statement::Block(block) => block.span,
        }
    }
}

/// An assignment statement
#[derive(Debug, Clone)]
pub struct Assignment {
    pub target: Expression,
    pub value: Expression,
    pub span: SourceSpan,
}

/// A return statement
#[derive(Debug, Clone)]
pub struct ReturnStatement {
    pub values: Vec<Expression>,
    pub span: SourceSpan,
}

/// An if statement (with optional else)
#[derive(Debug, Clone)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Block,
    pub else_branch: Option<Box<Statement>>, // Either Block or another IfStatement (for else if)
    pub span: SourceSpan,
}

/// A three-clause loop. All clauses are optional; a loop with none of them
/// and an empty body spins forever.
#[derive(Debug, Clone)]
pub struct ForStatement {
    pub init: Option<Box<Statement>>,
    pub condition: Option<Expression>,
    pub post: Option<Box<Statement>>,
    pub body: Block,
    pub span: SourceSpan,
}

/// A statement spawning its call as a concurrent task. The parser only ever
/// produces a `Call` expression here.
#[derive(Debug, Clone)]
pub struct GoStatement {
    pub call: Expression,
    pub span: SourceSpan,
}

/// An expression
#[derive(Debug, Clone)]
pub enum Expression {
    Identifier(Identifier),
    Basic(BasicLiteral),
    Selector(SelectorExpression),
    Call(CallExpression),
    FunctionLit(FunctionLiteral),
    Binary(BinaryExpression),
}

impl Expression {
    pub fn id(&self) -> NodeId {
        match self {
            Expression::Identifier(ident) => ident.id,
            Expression::Basic(lit) => lit.id,
            Expression::Selector(sel) => sel.id,
            Expression::Call(call) => call.id,
            Expression::FunctionLit(lit) => lit.id,
            Expression::Binary(bin) => bin.id,
        }
    }

    pub fn span(&self) -> SourceSpan {
        match self {
            Expression::Identifier(ident) => ident.span,
            Expression::Basic(lit) => lit.span,
            Expression::Selector(sel) => sel.span,
            Expression::Call(call) => call.span,
            Expression::FunctionLit(lit) => lit.span,
            Expression::Binary(bin) => bin.span,
        }
    }
}

/// A plain identifier
#[derive(Debug, Clone)]
pub struct Identifier {
    pub name: String,
    pub id: NodeId,
    pub span: SourceSpan,
}

/// The token kind of a `BasicLiteral`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Int,
    Float,
    String,
}

/// A literal carrying its raw source token (quotes included for strings)
#[derive(Debug, Clone)]
pub struct BasicLiteral {
    pub kind: LiteralKind,
    pub value: String,
    pub id: NodeId,
    pub span: SourceSpan,
}

/// A field or method selection, `receiver.field`
#[derive(Debug, Clone)]
pub struct SelectorExpression {
    pub receiver: Box<Expression>,
    pub field: String,
    pub id: NodeId,
    pub span: SourceSpan,
}

/// A call expression
#[derive(Debug, Clone)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub id: NodeId,
    pub span: SourceSpan,
}

/// A function literal
#[derive(Debug, Clone)]
pub struct FunctionLiteral {
    pub signature: Signature,
    pub body: Block,
    pub id: NodeId,
    pub span: SourceSpan,
}

/// A binary operation
#[derive(Debug, Clone)]
pub struct BinaryExpression {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
    pub id: NodeId,
    pub span: SourceSpan,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
        };
        f.write_str(op)
    }
}

// Source rendering, used by diagnostics that quote the offending code.

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => f.write_str(&ident.name),
            Expression::Basic(lit) => f.write_str(&lit.value),
            Expression::Selector(sel) => write!(f, "{}.{}", sel.receiver, sel.field),
            Expression::Call(call) => write!(f, "{}", call),
            Expression::FunctionLit(lit) => {
                let params = lit
                    .signature
                    .params
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "func({}) {{ ... }}", params)
            }
            Expression::Binary(bin) => {
                write!(f, "{} {} {}", bin.left, bin.operator, bin.right)
            }
        }
    }
}

impl fmt::Display for CallExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self
            .arguments
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}({})", self.callee, args)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Expression(expr) => write!(f, "{}", expr),
            Statement::Assignment(assign) => write!(f, "{} = {}", assign.target, assign.value),
            Statement::Return(ret) => {
                if ret.values.is_empty() {
                    f.write_str("return")
                } else {
                    let values = ret
                        .values
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    write!(f, "return {}", values)
                }
            }
            Statement::If(stmt) => write!(f, "if {} {{ ... }}", stmt.condition),
            Statement::For(stmt) => {
                if stmt.init.is_none() && stmt.condition.is_none() && stmt.post.is_none() {
                    f.write_str("for { ... }")
                } else if let Some(cond) = &stmt.condition {
                    write!(f, "for {} {{ ... }}", cond)
                } else {
                    f.write_str("for ;; { ... }")
                }
            }
            Statement::Go(stmt) => write!(f, "go {}", stmt.call),
            Statement::Block(_) => f.write_str("{ ... }"),
        }
    }
}
