use crate::syntax::ast::{BasicLiteral, Expression, LiteralKind};
use crate::types::{ConstantValue, TypeInfo};

// Extraction of compile-time constants from expression nodes. "No constant"
// is the common case, not an error; callers skip the node silently.

/// The statically known string value of an expression. Covers both plain
/// literals and constant-folded expressions, since the checker records the
/// folded value either way.
pub fn string_constant(types: &TypeInfo, expr: &Expression) -> Option<String> {
    match types.constant_of(expr.id()) {
        Some(ConstantValue::Str(value)) => Some(value.clone()),
        _ => None,
    }
}

/// The integer value of a direct literal token. Deliberately narrower than
/// the string extractor: a folded integer expression is not a literal, and
/// chasing one would mean interpreting arbitrary arithmetic.
pub fn integer_literal(expr: &Expression) -> Option<i64> {
    match expr {
        Expression::Basic(BasicLiteral {
            kind: LiteralKind::Int,
            value,
            ..
        }) => value.parse().ok(),
        _ => None,
    }
}
