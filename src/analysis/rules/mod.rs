pub mod binary_write;
pub mod empty_loop;
pub mod regexp_compile;
pub mod sleep_constant;
pub mod template_parse;
pub mod time_layout;
pub mod waitgroup_add;
pub mod waitgroup_copy;

use crate::syntax::ast::{CallExpression, Expression};

/// Matches a call to a package-level function, `pkg.name(...)`. The match is
/// syntactic; a local binding shadowing a package name would also match, an
/// accepted false-positive risk.
pub(crate) fn is_pkg_call(call: &CallExpression, pkg: &str, name: &str) -> bool {
    let Expression::Selector(sel) = call.callee.as_ref() else {
        return false;
    };
    let Expression::Identifier(ident) = sel.receiver.as_ref() else {
        return false;
    };
    ident.name == pkg && sel.field == name
}
