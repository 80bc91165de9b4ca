use std::collections::HashMap;

use crate::syntax::ast::NodeId;
use crate::types::Type;

/// A compile-time constant value attached to an expression node
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Everything the type checker resolved for one expression node
#[derive(Debug, Clone, Default)]
struct ExprInfo {
    ty: Option<Type>,
    constant: Option<ConstantValue>,
    callee: Option<String>,
}

/// The read-only index of resolved type facts, keyed by node identity.
/// Populated by the external type checker before analysis starts; the
/// analysis passes only ever read it. Missing entries mean "statically
/// unknown" and rules treat them as not applicable.
#[derive(Debug, Clone, Default)]
pub struct TypeInfo {
    exprs: HashMap<NodeId, ExprInfo>,
}

impl TypeInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_type(&mut self, id: NodeId, ty: Type) {
        self.exprs.entry(id).or_default().ty = Some(ty);
    }

    pub fn record_constant(&mut self, id: NodeId, value: ConstantValue) {
        self.exprs.entry(id).or_default().constant = Some(value);
    }

    /// Records the fully qualified identity of the function or method a call
    /// target resolves to, e.g. `(*sync.WaitGroup).Add`.
    pub fn record_callee(&mut self, id: NodeId, name: impl Into<String>) {
        self.exprs.entry(id).or_default().callee = Some(name.into());
    }

    pub fn type_of(&self, id: NodeId) -> Option<&Type> {
        self.exprs.get(&id)?.ty.as_ref()
    }

    pub fn constant_of(&self, id: NodeId) -> Option<&ConstantValue> {
        self.exprs.get(&id)?.constant.as_ref()
    }

    pub fn callee_of(&self, id: NodeId) -> Option<&str> {
        self.exprs.get(&id)?.callee.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BasicKind;

    #[test]
    fn facts_accumulate_per_node() {
        let mut info = TypeInfo::new();
        let id = NodeId(7);
        info.record_type(id, Type::Basic(BasicKind::String));
        info.record_constant(id, ConstantValue::Str("[a-z]+".to_string()));

        assert_eq!(info.type_of(id), Some(&Type::Basic(BasicKind::String)));
        assert_eq!(
            info.constant_of(id),
            Some(&ConstantValue::Str("[a-z]+".to_string()))
        );
        assert_eq!(info.callee_of(id), None);
        assert_eq!(info.type_of(NodeId(8)), None);
    }
}
