use crate::types::{BasicKind, Type};

/// Decides whether a value of this type has a statically fixed-width,
/// pointer-free representation, i.e. whether the fixed-width binary encoder
/// can serialize it deterministically.
///
/// The encoder dereferences exactly one leading indirection, so a pointer to
/// an encodable type is accepted; pointers anywhere deeper are not.
pub fn is_binary_safe(ty: &Type) -> bool {
    let ty = match ty.underlying() {
        Type::Pointer(elem) => elem.underlying(),
        other => other,
    };
    fixed_width(ty)
}

fn fixed_width(ty: &Type) -> bool {
    match ty.underlying() {
        Type::Basic(kind) => matches!(
            kind,
            BasicKind::Uint8
                | BasicKind::Uint16
                | BasicKind::Uint32
                | BasicKind::Uint64
                | BasicKind::Int8
                | BasicKind::Int16
                | BasicKind::Int32
                | BasicKind::Int64
                | BasicKind::Float32
                | BasicKind::Float64
                | BasicKind::Complex64
                | BasicKind::Complex128
                // an unresolved type already produced a checker error; do not
                // pile a lint on top of it
                | BasicKind::Invalid
        ),
        Type::Struct(fields) => fields.iter().all(|field| fixed_width(&field.ty)),
        Type::Array { elem, .. } => fixed_width(elem),
        // the concrete type behind an interface is unknowable here, so the
        // check must not guess
        Type::Interface => true,
        _ => false,
    }
}
