// Structural descriptions of the linted language's static types, supplied by
// an external type checker alongside the syntax tree.

pub mod encoding;
pub mod info;

use std::fmt;

pub use info::{ConstantValue, TypeInfo};

/// The kind of a `Type::Basic`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    /// The type of expressions the checker could not resolve. Carried through
    /// so that one upstream type error does not cascade into lint noise.
    Invalid,
}

impl BasicKind {
    fn name(&self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::String => "string",
            BasicKind::Invalid => "invalid type",
        }
    }
}

/// A named field of a struct type
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: Type,
}

/// A structural description of a static type. A closed set of shapes: every
/// named type in a real program resolves to one of these through
/// `underlying`.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Basic(BasicKind),
    Struct(Vec<Field>),
    Array { elem: Box<Type>, len: u64 },
    Slice(Box<Type>),
    Map { key: Box<Type>, value: Box<Type> },
    Chan(Box<Type>),
    Func { params: Vec<Type>, results: Vec<Type> },
    Pointer(Box<Type>),
    Interface,
    Named { name: String, underlying: Box<Type> },
}

impl Type {
    /// Strips `Named` wrappers down to the structural shape.
    pub fn underlying(&self) -> &Type {
        let mut ty = self;
        while let Type::Named { underlying, .. } = ty {
            ty = underlying;
        }
        ty
    }

    /// The element type for single-element carriers (pointer, slice, array,
    /// chan, map value), mirroring what the fixed-width encoder unwraps.
    pub fn elem(&self) -> Option<&Type> {
        match self {
            Type::Pointer(elem) | Type::Slice(elem) | Type::Chan(elem) => Some(elem),
            Type::Array { elem, .. } => Some(elem),
            Type::Map { value, .. } => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Basic(kind) => f.write_str(kind.name()),
            Type::Struct(fields) => {
                let fields = fields
                    .iter()
                    .map(|field| format!("{} {}", field.name, field.ty))
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "struct{{{}}}", fields)
            }
            Type::Array { elem, len } => write!(f, "[{}]{}", len, elem),
            Type::Slice(elem) => write!(f, "[]{}", elem),
            Type::Map { key, value } => write!(f, "map[{}]{}", key, value),
            Type::Chan(elem) => write!(f, "chan {}", elem),
            Type::Func { params, results } => {
                let params = params
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                match results.len() {
                    0 => write!(f, "func({})", params),
                    1 => write!(f, "func({}) {}", params, results[0]),
                    _ => {
                        let results = results
                            .iter()
                            .map(|r| r.to_string())
                            .collect::<Vec<_>>()
                            .join(", ");
                        write!(f, "func({}) ({})", params, results)
                    }
                }
            }
            Type::Pointer(elem) => write!(f, "*{}", elem),
            Type::Interface => f.write_str("interface{}"),
            // Named types render as their qualified name, which is also the
            // identity used when matching well-known library types.
            Type::Named { name, .. } => f.write_str(name),
        }
    }
}
