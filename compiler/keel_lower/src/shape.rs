//! Aggregate shape dispatch.

use keel_types::{DeclId, Idx, NominalKind, Pool, Tag};

/// The closed set of shapes structural queries distinguish.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum AggregateShape {
    /// A tuple with this many elements.
    Tuple(usize),
    /// An instance of a struct declaration.
    Struct(DeclId),
    /// An instance of an enum declaration.
    Enum(DeclId),
    /// An instance of a class declaration (a reference, not inline storage).
    Class(DeclId),
    /// Anything without inline members: built-ins, functions, metatypes,
    /// generic parameters.
    Leaf,
}

impl AggregateShape {
    /// Classify a frontend type.
    pub fn of(ty: Idx, pool: &Pool) -> Self {
        match pool.tag(ty) {
            Tag::Tuple => Self::Tuple(pool.tuple_elems(ty).len()),
            Tag::Nominal => {
                let decl = pool.nominal_decl(ty);
                match pool.decl_kind(decl) {
                    NominalKind::Struct => Self::Struct(decl),
                    NominalKind::Enum => Self::Enum(decl),
                    NominalKind::Class => Self::Class(decl),
                }
            }
            Tag::NativeObject
            | Tag::UnknownObject
            | Tag::RawPointer
            | Tag::Word
            | Tag::Float
            | Tag::Int
            | Tag::Function
            | Tag::Metatype
            | Tag::GenericParam => Self::Leaf,
        }
    }

    /// The nominal declaration, if this is a nominal shape.
    pub const fn decl(self) -> Option<DeclId> {
        match self {
            Self::Struct(decl) | Self::Enum(decl) | Self::Class(decl) => Some(decl),
            Self::Tuple(_) | Self::Leaf => None,
        }
    }
}
