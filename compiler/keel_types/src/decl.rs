//! Nominal declarations: structures, enumerations, and classes.
//!
//! Declarations are owned by the [`Pool`](crate::Pool) and referenced by
//! [`DeclId`]. Member types are stored as declared, so they may mention the
//! declaration's own generic parameters; use
//! [`Pool::member_type`](crate::Pool::member_type) to specialize them for a
//! concrete instance.

use bitflags::bitflags;

use crate::Idx;

/// Index of a nominal declaration in the pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct DeclId(u32);

impl DeclId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The shape of a nominal declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NominalKind {
    /// Inline value aggregate of stored fields.
    Struct,
    /// Tagged union of cases, some carrying a payload.
    Enum,
    /// Reference type; instances live in heap-allocated boxes.
    Class,
}

impl NominalKind {
    /// Whether instance storage is always reached through a heap box.
    #[inline]
    pub const fn is_boxed(self) -> bool {
        matches!(self, Self::Class)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Class => "class",
        }
    }
}

bitflags! {
    /// Declaration attributes consulted by lowering.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct DeclAttrs: u8 {
        /// The standard optional wrapper: one generic parameter, a payload-less
        /// `none` case and a `some` case carrying the parameter.
        const OPTIONAL = 1 << 0;
        /// Layout is opaque to clients; values must be handled indirectly.
        const RESILIENT = 1 << 1;
        /// Struct has storage that cannot be addressed field by field.
        const UNREFERENCEABLE_STORAGE = 1 << 2;
    }
}

/// A stored field of a struct or class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    /// Declared type, possibly mentioning the owner's generic parameters.
    pub ty: Idx,
}

/// A case of an enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseDecl {
    pub name: String,
    /// Declared payload type, if the case carries one.
    pub payload: Option<Idx>,
}

/// A nominal declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NominalDecl {
    pub name: String,
    pub kind: NominalKind,
    /// Number of generic parameters (`GenericParam` indices `0..n`).
    pub generic_params: u32,
    pub attrs: DeclAttrs,
    /// Stored fields in declaration order (structs and classes).
    pub fields: Vec<FieldDecl>,
    /// Cases in declaration order (enums).
    pub cases: Vec<CaseDecl>,
}

/// A stored field, identified by owner and declaration position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldId {
    pub owner: DeclId,
    pub index: u32,
}

/// An enum case, identified by owner and declaration position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct CaseId {
    pub owner: DeclId,
    pub index: u32,
}

/// A stored field or payload-carrying case.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NominalMember {
    Field(FieldId),
    Case(CaseId),
}

impl NominalMember {
    /// The declaration that owns this member.
    pub const fn owner(self) -> DeclId {
        match self {
            Self::Field(field) => field.owner,
            Self::Case(case) => case.owner,
        }
    }
}

impl From<FieldId> for NominalMember {
    fn from(field: FieldId) -> Self {
        Self::Field(field)
    }
}

impl From<CaseId> for NominalMember {
    fn from(case: CaseId) -> Self {
        Self::Case(case)
    }
}
