//! Frontend type graph for Keel.
//!
//! This crate owns the canonical, interned representation of frontend types
//! that the lowering stage reads:
//!
//! - [`Idx`]: 32-bit type identity. Equal types have equal indices.
//! - [`Pool`]: thread-safe interner for types and nominal declarations.
//! - [`Tag`] / [`TypeFlags`]: per-type kind and pre-computed properties.
//! - [`NominalDecl`]: structs, enums and classes with their members in
//!   declaration order.
//! - [`SubstitutionList`]: generic parameter bindings, applied by
//!   [`Pool::substitute`], [`Pool::member_type`] and
//!   [`Pool::specialize_function`].
//!
//! Inputs are assumed well-formed and fully resolved; misuse is reported by
//! debug assertions, never by a recoverable error.

mod decl;
mod flags;
mod idx;
mod item;
mod pool;
mod subst;
mod tag;

pub use decl::{
    CaseDecl, CaseId, DeclAttrs, DeclId, FieldDecl, FieldId, NominalDecl, NominalKind,
    NominalMember,
};
pub use flags::TypeFlags;
pub use idx::Idx;
pub use pool::Pool;
pub use subst::{Substitution, SubstitutionList};
pub use tag::{FloatKind, Tag};
