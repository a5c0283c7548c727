//! Lowered-type model for the Keel compiler.
//!
//! Later compilation stages reason about a frontend type once it has been
//! mapped onto IR storage. This crate provides:
//!
//! - **[`LoweredType`]**: a frontend type identity tagged with a
//!   [`StorageCategory`] (`Value` or `Address`), plus canonical factories
//!   for built-in types.
//!
//! - **Member projection**: [`LoweredType::field_type`] and
//!   [`LoweredType::enum_case_type`] specialize a member's declared type with
//!   the aggregate's generic arguments and choose the category it is reached
//!   through (class fields are always addresses).
//!
//! - **Function specialization**: [`LoweredType::specialize_function`].
//!
//! - **Structural search**: [`LoweredType::contains_structurally`], an
//!   explicit-worklist walk over inline members.
//!
//! - **Predicates**: triviality, address-onlyness, reference-counted handle
//!   classification, and optional unwrapping.
//!
//! # Lowering Capability
//!
//! Operations that lower or classify take a [`TypeLowering`] implementor as
//! an explicit parameter. [`LoweringCache`] is the shared, thread-safe
//! implementation; it computes each type's lowering at most once.
//!
//! # Contracts
//!
//! Inputs are well-formed and fully resolved. Precondition violations are
//! programmer errors caught by debug assertions; the only soft outcome is
//! [`LoweredType::optional_payload`] returning `None`.

mod category;
mod contains;
mod lowered;
mod lowering;
mod predicates;
mod primitive;
mod project;
mod shape;
mod specialize;

#[cfg(test)]
mod test_helpers;

pub use category::StorageCategory;
pub use lowered::{LoweredType, LoweredTypeDisplay};
pub use lowering::{LoweringCache, LoweringInfo, TypeLowering};
pub use primitive::FrontendTypeContext;
pub use shape::AggregateShape;
