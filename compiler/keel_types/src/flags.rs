//! Pre-computed type metadata flags.
//!
//! `TypeFlags` are computed once at interning time, so questions such as
//! "does this type mention a generic parameter?" never require a traversal.

use bitflags::bitflags;

bitflags! {
    /// Pre-computed type properties for O(1) queries.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u32 {
        // === Presence Flags (bits 0-7) ===

        /// Mentions a generic parameter (archetype) somewhere inside.
        const HAS_GENERIC_PARAM = 1 << 0;
        /// Mentions a class-constrained generic parameter.
        const HAS_CLASS_BOUND_PARAM = 1 << 1;

        // === Category Flags (bits 8-15) ===

        /// Built-in type (integer, float, word, pointer, object reference).
        const IS_BUILTIN = 1 << 8;
        /// Tuple type.
        const IS_TUPLE = 1 << 9;
        /// Nominal instance (struct, enum, or class).
        const IS_NOMINAL = 1 << 10;
        /// Function type.
        const IS_FUNCTION = 1 << 11;
        /// Metatype.
        const IS_METATYPE = 1 << 12;
        /// Generic parameter itself.
        const IS_GENERIC_PARAM = 1 << 13;

        // === Shape Flags (bits 16-23) ===

        /// Function type that binds its own generic parameters.
        const IS_POLYMORPHIC = 1 << 16;
    }
}

impl TypeFlags {
    /// Flags inherited by a compound type from its children.
    pub const PROPAGATE_MASK: Self = Self::from_bits_truncate(
        Self::HAS_GENERIC_PARAM.bits() | Self::HAS_CLASS_BOUND_PARAM.bits(),
    );

    /// Check if the type is fully concrete (no generic parameters).
    #[inline]
    pub const fn is_concrete(self) -> bool {
        !self.contains(Self::HAS_GENERIC_PARAM)
    }

    /// Propagated flags of a single child.
    #[inline]
    pub const fn propagate_from(child: Self) -> Self {
        Self::from_bits_truncate(child.bits() & Self::PROPAGATE_MASK.bits())
    }

    /// Union of propagated flags across many children.
    #[inline]
    pub fn propagate_all(children: impl IntoIterator<Item = Self>) -> Self {
        children
            .into_iter()
            .fold(Self::empty(), |acc, child| acc | Self::propagate_from(child))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn propagation_keeps_only_presence_flags() {
        let child = TypeFlags::HAS_GENERIC_PARAM | TypeFlags::IS_GENERIC_PARAM;
        assert_eq!(
            TypeFlags::propagate_from(child),
            TypeFlags::HAS_GENERIC_PARAM
        );
    }

    #[test]
    fn propagate_all_unions_children() {
        let flags = TypeFlags::propagate_all([
            TypeFlags::IS_BUILTIN,
            TypeFlags::HAS_CLASS_BOUND_PARAM | TypeFlags::HAS_GENERIC_PARAM,
        ]);
        assert!(flags.contains(TypeFlags::HAS_CLASS_BOUND_PARAM));
        assert!(!flags.is_concrete());
        assert!(!flags.contains(TypeFlags::IS_BUILTIN));
    }
}
