//! The lowered type value.

use std::fmt;

use keel_types::{Idx, Pool};

use crate::StorageCategory;

/// A frontend type mapped onto IR storage: an identity plus a storage
/// category.
///
/// Two lowered types are equal only if both identity and category match.
/// Values are `Copy` and never mutated; the category accessors return new
/// values.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct LoweredType {
    ty: Idx,
    category: StorageCategory,
}

impl LoweredType {
    #[inline]
    pub const fn new(ty: Idx, category: StorageCategory) -> Self {
        Self { ty, category }
    }

    /// Tag `ty` as a direct value.
    #[inline]
    pub const fn value(ty: Idx) -> Self {
        Self::new(ty, StorageCategory::Value)
    }

    /// Tag `ty` as a memory address.
    #[inline]
    pub const fn address(ty: Idx) -> Self {
        Self::new(ty, StorageCategory::Address)
    }

    /// The underlying frontend type identity.
    #[inline]
    pub const fn ty(self) -> Idx {
        self.ty
    }

    #[inline]
    pub const fn category(self) -> StorageCategory {
        self.category
    }

    #[inline]
    pub const fn is_object(self) -> bool {
        self.category.is_value()
    }

    #[inline]
    pub const fn is_address(self) -> bool {
        self.category.is_address()
    }

    /// The same type viewed as a direct value.
    #[inline]
    pub const fn object_type(self) -> Self {
        Self::value(self.ty)
    }

    /// The same type viewed as a memory address.
    #[inline]
    pub const fn address_type(self) -> Self {
        Self::address(self.ty)
    }

    /// The same type viewed with `category`.
    #[inline]
    pub const fn with_category(self, category: StorageCategory) -> Self {
        Self::new(self.ty, category)
    }

    /// Whether the identity mentions an unresolved generic parameter.
    pub fn has_generic_param(self, pool: &Pool) -> bool {
        pool.has_generic_param(self.ty)
    }

    /// Render as `$T` for values and `$*T` for addresses.
    pub fn format(self, pool: &Pool) -> String {
        self.display(pool).to_string()
    }

    /// A `Display` adapter rendering this type against `pool`.
    pub fn display(self, pool: &Pool) -> LoweredTypeDisplay<'_> {
        LoweredTypeDisplay { ty: self, pool }
    }
}

/// Display adapter returned by [`LoweredType::display`].
pub struct LoweredTypeDisplay<'pool> {
    ty: LoweredType,
    pool: &'pool Pool,
}

impl fmt::Display for LoweredTypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sigil = if self.ty.is_address() { "$*" } else { "$" };
        write!(f, "{sigil}{}", self.pool.format_type(self.ty.ty))
    }
}
