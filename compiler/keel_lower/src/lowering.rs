//! The lowering capability.
//!
//! Every operation that needs to lower a frontend type or classify it takes
//! a [`TypeLowering`] implementor as an explicit parameter. Nothing here is
//! global, so independent workers can use independent or shared caches.

use keel_types::{Idx, Pool};

use crate::LoweredType;

mod cache;

pub use cache::LoweringCache;

/// Lowering result and classification of one frontend type.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct LoweringInfo {
    lowered: LoweredType,
    trivial: bool,
    address_only: bool,
}

impl LoweringInfo {
    pub const fn new(lowered: LoweredType, trivial: bool, address_only: bool) -> Self {
        Self {
            lowered,
            trivial,
            address_only,
        }
    }

    /// The lowered form of the type, in `Value` category.
    #[inline]
    pub const fn lowered(self) -> LoweredType {
        self.lowered
    }

    /// Copying or destroying a value needs no work beyond a bit copy.
    #[inline]
    pub const fn is_trivial(self) -> bool {
        self.trivial
    }

    /// Values must always live in memory (unknown layout).
    #[inline]
    pub const fn is_address_only(self) -> bool {
        self.address_only
    }

    /// Values can be loaded into registers.
    #[inline]
    pub const fn is_loadable(self) -> bool {
        !self.address_only
    }
}

/// Lowering queries over a type pool.
///
/// Implementors memoize; repeated queries for the same type must return the
/// same answer and should be O(1) after the first.
pub trait TypeLowering {
    /// The type graph this lowering reads.
    fn pool(&self) -> &Pool;

    /// Lower and classify a frontend type.
    fn lowering(&self, ty: Idx) -> LoweringInfo;

    /// The lowered form of a frontend type.
    fn lowered_type(&self, ty: Idx) -> LoweredType {
        self.lowering(ty).lowered()
    }

    fn is_trivial(&self, ty: Idx) -> bool {
        self.lowering(ty).is_trivial()
    }

    fn is_address_only(&self, ty: Idx) -> bool {
        self.lowering(ty).is_address_only()
    }
}
