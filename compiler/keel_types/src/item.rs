//! Compact type item storage.
//!
//! Each type in the pool is stored as an `Item`: a tag plus a 32-bit data
//! word whose meaning depends on the tag.

use crate::{Idx, Tag};

/// A single type item in the pool.
#[derive(Copy, Clone, Debug)]
#[repr(C)]
pub(crate) struct Item {
    pub(crate) tag: Tag,
    /// Inline payload, or a start offset into the extra array.
    pub(crate) data: u32,
}

impl Item {
    #[inline]
    pub(crate) const fn new(tag: Tag, data: u32) -> Self {
        Self { tag, data }
    }

    /// Child index for single-child types (metatypes).
    #[inline]
    pub(crate) const fn child(self) -> Idx {
        Idx::from_raw(self.data)
    }

    /// Extra array offset for types where `tag.uses_extra()`.
    #[inline]
    pub(crate) const fn extra_idx(self) -> usize {
        self.data as usize
    }
}

const _: () = assert!(std::mem::size_of::<Item>() <= 8);
