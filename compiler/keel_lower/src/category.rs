//! Storage category of a lowered type.

use std::fmt;

/// How a lowered value is held: directly, or through a memory location.
///
/// The category is a view over a type identity. Switching it never changes
/// which frontend type is described.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum StorageCategory {
    /// A direct machine value (register or SSA value).
    Value,
    /// The address of a memory location holding the value.
    Address,
}

impl StorageCategory {
    #[inline]
    pub const fn is_value(self) -> bool {
        matches!(self, Self::Value)
    }

    #[inline]
    pub const fn is_address(self) -> bool {
        matches!(self, Self::Address)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Address => "address",
        }
    }
}

impl fmt::Display for StorageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
