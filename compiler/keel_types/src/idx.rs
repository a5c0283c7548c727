//! Unified type index handle.
//!
//! `Idx` is the abstract-type identity used throughout lowering. All frontend
//! types live in one interned [`Pool`](crate::Pool) and are referenced by a
//! 32-bit index, so type equality is index equality.
//!
//! Built-in types have fixed indices (0-15) and are pre-interned when the
//! pool is created.

use std::fmt;

/// A 32-bit index into the type pool.
///
/// Two structurally equal types always receive the same index, so
/// comparisons are O(1).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Built-in Types (indices 0-15) ===

    /// `Builtin.NativeObject`: a native reference-counted object pointer.
    pub const NATIVE_OBJECT: Self = Self(0);
    /// `Builtin.UnknownObject`: an opaque, possibly foreign object pointer.
    pub const UNKNOWN_OBJECT: Self = Self(1);
    /// `Builtin.RawPointer`: an untyped machine pointer.
    pub const RAW_POINTER: Self = Self(2);
    /// `Builtin.Word`: a pointer-sized integer.
    pub const WORD: Self = Self(3);
    /// IEEE 754 half precision.
    pub const IEEE16: Self = Self(4);
    /// IEEE 754 single precision.
    pub const IEEE32: Self = Self(5);
    /// IEEE 754 double precision.
    pub const IEEE64: Self = Self(6);
    /// x87 80-bit extended precision.
    pub const IEEE80: Self = Self(7);
    /// IEEE 754 quadruple precision.
    pub const IEEE128: Self = Self(8);
    /// PowerPC double-double.
    pub const PPC128: Self = Self(9);
    /// The empty tuple `()`.
    pub const UNIT: Self = Self(10);
    /// `Builtin.Int1`.
    pub const INT1: Self = Self(11);
    /// `Builtin.Int8`.
    pub const INT8: Self = Self(12);
    /// `Builtin.Int16`.
    pub const INT16: Self = Self(13);
    /// `Builtin.Int32`.
    pub const INT32: Self = Self(14);
    /// `Builtin.Int64`.
    pub const INT64: Self = Self(15);

    /// First index for dynamically interned types.
    pub const FIRST_DYNAMIC: u32 = 16;

    /// Sentinel value indicating no type.
    pub const NONE: Self = Self(u32::MAX);

    /// Create an index from a raw u32 value.
    ///
    /// The caller must ensure the index is valid in the pool it is used with.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a pre-interned built-in type.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Human-readable name for pre-interned types, `None` otherwise.
    #[inline]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("Builtin.NativeObject"),
            1 => Some("Builtin.UnknownObject"),
            2 => Some("Builtin.RawPointer"),
            3 => Some("Builtin.Word"),
            4 => Some("Builtin.FPIEEE16"),
            5 => Some("Builtin.FPIEEE32"),
            6 => Some("Builtin.FPIEEE64"),
            7 => Some("Builtin.FPIEEE80"),
            8 => Some("Builtin.FPIEEE128"),
            9 => Some("Builtin.FPPPC128"),
            10 => Some("()"),
            11 => Some("Builtin.Int1"),
            12 => Some("Builtin.Int8"),
            13 => Some("Builtin.Int16"),
            14 => Some("Builtin.Int32"),
            15 => Some("Builtin.Int64"),
            _ => None,
        }
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name(), *self) {
            (_, Self::NONE) => write!(f, "Idx::NONE"),
            (Some(name), _) => write!(f, "Idx({name})"),
            (None, _) => write!(f, "Idx({})", self.0),
        }
    }
}

impl fmt::Display for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name(), *self) {
            (_, Self::NONE) => write!(f, "<none>"),
            (Some(name), _) => f.write_str(name),
            (None, _) => write!(f, "type#{}", self.0),
        }
    }
}

// Idx must stay exactly 4 bytes.
const _: () = assert!(std::mem::size_of::<Idx>() == 4);
