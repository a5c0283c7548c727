//! Type kind tag for tag-driven dispatch.
//!
//! Each type in the pool has a `Tag` that identifies its kind and
//! determines how to interpret the associated `data` field.
//!
//! # Tag Ranges
//!
//! - 0-15: Built-ins (data unused, or an inline width/format)
//! - 16-31: Structural types (data = extra index with length prefix)
//! - 32-47: Single-child types (data = child Idx)
//! - 48-63: Generic placeholders (data = extra index)

use std::fmt;

/// Type kind discriminant.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Tag {
    // === Built-ins (0-15) ===
    /// Native reference-counted object pointer.
    NativeObject = 0,
    /// Opaque object pointer of unknown provenance.
    UnknownObject = 1,
    /// Untyped machine pointer.
    RawPointer = 2,
    /// Pointer-sized integer.
    Word = 3,
    /// Floating point. data: [`FloatKind`] discriminant.
    Float = 4,
    /// Fixed-width integer. data: bit width (> 0).
    Int = 5,

    // === Structural (16-31) ===
    /// Tuple `(T1, T2, ...)`. extra: `[count, elems...]`.
    Tuple = 16,
    /// Nominal instance `D<A...>`. extra: `[decl, arg_count, args...]`.
    Nominal = 17,
    /// Function `<G> (P...) -> R`. extra: `[generic_count, param_count, params..., ret]`.
    Function = 18,

    // === Single-child (32-47) ===
    /// Metatype `T.Type`. data: instance Idx.
    Metatype = 32,

    // === Generic placeholders (48-63) ===
    /// Generic parameter (archetype). extra: `[index, class_bound]`.
    GenericParam = 48,
}

impl Tag {
    /// Check if this tag stores its payload in the extra array.
    #[inline]
    pub const fn uses_extra(self) -> bool {
        matches!(
            self,
            Self::Tuple | Self::Nominal | Self::Function | Self::GenericParam
        )
    }

    /// Check if this is a built-in tag.
    #[inline]
    pub const fn is_builtin(self) -> bool {
        (self as u8) < 16
    }

    /// Human-readable name for diagnostics and panic messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NativeObject => "native-object",
            Self::UnknownObject => "unknown-object",
            Self::RawPointer => "raw-pointer",
            Self::Word => "word",
            Self::Float => "float",
            Self::Int => "int",
            Self::Tuple => "tuple",
            Self::Nominal => "nominal",
            Self::Function => "function",
            Self::Metatype => "metatype",
            Self::GenericParam => "generic-param",
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag::{}", self.name())
    }
}

/// Floating point formats with a well-known built-in identity.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum FloatKind {
    Ieee16 = 0,
    Ieee32 = 1,
    Ieee64 = 2,
    Ieee80 = 3,
    Ieee128 = 4,
    Ppc128 = 5,
}

impl FloatKind {
    /// All formats, in discriminant order.
    pub const ALL: [Self; 6] = [
        Self::Ieee16,
        Self::Ieee32,
        Self::Ieee64,
        Self::Ieee80,
        Self::Ieee128,
        Self::Ppc128,
    ];

    /// Recover a kind from its discriminant.
    ///
    /// # Panics
    /// Panics if `raw` is not a valid discriminant.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Ieee16,
            1 => Self::Ieee32,
            2 => Self::Ieee64,
            3 => Self::Ieee80,
            4 => Self::Ieee128,
            5 => Self::Ppc128,
            _ => panic!("invalid float kind discriminant {raw}"),
        }
    }

    /// Storage width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Ieee16 => 16,
            Self::Ieee32 => 32,
            Self::Ieee64 => 64,
            Self::Ieee80 => 80,
            Self::Ieee128 | Self::Ppc128 => 128,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Ieee16 => "FPIEEE16",
            Self::Ieee32 => "FPIEEE32",
            Self::Ieee64 => "FPIEEE64",
            Self::Ieee80 => "FPIEEE80",
            Self::Ieee128 => "FPIEEE128",
            Self::Ppc128 => "FPPPC128",
        }
    }
}
