//! Canonical lowered forms of built-in types.
//!
//! Every factory yields a `Value`-category result. Results depend only on
//! their inputs, so repeated calls produce equal values.

use keel_types::{FloatKind, Idx, Pool};

use crate::LoweredType;

/// Access to the frontend's well-known built-in type identities.
pub trait FrontendTypeContext {
    fn native_object_type(&self) -> Idx;
    fn unknown_object_type(&self) -> Idx;
    fn raw_pointer_type(&self) -> Idx;
    fn word_type(&self) -> Idx;
    fn float_type(&self, kind: FloatKind) -> Idx;
    /// The fixed-width integer type of `bits` bits, interning it if needed.
    fn integer_type(&self, bits: u32) -> Idx;
}

impl FrontendTypeContext for Pool {
    fn native_object_type(&self) -> Idx {
        Idx::NATIVE_OBJECT
    }

    fn unknown_object_type(&self) -> Idx {
        Idx::UNKNOWN_OBJECT
    }

    fn raw_pointer_type(&self) -> Idx {
        Idx::RAW_POINTER
    }

    fn word_type(&self) -> Idx {
        Idx::WORD
    }

    fn float_type(&self, kind: FloatKind) -> Idx {
        Pool::builtin_float(kind)
    }

    fn integer_type(&self, bits: u32) -> Idx {
        self.builtin_integer(bits)
    }
}

impl LoweredType {
    pub fn native_object(cx: &impl FrontendTypeContext) -> Self {
        Self::value(cx.native_object_type())
    }

    pub fn unknown_object(cx: &impl FrontendTypeContext) -> Self {
        Self::value(cx.unknown_object_type())
    }

    pub fn raw_pointer(cx: &impl FrontendTypeContext) -> Self {
        Self::value(cx.raw_pointer_type())
    }

    /// A fixed-width integer. `bits` must be positive.
    pub fn builtin_integer(bits: u32, cx: &impl FrontendTypeContext) -> Self {
        debug_assert!(bits > 0, "integer types must have a positive bit width");
        Self::value(cx.integer_type(bits))
    }

    pub fn builtin_float(kind: FloatKind, cx: &impl FrontendTypeContext) -> Self {
        Self::value(cx.float_type(kind))
    }

    /// The pointer-sized machine integer.
    pub fn builtin_word(cx: &impl FrontendTypeContext) -> Self {
        Self::value(cx.word_type())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn factories_produce_values() {
        let pool = Pool::new();

        let built = [
            LoweredType::native_object(&pool),
            LoweredType::unknown_object(&pool),
            LoweredType::raw_pointer(&pool),
            LoweredType::builtin_word(&pool),
            LoweredType::builtin_integer(24, &pool),
            LoweredType::builtin_float(FloatKind::Ieee80, &pool),
        ];
        for ty in built {
            assert!(ty.is_object(), "{} should be a value", ty.format(&pool));
        }
        assert_eq!(built[0].ty(), Idx::NATIVE_OBJECT);
        assert_eq!(built[2].ty(), Idx::RAW_POINTER);
        assert_eq!(built[5].ty(), Idx::IEEE80);
    }

    #[test]
    fn integer_factory_is_idempotent() {
        let pool = Pool::new();

        assert_eq!(
            LoweredType::builtin_integer(24, &pool),
            LoweredType::builtin_integer(24, &pool)
        );
        assert_eq!(
            LoweredType::builtin_integer(64, &pool),
            LoweredType::value(Idx::INT64)
        );
        assert_ne!(
            LoweredType::builtin_integer(24, &pool),
            LoweredType::builtin_integer(25, &pool)
        );
    }

    #[test]
    fn each_float_format_is_distinct() {
        let pool = Pool::new();

        let mut seen: Vec<LoweredType> = Vec::new();
        for kind in FloatKind::ALL {
            let ty = LoweredType::builtin_float(kind, &pool);
            assert!(!seen.contains(&ty));
            assert_eq!(pool.float_kind(ty.ty()), kind);
            seen.push(ty);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "positive bit width")]
    fn zero_width_integer_is_rejected() {
        let pool = Pool::new();
        let _ = LoweredType::builtin_integer(0, &pool);
    }
}
