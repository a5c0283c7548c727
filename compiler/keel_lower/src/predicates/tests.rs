use pretty_assertions::assert_eq;

use keel_types::{DeclAttrs, Idx, NominalKind, Pool};

use crate::test_helpers::{class, enumeration, structure};
use crate::LoweringCache;

use super::*;

// ── Trivial / address-only ──────────────────────────────────────

#[test]
fn classification_ignores_category() {
    let pool = Pool::new();
    let (_, point) = structure(&pool, "Point", &[("x", Idx::INT32)]);
    let open = pool.tuple(&[pool.generic_param(0)]);
    let cache = LoweringCache::new(&pool);

    for ty in [LoweredType::value(point), LoweredType::address(point)] {
        assert!(ty.is_trivial(&cache));
        assert!(!ty.is_address_only(&cache));
    }
    for ty in [LoweredType::value(open), LoweredType::address(open)] {
        assert!(!ty.is_trivial(&cache));
        assert!(ty.is_address_only(&cache));
    }
}

// ── Reference-counted handles ───────────────────────────────────

#[test]
fn reference_counted_handles() {
    let pool = Pool::new();
    let (_, node) = class(&pool, "Node", &[]);
    let handles = [
        Idx::NATIVE_OBJECT,
        Idx::UNKNOWN_OBJECT,
        node,
        pool.class_bound_param(0),
    ];

    for ty in handles {
        assert!(
            LoweredType::value(ty).is_reference_counted_handle(&pool),
            "{}",
            pool.format_type(ty)
        );
    }
}

#[test]
fn values_are_not_handles() {
    let pool = Pool::new();
    let (_, point) = structure(&pool, "Point", &[("x", Idx::WORD)]);
    let (_, flag) = enumeration(&pool, "Flag", &[("on", None)]);
    let others = [
        Idx::RAW_POINTER,
        Idx::WORD,
        Idx::IEEE32,
        Idx::INT8,
        Idx::UNIT,
        point,
        flag,
        pool.tuple(&[Idx::NATIVE_OBJECT, Idx::WORD]),
        pool.function(&[], Idx::UNIT),
        pool.metatype(Idx::NATIVE_OBJECT),
        pool.generic_param(0),
    ];

    for ty in others {
        assert!(
            !LoweredType::value(ty).is_reference_counted_handle(&pool),
            "{}",
            pool.format_type(ty)
        );
    }
}

// ── Optional payload ────────────────────────────────────────────

#[test]
fn optional_payload_unwraps_one_level() {
    let pool = Pool::new();
    let opt = pool.declare_optional();
    let inner = pool.nominal(opt, &[Idx::INT8]);
    let outer = pool.nominal(opt, &[inner]);
    let cache = LoweringCache::new(&pool);

    assert_eq!(
        LoweredType::value(inner).optional_payload(&cache),
        Some(LoweredType::value(Idx::INT8))
    );
    assert_eq!(
        LoweredType::address(outer).optional_payload(&cache),
        Some(LoweredType::value(inner))
    );
}

#[test]
fn non_optionals_have_no_payload() {
    let pool = Pool::new();
    let (_, point) = structure(&pool, "Point", &[("x", Idx::WORD)]);
    let box_decl = pool.declare("Box", NominalKind::Enum, 1, DeclAttrs::empty());
    pool.add_case(box_decl, "empty", None);
    pool.add_case(box_decl, "full", Some(pool.generic_param(0)));
    let lookalike = pool.nominal(box_decl, &[Idx::INT8]);
    let cache = LoweringCache::new(&pool);

    for ty in [Idx::INT8, Idx::UNIT, point, lookalike] {
        assert_eq!(LoweredType::value(ty).optional_payload(&cache), None);
    }
}

// ── Unreferenceable storage ─────────────────────────────────────

#[test]
fn unreferenceable_storage_is_a_struct_attribute() {
    let pool = Pool::new();
    let packed = pool.declare("Packed", NominalKind::Struct, 0, DeclAttrs::UNREFERENCEABLE_STORAGE);
    pool.add_field(packed, "bits", Idx::INT8);
    let packed_ty = pool.nominal(packed, &[]);
    let (_, plain) = structure(&pool, "Plain", &[("bits", Idx::INT8)]);
    let odd_class = pool.declare("Odd", NominalKind::Class, 0, DeclAttrs::UNREFERENCEABLE_STORAGE);
    let odd_ty = pool.nominal(odd_class, &[]);

    assert!(LoweredType::value(packed_ty).has_unreferenceable_storage(&pool));
    assert!(LoweredType::address(packed_ty).has_unreferenceable_storage(&pool));
    assert!(!LoweredType::value(plain).has_unreferenceable_storage(&pool));
    assert!(!LoweredType::value(odd_ty).has_unreferenceable_storage(&pool));
    assert!(!LoweredType::value(Idx::WORD).has_unreferenceable_storage(&pool));
}
