use proptest::prelude::*;

use keel_types::{Idx, Pool};

use crate::test_helpers::{class, enumeration, init_tracing, structure};
use crate::LoweringCache;

use super::*;

/// Concrete built-in leaves, all distinct.
const LEAVES: [Idx; 8] = [
    Idx::RAW_POINTER,
    Idx::WORD,
    Idx::IEEE32,
    Idx::IEEE64,
    Idx::INT1,
    Idx::INT8,
    Idx::INT16,
    Idx::INT32,
];

fn contains(pool: &Pool, root: Idx, target: Idx) -> bool {
    let cache = LoweringCache::new(pool);
    LoweredType::value(root).contains_structurally(LoweredType::value(target), &cache)
}

// ── Reflexivity ─────────────────────────────────────────────────

#[test]
fn every_type_contains_itself() {
    let pool = Pool::new();
    let (_, s) = structure(&pool, "S", &[("x", Idx::WORD)]);
    let (_, k) = class(&pool, "K", &[("y", Idx::WORD)]);
    let (_, e) = enumeration(&pool, "E", &[("a", None)]);
    let cache = LoweringCache::new(&pool);

    for ty in [Idx::WORD, Idx::UNIT, s, k, e, pool.metatype(s)] {
        for category in [LoweredType::value(ty), LoweredType::address(ty)] {
            assert!(category.contains_structurally(category, &cache));
        }
    }
}

// ── Tuples ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn tuple_contains_exactly_its_leaves(a in 0..LEAVES.len(), b in 0..LEAVES.len(), c in 0..LEAVES.len()) {
        prop_assume!(a != b && c != a && c != b);
        let pool = Pool::new();
        let (a, b, c) = (LEAVES[a], LEAVES[b], LEAVES[c]);
        let tup = pool.tuple(&[a, b]);

        prop_assert!(contains(&pool, tup, a));
        prop_assert!(contains(&pool, tup, b));
        prop_assert!(!contains(&pool, tup, c));
    }
}

#[test]
fn nested_tuples_are_searched() {
    let pool = Pool::new();
    let inner = pool.tuple(&[Idx::INT8, Idx::IEEE16]);
    let outer = pool.tuple(&[Idx::WORD, inner]);

    assert!(contains(&pool, outer, inner));
    assert!(contains(&pool, outer, Idx::IEEE16));
    assert!(!contains(&pool, inner, outer));
}

#[test]
fn category_must_match() {
    let pool = Pool::new();
    let tup = pool.tuple(&[Idx::INT8, Idx::WORD]);
    let cache = LoweringCache::new(&pool);

    let root = LoweredType::value(tup);
    assert!(!root.contains_structurally(LoweredType::address(Idx::WORD), &cache));
    assert!(LoweredType::address(tup).contains_structurally(LoweredType::address(Idx::WORD), &cache));
}

// ── Structs and classes ─────────────────────────────────────────

#[test]
fn struct_fields_are_searched() {
    let pool = Pool::new();
    let (_, inner) = structure(&pool, "Inner", &[("bits", Idx::INT16)]);
    let (_, outer) = structure(&pool, "Outer", &[("id", Idx::WORD), ("inner", inner)]);

    assert!(contains(&pool, outer, inner));
    assert!(contains(&pool, outer, Idx::INT16));
    assert!(!contains(&pool, outer, Idx::INT32));
}

#[test]
fn class_is_an_indirection_boundary() {
    init_tracing();
    let pool = Pool::new();
    let (_, k) = class(&pool, "K", &[("hidden", Idx::IEEE80)]);
    let (_, s) = structure(&pool, "S", &[("k", k), ("n", Idx::INT8)]);

    assert!(contains(&pool, s, k));
    assert!(contains(&pool, s, Idx::INT8));
    assert!(!contains(&pool, s, Idx::IEEE80));
    assert!(!contains(&pool, k, Idx::IEEE80));
}

#[test]
fn generic_struct_instances_are_searched_after_substitution() {
    let pool = Pool::new();
    let opt = pool.declare_optional();
    let (_, s) = structure(&pool, "S", &[("maybe", pool.nominal(opt, &[Idx::INT64]))]);

    assert!(contains(&pool, s, Idx::INT64));
    assert!(!contains(&pool, s, Idx::INT32));
}

// ── Enums ───────────────────────────────────────────────────────

#[test]
fn enum_payloads_are_searched() {
    let pool = Pool::new();
    let (_, payload) = structure(&pool, "Payload", &[("p", Idx::RAW_POINTER)]);
    let (_, e) = enumeration(
        &pool,
        "E",
        &[("empty", None), ("full", Some(payload)), ("num", Some(Idx::INT32))],
    );

    assert!(contains(&pool, e, payload));
    assert!(contains(&pool, e, Idx::RAW_POINTER));
    assert!(contains(&pool, e, Idx::INT32));
    assert!(!contains(&pool, e, Idx::WORD));
}

#[test]
fn payloadless_enum_contains_only_itself() {
    let pool = Pool::new();
    let (_, e) = enumeration(&pool, "Flag", &[("on", None), ("off", None)]);

    assert!(contains(&pool, e, e));
    assert!(!contains(&pool, e, Idx::UNIT));
}

// ── Leaves and depth ────────────────────────────────────────────

#[test]
fn leaves_contribute_no_edges() {
    let pool = Pool::new();
    let func = pool.function(&[Idx::INT8], Idx::WORD);
    let meta = pool.metatype(pool.tuple(&[Idx::INT8, Idx::WORD]));

    assert!(!contains(&pool, func, Idx::INT8));
    assert!(!contains(&pool, meta, Idx::INT8));
    assert!(!contains(&pool, Idx::NATIVE_OBJECT, Idx::WORD));
}

#[test]
fn deep_nesting_with_an_empty_cache() {
    let pool = Pool::new();
    let mut ty = Idx::INT8;
    for _ in 0..20_000 {
        ty = pool.tuple(&[Idx::WORD, ty]);
    }
    let cache = LoweringCache::new(&pool);

    let root = LoweredType::value(ty);
    assert!(root.contains_structurally(LoweredType::value(Idx::INT8), &cache));
    assert!(!root.contains_structurally(LoweredType::value(Idx::INT16), &cache));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "must be proven non-generic")]
fn generic_root_is_rejected() {
    let pool = Pool::new();
    let open = pool.tuple(&[pool.generic_param(0), Idx::WORD]);

    let _ = contains(&pool, open, Idx::WORD);
}
