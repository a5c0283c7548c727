use pretty_assertions::assert_eq;

use crate::{DeclAttrs, NominalKind};

use super::*;

#[test]
fn substitute_replaces_bound_params() {
    let pool = Pool::new();
    let t0 = pool.generic_param(0);
    let t1 = pool.generic_param(1);
    let tup = pool.tuple(&[t0, Idx::WORD, t1]);

    let subs = SubstitutionList::from_args(&[Idx::INT8, Idx::IEEE32]);
    assert_eq!(
        pool.substitute(tup, &subs),
        pool.tuple(&[Idx::INT8, Idx::WORD, Idx::IEEE32])
    );
}

#[test]
fn unbound_params_are_left_in_place() {
    let pool = Pool::new();
    let t1 = pool.generic_param(1);
    let subs = SubstitutionList::from_args(&[Idx::INT8]);

    assert_eq!(pool.substitute(t1, &subs), t1);
}

#[test]
fn concrete_types_are_untouched() {
    let pool = Pool::new();
    let tup = pool.tuple(&[Idx::INT16, Idx::RAW_POINTER]);
    let before = pool.len();

    let subs = SubstitutionList::from_args(&[Idx::INT8]);
    assert_eq!(pool.substitute(tup, &subs), tup);
    assert_eq!(pool.len(), before);
}

#[test]
fn member_type_uses_base_arguments() {
    let pool = Pool::new();
    let boxed = pool.declare("Wrapper", NominalKind::Struct, 1, DeclAttrs::empty());
    let t0 = pool.generic_param(0);
    let field = pool.add_field(boxed, "items", pool.tuple(&[t0, t0]));

    let inst = pool.nominal(boxed, &[Idx::INT64]);
    assert_eq!(
        pool.member_type(inst, pool.field_type(field)),
        pool.tuple(&[Idx::INT64, Idx::INT64])
    );
}

#[test]
fn gather_substitutions_from_nominal() {
    let pool = Pool::new();
    let opt = pool.declare_optional();
    let inst = pool.nominal(opt, &[Idx::WORD]);

    let subs = pool.gather_substitutions(inst);
    assert_eq!(subs.len(), 1);
    assert_eq!(subs.lookup(0), Some(Idx::WORD));
    assert_eq!(subs.replacements(), vec![Idx::WORD]);
    assert!(pool.gather_substitutions(Idx::WORD).is_empty());
}

#[test]
fn specialize_closes_function() {
    let pool = Pool::new();
    let t0 = pool.generic_param(0);
    let poly = pool.generic_function(1, &[t0, Idx::WORD], pool.metatype(t0));

    let mut subs = SubstitutionList::new();
    subs.push(0, Idx::INT1);
    let closed = pool.specialize_function(poly, &subs);

    assert_eq!(
        closed,
        pool.function(&[Idx::INT1, Idx::WORD], pool.metatype(Idx::INT1))
    );
    assert_eq!(pool.function_generic_params(closed), 0);
    assert!(!pool.has_generic_param(closed));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "substitution arity mismatch")]
fn specialize_rejects_arity_mismatch() {
    let pool = Pool::new();
    let t0 = pool.generic_param(0);
    let poly = pool.generic_function(1, &[t0], t0);

    let _ = pool.specialize_function(poly, &SubstitutionList::new());
}

// ── Function binders ────────────────────────────────────────────

#[test]
fn substitution_skips_parameters_bound_by_a_function() {
    let pool = Pool::new();
    // struct Wrapper<T> { apply: <U>(U) -> T }
    let wrapper = pool.declare("Wrapper", NominalKind::Struct, 1, DeclAttrs::empty());
    let apply = pool.add_field(
        wrapper,
        "apply",
        pool.generic_function(1, &[pool.generic_param(0)], pool.generic_param(1)),
    );

    let inst = pool.nominal(wrapper, &[Idx::INT8]);
    let projected = pool.member_type(inst, pool.field_type(apply));

    assert_eq!(
        projected,
        pool.generic_function(1, &[pool.generic_param(0)], Idx::INT8)
    );
    assert_eq!(pool.format_type(projected), "<τ_0> (τ_0) -> Builtin.Int8");
}

#[test]
fn replacement_is_shifted_under_a_binder() {
    let pool = Pool::new();
    // <U>(U) -> (T, Word), with T := (τ_0, Int16) from an outer context.
    let func = pool.generic_function(
        1,
        &[pool.generic_param(0)],
        pool.tuple(&[pool.generic_param(1), Idx::WORD]),
    );
    let subs = SubstitutionList::from_args(&[pool.tuple(&[pool.generic_param(0), Idx::INT16])]);

    let expected = pool.generic_function(
        1,
        &[pool.generic_param(0)],
        pool.tuple(&[pool.tuple(&[pool.generic_param(1), Idx::INT16]), Idx::WORD]),
    );
    assert_eq!(pool.substitute(func, &subs), expected);
}

#[test]
fn specialize_renumbers_free_parameters() {
    let pool = Pool::new();
    let k1 = pool.class_bound_param(1);
    let poly = pool.generic_function(1, &[pool.generic_param(0)], k1);

    let closed = pool.specialize_function(poly, &SubstitutionList::from_args(&[Idx::IEEE32]));

    assert_eq!(closed, pool.function(&[Idx::IEEE32], pool.class_bound_param(0)));
    assert!(pool.generic_param_is_class_bound(pool.function_result(closed)));
}

#[test]
fn specialize_leaves_nested_binders_alone() {
    let pool = Pool::new();
    // <T> (<U>(U) -> T) -> T
    let inner = pool.generic_function(1, &[pool.generic_param(0)], pool.generic_param(1));
    let poly = pool.generic_function(1, &[inner], pool.generic_param(0));

    let closed = pool.specialize_function(poly, &SubstitutionList::from_args(&[Idx::WORD]));

    let closed_inner = pool.generic_function(1, &[pool.generic_param(0)], Idx::WORD);
    assert_eq!(closed, pool.function(&[closed_inner], Idx::WORD));
}

// ── Depth ───────────────────────────────────────────────────────

#[test]
fn deep_substitution_does_not_overflow() {
    let pool = Pool::new();
    let mut open = pool.generic_param(0);
    for _ in 0..50_000 {
        open = pool.tuple(&[Idx::WORD, open]);
    }

    let closed = pool.substitute(open, &SubstitutionList::from_args(&[Idx::INT8]));
    assert!(!pool.has_generic_param(closed));

    let mut innermost = closed;
    while pool.tag(innermost) == Tag::Tuple {
        innermost = pool.tuple_elem(innermost, 1);
    }
    assert_eq!(innermost, Idx::INT8);

    let text = pool.format_type(closed);
    assert!(text.ends_with("Builtin.Int8)"));
}
