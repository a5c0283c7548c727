//! Shared fixtures for lowering tests. Only compiled in test builds.

use keel_types::{DeclAttrs, DeclId, Idx, NominalKind, Pool};
use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber honoring `RUST_LOG`. Safe to call from
/// every test.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Declare a non-generic nominal with the given stored fields and return its
/// instance type.
pub(crate) fn nominal_with_fields(
    pool: &Pool,
    name: &str,
    kind: NominalKind,
    fields: &[(&str, Idx)],
) -> (DeclId, Idx) {
    let decl = pool.declare(name, kind, 0, DeclAttrs::empty());
    for &(field, ty) in fields {
        pool.add_field(decl, field, ty);
    }
    (decl, pool.nominal(decl, &[]))
}

/// A non-generic struct instance.
pub(crate) fn structure(pool: &Pool, name: &str, fields: &[(&str, Idx)]) -> (DeclId, Idx) {
    nominal_with_fields(pool, name, NominalKind::Struct, fields)
}

/// A non-generic class instance.
pub(crate) fn class(pool: &Pool, name: &str, fields: &[(&str, Idx)]) -> (DeclId, Idx) {
    nominal_with_fields(pool, name, NominalKind::Class, fields)
}

/// A non-generic enum instance.
pub(crate) fn enumeration(
    pool: &Pool,
    name: &str,
    cases: &[(&str, Option<Idx>)],
) -> (DeclId, Idx) {
    let decl = pool.declare(name, NominalKind::Enum, 0, DeclAttrs::empty());
    for &(case, payload) in cases {
        pool.add_case(decl, case, payload);
    }
    (decl, pool.nominal(decl, &[]))
}
