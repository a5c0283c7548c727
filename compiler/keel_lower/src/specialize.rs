//! Generic argument substitution on function types.

use keel_types::SubstitutionList;

use crate::{LoweredType, TypeLowering};

impl LoweredType {
    /// Specialize a polymorphic function type with `subs`.
    ///
    /// An empty list is only valid for an already closed function, which is
    /// returned unchanged. Function values are always direct values, so the
    /// specialized type is `Value`.
    pub fn specialize_function(self, subs: &SubstitutionList, cx: &impl TypeLowering) -> LoweredType {
        let pool = cx.pool();
        let generics = pool.function_generic_params(self.ty());

        if subs.is_empty() {
            debug_assert!(
                generics == 0,
                "function type without substitutions must not be polymorphic: {}",
                pool.format_type(self.ty()),
            );
            return self;
        }

        debug_assert!(
            generics > 0,
            "can only substitute generic arguments on polymorphic function types: {}",
            pool.format_type(self.ty()),
        );
        LoweredType::value(pool.specialize_function(self.ty(), subs))
    }

    /// The substitutions bound by this type's generic arguments.
    pub fn gather_all_substitutions(self, cx: &impl TypeLowering) -> SubstitutionList {
        cx.pool().gather_substitutions(self.ty())
    }
}
