//! Structural containment search.
//!
//! Answers "does this aggregate embed that type inline?" by walking tuple
//! elements, struct fields and enum payloads with an explicit worklist, so
//! stack depth does not grow with nesting depth. Classes are references and
//! end the walk.

use smallvec::{smallvec, SmallVec};

use crate::{AggregateShape, LoweredType, TypeLowering};

impl LoweredType {
    /// Whether `target` is `self` or is reachable from it through inline
    /// members (tuple elements, stored fields of structs, enum payloads).
    ///
    /// Neither type may mention a generic parameter; substitute first.
    /// Members are visited in declaration order.
    #[tracing::instrument(level = "trace", skip_all, fields(root = ?self, target = ?target))]
    pub fn contains_structurally(self, target: LoweredType, cx: &impl TypeLowering) -> bool {
        let pool = cx.pool();
        debug_assert!(
            !self.has_generic_param(pool),
            "aggregate {} must be proven non-generic before searching",
            pool.format_type(self.ty()),
        );
        debug_assert!(
            !target.has_generic_param(pool),
            "record {} must be proven non-generic before searching",
            pool.format_type(target.ty()),
        );

        let mut worklist: SmallVec<[LoweredType; 8]> = smallvec![self];

        while let Some(ty) = worklist.pop() {
            if ty == target {
                return true;
            }

            // Members are pushed in reverse so they pop in declaration order.
            match AggregateShape::of(ty.ty(), pool) {
                AggregateShape::Tuple(count) => {
                    for index in (0..count).rev() {
                        worklist.push(ty.tuple_element_type(index, cx));
                    }
                }
                AggregateShape::Enum(decl) => {
                    for case in pool.enum_cases(decl).into_iter().rev() {
                        if pool.case_payload(case).is_some() {
                            worklist.push(ty.enum_case_type(case, cx));
                        }
                    }
                }
                AggregateShape::Struct(decl) => {
                    for field in pool.stored_fields(decl).into_iter().rev() {
                        worklist.push(ty.field_type(field, cx));
                    }
                }
                // A class value is a fixed-size reference to its storage.
                AggregateShape::Class(_) | AggregateShape::Leaf => {}
            }
        }

        false
    }
}

#[cfg(test)]
mod tests;
