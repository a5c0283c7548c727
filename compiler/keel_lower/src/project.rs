//! Member projection.
//!
//! Projecting a member specializes its declared type with the aggregate's
//! generic arguments, lowers the result, and then picks the storage category
//! the member is reached through.

use keel_types::{CaseId, FieldId, NominalMember};

use crate::{AggregateShape, LoweredType, TypeLowering};

impl LoweredType {
    /// Lowered type of a stored field of this struct or class.
    ///
    /// The field is an address when the aggregate is an address, or when the
    /// aggregate is a class: class fields live in the heap box, never in the
    /// reference value itself.
    pub fn field_type(self, field: FieldId, cx: &impl TypeLowering) -> LoweredType {
        let pool = cx.pool();
        debug_assert_eq!(
            AggregateShape::of(self.ty(), pool).decl(),
            Some(field.owner),
            "field of {} projected from {}",
            pool.decl_name(field.owner),
            pool.format_type(self.ty()),
        );

        let field_ty = pool.member_type(self.ty(), pool.field_type(field));
        let lowered = cx.lowered_type(field_ty);
        if self.is_address() || pool.decl_kind(field.owner).is_boxed() {
            lowered.address_type()
        } else {
            lowered.object_type()
        }
    }

    /// Lowered payload type of a case of this enum, in the enum's own
    /// category.
    ///
    /// # Panics
    /// Panics if the case carries no payload.
    pub fn enum_case_type(self, case: CaseId, cx: &impl TypeLowering) -> LoweredType {
        let pool = cx.pool();
        debug_assert_eq!(
            AggregateShape::of(self.ty(), pool),
            AggregateShape::Enum(case.owner),
            "case of {} projected from {}",
            pool.decl_name(case.owner),
            pool.format_type(self.ty()),
        );

        let Some(payload) = pool.case_payload(case) else {
            panic!(
                "case {} of {} carries no payload",
                case.index,
                pool.decl_name(case.owner)
            );
        };
        let payload_ty = pool.member_type(self.ty(), payload);
        cx.lowered_type(payload_ty).with_category(self.category())
    }

    /// Lowered type of a field or payload-carrying case.
    pub fn member_type(self, member: NominalMember, cx: &impl TypeLowering) -> LoweredType {
        match member {
            NominalMember::Field(field) => self.field_type(field, cx),
            NominalMember::Case(case) => self.enum_case_type(case, cx),
        }
    }

    /// Lowered type of one tuple element, in the tuple's own category.
    pub fn tuple_element_type(self, index: usize, cx: &impl TypeLowering) -> LoweredType {
        let elem = cx.pool().tuple_elem(self.ty(), index);
        cx.lowered_type(elem).with_category(self.category())
    }

    /// Lowered instance type of a metatype value.
    pub fn metatype_instance_type(self, cx: &impl TypeLowering) -> LoweredType {
        debug_assert!(self.is_object(), "metatype instances are only read from values");
        let instance = cx.pool().metatype_instance(self.ty());
        cx.lowered_type(instance)
    }
}
