//! Classification predicates on lowered types.

use keel_types::{DeclAttrs, NominalKind, Pool, Tag};

use crate::{LoweredType, TypeLowering};

impl LoweredType {
    /// Whether values of this type can be copied and destroyed as plain bits.
    pub fn is_trivial(self, cx: &impl TypeLowering) -> bool {
        cx.is_trivial(self.ty())
    }

    /// Whether values of this type (or the value behind this address) must
    /// always be handled in memory.
    pub fn is_address_only(self, cx: &impl TypeLowering) -> bool {
        cx.is_address_only(self.ty())
    }

    /// Whether values are reference-counted heap object handles: class
    /// instances, class-constrained generic parameters, and the built-in
    /// native and unknown object types.
    pub fn is_reference_counted_handle(self, pool: &Pool) -> bool {
        match pool.tag(self.ty()) {
            Tag::NativeObject | Tag::UnknownObject => true,
            Tag::Nominal => pool.decl_kind(pool.nominal_decl(self.ty())) == NominalKind::Class,
            Tag::GenericParam => pool.generic_param_is_class_bound(self.ty()),
            Tag::RawPointer
            | Tag::Word
            | Tag::Float
            | Tag::Int
            | Tag::Tuple
            | Tag::Function
            | Tag::Metatype => false,
        }
    }

    /// The lowered wrapped type, if this is an instance of the optional
    /// wrapper. Returns `None` for every other type.
    pub fn optional_payload(self, cx: &impl TypeLowering) -> Option<LoweredType> {
        let pool = cx.pool();
        let object = self.object_type();
        let (decl, _) = pool.as_nominal(object.ty())?;
        if !pool.decl_attrs(decl).contains(DeclAttrs::OPTIONAL) {
            return None;
        }
        let wrapped = pool.nominal_args(object.ty()).first().copied()?;
        Some(cx.lowered_type(wrapped))
    }

    /// Whether this is a struct with storage that cannot be addressed field
    /// by field.
    pub fn has_unreferenceable_storage(self, pool: &Pool) -> bool {
        match pool.as_nominal(self.ty()) {
            Some((decl, NominalKind::Struct)) => pool
                .decl_attrs(decl)
                .contains(DeclAttrs::UNREFERENCEABLE_STORAGE),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests;
