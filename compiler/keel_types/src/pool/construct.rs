//! Type construction helpers for the Pool.

use crate::{DeclAttrs, DeclId, FloatKind, Idx, NominalKind, Pool, Tag};

impl Pool {
    // === Built-in Constructors ===

    /// A fixed-width integer type `Builtin.Int<bits>`.
    pub fn builtin_integer(&self, bits: u32) -> Idx {
        debug_assert!(bits > 0, "integer types must have a positive bit width");
        match bits {
            1 => Idx::INT1,
            8 => Idx::INT8,
            16 => Idx::INT16,
            32 => Idx::INT32,
            64 => Idx::INT64,
            _ => self.intern(Tag::Int, bits),
        }
    }

    /// The built-in type for a floating point format.
    pub const fn builtin_float(kind: FloatKind) -> Idx {
        match kind {
            FloatKind::Ieee16 => Idx::IEEE16,
            FloatKind::Ieee32 => Idx::IEEE32,
            FloatKind::Ieee64 => Idx::IEEE64,
            FloatKind::Ieee80 => Idx::IEEE80,
            FloatKind::Ieee128 => Idx::IEEE128,
            FloatKind::Ppc128 => Idx::PPC128,
        }
    }

    // === Structural Constructors ===

    /// Create a tuple type `(elems...)`.
    ///
    /// Empty tuples return `Idx::UNIT`.
    pub fn tuple(&self, elems: &[Idx]) -> Idx {
        if elems.is_empty() {
            return Idx::UNIT;
        }

        // Layout: [elem_count, elem0, elem1, ...]
        let mut extra = Vec::with_capacity(elems.len() + 1);
        extra.push(len_u32(elems.len()));
        extra.extend(elems.iter().map(|e| e.raw()));

        self.intern_complex(Tag::Tuple, &extra)
    }

    /// Create an instance of a nominal declaration with the given generic
    /// arguments.
    pub fn nominal(&self, decl: DeclId, args: &[Idx]) -> Idx {
        debug_assert_eq!(
            self.decl_generic_params(decl) as usize,
            args.len(),
            "generic argument count mismatch for {}",
            self.decl_name(decl),
        );

        // Layout: [decl, arg_count, arg0, arg1, ...]
        let mut extra = Vec::with_capacity(args.len() + 2);
        extra.push(decl.raw());
        extra.push(len_u32(args.len()));
        extra.extend(args.iter().map(|a| a.raw()));

        self.intern_complex(Tag::Nominal, &extra)
    }

    /// Create a closed function type `(params...) -> ret`.
    pub fn function(&self, params: &[Idx], ret: Idx) -> Idx {
        self.generic_function(0, params, ret)
    }

    /// Create a function type that binds `generic_params` parameters of its
    /// own, referenced from `params`/`ret` as `GenericParam` indices.
    ///
    /// Under the binder, indices `0..generic_params` are the function's own
    /// parameters and index `generic_params + j` is parameter `j` of the
    /// enclosing context. `struct S<T> { f: <U>(U) -> T }` stores `f` as
    /// `generic_function(1, &[τ_0], τ_1)`.
    pub fn generic_function(&self, generic_params: u32, params: &[Idx], ret: Idx) -> Idx {
        // Layout: [generic_count, param_count, param0, ..., return_type]
        let mut extra = Vec::with_capacity(params.len() + 3);
        extra.push(generic_params);
        extra.push(len_u32(params.len()));
        extra.extend(params.iter().map(|p| p.raw()));
        extra.push(ret.raw());

        self.intern_complex(Tag::Function, &extra)
    }

    /// Create the metatype `instance.Type`.
    pub fn metatype(&self, instance: Idx) -> Idx {
        self.intern(Tag::Metatype, instance.raw())
    }

    // === Generic Parameters ===

    /// An unconstrained generic parameter.
    pub fn generic_param(&self, index: u32) -> Idx {
        self.intern_complex(Tag::GenericParam, &[index, 0])
    }

    /// A generic parameter constrained to class instances.
    pub fn class_bound_param(&self, index: u32) -> Idx {
        self.intern_complex(Tag::GenericParam, &[index, 1])
    }

    // === Well-Known Declarations ===

    /// Declare the standard optional wrapper: `enum Optional<T> { none, some(T) }`.
    pub fn declare_optional(&self) -> DeclId {
        let decl = self.declare("Optional", NominalKind::Enum, 1, DeclAttrs::OPTIONAL);
        let wrapped = self.generic_param(0);
        self.add_case(decl, "none", None);
        self.add_case(decl, "some", Some(wrapped));
        decl
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "element counts are bounded by the extra array, which is u32-addressed"
)]
fn len_u32(len: usize) -> u32 {
    debug_assert!(u32::try_from(len).is_ok());
    len as u32
}
