//! The interned type pool.
//!
//! `Pool` owns every frontend type and nominal declaration. Types are
//! hash-consed: interning structurally equal data twice yields the same
//! [`Idx`], so identity comparison is index comparison.
//!
//! # Thread Safety
//!
//! All methods take `&self`. Storage sits behind a single `RwLock`; lookups
//! take the read lock, and interning uses a read-lock fast path followed by
//! a double-checked insert under the write lock. Many lowering workers can
//! therefore share one pool and intern substituted types concurrently.
//!
//! # Layout
//!
//! Each type is an [`Item`] (tag + 32-bit data). Types with variable-size
//! payloads store a start offset into a shared `extra` array, with the
//! layout documented on each [`Tag`] variant.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::item::Item;
use crate::{
    CaseDecl, CaseId, DeclAttrs, DeclId, FieldDecl, FieldId, FloatKind, Idx, NominalDecl,
    NominalKind, NominalMember, Tag, TypeFlags,
};

mod construct;
mod format;

/// Hash-consing key: the tag plus its full payload.
#[derive(Clone, PartialEq, Eq, Hash)]
struct ItemKey {
    tag: Tag,
    payload: Box<[u32]>,
}

struct PoolData {
    items: Vec<Item>,
    flags: Vec<TypeFlags>,
    extra: Vec<u32>,
    lookup: FxHashMap<ItemKey, Idx>,
    decls: Vec<NominalDecl>,
}

impl PoolData {
    fn flags_of(&self, raw: u32) -> TypeFlags {
        self.flags[raw as usize]
    }

    fn children_flags(&self, children: &[u32]) -> TypeFlags {
        TypeFlags::propagate_all(children.iter().map(|&raw| self.flags_of(raw)))
    }

    /// Flags for a not-yet-interned type, derived from its already interned
    /// children.
    fn compute_flags(&self, key: &ItemKey) -> TypeFlags {
        let payload = &key.payload;
        match key.tag {
            Tag::NativeObject
            | Tag::UnknownObject
            | Tag::RawPointer
            | Tag::Word
            | Tag::Float
            | Tag::Int => TypeFlags::IS_BUILTIN,
            Tag::Tuple => TypeFlags::IS_TUPLE | self.children_flags(&payload[1..]),
            Tag::Nominal => TypeFlags::IS_NOMINAL | self.children_flags(&payload[2..]),
            Tag::Function => {
                let mut flags = TypeFlags::IS_FUNCTION | self.children_flags(&payload[2..]);
                if payload[0] > 0 {
                    flags |= TypeFlags::IS_POLYMORPHIC;
                }
                flags
            }
            Tag::Metatype => {
                TypeFlags::IS_METATYPE | TypeFlags::propagate_from(self.flags_of(payload[0]))
            }
            Tag::GenericParam => {
                let mut flags = TypeFlags::IS_GENERIC_PARAM | TypeFlags::HAS_GENERIC_PARAM;
                if payload[1] != 0 {
                    flags |= TypeFlags::HAS_CLASS_BOUND_PARAM;
                }
                flags
            }
        }
    }

    fn decl(&self, id: DeclId) -> &NominalDecl {
        &self.decls[id.index()]
    }
}

/// Interned storage for frontend types and nominal declarations.
pub struct Pool {
    data: RwLock<PoolData>,
}

impl Pool {
    /// Create a pool with all built-in types pre-interned at their fixed
    /// indices.
    pub fn new() -> Self {
        let pool = Self {
            data: RwLock::new(PoolData {
                items: Vec::with_capacity(256),
                flags: Vec::with_capacity(256),
                extra: Vec::with_capacity(1024),
                lookup: FxHashMap::default(),
                decls: Vec::new(),
            }),
        };
        pool.pre_intern_builtins();
        pool
    }

    fn pre_intern_builtins(&self) {
        for raw in 0..Idx::FIRST_DYNAMIC {
            let expected = Idx::from_raw(raw);
            let idx = match expected {
                Idx::NATIVE_OBJECT => self.intern(Tag::NativeObject, 0),
                Idx::UNKNOWN_OBJECT => self.intern(Tag::UnknownObject, 0),
                Idx::RAW_POINTER => self.intern(Tag::RawPointer, 0),
                Idx::WORD => self.intern(Tag::Word, 0),
                Idx::UNIT => self.intern_complex(Tag::Tuple, &[0]),
                Idx::INT1 => self.intern(Tag::Int, 1),
                Idx::INT8 => self.intern(Tag::Int, 8),
                Idx::INT16 => self.intern(Tag::Int, 16),
                Idx::INT32 => self.intern(Tag::Int, 32),
                Idx::INT64 => self.intern(Tag::Int, 64),
                // Indices 4-9 are the float formats, in `FloatKind` order.
                _ => self.intern(Tag::Float, raw - Idx::IEEE16.raw()),
            };
            debug_assert_eq!(idx, expected, "built-in interned out of order");
        }
    }

    // === Interning ===

    /// Intern a type whose payload fits in the data word.
    pub(crate) fn intern(&self, tag: Tag, data: u32) -> Idx {
        debug_assert!(!tag.uses_extra(), "{tag:?} requires extra storage");
        self.intern_key(ItemKey {
            tag,
            payload: Box::new([data]),
        })
    }

    /// Intern a type whose payload lives in the extra array.
    pub(crate) fn intern_complex(&self, tag: Tag, extra: &[u32]) -> Idx {
        debug_assert!(tag.uses_extra(), "{tag:?} stores its payload inline");
        self.intern_key(ItemKey {
            tag,
            payload: extra.into(),
        })
    }

    fn intern_key(&self, key: ItemKey) -> Idx {
        // Fast path: already interned.
        if let Some(&idx) = self.data.read().lookup.get(&key) {
            return idx;
        }

        let mut data = self.data.write();

        // Double-check after acquiring the write lock.
        if let Some(&idx) = data.lookup.get(&key) {
            return idx;
        }

        let raw = match u32::try_from(data.items.len()) {
            Ok(raw) if raw != u32::MAX => raw,
            _ => panic!("type pool exceeded {} entries", u32::MAX),
        };
        let flags = data.compute_flags(&key);
        let item = if key.tag.uses_extra() {
            let start = match u32::try_from(data.extra.len()) {
                Ok(start) => start,
                Err(_) => panic!("type pool extra storage exceeded {} words", u32::MAX),
            };
            data.extra.extend_from_slice(&key.payload);
            Item::new(key.tag, start)
        } else {
            Item::new(key.tag, key.payload[0])
        };

        let idx = Idx::from_raw(raw);
        data.items.push(item);
        data.flags.push(flags);
        data.lookup.insert(key, idx);
        idx
    }

    // === Basic Queries ===

    /// Number of interned types.
    pub fn len(&self) -> usize {
        self.data.read().items.len()
    }

    /// Always false: built-ins are interned at construction.
    pub fn is_empty(&self) -> bool {
        self.data.read().items.is_empty()
    }

    fn item(&self, idx: Idx) -> Item {
        debug_assert!(!idx.is_none(), "queried the NONE sentinel");
        self.data.read().items[idx.raw() as usize]
    }

    /// The kind of a type.
    pub fn tag(&self, idx: Idx) -> Tag {
        self.item(idx).tag
    }

    /// Pre-computed flags of a type.
    pub fn flags(&self, idx: Idx) -> TypeFlags {
        self.data.read().flags[idx.raw() as usize]
    }

    /// Whether the type mentions a generic parameter.
    pub fn has_generic_param(&self, idx: Idx) -> bool {
        !self.flags(idx).is_concrete()
    }

    /// Run `f` over the extra payload of a type, asserting its tag.
    fn with_extra<R>(&self, idx: Idx, expected: Tag, f: impl FnOnce(&[u32]) -> R) -> R {
        let data = self.data.read();
        let item = data.items[idx.raw() as usize];
        assert!(
            item.tag == expected,
            "expected {} type, found {} ({idx:?})",
            expected.name(),
            item.tag.name(),
        );
        f(&data.extra[item.extra_idx()..])
    }

    fn inline_data(&self, idx: Idx, expected: Tag) -> Item {
        let item = self.item(idx);
        assert!(
            item.tag == expected,
            "expected {} type, found {} ({idx:?})",
            expected.name(),
            item.tag.name(),
        );
        item
    }

    // === Built-in Accessors ===

    /// Bit width of a fixed-width integer type.
    pub fn int_width(&self, idx: Idx) -> u32 {
        self.inline_data(idx, Tag::Int).data
    }

    /// Format of a floating point type.
    pub fn float_kind(&self, idx: Idx) -> FloatKind {
        FloatKind::from_raw(self.inline_data(idx, Tag::Float).data)
    }

    // === Tuple Accessors ===

    /// Element types of a tuple, in order.
    pub fn tuple_elems(&self, idx: Idx) -> Vec<Idx> {
        self.with_extra(idx, Tag::Tuple, |extra| {
            let count = extra[0] as usize;
            extra[1..=count].iter().copied().map(Idx::from_raw).collect()
        })
    }

    /// A single tuple element type.
    pub fn tuple_elem(&self, idx: Idx, index: usize) -> Idx {
        self.with_extra(idx, Tag::Tuple, |extra| {
            let count = extra[0] as usize;
            assert!(index < count, "tuple index {index} out of range ({count})");
            Idx::from_raw(extra[1 + index])
        })
    }

    // === Nominal Accessors ===

    /// Declaration of a nominal instance.
    pub fn nominal_decl(&self, idx: Idx) -> DeclId {
        self.with_extra(idx, Tag::Nominal, |extra| DeclId::from_raw(extra[0]))
    }

    /// Generic arguments of a nominal instance, in parameter order.
    pub fn nominal_args(&self, idx: Idx) -> Vec<Idx> {
        self.with_extra(idx, Tag::Nominal, |extra| {
            let count = extra[1] as usize;
            extra[2..2 + count]
                .iter()
                .copied()
                .map(Idx::from_raw)
                .collect()
        })
    }

    /// Declaration and kind of a nominal instance, `None` for other shapes.
    pub fn as_nominal(&self, idx: Idx) -> Option<(DeclId, NominalKind)> {
        let data = self.data.read();
        let item = data.items[idx.raw() as usize];
        if item.tag != Tag::Nominal {
            return None;
        }
        let decl = DeclId::from_raw(data.extra[item.extra_idx()]);
        Some((decl, data.decl(decl).kind))
    }

    // === Function Accessors ===

    /// Number of generic parameters a function type binds itself.
    pub fn function_generic_params(&self, idx: Idx) -> u32 {
        self.with_extra(idx, Tag::Function, |extra| extra[0])
    }

    /// Parameter types of a function.
    pub fn function_params(&self, idx: Idx) -> Vec<Idx> {
        self.with_extra(idx, Tag::Function, |extra| {
            let count = extra[1] as usize;
            extra[2..2 + count]
                .iter()
                .copied()
                .map(Idx::from_raw)
                .collect()
        })
    }

    /// Result type of a function.
    pub fn function_result(&self, idx: Idx) -> Idx {
        self.with_extra(idx, Tag::Function, |extra| {
            let count = extra[1] as usize;
            Idx::from_raw(extra[2 + count])
        })
    }

    // === Metatype and Generic Parameter Accessors ===

    /// Instance type of a metatype.
    pub fn metatype_instance(&self, idx: Idx) -> Idx {
        self.inline_data(idx, Tag::Metatype).child()
    }

    /// Position of a generic parameter in its owner's parameter list.
    pub fn generic_param_index(&self, idx: Idx) -> u32 {
        self.with_extra(idx, Tag::GenericParam, |extra| extra[0])
    }

    /// Whether a generic parameter is constrained to class instances.
    pub fn generic_param_is_class_bound(&self, idx: Idx) -> bool {
        self.with_extra(idx, Tag::GenericParam, |extra| extra[1] != 0)
    }

    // === Declarations ===

    /// Register a nominal declaration with no members yet.
    ///
    /// Members are added afterwards with [`add_field`](Self::add_field) and
    /// [`add_case`](Self::add_case), so member types may refer back to the
    /// declaration itself.
    pub fn declare(
        &self,
        name: impl Into<String>,
        kind: NominalKind,
        generic_params: u32,
        attrs: DeclAttrs,
    ) -> DeclId {
        let mut data = self.data.write();
        let Ok(raw) = u32::try_from(data.decls.len()) else {
            panic!("declaration table exceeded {} entries", u32::MAX);
        };
        let name = name.into();
        tracing::trace!(%name, kind = kind.name(), generic_params, "declared nominal");
        data.decls.push(NominalDecl {
            name,
            kind,
            generic_params,
            attrs,
            fields: Vec::new(),
            cases: Vec::new(),
        });
        DeclId::from_raw(raw)
    }

    /// Append a stored field to a struct or class.
    pub fn add_field(&self, owner: DeclId, name: impl Into<String>, ty: Idx) -> FieldId {
        let mut data = self.data.write();
        let decl = &mut data.decls[owner.index()];
        debug_assert!(
            decl.kind != NominalKind::Enum,
            "enum {} cannot have stored fields",
            decl.name
        );
        let index = member_index(decl.fields.len());
        decl.fields.push(FieldDecl {
            name: name.into(),
            ty,
        });
        FieldId { owner, index }
    }

    /// Append a case to an enum.
    pub fn add_case(&self, owner: DeclId, name: impl Into<String>, payload: Option<Idx>) -> CaseId {
        let mut data = self.data.write();
        let decl = &mut data.decls[owner.index()];
        debug_assert!(
            decl.kind == NominalKind::Enum,
            "{} {} cannot have cases",
            decl.kind.name(),
            decl.name
        );
        let index = member_index(decl.cases.len());
        decl.cases.push(CaseDecl {
            name: name.into(),
            payload,
        });
        CaseId { owner, index }
    }

    /// A snapshot of a declaration.
    pub fn decl(&self, id: DeclId) -> NominalDecl {
        self.data.read().decl(id).clone()
    }

    pub fn decl_name(&self, id: DeclId) -> String {
        self.data.read().decl(id).name.clone()
    }

    pub fn decl_kind(&self, id: DeclId) -> NominalKind {
        self.data.read().decl(id).kind
    }

    pub fn decl_attrs(&self, id: DeclId) -> DeclAttrs {
        self.data.read().decl(id).attrs
    }

    pub fn decl_generic_params(&self, id: DeclId) -> u32 {
        self.data.read().decl(id).generic_params
    }

    /// Stored fields of a declaration, in declaration order.
    pub fn stored_fields(&self, id: DeclId) -> Vec<FieldId> {
        let count = self.data.read().decl(id).fields.len();
        (0..count)
            .map(|i| FieldId {
                owner: id,
                index: member_index(i),
            })
            .collect()
    }

    /// Cases of an enum declaration, in declaration order.
    pub fn enum_cases(&self, id: DeclId) -> Vec<CaseId> {
        let count = self.data.read().decl(id).cases.len();
        (0..count)
            .map(|i| CaseId {
                owner: id,
                index: member_index(i),
            })
            .collect()
    }

    /// Declared (unsubstituted) type of a stored field.
    pub fn field_type(&self, field: FieldId) -> Idx {
        self.data.read().decl(field.owner).fields[field.index as usize].ty
    }

    /// Declared (unsubstituted) payload type of a case, if any.
    pub fn case_payload(&self, case: CaseId) -> Option<Idx> {
        self.data.read().decl(case.owner).cases[case.index as usize].payload
    }

    /// Declared type of a field, or payload type of a case.
    pub fn member_declared_type(&self, member: NominalMember) -> Option<Idx> {
        match member {
            NominalMember::Field(field) => Some(self.field_type(field)),
            NominalMember::Case(case) => self.case_payload(case),
        }
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

fn member_index(len: usize) -> u32 {
    match u32::try_from(len) {
        Ok(index) => index,
        Err(_) => panic!("member count exceeded {}", u32::MAX),
    }
}
