//! Concurrent, memoizing lowering cache.
//!
//! Entries live in sharded maps of `Idx -> OnceLock<LoweringInfo>`. A shard
//! lock is held only long enough to find or insert an entry's cell; the
//! classification itself runs inside `OnceLock::get_or_init`, which admits
//! exactly one initializer per cell even when several workers request the
//! same type at once. Computing an aggregate lowers its members through
//! other cells, so no lock is held across the recursion.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use keel_stack::ensure_sufficient_stack;
use keel_types::{DeclAttrs, Idx, NominalKind, Pool, Tag};

use crate::{LoweredType, LoweringInfo, TypeLowering};

/// Default number of shards.
const DEFAULT_SHARDS: usize = 16;

type Shard = RwLock<FxHashMap<Idx, Arc<OnceLock<LoweringInfo>>>>;

/// Memoizing [`TypeLowering`] over a shared [`Pool`].
///
/// `Sync`: one cache may serve many workers lowering independent functions.
pub struct LoweringCache<'pool> {
    pool: &'pool Pool,
    shards: Box<[Shard]>,
    /// Number of entries actually computed (not served from the cache).
    computed: AtomicUsize,
}

impl<'pool> LoweringCache<'pool> {
    /// Create a cache with the default shard count.
    pub fn new(pool: &'pool Pool) -> Self {
        Self::with_shards(pool, DEFAULT_SHARDS)
    }

    /// Create a cache with `shards` shards, rounded up to a power of two.
    pub fn with_shards(pool: &'pool Pool, shards: usize) -> Self {
        let count = shards.max(1).next_power_of_two();
        Self {
            pool,
            shards: (0..count).map(|_| RwLock::default()).collect(),
            computed: AtomicUsize::new(0),
        }
    }

    /// Number of shards in use.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Number of classifications computed so far.
    pub fn computed_count(&self) -> usize {
        self.computed.load(Ordering::Relaxed)
    }

    /// Number of types with a cached (or in-progress) entry.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn shard_for(&self, ty: Idx) -> &Shard {
        &self.shards[ty.raw() as usize & (self.shards.len() - 1)]
    }

    /// Find or create the cell for `ty`.
    fn cell(&self, ty: Idx) -> Arc<OnceLock<LoweringInfo>> {
        let shard = self.shard_for(ty);

        // Fast path: entry exists.
        if let Some(cell) = shard.read().get(&ty) {
            return Arc::clone(cell);
        }

        // Slow path: insert (the entry API double-checks under the write lock).
        Arc::clone(shard.write().entry(ty).or_default())
    }

    /// Memoized lookup. `active` holds the types currently being computed on
    /// this thread; revisiting one means the inline type graph is cyclic.
    ///
    /// Aggregates recurse here once per nesting level, so each level runs
    /// under [`ensure_sufficient_stack`].
    fn get(&self, ty: Idx, active: &mut FxHashSet<Idx>) -> LoweringInfo {
        let cell = self.cell(ty);
        if let Some(&info) = cell.get() {
            return info;
        }
        // Re-entering the same cell would block forever; report it instead.
        debug_assert!(
            !active.contains(&ty),
            "cyclic inline type {}",
            self.pool.format_type(ty)
        );
        *cell.get_or_init(|| {
            ensure_sufficient_stack(|| {
                active.insert(ty);
                let info = self.compute(ty, active);
                active.remove(&ty);
                self.computed.fetch_add(1, Ordering::Relaxed);
                info
            })
        })
    }

    /// Classify a type from its shape and, for aggregates, its members.
    #[tracing::instrument(level = "trace", skip(self, active))]
    fn compute(&self, ty: Idx, active: &mut FxHashSet<Idx>) -> LoweringInfo {
        let pool = self.pool;
        let (trivial, address_only) = match pool.tag(ty) {
            // Plain bits: integers, floats, untyped pointers, metatypes.
            Tag::Int | Tag::Float | Tag::Word | Tag::RawPointer | Tag::Metatype => (true, false),

            // Strong references and closures (the context is retained).
            Tag::NativeObject | Tag::UnknownObject | Tag::Function => (false, false),

            Tag::GenericParam => {
                if pool.generic_param_is_class_bound(ty) {
                    (false, false)
                } else {
                    (false, true)
                }
            }

            Tag::Tuple => self.aggregate(pool.tuple_elems(ty), active),

            Tag::Nominal => self.compute_nominal(ty, active),
        };

        let info = LoweringInfo::new(LoweredType::value(ty), trivial, address_only);
        tracing::debug!(
            ty = %pool.format_type(ty),
            trivial,
            address_only,
            "computed type lowering"
        );
        info
    }

    fn compute_nominal(&self, ty: Idx, active: &mut FxHashSet<Idx>) -> (bool, bool) {
        let pool = self.pool;
        let decl = pool.nominal_decl(ty);

        if pool.decl_attrs(decl).contains(DeclAttrs::RESILIENT) {
            return (false, true);
        }

        match pool.decl_kind(decl) {
            NominalKind::Class => (false, false),
            NominalKind::Struct => {
                let fields = pool
                    .stored_fields(decl)
                    .into_iter()
                    .map(|field| pool.member_type(ty, pool.field_type(field)));
                self.aggregate(fields, active)
            }
            NominalKind::Enum => {
                let payloads = pool
                    .enum_cases(decl)
                    .into_iter()
                    .filter_map(|case| pool.case_payload(case))
                    .map(|payload| pool.member_type(ty, payload));
                self.aggregate(payloads, active)
            }
        }
    }

    /// Trivial iff every member is trivial; address-only iff any member is.
    fn aggregate(
        &self,
        members: impl IntoIterator<Item = Idx>,
        active: &mut FxHashSet<Idx>,
    ) -> (bool, bool) {
        members
            .into_iter()
            .fold((true, false), |(trivial, address_only), member| {
                let info = self.get(member, active);
                (
                    trivial && info.is_trivial(),
                    address_only || info.is_address_only(),
                )
            })
    }
}

impl TypeLowering for LoweringCache<'_> {
    fn pool(&self) -> &Pool {
        self.pool
    }

    fn lowering(&self, ty: Idx) -> LoweringInfo {
        self.get(ty, &mut FxHashSet::default())
    }
}
