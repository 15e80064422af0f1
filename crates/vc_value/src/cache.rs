//! Per-type strategy storage shared by every walk in the process.
//!
//! The iterator and the reconstructor each derive a strategy from a
//! [`TypeInfo`] the first time they meet a type. [`DispatchCache`] keeps that
//! strategy keyed by `TypeId`, so a list of ten thousand records of the same
//! type derives the record shape once.

use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

use vc_reflect::info::{TypeInfo, Typed};
use vc_utils::TypeIdMap;

use crate::iter::IterStrategy;
use crate::reconstruct::RebuildStrategy;

// -----------------------------------------------------------------------------
// Strategy

/// A dispatch plan derived from a [`TypeInfo`] alone.
///
/// Synthesis must not resolve child strategies: children go into [`Lazy`]
/// slots, which is what lets a type contain itself.
pub(crate) trait Strategy: Sized + Send + Sync + 'static {
    /// Name used in log records.
    const NAME: &'static str;

    /// The process-wide cache of this family.
    fn cache() -> &'static DispatchCache<Self>;

    fn synthesize(info: &'static TypeInfo) -> Self;
}

// -----------------------------------------------------------------------------
// DispatchCache

/// A `TypeId`-keyed map of synthesized strategies.
///
/// Reads take the read lock only. On a miss the strategy is synthesized
/// outside any lock; if another thread inserted the same type meanwhile, its
/// entry is kept and the fresh one dropped.
pub(crate) struct DispatchCache<S>(RwLock<TypeIdMap<Arc<S>>>);

impl<S: Strategy> DispatchCache<S> {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the strategy of `info`, synthesizing it on first use.
    pub fn get(&self, info: &'static TypeInfo) -> Arc<S> {
        let type_id = info.ty_id();
        if let Some(found) = self.get_by_type_id(type_id) {
            return found;
        }

        log::trace!("synthesizing {} strategy for `{}`", S::NAME, info.type_path());
        let fresh = Arc::new(S::synthesize(info));

        let mut map = self.0.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = map.get(&type_id) {
            log::debug!(
                "{} strategy for `{}` was synthesized concurrently, keeping the first",
                S::NAME,
                info.type_path(),
            );
            return Arc::clone(existing);
        }
        map.insert(type_id, Arc::clone(&fresh));
        fresh
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&type_id)
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<Arc<S>> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
    }
}

// -----------------------------------------------------------------------------
// Lazy

/// A child strategy slot, resolved through the cache on first use.
pub(crate) struct Lazy<S> {
    info: fn() -> &'static TypeInfo,
    slot: OnceLock<Arc<S>>,
}

impl<S: Strategy> Lazy<S> {
    #[inline]
    pub const fn new(info: fn() -> &'static TypeInfo) -> Self {
        Self {
            info,
            slot: OnceLock::new(),
        }
    }

    #[inline]
    pub fn get(&self) -> &S {
        self.slot.get_or_init(|| S::cache().get((self.info)()))
    }

    #[inline]
    pub fn info(&self) -> &'static TypeInfo {
        (self.info)()
    }
}

impl<S> fmt::Debug for Lazy<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Lazy")
            .field(&(self.info)().type_path())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Public helpers

/// Synthesizes the iteration and reconstruction strategies of `T` ahead of
/// the first walk.
///
/// Children are still resolved on first use.
///
/// ```
/// vc_value::prime::<Vec<String>>();
/// assert!(vc_value::is_cached::<Vec<String>>());
/// ```
pub fn prime<T: Typed>() {
    let info = T::type_info();
    IterStrategy::cache().get(info);
    RebuildStrategy::cache().get(info);
}

/// Returns `true` if both strategies of `T` are cached.
pub fn is_cached<T: Typed>() -> bool {
    let type_id = TypeId::of::<T>();
    IterStrategy::cache().contains(type_id) && RebuildStrategy::cache().contains(type_id)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::any::TypeId;
    use core::cell::RefCell;

    use vc_reflect::derive::Reflect;
    use vc_reflect::info::{TypeInfo, Typed};

    use super::{DispatchCache, Lazy, Strategy};

    // Follows the first child of every type.
    struct Probe {
        first: Option<Lazy<Probe>>,
    }

    impl Strategy for Probe {
        const NAME: &'static str = "probe";

        fn cache() -> &'static DispatchCache<Self> {
            static CACHE: DispatchCache<Probe> = DispatchCache::new();
            &CACHE
        }

        fn synthesize(info: &'static TypeInfo) -> Self {
            let first = match info {
                TypeInfo::Struct(info) => info.field_at(0).map(|f| Lazy::new(f.type_info_fn())),
                TypeInfo::Optional(info) => Some(Lazy::new(info.inner_info_fn())),
                TypeInfo::Pointer(info) => Some(Lazy::new(info.pointee_info_fn())),
                _ => None,
            };
            Self { first }
        }
    }

    #[derive(Reflect, Default)]
    struct Node {
        next: Option<Rc<RefCell<Node>>>,
        label: u8,
    }

    #[test]
    fn repeated_lookups_share_one_strategy() {
        let a = Probe::cache().get(<Vec<u64>>::type_info());
        let b = Probe::cache().get(<Vec<u64>>::type_info());
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Probe::cache().contains(TypeId::of::<Vec<u64>>()));
    }

    #[test]
    fn recursive_types_resolve_lazily() {
        let node = Probe::cache().get(Node::type_info());

        // Node -> Option -> Rc -> RefCell -> Node
        let mut cursor: &Probe = &node;
        for _ in 0..4 {
            cursor = cursor.first.as_ref().unwrap().get();
        }
        assert!(core::ptr::eq(cursor, &*node));

        let again = Probe::cache().get(Node::type_info());
        assert!(Arc::ptr_eq(&node, &again));
    }

    #[test]
    fn prime_fills_both_families() {
        #[derive(Reflect, Default)]
        struct Primed {
            items: Vec<Box<u8>>,
        }

        assert!(!super::is_cached::<Primed>());
        super::prime::<Primed>();
        assert!(super::is_cached::<Primed>());
    }

    #[test]
    fn concurrent_lookups_agree_on_one_strategy() {
        let found: Vec<Arc<Probe>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| Probe::cache().get(<[u64; 7]>::type_info())))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(found.iter().all(|s| Arc::ptr_eq(s, &found[0])));
        assert!(Probe::cache().contains(TypeId::of::<[u64; 7]>()));
        assert!(Arc::ptr_eq(&found[0], &Probe::cache().get(<[u64; 7]>::type_info())));
    }

    #[test]
    fn concurrent_rebuilds_share_the_cache() {
        #[derive(Reflect, Default, Debug, PartialEq)]
        struct Shipment {
            id: u32,
            label: String,
            offsets: Vec<i64>,
        }

        let expected = Shipment {
            id: 42,
            label: "crate".into(),
            offsets: vec![-1, 0, 1 << 40],
        };
        let source = crate::to_value(&expected).unwrap();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let rebuilt = crate::from_value::<Shipment>(&source).unwrap();
                    assert_eq!(rebuilt, expected);
                });
            }
        });
        assert!(super::RebuildStrategy::cache().contains(TypeId::of::<Shipment>()));
    }
}
