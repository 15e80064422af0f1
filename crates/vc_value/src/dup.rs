//! Detection of instances reachable along more than one path.
//!
//! A [`DuplicateTable`] is computed once before a walk. The iterator consults
//! it to emit a marker on the first visit of a shared instance and a
//! reference on every later one, which also breaks cycles.

use vc_reflect::Reflect;
use vc_reflect::info::{ReflectKind, TypeInfo};
use vc_reflect::ops::{RefId, ReflectRef};
use vc_utils::hash::HashMap;
use vc_utils::hash::hashbrown::hash_map::Entry;

use crate::DEFAULT_MAX_DEPTH;

// -----------------------------------------------------------------------------
// DuplicateTable

/// The set of instances seen more than once in a value graph.
///
/// Tracked instances are the pointees of pointers (`Box`, `Rc`, `Arc`,
/// `RefCell`) and the buffers of non-empty lists and maps. Records, arrays
/// and optionals are inline values: their contents are searched but they
/// have no identity of their own. A [`Value`](crate::Value) owns its tree and
/// is never searched.
///
/// A `RefCell` that is mutably borrowed during the scan cannot be read; its
/// contents are skipped.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use vc_reflect::ops::Pointer;
/// use vc_value::DuplicateTable;
///
/// let shared = Rc::new(String::from("shared"));
/// let list = vec![Rc::clone(&shared), Rc::new(String::new()), shared.clone()];
///
/// let table = DuplicateTable::scan(&list);
/// assert_eq!(table.len(), 1);
/// assert!(table.is_duplicate(Pointer::ref_id(&shared).unwrap()));
/// ```
#[derive(Debug, Default)]
pub struct DuplicateTable {
    found: HashMap<RefId, bool>,
    duplicates: usize,
}

impl DuplicateTable {
    /// Scans `value` with the default depth bound.
    #[inline]
    pub fn scan(value: &dyn Reflect) -> Self {
        Self::scan_with_limit(value, DEFAULT_MAX_DEPTH)
    }

    /// Scans `value`, not descending more than `max_depth` levels.
    ///
    /// Nodes deeper than the bound are left out; a walk with the same bound
    /// fails before reaching them.
    pub fn scan_with_limit(value: &dyn Reflect, max_depth: usize) -> Self {
        let mut table = Self::default();
        table.search(value, max_depth);
        table.duplicates = table.found.values().filter(|dup| **dup).count();

        if table.duplicates > 0 {
            log::debug!(
                "found {} shared instance(s) in `{}`",
                table.duplicates,
                value.reflect_type_path(),
            );
        }
        table
    }

    /// Returns `true` if `id` was reached more than once.
    #[inline]
    pub fn is_duplicate(&self, id: RefId) -> bool {
        self.found.get(&id).copied().unwrap_or(false)
    }

    /// Iterates over the shared instances, in no particular order.
    pub fn duplicates(&self) -> impl Iterator<Item = RefId> + '_ {
        self.found
            .iter()
            .filter_map(|(id, dup)| dup.then_some(*id))
    }

    /// Returns the number of shared instances.
    #[inline]
    pub fn len(&self) -> usize {
        self.duplicates
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.duplicates == 0
    }

    /// Records a visit of `id`; returns `true` on the first one.
    fn visit(&mut self, id: RefId) -> bool {
        match self.found.entry(id) {
            Entry::Vacant(entry) => {
                entry.insert(false);
                true
            }
            Entry::Occupied(mut entry) => {
                *entry.get_mut() = true;
                false
            }
        }
    }

    fn search(&mut self, value: &dyn Reflect, depth: usize) {
        let Some(depth) = depth.checked_sub(1) else {
            return;
        };

        match value.reflect_ref() {
            ReflectRef::Scalar(_) | ReflectRef::Dynamic(_) => {}
            ReflectRef::Struct(record) => {
                for (_, field) in record.iter_fields() {
                    if is_searchable(field.reflect_type_info()) {
                        self.search(field, depth);
                    }
                }
            }
            ReflectRef::List(list) => {
                let first = list.ref_id().is_none_or(|id| self.visit(id));
                if first && list_items_searchable(list.reflect_type_info()) {
                    for item in list.items() {
                        self.search(item, depth);
                    }
                }
            }
            ReflectRef::Array(array) => {
                if list_items_searchable(array.reflect_type_info()) {
                    for item in array.items() {
                        self.search(item, depth);
                    }
                }
            }
            ReflectRef::Map(map) => {
                let first = map.ref_id().is_none_or(|id| self.visit(id));
                if first && let Ok(info) = map.reflect_type_info().as_map() {
                    let keys = is_searchable(info.key_info());
                    let values = is_searchable(info.value_info());
                    if keys || values {
                        for (key, value) in map.entries() {
                            if keys {
                                self.search(key, depth);
                            }
                            if values {
                                self.search(value, depth);
                            }
                        }
                    }
                }
            }
            ReflectRef::Optional(optional) => {
                if let Some(inner) = optional.get() {
                    self.search(inner, depth);
                }
            }
            ReflectRef::Pointer(pointer) => {
                let first = pointer.ref_id().is_none_or(|id| self.visit(id));
                if first && let Some(pointee) = pointer.pointee() {
                    self.search(&*pointee, depth);
                }
            }
        }
    }
}

/// Shorthand for [`DuplicateTable::scan`].
#[inline]
pub fn find_duplicates(value: &dyn Reflect) -> DuplicateTable {
    DuplicateTable::scan(value)
}

/// Whether an instance of this type may contain a tracked instance.
#[inline]
fn is_searchable(info: &TypeInfo) -> bool {
    !matches!(info.kind(), ReflectKind::Scalar | ReflectKind::Dynamic)
}

fn list_items_searchable(info: &TypeInfo) -> bool {
    match info {
        TypeInfo::List(info) => is_searchable(info.item_info()),
        TypeInfo::Array(info) => is_searchable(info.item_info()),
        _ => true,
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use vc_reflect::derive::Reflect;
    use vc_reflect::ops::{List, Pointer};

    use super::{DuplicateTable, find_duplicates};

    #[derive(Reflect, Default)]
    struct Node {
        name: String,
        next: Option<Rc<RefCell<Node>>>,
    }

    #[derive(Reflect, Default)]
    struct Pair {
        left: Option<Rc<Vec<u32>>>,
        right: Option<Rc<Vec<u32>>>,
    }

    #[test]
    fn tree_without_sharing() {
        let value = vec![Box::new(1_u8), Box::new(2_u8)];
        let table = find_duplicates(&value);
        assert!(table.is_empty());
        assert_eq!(table.duplicates().count(), 0);
    }

    #[test]
    fn shared_pointer_is_reported_once() {
        let shared = Rc::new(Vec::from([1_u32, 2]));
        let pair = Pair {
            left: Some(Rc::clone(&shared)),
            right: Some(Rc::clone(&shared)),
        };

        let table = DuplicateTable::scan(&pair);
        assert_eq!(table.len(), 1);
        assert!(table.is_duplicate(Pointer::ref_id(&shared).unwrap()));
        // The list behind the pointer is visited once only.
        assert!(!table.is_duplicate(List::ref_id(&*shared).unwrap()));
    }

    #[test]
    fn cycle_terminates() {
        let node = Rc::new(RefCell::new(Node {
            name: "x".into(),
            next: None,
        }));
        node.borrow_mut().next = Some(Rc::clone(&node));

        let table = DuplicateTable::scan(&node);
        assert_eq!(table.len(), 1);
        assert!(table.is_duplicate(Pointer::ref_id(&node).unwrap()));
        assert!(!table.is_duplicate(Pointer::ref_id(&*node).unwrap()));

        node.borrow_mut().next = None;
    }

    #[test]
    fn map_values_are_searched() {
        let shared = Rc::new(7_i64);
        let mut map = BTreeMap::new();
        map.insert(String::from("a"), Rc::clone(&shared));
        map.insert(String::from("b"), Rc::clone(&shared));

        let table = DuplicateTable::scan(&map);
        assert_eq!(table.duplicates().collect::<Vec<_>>(), [
            Pointer::ref_id(&shared).unwrap()
        ]);
    }

    #[test]
    fn zero_sized_pointees_have_no_identity() {
        let empty = Rc::new([0_u8; 0]);
        let value = vec![Rc::clone(&empty), empty];
        assert!(DuplicateTable::scan(&value).is_empty());
    }

    #[test]
    fn borrowed_cell_is_skipped() {
        let shared = Rc::new(5_u8);
        let cell = RefCell::new(vec![Rc::clone(&shared), Rc::clone(&shared)]);
        let guard = cell.borrow_mut();

        let table = DuplicateTable::scan(&cell);
        assert!(table.is_empty());

        drop(guard);
        assert_eq!(DuplicateTable::scan(&cell).len(), 1);
    }

    #[test]
    fn depth_limit_stops_the_scan() {
        let shared = Rc::new(1_u8);
        let value = Some(Some(vec![Rc::clone(&shared), shared]));

        assert!(DuplicateTable::scan_with_limit(&value, 3).is_empty());
        assert_eq!(DuplicateTable::scan_with_limit(&value, 4).len(), 1);
    }
}
