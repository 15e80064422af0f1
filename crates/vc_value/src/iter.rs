//! The type-directed walk from a reflected value to [`Visitor`] events.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use url::Url;

use vc_reflect::Reflect;
use vc_reflect::info::{ScalarKind, TypeInfo};
use vc_reflect::ops::{RefId, ReflectRef};
use vc_utils::hash::HashMap;
use vc_utils::hash::hashbrown::hash_map::Entry;

use crate::cache::{DispatchCache, Lazy, Strategy};
use crate::{DuplicateTable, Error, Result, Value, Visitor};

/// Nesting bound used when no other is configured.
pub const DEFAULT_MAX_DEPTH: usize = 512;

// -----------------------------------------------------------------------------
// IterConfig

/// Options of a [`RootIterator`].
///
/// ```
/// use vc_value::IterConfig;
///
/// let config = IterConfig::default().with_references(false).with_max_depth(64);
/// assert!(!config.use_references);
/// assert_eq!(config.max_depth, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterConfig {
    /// Emit markers and references for shared instances. When off, shared
    /// instances are emitted in full at every occurrence and a cycle ends in
    /// [`Error::DepthLimit`].
    pub use_references: bool,
    /// Maximum nesting of the walked value.
    pub max_depth: usize,
}

impl Default for IterConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl IterConfig {
    #[inline]
    pub const fn new() -> Self {
        Self {
            use_references: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    #[inline]
    pub const fn with_references(mut self, use_references: bool) -> Self {
        self.use_references = use_references;
        self
    }

    #[inline]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

// -----------------------------------------------------------------------------
// IterStrategy

type EmitFn = fn(&dyn Reflect, &mut dyn Visitor) -> Result<()>;

pub(crate) struct FieldPlan {
    name: &'static str,
    strategy: Lazy<IterStrategy>,
}

/// How to emit one type.
pub(crate) enum IterStrategy {
    Scalar(EmitFn),
    /// A list or array of `u8`, emitted as one byte sequence.
    Bytes,
    Struct(Box<[FieldPlan]>),
    List(Lazy<IterStrategy>),
    Array(Lazy<IterStrategy>),
    Map {
        key: Lazy<IterStrategy>,
        value: Lazy<IterStrategy>,
    },
    Optional(Lazy<IterStrategy>),
    Pointer(Lazy<IterStrategy>),
    Dynamic,
}

impl Strategy for IterStrategy {
    const NAME: &'static str = "iteration";

    fn cache() -> &'static DispatchCache<Self> {
        static CACHE: DispatchCache<IterStrategy> = DispatchCache::new();
        &CACHE
    }

    fn synthesize(info: &'static TypeInfo) -> Self {
        match info {
            TypeInfo::Scalar(info) => Self::Scalar(scalar_emitter(info.scalar_kind())),
            TypeInfo::Struct(info) => Self::Struct(
                info.iter()
                    .map(|field| FieldPlan {
                        name: field.name(),
                        strategy: Lazy::new(field.type_info_fn()),
                    })
                    .collect(),
            ),
            TypeInfo::List(info) if info.item_is::<u8>() => Self::Bytes,
            TypeInfo::Array(info) if info.item_is::<u8>() => Self::Bytes,
            TypeInfo::List(info) => Self::List(Lazy::new(info.item_info_fn())),
            TypeInfo::Array(info) => Self::Array(Lazy::new(info.item_info_fn())),
            TypeInfo::Map(info) => Self::Map {
                key: Lazy::new(info.key_info_fn()),
                value: Lazy::new(info.value_info_fn()),
            },
            TypeInfo::Optional(info) => Self::Optional(Lazy::new(info.inner_info_fn())),
            TypeInfo::Pointer(info) => Self::Pointer(Lazy::new(info.pointee_info_fn())),
            TypeInfo::Dynamic(_) => Self::Dynamic,
        }
    }
}

fn downcast_leaf<T: Any>(value: &dyn Reflect) -> Result<&T> {
    value.downcast_ref::<T>().ok_or_else(|| {
        Error::custom(format!(
            "`{}` is described as a scalar of another type",
            value.reflect_type_path(),
        ))
    })
}

fn scalar_emitter(kind: ScalarKind) -> EmitFn {
    macro_rules! emit {
        ($ty:ty, |$leaf:ident, $visitor:ident| $body:expr) => {{
            fn emit(value: &dyn Reflect, $visitor: &mut dyn Visitor) -> Result<()> {
                let $leaf: &$ty = downcast_leaf(value)?;
                $body
            }
            emit as EmitFn
        }};
    }

    match kind {
        ScalarKind::Bool => emit!(bool, |v, visitor| visitor.visit_bool(*v)),
        ScalarKind::I8 => emit!(i8, |v, visitor| visitor.visit_int(i64::from(*v))),
        ScalarKind::I16 => emit!(i16, |v, visitor| visitor.visit_int(i64::from(*v))),
        ScalarKind::I32 => emit!(i32, |v, visitor| visitor.visit_int(i64::from(*v))),
        ScalarKind::I64 => emit!(i64, |v, visitor| visitor.visit_int(*v)),
        ScalarKind::Isize => emit!(isize, |v, visitor| {
            visitor.visit_int(i64::try_from(*v).map_err(Error::custom)?)
        }),
        ScalarKind::U8 => emit!(u8, |v, visitor| visitor.visit_uint(u64::from(*v))),
        ScalarKind::U16 => emit!(u16, |v, visitor| visitor.visit_uint(u64::from(*v))),
        ScalarKind::U32 => emit!(u32, |v, visitor| visitor.visit_uint(u64::from(*v))),
        ScalarKind::U64 => emit!(u64, |v, visitor| visitor.visit_uint(*v)),
        ScalarKind::Usize => emit!(usize, |v, visitor| {
            visitor.visit_uint(u64::try_from(*v).map_err(Error::custom)?)
        }),
        ScalarKind::F32 => emit!(f32, |v, visitor| visitor.visit_float(f64::from(*v))),
        ScalarKind::F64 => emit!(f64, |v, visitor| visitor.visit_float(*v)),
        ScalarKind::String => emit!(String, |v, visitor| visitor.visit_string(v)),
        ScalarKind::Bytes => emit!(Bytes, |v, visitor| visitor.visit_bytes(v)),
        ScalarKind::Uri => emit!(Url, |v, visitor| visitor.visit_uri(v)),
        ScalarKind::Timestamp => emit!(DateTime<Utc>, |v, visitor| visitor.visit_timestamp(v)),
    }
}

/// Copies a list or array of `u8` into one buffer.
fn byte_sequence(value: &dyn Reflect) -> Result<Bytes> {
    if let Some(vec) = value.downcast_ref::<Vec<u8>>() {
        return Ok(Bytes::copy_from_slice(vec));
    }

    let bytes = match value.reflect_ref() {
        ReflectRef::List(list) => list
            .items()
            .map(|item| downcast_leaf::<u8>(item).copied())
            .collect::<Result<Vec<u8>>>()?,
        ReflectRef::Array(array) => array
            .items()
            .map(|item| downcast_leaf::<u8>(item).copied())
            .collect::<Result<Vec<u8>>>()?,
        _ => {
            return Err(Error::custom(format!(
                "`{}` is not a byte sequence",
                value.reflect_type_path(),
            )));
        }
    };
    Ok(Bytes::from(bytes))
}

// -----------------------------------------------------------------------------
// RootIterator

/// Walks a reflected value depth-first and reports it to a [`Visitor`].
///
/// Each call to [`iterate`](Self::iterate) scans the value for shared
/// instances first (unless references are disabled). The first visit of a
/// shared instance is preceded by `visit_marker(id)`; later visits are
/// replaced by `visit_reference(id)`. Ids count up from 0 per call.
///
/// # Examples
///
/// ```
/// use vc_value::{Event, RootIterator};
///
/// let mut events: Vec<Event> = Vec::new();
/// RootIterator::new(&mut events).iterate(&vec![Some(1_u8), None]).unwrap();
///
/// assert_eq!(events, [
///     Event::ListBegin,
///     Event::Uint(1),
///     Event::Nil,
///     Event::ContainerEnd,
/// ]);
/// ```
pub struct RootIterator<'v> {
    visitor: &'v mut dyn Visitor,
    config: IterConfig,
    table: Option<DuplicateTable>,
    names: HashMap<RefId, u32>,
    next_id: u32,
    depth: usize,
}

impl<'v> RootIterator<'v> {
    #[inline]
    pub fn new(visitor: &'v mut dyn Visitor) -> Self {
        Self::with_config(visitor, IterConfig::default())
    }

    pub fn with_config(visitor: &'v mut dyn Visitor, config: IterConfig) -> Self {
        Self {
            visitor,
            config,
            table: None,
            names: HashMap::default(),
            next_id: 0,
            depth: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &IterConfig {
        &self.config
    }

    /// Emits the events of `value`.
    ///
    /// The first error, from the walk or from the visitor, aborts the walk.
    pub fn iterate(&mut self, value: &dyn Reflect) -> Result<()> {
        self.names.clear();
        self.next_id = 0;
        self.depth = 0;
        self.table = self
            .config
            .use_references
            .then(|| DuplicateTable::scan_with_limit(value, self.config.max_depth));

        let strategy = IterStrategy::cache().get(value.reflect_type_info());
        self.walk(&strategy, value)
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        if self.depth >= self.config.max_depth {
            return Err(Error::DepthLimit(self.config.max_depth));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn walk(&mut self, strategy: &IterStrategy, value: &dyn Reflect) -> Result<()> {
        self.nested(|this| this.dispatch(strategy, value))
    }

    fn dispatch(&mut self, strategy: &IterStrategy, value: &dyn Reflect) -> Result<()> {
        match strategy {
            IterStrategy::Scalar(emit) => emit(value, self.visitor),
            IterStrategy::Bytes => self.visitor.visit_bytes(&byte_sequence(value)?),
            IterStrategy::Struct(fields) => {
                let record = value.reflect_ref().as_struct().map_err(Error::custom)?;
                self.visitor.visit_map_begin()?;
                for (field, (_, item)) in fields.iter().zip(record.iter_fields()) {
                    self.visitor.visit_string(field.name)?;
                    self.walk(field.strategy.get(), item)?;
                }
                self.visitor.visit_container_end()
            }
            IterStrategy::List(item) => {
                let list = value.reflect_ref().as_list().map_err(Error::custom)?;
                if self.reference(list.ref_id())? {
                    return Ok(());
                }
                self.visitor.visit_list_begin()?;
                let item = item.get();
                for element in list.items() {
                    self.walk(item, element)?;
                }
                self.visitor.visit_container_end()
            }
            IterStrategy::Array(item) => {
                let array = value.reflect_ref().as_array().map_err(Error::custom)?;
                self.visitor.visit_list_begin()?;
                let item = item.get();
                for element in array.items() {
                    self.walk(item, element)?;
                }
                self.visitor.visit_container_end()
            }
            IterStrategy::Map { key, value: val } => {
                let map = value.reflect_ref().as_map().map_err(Error::custom)?;
                if self.reference(map.ref_id())? {
                    return Ok(());
                }
                self.visitor.visit_map_begin()?;
                let (key, val) = (key.get(), val.get());
                for (k, v) in map.entries() {
                    self.walk(key, k)?;
                    self.walk(val, v)?;
                }
                self.visitor.visit_container_end()
            }
            IterStrategy::Optional(inner) => {
                let optional = value.reflect_ref().as_optional().map_err(Error::custom)?;
                match optional.get() {
                    Some(present) => self.walk(inner.get(), present),
                    None => self.visitor.visit_nil(),
                }
            }
            IterStrategy::Pointer(pointee) => {
                let pointer = value.reflect_ref().as_pointer().map_err(Error::custom)?;
                if self.reference(pointer.ref_id())? {
                    return Ok(());
                }
                let target = pointer.pointee().ok_or_else(|| Error::Borrowed {
                    type_path: value.reflect_type_path(),
                })?;
                self.walk(pointee.get(), &*target)
            }
            IterStrategy::Dynamic => match value.downcast_ref::<Value>() {
                Some(tree) => self.walk_value(tree),
                None => Err(Error::custom(format!(
                    "dynamic type `{}` cannot be walked",
                    value.reflect_type_path(),
                ))),
            },
        }
    }

    fn walk_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Nil => self.visitor.visit_nil(),
            Value::Bool(v) => self.visitor.visit_bool(*v),
            Value::Int(v) => self.visitor.visit_int(*v),
            Value::Uint(v) => self.visitor.visit_uint(*v),
            Value::Float(v) => self.visitor.visit_float(*v),
            Value::String(v) => self.visitor.visit_string(v),
            Value::Bytes(v) => self.visitor.visit_bytes(v),
            Value::Uri(v) => self.visitor.visit_uri(v),
            Value::Timestamp(v) => self.visitor.visit_timestamp(v),
            Value::List(items) => {
                self.visitor.visit_list_begin()?;
                for item in items {
                    self.nested(|this| this.walk_value(item))?;
                }
                self.visitor.visit_container_end()
            }
            Value::Map(entries) => {
                self.visitor.visit_map_begin()?;
                for (key, value) in entries {
                    self.nested(|this| this.walk_value(key))?;
                    self.nested(|this| this.walk_value(value))?;
                }
                self.visitor.visit_container_end()
            }
        }
    }

    /// Emits a marker or a reference for a shared instance.
    ///
    /// Returns `true` if a reference replaced the instance.
    fn reference(&mut self, id: Option<RefId>) -> Result<bool> {
        let (Some(table), Some(id)) = (&self.table, id) else {
            return Ok(false);
        };
        if !table.is_duplicate(id) {
            return Ok(false);
        }

        match self.names.entry(id) {
            Entry::Occupied(entry) => {
                self.visitor.visit_reference(*entry.get())?;
                Ok(true)
            }
            Entry::Vacant(entry) => {
                let name = self.next_id;
                self.next_id += 1;
                entry.insert(name);
                self.visitor.visit_marker(name)?;
                Ok(false)
            }
        }
    }
}

/// Walks `value` into `visitor` with the default [`IterConfig`].
///
/// ```
/// use std::collections::BTreeMap;
/// use vc_value::{Event, iterate};
///
/// let mut events: Vec<Event> = Vec::new();
/// iterate(&BTreeMap::<String, u8>::new(), &mut events).unwrap();
/// assert_eq!(events, [Event::MapBegin, Event::ContainerEnd]);
/// ```
#[inline]
pub fn iterate(value: &dyn Reflect, visitor: &mut dyn Visitor) -> Result<()> {
    RootIterator::new(visitor).iterate(value)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::{BTreeMap, VecDeque};
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use bytes::Bytes;
    use chrono::{TimeZone, Utc};
    use url::Url;
    use vc_reflect::Reflect;
    use vc_reflect::derive::Reflect;

    use super::{IterConfig, RootIterator, iterate};
    use crate::{Error, Event, Value};

    #[derive(Reflect, Default)]
    struct Node {
        name: String,
        next: Option<Rc<RefCell<Node>>>,
    }

    #[derive(Reflect, Default)]
    struct Leaf {
        id: u32,
    }

    #[derive(Reflect, Default)]
    struct Account {
        #[reflect(rename = "id")]
        account_id: i16,
        #[reflect(skip)]
        session: u64,
        tags: Vec<String>,
        owner: Option<Box<Leaf>>,
    }

    fn events_of(value: &dyn Reflect) -> Vec<Event> {
        let mut events: Vec<Event> = Vec::new();
        iterate(value, &mut events).unwrap();
        events
    }

    fn text(s: &str) -> Event {
        Event::String(s.into())
    }

    #[test]
    fn scalars_arrive_at_full_width() {
        assert_eq!(events_of(&-3_i8), [Event::Int(-3)]);
        assert_eq!(events_of(&7_usize), [Event::Uint(7)]);
        assert_eq!(events_of(&1.5_f32), [Event::Float(1.5)]);
        assert_eq!(events_of(&true), [Event::Bool(true)]);

        let url = Url::parse("https://example.com/").unwrap();
        let at = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        let bytes = Bytes::from_static(b"\x00\x01");
        assert_eq!(events_of(&url), [Event::Uri(url.clone())]);
        assert_eq!(events_of(&at), [Event::Timestamp(at)]);
        assert_eq!(events_of(&bytes), [Event::Bytes(bytes.clone())]);
    }

    #[test]
    fn records_are_maps_in_declaration_order() {
        let account = Account {
            account_id: 12,
            session: 99,
            tags: vec!["a".into()],
            owner: Some(Box::new(Leaf { id: 3 })),
        };

        assert_eq!(events_of(&account), [
            Event::MapBegin,
            text("id"),
            Event::Int(12),
            text("tags"),
            Event::ListBegin,
            text("a"),
            Event::ContainerEnd,
            text("owner"),
            Event::MapBegin,
            text("id"),
            Event::Uint(3),
            Event::ContainerEnd,
            Event::ContainerEnd,
        ]);
    }

    #[test]
    fn empty_containers() {
        assert_eq!(events_of(&Vec::<u16>::new()), [
            Event::ListBegin,
            Event::ContainerEnd
        ]);
        assert_eq!(events_of(&BTreeMap::<u8, u8>::new()), [
            Event::MapBegin,
            Event::ContainerEnd
        ]);
        assert_eq!(events_of(&[0_u16; 0]), [
            Event::ListBegin,
            Event::ContainerEnd
        ]);
    }

    #[test]
    fn octet_sequences_are_bytes() {
        let bytes = |raw: &'static [u8]| [Event::Bytes(Bytes::from_static(raw))];

        assert_eq!(events_of(&vec![1_u8, 2, 255]), bytes(&[1, 2, 255]));
        assert_eq!(events_of(&[7_u8, 8]), bytes(&[7, 8]));
        assert_eq!(events_of(&VecDeque::from([3_u8])), bytes(&[3]));
        assert_eq!(events_of(&Vec::<u8>::new()), bytes(&[]));

        // Other integer sequences stay lists.
        assert_eq!(events_of(&vec![1_i8]), [
            Event::ListBegin,
            Event::Int(1),
            Event::ContainerEnd
        ]);
    }

    #[test]
    fn pointer_sized_integers_widen() {
        assert_eq!(events_of(&isize::MIN), [Event::Int(isize::MIN as i64)]);
        assert_eq!(events_of(&usize::MAX), [Event::Uint(usize::MAX as u64)]);
    }

    #[test]
    fn absent_pointer_is_one_nil() {
        let account = Account::default();
        let events = events_of(&account);
        assert_eq!(&events[events.len() - 3..], [
            text("owner"),
            Event::Nil,
            Event::ContainerEnd
        ]);
        assert!(!events.iter().any(|e| matches!(e, Event::Marker(_))));
    }

    #[test]
    fn self_reference_is_marked() {
        let node = Rc::new(RefCell::new(Node {
            name: "x".into(),
            next: None,
        }));
        node.borrow_mut().next = Some(Rc::clone(&node));

        let events = events_of(&node);
        node.borrow_mut().next = None;

        assert_eq!(events, [
            Event::Marker(0),
            Event::MapBegin,
            text("name"),
            text("x"),
            text("next"),
            Event::Reference(0),
            Event::ContainerEnd,
        ]);
    }

    #[test]
    fn shared_acyclic_is_marked_once() {
        let shared = Rc::new(Leaf { id: 1 });
        let other = Rc::new(Leaf { id: 2 });
        let list = vec![Rc::clone(&shared), other, shared];

        assert_eq!(events_of(&list), [
            Event::ListBegin,
            Event::Marker(0),
            Event::MapBegin,
            text("id"),
            Event::Uint(1),
            Event::ContainerEnd,
            Event::MapBegin,
            text("id"),
            Event::Uint(2),
            Event::ContainerEnd,
            Event::Reference(0),
            Event::ContainerEnd,
        ]);
    }

    #[test]
    fn references_off_repeats_shared_values() {
        let shared = Rc::new(5_u8);
        let list = vec![Rc::clone(&shared), shared];

        let mut events: Vec<Event> = Vec::new();
        RootIterator::with_config(&mut events, IterConfig::new().with_references(false))
            .iterate(&list)
            .unwrap();
        assert_eq!(events, [
            Event::ListBegin,
            Event::Uint(5),
            Event::Uint(5),
            Event::ContainerEnd,
        ]);
    }

    #[test]
    fn cycle_without_references_hits_depth_limit() {
        let node = Rc::new(RefCell::new(Node::default()));
        node.borrow_mut().next = Some(Rc::clone(&node));

        let mut events: Vec<Event> = Vec::new();
        let config = IterConfig::new().with_references(false).with_max_depth(32);
        let err = RootIterator::with_config(&mut events, config)
            .iterate(&node)
            .unwrap_err();
        node.borrow_mut().next = None;

        assert!(matches!(err, Error::DepthLimit(32)));
    }

    #[test]
    fn mutably_borrowed_cell_fails() {
        let cell = RefCell::new(1_u8);
        let _guard = cell.borrow_mut();

        let mut events: Vec<Event> = Vec::new();
        let err = iterate(&cell, &mut events).unwrap_err();
        assert!(matches!(err, Error::Borrowed { .. }));
    }

    #[test]
    fn value_trees_are_re_emitted() {
        let tree: Value = [(Value::from("k"), Value::from(vec![Value::Nil]))]
            .into_iter()
            .collect();
        assert_eq!(events_of(&tree), [
            Event::MapBegin,
            text("k"),
            Event::ListBegin,
            Event::Nil,
            Event::ContainerEnd,
            Event::ContainerEnd,
        ]);
    }

    #[test]
    fn marker_ids_restart_per_call() {
        let shared = Rc::new(0_i32);
        let list = vec![Rc::clone(&shared), shared];

        let mut events: Vec<Event> = Vec::new();
        let mut iter = RootIterator::new(&mut events);
        iter.iterate(&list).unwrap();
        iter.iterate(&list).unwrap();

        let markers: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, Event::Marker(_)))
            .collect();
        assert_eq!(markers, [&Event::Marker(0), &Event::Marker(0)]);
    }
}
