//! The type-directed conversion from a [`Value`] back to a typed value.

use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use url::Url;

use vc_reflect::Reflect;
use vc_reflect::info::{ArrayInfo, ListInfo, MapInfo, OptionalInfo, PointerInfo};
use vc_reflect::info::{ReflectKind, ScalarKind, StructInfo, TypeInfo, Typed};

use crate::cache::{DispatchCache, Lazy, Strategy};
use crate::{DEFAULT_MAX_DEPTH, Error, Result, Value};

// -----------------------------------------------------------------------------
// RebuildConfig

/// Options of a [`Reconstructor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebuildConfig {
    /// Panic with the error message instead of returning the error.
    ///
    /// A debugging aid: the panic happens where the failure is detected.
    pub panic_on_error: bool,
    /// Maximum nesting of the source value.
    pub max_depth: usize,
}

impl Default for RebuildConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl RebuildConfig {
    #[inline]
    pub const fn new() -> Self {
        Self {
            panic_on_error: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    #[inline]
    pub const fn with_panic_on_error(mut self, panic_on_error: bool) -> Self {
        self.panic_on_error = panic_on_error;
        self
    }

    #[inline]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

// -----------------------------------------------------------------------------
// Errors

#[inline]
fn mismatch(value: &Value, expected: &'static str, type_path: &'static str) -> Error {
    Error::KindMismatch {
        value: value.clone(),
        expected,
        type_path,
    }
}

#[inline]
fn overflow(value: &Value, type_path: &'static str) -> Error {
    Error::NumericOverflow {
        value: value.clone(),
        type_path,
    }
}

#[inline]
fn unsettable(type_path: &'static str) -> impl FnOnce(Box<dyn Reflect>) -> Error {
    move |_| Error::UnsettableDestination { type_path }
}

// -----------------------------------------------------------------------------
// Scalars

type BuildFn = fn(&Value, &'static str) -> Result<Box<dyn Reflect>>;

const NUMBER: &str = "Int, Uint or Float";

/// Narrows a numeric source into an integer type.
///
/// The source is widened to `i128`; a float source must be integral. The
/// conversion succeeds only if the destination holds the widened value
/// exactly.
fn narrow_int<T: TryFrom<i128>>(source: &Value, type_path: &'static str) -> Result<T> {
    let wide = match *source {
        Value::Int(v) => i128::from(v),
        Value::Uint(v) => i128::from(v),
        Value::Float(v) => {
            let wide = v as i128;
            if !v.is_finite() || wide as f64 != v {
                return Err(overflow(source, type_path));
            }
            wide
        }
        _ => return Err(mismatch(source, NUMBER, type_path)),
    };
    T::try_from(wide).map_err(|_| overflow(source, type_path))
}

trait FloatLeaf: Copy {
    fn from_f64(v: f64) -> Self;
    fn to_f64(self) -> f64;
}

impl FloatLeaf for f32 {
    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl FloatLeaf for f64 {
    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

/// Narrows a numeric source into a float type.
///
/// Float sources must keep their bit pattern, integer sources their value.
fn narrow_float<T: FloatLeaf>(source: &Value, type_path: &'static str) -> Result<T> {
    let (narrow, exact) = match *source {
        Value::Float(v) => {
            let narrow = T::from_f64(v);
            (narrow, narrow.to_f64().to_bits() == v.to_bits())
        }
        Value::Int(v) => {
            let narrow = T::from_f64(v as f64);
            (narrow, narrow.to_f64() as i128 == i128::from(v))
        }
        Value::Uint(v) => {
            let narrow = T::from_f64(v as f64);
            (narrow, narrow.to_f64() as i128 == i128::from(v))
        }
        _ => return Err(mismatch(source, NUMBER, type_path)),
    };
    if exact {
        Ok(narrow)
    } else {
        Err(overflow(source, type_path))
    }
}

fn scalar_builder(kind: ScalarKind) -> BuildFn {
    macro_rules! build {
        (int $ty:ty) => {{
            fn build(source: &Value, type_path: &'static str) -> Result<Box<dyn Reflect>> {
                narrow_int::<$ty>(source, type_path).map(|v| Box::new(v) as Box<dyn Reflect>)
            }
            build as BuildFn
        }};
        (float $ty:ty) => {{
            fn build(source: &Value, type_path: &'static str) -> Result<Box<dyn Reflect>> {
                narrow_float::<$ty>(source, type_path).map(|v| Box::new(v) as Box<dyn Reflect>)
            }
            build as BuildFn
        }};
        ($variant:ident => $ty:ty) => {{
            fn build(source: &Value, type_path: &'static str) -> Result<Box<dyn Reflect>> {
                match source {
                    Value::$variant(v) => Ok(Box::new(<$ty>::clone(v))),
                    _ => Err(mismatch(source, stringify!($variant), type_path)),
                }
            }
            build as BuildFn
        }};
    }

    match kind {
        ScalarKind::Bool => build!(Bool => bool),
        ScalarKind::I8 => build!(int i8),
        ScalarKind::I16 => build!(int i16),
        ScalarKind::I32 => build!(int i32),
        ScalarKind::I64 => build!(int i64),
        ScalarKind::Isize => build!(int isize),
        ScalarKind::U8 => build!(int u8),
        ScalarKind::U16 => build!(int u16),
        ScalarKind::U32 => build!(int u32),
        ScalarKind::U64 => build!(int u64),
        ScalarKind::Usize => build!(int usize),
        ScalarKind::F32 => build!(float f32),
        ScalarKind::F64 => build!(float f64),
        ScalarKind::String => build!(String => String),
        ScalarKind::Bytes => build!(Bytes => Bytes),
        ScalarKind::Uri => build!(Uri => Url),
        ScalarKind::Timestamp => build!(Timestamp => DateTime<Utc>),
    }
}

// -----------------------------------------------------------------------------
// Byte sequences

#[inline]
fn sequence(octets: bool) -> &'static str {
    if octets { "List or Bytes" } else { "List" }
}

fn boxed_octets(data: &Bytes) -> impl Iterator<Item = Box<dyn Reflect>> + '_ {
    data.iter().map(|byte| Box::new(*byte) as Box<dyn Reflect>)
}

/// Rebuilds a list of `u8` from a byte sequence.
fn byte_list(info: &'static ListInfo, data: &Bytes) -> Result<Box<dyn Reflect>> {
    if info.type_is::<Vec<u8>>() {
        return Ok(Box::new(data.to_vec()));
    }

    let mut list = info.new_with_capacity(data.len());
    let target = list.reflect_mut().as_list().map_err(Error::custom)?;
    for byte in boxed_octets(data) {
        target
            .try_push(byte)
            .map_err(unsettable(info.type_path()))?;
    }
    Ok(list)
}

// -----------------------------------------------------------------------------
// RebuildStrategy

pub(crate) struct RebuildField {
    /// A `Nil` source resets the field instead of keeping its default.
    takes_nil: bool,
    strategy: Lazy<RebuildStrategy>,
}

/// How to rebuild one type.
pub(crate) enum RebuildStrategy {
    Scalar {
        build: BuildFn,
        type_path: &'static str,
    },
    Struct {
        info: &'static StructInfo,
        fields: Box<[RebuildField]>,
    },
    /// `octets`: the items are `u8`, so a `Bytes` source is accepted too.
    List {
        info: &'static ListInfo,
        item: Lazy<RebuildStrategy>,
        octets: bool,
    },
    Array {
        info: &'static ArrayInfo,
        item: Lazy<RebuildStrategy>,
        octets: bool,
    },
    Map {
        info: &'static MapInfo,
        key: Lazy<RebuildStrategy>,
        value: Lazy<RebuildStrategy>,
    },
    Optional {
        info: &'static OptionalInfo,
        inner: Lazy<RebuildStrategy>,
    },
    Pointer {
        info: &'static PointerInfo,
        pointee: Lazy<RebuildStrategy>,
    },
    Dynamic(&'static TypeInfo),
}

impl Strategy for RebuildStrategy {
    const NAME: &'static str = "reconstruction";

    fn cache() -> &'static DispatchCache<Self> {
        static CACHE: DispatchCache<RebuildStrategy> = DispatchCache::new();
        &CACHE
    }

    fn synthesize(info: &'static TypeInfo) -> Self {
        match info {
            TypeInfo::Scalar(scalar) => Self::Scalar {
                build: scalar_builder(scalar.scalar_kind()),
                type_path: scalar.type_path(),
            },
            TypeInfo::Struct(info) => Self::Struct {
                info,
                fields: info
                    .iter()
                    .map(|field| {
                        let strategy = Lazy::new(field.type_info_fn());
                        RebuildField {
                            takes_nil: matches!(
                                strategy.info().kind(),
                                ReflectKind::Optional | ReflectKind::Dynamic
                            ),
                            strategy,
                        }
                    })
                    .collect(),
            },
            TypeInfo::List(info) => Self::List {
                info,
                item: Lazy::new(info.item_info_fn()),
                octets: info.item_is::<u8>(),
            },
            TypeInfo::Array(info) => Self::Array {
                info,
                item: Lazy::new(info.item_info_fn()),
                octets: info.item_is::<u8>(),
            },
            TypeInfo::Map(info) => Self::Map {
                info,
                key: Lazy::new(info.key_info_fn()),
                value: Lazy::new(info.value_info_fn()),
            },
            TypeInfo::Optional(info) => Self::Optional {
                info,
                inner: Lazy::new(info.inner_info_fn()),
            },
            TypeInfo::Pointer(info) => Self::Pointer {
                info,
                pointee: Lazy::new(info.pointee_info_fn()),
            },
            TypeInfo::Dynamic(_) => Self::Dynamic(info),
        }
    }
}

// -----------------------------------------------------------------------------
// Reconstructor

/// Rebuilds typed values from [`Value`] trees.
///
/// Per destination kind:
///
/// - scalars take the same variant; numbers convert between widths and
///   signedness only when the value survives the round trip;
/// - records take a `Map`, start from `Default::default()` and set the
///   fields whose names appear as string keys. Other keys are ignored. A
///   `Nil` entry resets an optional or dynamic field and leaves any other
///   field at its default;
/// - lists and arrays take a `List`, arrays of exactly their length. Lists
///   and arrays of `u8` also take `Bytes`;
/// - maps take a `Map`;
/// - `Option<T>` takes `Nil` as `None`, anything else as `Some`;
/// - pointers wrap the rebuilt pointee and refuse `Nil`;
/// - a [`Value`] destination takes a copy of the source.
///
/// Strings are never parsed. A tree decoded from a text format carries URIs
/// and timestamps as `String`, which a `Url` or `DateTime<Utc>` destination
/// refuses with [`Error::KindMismatch`].
///
/// # Examples
///
/// ```
/// use vc_reflect::derive::Reflect;
/// use vc_value::{Reconstructor, Value};
///
/// #[derive(Reflect, Default, Debug, PartialEq)]
/// struct Limits { max: u8, label: Option<String> }
///
/// let source: Value = [
///     (Value::from("max"), Value::Int(200)),
///     (Value::from("unknown"), Value::Bool(true)),
/// ]
/// .into_iter()
/// .collect();
///
/// let limits: Limits = Reconstructor::new().reconstruct(&source).unwrap();
/// assert_eq!(limits, Limits { max: 200, label: None });
/// ```
#[derive(Debug, Clone, Default)]
pub struct Reconstructor {
    config: RebuildConfig,
}

impl Reconstructor {
    #[inline]
    pub const fn new() -> Self {
        Self::with_config(RebuildConfig::new())
    }

    #[inline]
    pub const fn with_config(config: RebuildConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &RebuildConfig {
        &self.config
    }

    /// Rebuilds a `T` from `source`.
    pub fn reconstruct<T: Reflect + Typed>(&self, source: &Value) -> Result<T> {
        let result = self
            .rebuild_root(source, T::type_info())
            .and_then(|boxed| boxed.take::<T>().map_err(unsettable(T::type_path())));
        self.report(result)
    }

    /// Rebuilds a value of the type described by `info`.
    pub fn reconstruct_dyn(
        &self,
        source: &Value,
        info: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>> {
        self.report(self.rebuild_root(source, info))
    }

    /// Rebuilds a value of the type of `target` and installs it there.
    ///
    /// On failure `target` is left untouched.
    pub fn reconstruct_into(&self, source: &Value, target: &mut dyn Reflect) -> Result<()> {
        let type_path = target.reflect_type_path();
        let result = self
            .rebuild_root(source, target.reflect_type_info())
            .and_then(|produced| target.set(produced).map_err(unsettable(type_path)));
        self.report(result)
    }

    fn report<T>(&self, result: Result<T>) -> Result<T> {
        match result {
            Err(err) if self.config.panic_on_error => panic!("reconstruction failed: {err}"),
            other => other,
        }
    }

    fn rebuild_root(&self, source: &Value, info: &'static TypeInfo) -> Result<Box<dyn Reflect>> {
        let strategy = RebuildStrategy::cache().get(info);
        self.rebuild(&strategy, source, 0)
    }

    fn rebuild(
        &self,
        strategy: &RebuildStrategy,
        source: &Value,
        depth: usize,
    ) -> Result<Box<dyn Reflect>> {
        if depth >= self.config.max_depth {
            return Err(Error::DepthLimit(self.config.max_depth));
        }
        let depth = depth + 1;

        match strategy {
            RebuildStrategy::Scalar { build, type_path } => build(source, type_path),
            RebuildStrategy::Struct { info, fields } => {
                let Value::Map(entries) = source else {
                    return Err(mismatch(source, "Map", info.type_path()));
                };

                let mut record = info.default_value();
                let target = record.reflect_mut().as_struct().map_err(Error::custom)?;
                for (key, item) in entries {
                    let Value::String(name) = key else {
                        continue;
                    };
                    let Some(index) = info.index_of(name) else {
                        continue;
                    };
                    let field = &fields[index];
                    if item.is_nil() && !field.takes_nil {
                        continue;
                    }

                    let produced = self.rebuild(field.strategy.get(), item, depth)?;
                    target
                        .field_at_mut(index)
                        .ok_or(Error::UnsettableDestination {
                            type_path: info.type_path(),
                        })?
                        .set(produced)
                        .map_err(unsettable(info.type_path()))?;
                }
                Ok(record)
            }
            RebuildStrategy::List {
                info,
                item,
                octets,
            } => {
                let items = match source {
                    Value::List(items) => items,
                    Value::Bytes(data) if *octets => return byte_list(info, data),
                    _ => return Err(mismatch(source, sequence(*octets), info.type_path())),
                };

                let mut list = info.new_with_capacity(items.len());
                let target = list.reflect_mut().as_list().map_err(Error::custom)?;
                let item = item.get();
                for element in items {
                    let produced = self.rebuild(item, element, depth)?;
                    target
                        .try_push(produced)
                        .map_err(unsettable(info.type_path()))?;
                }
                Ok(list)
            }
            RebuildStrategy::Array {
                info,
                item,
                octets,
            } => {
                let check_length = |found: usize| {
                    if found == info.capacity() {
                        Ok(())
                    } else {
                        Err(Error::LengthMismatch {
                            type_path: info.type_path(),
                            expected: info.capacity(),
                            found,
                        })
                    }
                };

                let produced = match source {
                    Value::List(items) => {
                        check_length(items.len())?;
                        let item = item.get();
                        items
                            .iter()
                            .map(|element| self.rebuild(item, element, depth))
                            .collect::<Result<Vec<_>>>()?
                    }
                    Value::Bytes(data) if *octets => {
                        check_length(data.len())?;
                        boxed_octets(data).collect()
                    }
                    _ => return Err(mismatch(source, sequence(*octets), info.type_path())),
                };
                info.from_items(produced)
                    .ok_or(Error::UnsettableDestination {
                        type_path: info.type_path(),
                    })
            }
            RebuildStrategy::Map { info, key, value } => {
                let Value::Map(entries) = source else {
                    return Err(mismatch(source, "Map", info.type_path()));
                };

                let mut map = info.new_with_capacity(entries.len());
                let target = map.reflect_mut().as_map().map_err(Error::custom)?;
                let (key, value) = (key.get(), value.get());
                for (k, v) in entries {
                    let k = self.rebuild(key, k, depth)?;
                    let v = self.rebuild(value, v, depth)?;
                    target.insert_boxed(k, v).map_err(|_| Error::UnsettableDestination {
                        type_path: info.type_path(),
                    })?;
                }
                Ok(map)
            }
            RebuildStrategy::Optional { info, inner } => match source {
                Value::Nil => Ok(info.new_none()),
                _ => {
                    let produced = self.rebuild(inner.get(), source, depth)?;
                    info.new_some(produced).map_err(unsettable(info.type_path()))
                }
            },
            RebuildStrategy::Pointer { info, pointee } => match source {
                Value::Nil => Err(mismatch(source, "a non-nil value", info.type_path())),
                _ => {
                    let produced = self.rebuild(pointee.get(), source, depth)?;
                    info.wrap(produced).map_err(unsettable(info.type_path()))
                }
            },
            RebuildStrategy::Dynamic(info) => {
                if info.type_is::<Value>() {
                    Ok(Box::new(source.clone()))
                } else {
                    Err(Error::custom(format!(
                        "dynamic type `{}` cannot be reconstructed",
                        info.type_path(),
                    )))
                }
            }
        }
    }
}

/// Rebuilds a `T` from `source` with the default [`RebuildConfig`].
///
/// See [`Reconstructor`] for the accepted sources per destination kind.
///
/// ```
/// use vc_value::{Error, Value, from_value};
///
/// assert_eq!(from_value::<f64>(&Value::Uint(50)).unwrap(), 50.0);
/// assert!(matches!(
///     from_value::<i8>(&Value::Int(300)),
///     Err(Error::NumericOverflow { .. }),
/// ));
/// ```
#[inline]
pub fn from_value<T: Reflect + Typed>(source: &Value) -> Result<T> {
    Reconstructor::new().reconstruct(source)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::{BTreeMap, VecDeque};
    use alloc::rc::Rc;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;
    use std::collections::HashMap;

    use bytes::Bytes;
    use chrono::{TimeZone, Utc};
    use url::Url;
    use vc_reflect::derive::Reflect;
    use vc_reflect::info::Typed;

    use super::{RebuildConfig, Reconstructor, from_value};
    use crate::{Error, Value, to_value};

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Inner {
        label: String,
        weight: f32,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Everything {
        small: i8,
        big: u64,
        ratio: f64,
        flag: bool,
        name: String,
        blob: Bytes,
        link: Option<Url>,
        at: Option<chrono::DateTime<Utc>>,
        list: Vec<u16>,
        queue: VecDeque<i32>,
        fixed: [u8; 3],
        by_name: BTreeMap<String, i64>,
        by_id: HashMap<u8, bool>,
        child: Option<Box<Inner>>,
        missing: Option<Inner>,
        shared: Rc<String>,
        raw: Value,
    }

    #[derive(Reflect, Debug, PartialEq)]
    struct Settings {
        retries: u8,
        note: Option<String>,
        raw: Value,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                retries: 3,
                note: Some("default".into()),
                raw: Value::Bool(true),
            }
        }
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Chain {
        next: Option<Box<Chain>>,
    }

    fn map(entries: &[(&str, Value)]) -> Value {
        entries
            .iter()
            .map(|(key, value)| (Value::from(*key), value.clone()))
            .collect()
    }

    #[test]
    fn round_trip_law() {
        let original = Everything {
            small: -8,
            big: u64::MAX,
            ratio: 0.25,
            flag: true,
            name: "everything".into(),
            blob: Bytes::from_static(b"\xff\x00"),
            link: Some(Url::parse("https://example.com/x?y=1").unwrap()),
            at: Some(Utc.with_ymd_and_hms(2021, 6, 7, 8, 9, 10).unwrap()),
            list: vec![1, 2, 3],
            queue: VecDeque::from([-1, 0, 1]),
            fixed: [7, 8, 9],
            by_name: BTreeMap::from([("a".to_string(), -5), ("b".to_string(), 6)]),
            by_id: HashMap::from([(1, true), (2, false)]),
            child: Some(Box::new(Inner {
                label: "inner".into(),
                weight: 1.5,
            })),
            missing: None,
            shared: Rc::new("rc".into()),
            raw: map(&[("free", Value::List(vec![Value::Nil, Value::Float(2.5)]))]),
        };

        let value = to_value(&original).unwrap();
        let rebuilt: Everything = from_value(&value).unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn numeric_round_trip() {
        assert!(matches!(
            from_value::<i8>(&Value::Int(300)),
            Err(Error::NumericOverflow { .. })
        ));
        assert_eq!(from_value::<f64>(&Value::Uint(50)).unwrap(), 50.0);
        assert!(matches!(
            from_value::<i64>(&Value::Float(3.5)),
            Err(Error::NumericOverflow { .. })
        ));

        assert!(from_value::<u32>(&Value::Int(-1)).is_err());
        assert!(from_value::<i64>(&Value::Uint(u64::MAX)).is_err());
        assert!(from_value::<f32>(&Value::Float(0.1)).is_err());
        assert!(from_value::<f64>(&Value::Int(i64::MAX)).is_err());

        assert_eq!(from_value::<u8>(&Value::Float(2.0)).unwrap(), 2);
        assert_eq!(from_value::<i16>(&Value::Uint(7)).unwrap(), 7);
        assert_eq!(from_value::<usize>(&Value::Int(9)).unwrap(), 9);
        assert_eq!(from_value::<f32>(&Value::Int(-3)).unwrap(), -3.0);
        assert!(from_value::<f64>(&Value::Float(f64::NAN)).unwrap().is_nan());
        assert!(matches!(
            from_value::<u8>(&Value::from("1")),
            Err(Error::KindMismatch { .. })
        ));
    }

    #[test]
    fn empty_list_is_an_empty_sequence() {
        assert_eq!(from_value::<Vec<u8>>(&Value::List(vec![])).unwrap(), Vec::<u8>::new());
        assert!(matches!(
            from_value::<Vec<u8>>(&Value::Nil),
            Err(Error::KindMismatch { .. })
        ));
    }

    #[test]
    fn nil_resets_optionals_only() {
        let source = map(&[
            ("retries", Value::Nil),
            ("note", Value::Nil),
            ("raw", Value::Nil),
        ]);
        let settings: Settings = from_value(&source).unwrap();
        assert_eq!(settings, Settings {
            retries: 3,
            note: None,
            raw: Value::Nil,
        });

        let chain: Chain = from_value(&map(&[("next", Value::Nil)])).unwrap();
        assert_eq!(chain, Chain { next: None });

        assert!(matches!(
            from_value::<Box<u8>>(&Value::Nil),
            Err(Error::KindMismatch { .. })
        ));
    }

    #[test]
    fn field_name_fidelity() {
        let source = map(&[("note", Value::from("set")), ("extra", Value::Int(1))]);
        let settings: Settings = from_value(&source).unwrap();
        assert_eq!(settings, Settings {
            retries: 3,
            note: Some("set".into()),
            raw: Value::Bool(true),
        });

        let mut keyed = BTreeMap::new();
        keyed.insert(Value::Int(0), Value::Int(1));
        keyed.insert(Value::from("retries"), Value::Int(5));
        let settings: Settings = from_value(&Value::Map(keyed)).unwrap();
        assert_eq!(settings.retries, 5);
    }

    #[test]
    fn fixed_arrays_check_length() {
        let source = Value::List(vec![Value::Uint(1), Value::Uint(2)]);
        let err = from_value::<[u8; 3]>(&source).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                expected: 3,
                found: 2,
                ..
            }
        ));
        assert_eq!(from_value::<[u8; 2]>(&source).unwrap(), [1, 2]);
    }

    #[test]
    fn octet_sequences_round_trip() {
        let raw = vec![0_u8, 127, 255];
        let value = to_value(&raw).unwrap();
        assert_eq!(value, Value::Bytes(Bytes::from_static(&[0, 127, 255])));
        assert_eq!(from_value::<Vec<u8>>(&value).unwrap(), raw);
        assert_eq!(from_value::<VecDeque<u8>>(&value).unwrap(), VecDeque::from(raw));

        let fixed = [9_u8, 8];
        let value = to_value(&fixed).unwrap();
        assert_eq!(value, Value::Bytes(Bytes::from_static(&[9, 8])));
        assert_eq!(from_value::<[u8; 2]>(&value).unwrap(), fixed);

        let err = from_value::<[u8; 4]>(&value).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                expected: 4,
                found: 2,
                ..
            }
        ));

        // Bytes only stand in for `u8` items.
        assert!(matches!(
            from_value::<Vec<u16>>(&value),
            Err(Error::KindMismatch {
                expected: "List",
                ..
            })
        ));
        assert!(matches!(
            from_value::<Vec<u8>>(&Value::Bool(true)),
            Err(Error::KindMismatch {
                expected: "List or Bytes",
                ..
            })
        ));
    }

    #[test]
    fn maps_rebuild_keys_and_values() {
        let source: Value = [(Value::Uint(1), Value::from("one"))].into_iter().collect();
        let rebuilt: BTreeMap<u8, String> = from_value(&source).unwrap();
        assert_eq!(rebuilt, BTreeMap::from([(1, "one".to_string())]));

        let err = from_value::<BTreeMap<u8, String>>(&Value::List(vec![])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot reconstruct `alloc::collections::BTreeMap<u8, alloc::string::String>` \
             from []: expected Map"
        );
    }

    #[test]
    fn reconstruct_into_keeps_target_on_failure() {
        let reconstructor = Reconstructor::new();
        let mut target = vec![1_u8, 2];

        let bad = Value::List(vec![Value::Int(-1)]);
        assert!(reconstructor.reconstruct_into(&bad, &mut target).is_err());
        assert_eq!(target, [1, 2]);

        let good = Value::List(vec![Value::Int(9)]);
        reconstructor.reconstruct_into(&good, &mut target).unwrap();
        assert_eq!(target, [9]);
    }

    #[test]
    fn reconstruct_dyn_by_descriptor() {
        let boxed = Reconstructor::new()
            .reconstruct_dyn(&Value::Int(4), <Option<i32>>::type_info())
            .unwrap();
        assert_eq!(boxed.downcast_ref::<Option<i32>>(), Some(&Some(4)));
    }

    #[test]
    fn depth_is_bounded() {
        let mut source = Value::Nil;
        for _ in 0..10 {
            source = map(&[("next", source)]);
        }

        let shallow = Reconstructor::with_config(RebuildConfig::new().with_max_depth(8));
        let err = shallow.reconstruct::<Chain>(&source).unwrap_err();
        assert!(matches!(err, Error::DepthLimit(8)));

        assert!(Reconstructor::new().reconstruct::<Chain>(&source).is_ok());
    }

    #[test]
    #[should_panic(expected = "does not fit in `i8`")]
    fn panic_on_error() {
        let loud = Reconstructor::with_config(RebuildConfig::new().with_panic_on_error(true));
        let _ = loud.reconstruct::<i8>(&Value::Int(1000));
    }
}
