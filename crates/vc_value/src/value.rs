use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};
use url::Url;

use vc_reflect::Reflect;
use vc_reflect::impls::NonGenericTypeInfoCell;
use vc_reflect::info::{DynamicInfo, ReflectKind, TypeInfo, TypePath, Typed};
use vc_reflect::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Value

/// The neutral, dynamically typed value tree.
///
/// Every reflected value converts to a `Value` and back. The variant set is
/// closed: a codec decoding into this tree produces exactly these variants.
///
/// `Value` is totally ordered so it can key a [`Value::Map`]. Variants order
/// by declaration, floats by [`f64::total_cmp`].
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use vc_value::Value;
///
/// let mut map = BTreeMap::new();
/// map.insert(Value::from("id"), Value::from(7_u32));
/// map.insert(Value::from(vec![Value::Nil]), Value::from(1.5));
///
/// let value = Value::Map(map);
/// assert_eq!(value.kind_name(), "Map");
/// assert_eq!(value.to_string(), r#"{"id": 7, [nil]: 1.5}"#);
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Bytes(Bytes),
    Uri(Url),
    Timestamp(DateTime<Utc>),
    List(Vec<Value>),
    Map(BTreeMap<Value, Value>),
}

impl Value {
    /// Returns the variant name, as used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Nil => "Nil",
            Self::Bool(_) => "Bool",
            Self::Int(_) => "Int",
            Self::Uint(_) => "Uint",
            Self::Float(_) => "Float",
            Self::String(_) => "String",
            Self::Bytes(_) => "Bytes",
            Self::Uri(_) => "Uri",
            Self::Timestamp(_) => "Timestamp",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
        }
    }

    #[inline]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&BTreeMap<Value, Value>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up a string key in a [`Value::Map`].
    ///
    /// ```
    /// use vc_value::Value;
    ///
    /// let value = Value::Map([(Value::from("x"), Value::from(1_i32))].into());
    /// assert_eq!(value.get("x"), Some(&Value::Int(1)));
    /// assert_eq!(value.get("y"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?.get(&Value::String(key.into()))
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Nil => 0,
            Self::Bool(_) => 1,
            Self::Int(_) => 2,
            Self::Uint(_) => 3,
            Self::Float(_) => 4,
            Self::String(_) => 5,
            Self::Bytes(_) => 6,
            Self::Uri(_) => 7,
            Self::Timestamp(_) => 8,
            Self::List(_) => 9,
            Self::Map(_) => 10,
        }
    }
}

// -----------------------------------------------------------------------------
// Ordering

impl PartialEq for Value {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Nil, Self::Nil) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Uint(a), Self::Uint(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            (Self::Bytes(a), Self::Bytes(b)) => a.cmp(b),
            (Self::Uri(a), Self::Uri(b)) => a.cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) => a.cmp(b),
            (Self::Map(a), Self::Map(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Self::Nil => {}
            Self::Bool(v) => v.hash(state),
            Self::Int(v) => v.hash(state),
            Self::Uint(v) => v.hash(state),
            // Equal under `total_cmp` means equal bits.
            Self::Float(v) => v.to_bits().hash(state),
            Self::String(v) => v.hash(state),
            Self::Bytes(v) => v.hash(state),
            Self::Uri(v) => v.hash(state),
            Self::Timestamp(v) => v.hash(state),
            Self::List(v) => v.hash(state),
            Self::Map(v) => v.hash(state),
        }
    }
}

// -----------------------------------------------------------------------------
// Display

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("nil"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Bytes(v) => write!(f, "{v:?}"),
            Self::Uri(v) => write!(f, "<{v}>"),
            Self::Timestamp(v) => f.write_str(&v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::List(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(item, f)?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )+
    };
}

impl_from!(Bool: bool);
impl_from!(Int: i8, i16, i32, i64);
impl_from!(Uint: u8, u16, u32, u64);
impl_from!(Float: f32, f64);
impl_from!(String: String, &str);
impl_from!(Bytes: Bytes, Vec<u8>);
impl_from!(Uri: Url);
impl_from!(Timestamp: DateTime<Utc>);
impl_from!(List: Vec<Value>);
impl_from!(Map: BTreeMap<Value, Value>);

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}

impl FromIterator<Value> for Value {
    #[inline]
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::List(iter.into_iter().collect())
    }
}

impl FromIterator<(Value, Value)> for Value {
    #[inline]
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        Self::Map(iter.into_iter().collect())
    }
}

// -----------------------------------------------------------------------------
// Reflection

impl TypePath for Value {
    #[inline]
    fn type_path() -> &'static str {
        "vc_value::Value"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Value"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("vc_value")
    }
}

impl Typed for Value {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Dynamic(DynamicInfo::new::<Self>()))
    }
}

impl Reflect for Value {
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        ReflectKind::Dynamic
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Dynamic(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Dynamic(self)
    }

    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeSet;
    use alloc::string::ToString;
    use alloc::vec;
    use core::hash::BuildHasher;

    use chrono::TimeZone;
    use vc_utils::hash::FixedHashState;

    use super::*;

    #[test]
    fn order_is_total_across_variants() {
        let set: BTreeSet<Value> = [
            Value::from("a"),
            Value::Int(-1),
            Value::Nil,
            Value::Uint(0),
            Value::Bool(false),
            Value::Float(f64::NAN),
            Value::Float(0.5),
        ]
        .into_iter()
        .collect();

        let kinds: Vec<_> = set.iter().map(Value::kind_name).collect();
        assert_eq!(
            kinds,
            ["Nil", "Bool", "Int", "Uint", "Float", "Float", "String"]
        );
    }

    #[test]
    fn floats_compare_by_bits() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
        assert_ne!(Value::Int(1), Value::Uint(1));

        let state = FixedHashState;
        assert_eq!(
            state.hash_one(Value::Float(f64::NAN)),
            state.hash_one(Value::Float(f64::NAN)),
        );
    }

    #[test]
    fn display_is_compact() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let value: Value = vec![
            Value::Nil,
            Value::Float(50.0),
            Value::Timestamp(at),
            Value::Uri(Url::parse("https://example.com/a").unwrap()),
            Value::Bytes(Bytes::from_static(b"ab")),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            value.to_string(),
            r#"[nil, 50.0, 2024-05-01T12:00:00Z, <https://example.com/a>, b"ab"]"#
        );
    }

    #[test]
    fn conversions() {
        assert_eq!(Value::from(-3_i8), Value::Int(-3));
        assert_eq!(Value::from(3_u16), Value::Uint(3));
        assert_eq!(Value::from(None::<u8>), Value::Nil);
        assert_eq!(Value::from(Some(true)), Value::Bool(true));
        assert_eq!(Value::from(vec![1_u8]), Value::Bytes(Bytes::from_static(&[1])));
    }

    #[test]
    fn reflects_as_dynamic() {
        let mut value = Value::Int(1);
        let reflected: &mut dyn Reflect = &mut value;

        assert_eq!(reflected.reflect_kind(), ReflectKind::Dynamic);
        assert!(Value::type_info().as_dynamic().is_ok());

        reflected.set(Box::new(Value::from("two"))).unwrap();
        assert!(reflected.set(Box::new(3_u8)).is_err());
        assert_eq!(value, Value::from("two"));
    }
}
