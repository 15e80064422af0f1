use core::{error, fmt};

use crate::info::Type;
use crate::info::{ArrayInfo, ListInfo, MapInfo, StructInfo};
use crate::info::{DynamicInfo, OptionalInfo, PointerInfo, ScalarInfo};

// -----------------------------------------------------------------------------
// ReflectKind

/// The structural category of a reflected type.
///
/// Every [`TypeInfo`] and every [`ReflectRef`](crate::ops::ReflectRef)
/// belongs to exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    /// A leaf value, see [`ScalarKind`](crate::info::ScalarKind).
    Scalar,
    /// A record with named fields.
    Struct,
    /// A growable sequence.
    List,
    /// A fixed-length sequence.
    Array,
    /// An associative container.
    Map,
    /// A value that may be absent.
    Optional,
    /// An owning or shared pointer with an identity of its own.
    Pointer,
    /// A self-describing value whose shape is only known at runtime.
    Dynamic,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.pad("Scalar"),
            Self::Struct => f.pad("Struct"),
            Self::List => f.pad("List"),
            Self::Array => f.pad("Array"),
            Self::Map => f.pad("Map"),
            Self::Optional => f.pad("Optional"),
            Self::Pointer => f.pad("Pointer"),
            Self::Dynamic => f.pad("Dynamic"),
        }
    }
}

/// Returned by the `as_*` casts when the kind does not match.
///
/// # Examples
///
/// ```
/// use vc_reflect::info::{ReflectKind, Typed};
///
/// let err = <i32 as Typed>::type_info().as_list().unwrap_err();
/// assert_eq!(err.expected, ReflectKind::List);
/// assert_eq!(err.received, ReflectKind::Scalar);
/// ```
#[derive(Debug)]
pub struct ReflectKindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

impl fmt::Display for ReflectKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reflect kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for ReflectKindError {}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time shape of a reflected type.
///
/// Obtained from [`Typed::type_info`](crate::info::Typed::type_info) or,
/// for a value behind `dyn Reflect`, from
/// [`DynamicTyped::reflect_type_info`](crate::info::DynamicTyped::reflect_type_info).
/// Child shapes (fields, items, keys, pointees) are reached through function
/// pointers, so a type may mention itself.
///
/// # Examples
///
/// ```
/// use vc_reflect::info::{ReflectKind, Typed};
///
/// let info = <Vec<Option<u8>> as Typed>::type_info();
/// let list = info.as_list().unwrap();
/// assert_eq!(list.item_info().kind(), ReflectKind::Optional);
/// ```
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Scalar(ScalarInfo),
    Struct(StructInfo),
    List(ListInfo),
    Array(ArrayInfo),
    Map(MapInfo),
    Optional(OptionalInfo),
    Pointer(PointerInfo),
    Dynamic(DynamicInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        #[doc = concat!("Casts to [`", stringify!($info), "`] if the kind is `", stringify!($kind), "`.")]
        pub const fn $name(&self) -> Result<&$info, ReflectKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_scalar: Scalar => ScalarInfo);
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_array: Array => ArrayInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_optional: Optional => OptionalInfo);
    impl_cast_method!(as_pointer: Pointer => PointerInfo);
    impl_cast_method!(as_dynamic: Dynamic => DynamicInfo);

    /// Returns the underlying [`Type`] metadata for this `TypeInfo`.
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Scalar(info) => info.ty(),
            Self::Struct(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Array(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Optional(info) => info.ty(),
            Self::Pointer(info) => info.ty(),
            Self::Dynamic(info) => info.ty(),
        }
    }

    /// Returns the `TypeId` of the described type.
    #[inline]
    pub const fn ty_id(&self) -> core::any::TypeId {
        self.ty().id()
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn type_is<T: core::any::Any>(&self) -> bool {
        self.ty().is::<T>()
    }

    /// Returns the type path.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// Returns the [`ReflectKind`] for this `TypeInfo`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_reflect::info::{Typed, ReflectKind};
    ///
    /// assert_eq!(i32::type_info().kind(), ReflectKind::Scalar);
    /// assert_eq!(<Box<i32>>::type_info().kind(), ReflectKind::Pointer);
    /// ```
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Scalar(_) => ReflectKind::Scalar,
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Array(_) => ReflectKind::Array,
            Self::Map(_) => ReflectKind::Map,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Pointer(_) => ReflectKind::Pointer,
            Self::Dynamic(_) => ReflectKind::Dynamic,
        }
    }
}
