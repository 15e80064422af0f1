use crate::Reflect;
use crate::info::{ReflectKind, ReflectKindError};
use crate::ops::{Array, List, Map, Optional, Pointer, Struct};

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable view of a reflected value, split by [`ReflectKind`].
///
/// # Examples
///
/// ```
/// use vc_reflect::{Reflect, ops::ReflectRef};
///
/// let v = vec![1_u8, 2];
/// match v.reflect_ref() {
///     ReflectRef::List(list) => assert_eq!(list.len(), 2),
///     _ => unreachable!(),
/// }
/// ```
pub enum ReflectRef<'a> {
    Scalar(&'a dyn Reflect),
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Array(&'a dyn Array),
    Map(&'a dyn Map),
    Optional(&'a dyn Optional),
    Pointer(&'a dyn Pointer),
    Dynamic(&'a dyn Reflect),
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable view of a reflected value, split by [`ReflectKind`].
pub enum ReflectMut<'a> {
    Scalar(&'a mut dyn Reflect),
    Struct(&'a mut dyn Struct),
    List(&'a mut dyn List),
    Array(&'a mut dyn Array),
    Map(&'a mut dyn Map),
    Optional(&'a mut dyn Optional),
    Pointer(&'a mut dyn Pointer),
    Dynamic(&'a mut dyn Reflect),
}

macro_rules! impl_kind_fn {
    () => {
        /// Returns the [`ReflectKind`] of the view.
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
    };
}

macro_rules! impl_cast_fn {
    ($name:ident : $kind:ident => $($ty:tt)+) => {
        #[doc = concat!("Casts to the `", stringify!($kind), "` view.")]
        pub fn $name(self) -> Result<$($ty)+, ReflectKindError> {
            let received = self.kind();
            match self {
                Self::$kind(value) => Ok(value),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received,
                }),
            }
        }
    };
}

impl<'a> ReflectRef<'a> {
    impl_kind_fn!();
    impl_cast_fn!(as_struct: Struct => &'a dyn Struct);
    impl_cast_fn!(as_list: List => &'a dyn List);
    impl_cast_fn!(as_array: Array => &'a dyn Array);
    impl_cast_fn!(as_map: Map => &'a dyn Map);
    impl_cast_fn!(as_optional: Optional => &'a dyn Optional);
    impl_cast_fn!(as_pointer: Pointer => &'a dyn Pointer);
}

impl<'a> ReflectMut<'a> {
    impl_kind_fn!();
    impl_cast_fn!(as_struct: Struct => &'a mut dyn Struct);
    impl_cast_fn!(as_list: List => &'a mut dyn List);
    impl_cast_fn!(as_array: Array => &'a mut dyn Array);
    impl_cast_fn!(as_map: Map => &'a mut dyn Map);
    impl_cast_fn!(as_optional: Optional => &'a mut dyn Optional);
    impl_cast_fn!(as_pointer: Pointer => &'a mut dyn Pointer);
}
