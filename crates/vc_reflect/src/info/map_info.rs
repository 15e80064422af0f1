use alloc::boxed::Box;
use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::Map;

/// Type info for associative containers such as `BTreeMap<K, V>`.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use vc_reflect::info::Typed;
///
/// let info = <BTreeMap<String, u32> as Typed>::type_info().as_map().unwrap();
///
/// assert!(info.key_is::<String>());
/// assert!(info.value_is::<u32>());
/// ```
#[derive(Clone, Debug)]
pub struct MapInfo {
    ty: Type,
    key_id: TypeId,
    key_info: fn() -> &'static TypeInfo,
    value_id: TypeId,
    value_info: fn() -> &'static TypeInfo,
    with_capacity: fn(usize) -> Box<dyn Reflect>,
}

impl MapInfo {
    impl_type_fn!(ty);

    /// Creates a new [`MapInfo`].
    #[inline]
    pub const fn new<
        TMap: Map + TypePath,
        TKey: Reflect + Typed,
        TValue: Reflect + Typed,
    >() -> Self {
        Self {
            ty: Type::of::<TMap>(),
            key_id: TypeId::of::<TKey>(),
            key_info: TKey::type_info,
            value_id: TypeId::of::<TValue>(),
            value_info: TValue::type_info,
            with_capacity: map_with_capacity::<TMap>,
        }
    }

    /// Returns the `TypeId` of the keys.
    #[inline]
    pub const fn key_id(&self) -> TypeId {
        self.key_id
    }

    /// Check if the given type matches the key type.
    #[inline]
    pub fn key_is<T: Any>(&self) -> bool {
        self.key_id == TypeId::of::<T>()
    }

    /// Returns the [`TypeInfo`] of the keys.
    #[inline]
    pub fn key_info(&self) -> &'static TypeInfo {
        (self.key_info)()
    }

    /// Returns the lazy accessor of the key [`TypeInfo`].
    #[inline]
    pub const fn key_info_fn(&self) -> fn() -> &'static TypeInfo {
        self.key_info
    }

    /// Returns the `TypeId` of the values.
    #[inline]
    pub const fn value_id(&self) -> TypeId {
        self.value_id
    }

    /// Check if the given type matches the value type.
    #[inline]
    pub fn value_is<T: Any>(&self) -> bool {
        self.value_id == TypeId::of::<T>()
    }

    /// Returns the [`TypeInfo`] of the values.
    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }

    /// Returns the lazy accessor of the value [`TypeInfo`].
    #[inline]
    pub const fn value_info_fn(&self) -> fn() -> &'static TypeInfo {
        self.value_info
    }

    /// Creates an empty map of the described type.
    #[inline]
    pub fn new_with_capacity(&self, capacity: usize) -> Box<dyn Reflect> {
        (self.with_capacity)(capacity)
    }
}

fn map_with_capacity<M: Map>(capacity: usize) -> Box<dyn Reflect> {
    Box::new(M::with_capacity(capacity))
}
