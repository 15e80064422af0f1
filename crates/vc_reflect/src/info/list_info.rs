use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::{Array, List};

// -----------------------------------------------------------------------------
// ListInfo

/// Type info for growable sequences such as `Vec<T>`.
///
/// # Examples
///
/// ```
/// use vc_reflect::info::Typed;
///
/// let info = <Vec<String> as Typed>::type_info().as_list().unwrap();
/// assert!(info.item_is::<String>());
///
/// let fresh = info.new_with_capacity(4);
/// assert!(fresh.is::<Vec<String>>());
/// ```
#[derive(Clone, Debug)]
pub struct ListInfo {
    ty: Type,
    item_id: TypeId,
    item_info: fn() -> &'static TypeInfo,
    with_capacity: fn(usize) -> Box<dyn Reflect>,
}

impl ListInfo {
    impl_type_fn!(ty);

    /// Creates a new [`ListInfo`].
    #[inline]
    pub const fn new<TList: List + TypePath, TItem: Reflect + Typed>() -> Self {
        Self {
            ty: Type::of::<TList>(),
            item_id: TypeId::of::<TItem>(),
            item_info: TItem::type_info,
            with_capacity: list_with_capacity::<TList>,
        }
    }

    /// Returns the `TypeId` of the items.
    #[inline]
    pub const fn item_id(&self) -> TypeId {
        self.item_id
    }

    /// Check if the given type matches the item type.
    #[inline]
    pub fn item_is<T: Any>(&self) -> bool {
        self.item_id == TypeId::of::<T>()
    }

    /// Returns the [`TypeInfo`] of the items.
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    /// Returns the lazy accessor of the item [`TypeInfo`].
    #[inline]
    pub const fn item_info_fn(&self) -> fn() -> &'static TypeInfo {
        self.item_info
    }

    /// Creates an empty list of the described type.
    #[inline]
    pub fn new_with_capacity(&self, capacity: usize) -> Box<dyn Reflect> {
        (self.with_capacity)(capacity)
    }
}

fn list_with_capacity<L: List>(capacity: usize) -> Box<dyn Reflect> {
    Box::new(L::with_capacity(capacity))
}

// -----------------------------------------------------------------------------
// ArrayInfo

/// Type info for fixed-length sequences `[T; N]`.
///
/// # Examples
///
/// ```
/// use vc_reflect::{Reflect, info::Typed};
///
/// let info = <[u8; 2] as Typed>::type_info().as_array().unwrap();
/// assert_eq!(info.capacity(), 2);
///
/// let items: Vec<Box<dyn Reflect>> = vec![Box::new(1_u8), Box::new(2_u8)];
/// let array = info.from_items(items).unwrap();
/// assert_eq!(array.downcast_ref::<[u8; 2]>(), Some(&[1, 2]));
/// ```
#[derive(Clone, Debug)]
pub struct ArrayInfo {
    ty: Type,
    item_id: TypeId,
    item_info: fn() -> &'static TypeInfo,
    capacity: usize,
    from_items: fn(Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>>,
}

impl ArrayInfo {
    impl_type_fn!(ty);

    /// Creates a new [`ArrayInfo`].
    #[inline]
    pub const fn new<TArray: Array + TypePath, TItem: Reflect + Typed>(capacity: usize) -> Self {
        Self {
            ty: Type::of::<TArray>(),
            item_id: TypeId::of::<TItem>(),
            item_info: TItem::type_info,
            capacity,
            from_items: array_from_items::<TArray>,
        }
    }

    /// Returns the fixed length.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the `TypeId` of the items.
    #[inline]
    pub const fn item_id(&self) -> TypeId {
        self.item_id
    }

    /// Check if the given type matches the item type.
    #[inline]
    pub fn item_is<T: Any>(&self) -> bool {
        self.item_id == TypeId::of::<T>()
    }

    /// Returns the [`TypeInfo`] of the items.
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    /// Returns the lazy accessor of the item [`TypeInfo`].
    #[inline]
    pub const fn item_info_fn(&self) -> fn() -> &'static TypeInfo {
        self.item_info
    }

    /// Assembles an array from exactly [`capacity`](Self::capacity) items.
    ///
    /// Returns `None` if the count or an item type is wrong.
    #[inline]
    pub fn from_items(&self, items: Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>> {
        (self.from_items)(items)
    }
}

fn array_from_items<A: Array>(items: Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>> {
    A::from_items(items).map(|array| Box::new(array) as Box<dyn Reflect>)
}
