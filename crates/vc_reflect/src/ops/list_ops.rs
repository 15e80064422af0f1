use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Reflect;
use crate::ops::RefId;

// -----------------------------------------------------------------------------
// List

/// Access to growable sequences such as `Vec<T>`.
///
/// # Examples
///
/// ```
/// use vc_reflect::{Reflect, ops::List};
///
/// let mut list: Vec<u32> = List::with_capacity(2);
/// list.try_push(Box::new(7_u32)).unwrap();
/// assert!(list.try_push(Box::new("nope".to_string())).is_err());
///
/// let list: &dyn List = &list;
/// let items: Vec<_> = list.items().filter_map(|v| v.downcast_ref::<u32>()).collect();
/// assert_eq!(items, [&7]);
/// ```
pub trait List: Reflect {
    /// Returns the item at `index`.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the item at `index` mutably.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Appends `value`, handing it back if its type is not the item type.
    fn try_push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns the number of items.
    fn len(&self) -> usize;

    /// Returns `true` if the list holds no items.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identity of the item buffer, `None` while the list is empty.
    fn ref_id(&self) -> Option<RefId>;

    /// Creates an empty list.
    fn with_capacity(capacity: usize) -> Self
    where
        Self: Sized;
}

// -----------------------------------------------------------------------------
// Array

/// Access to fixed-length sequences `[T; N]`.
///
/// Arrays are inline values: they have no identity of their own.
pub trait Array: Reflect {
    /// Returns the item at `index`.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the item at `index` mutably.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the fixed length.
    fn len(&self) -> usize;

    /// Returns `true` for zero-length arrays.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Builds an array from exactly `len` items of the item type.
    fn from_items(items: Vec<Box<dyn Reflect>>) -> Option<Self>
    where
        Self: Sized;
}

// -----------------------------------------------------------------------------
// Iterators

macro_rules! impl_item_iter {
    ($iter:ident, $trait:ident) => {
        #[doc = concat!("An iterator over the items of a [`", stringify!($trait), "`].")]
        pub struct $iter<'a> {
            value: &'a dyn $trait,
            index: usize,
        }

        impl<'a> $iter<'a> {
            /// Creates a new iterator for the given value.
            #[inline(always)]
            pub const fn new(value: &'a dyn $trait) -> Self {
                Self { value, index: 0 }
            }
        }

        impl<'a> Iterator for $iter<'a> {
            type Item = &'a dyn Reflect;

            #[inline]
            fn next(&mut self) -> Option<Self::Item> {
                let item = self.value.get(self.index);
                self.index += item.is_some() as usize;
                item
            }

            #[inline]
            fn size_hint(&self) -> (usize, Option<usize>) {
                let size = self.value.len() - self.index;
                (size, Some(size))
            }
        }

        impl ExactSizeIterator for $iter<'_> {}
    };
}

impl_item_iter!(ListItemIter, List);
impl_item_iter!(ArrayItemIter, Array);

impl dyn List {
    /// Returns an iterator over the items.
    #[inline]
    pub fn items(&self) -> ListItemIter<'_> {
        ListItemIter::new(self)
    }
}

impl dyn Array {
    /// Returns an iterator over the items.
    #[inline]
    pub fn items(&self) -> ArrayItemIter<'_> {
        ArrayItemIter::new(self)
    }
}
