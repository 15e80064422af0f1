use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{ListInfo, TypeInfo, Typed};
use crate::ops::{List, RefId};

// -----------------------------------------------------------------------------
// Vec

impl_generic_type_path!("alloc::vec", Vec<T>);

impl<T: Reflect + Typed> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed> Reflect for Vec<T> {
    crate::reflection::impl_reflect_cast_fn!(List);
}

impl<T: Reflect + Typed> List for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(Reflect::as_reflect_mut)
    }

    fn try_push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        Vec::push(self, value.take::<T>()?);
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn ref_id(&self) -> Option<RefId> {
        if Vec::is_empty(self) {
            return None;
        }
        RefId::of::<Self, T>(Vec::as_ptr(self))
    }

    #[inline]
    fn with_capacity(capacity: usize) -> Self {
        Vec::with_capacity(capacity)
    }
}

// -----------------------------------------------------------------------------
// VecDeque

impl_generic_type_path!("alloc::collections", VecDeque<T>);

impl<T: Reflect + Typed> Typed for VecDeque<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed> Reflect for VecDeque<T> {
    crate::reflection::impl_reflect_cast_fn!(List);
}

impl<T: Reflect + Typed> List for VecDeque<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        VecDeque::get(self, index).map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        VecDeque::get_mut(self, index).map(Reflect::as_reflect_mut)
    }

    fn try_push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        VecDeque::push_back(self, value.take::<T>()?);
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn ref_id(&self) -> Option<RefId> {
        // The front slice is non-empty whenever the deque is.
        let (front, _) = self.as_slices();
        if front.is_empty() {
            return None;
        }
        RefId::of::<Self, T>(front.as_ptr())
    }

    #[inline]
    fn with_capacity(capacity: usize) -> Self {
        VecDeque::with_capacity(capacity)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::VecDeque;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::List;

    #[test]
    fn vec_list_ops() {
        let mut list: Vec<i32> = List::with_capacity(4);
        List::try_push(&mut list, Box::new(1_i32)).unwrap();
        List::try_push(&mut list, Box::new(2_i32)).unwrap();
        assert!(List::try_push(&mut list, Box::new(3_u8)).is_err());

        let dyn_list: &dyn List = &list;
        assert_eq!(dyn_list.len(), 2);
        assert_eq!(dyn_list.get(1).unwrap().downcast_ref::<i32>(), Some(&2));
        assert!(dyn_list.get(2).is_none());

        let items: Vec<i32> = dyn_list
            .items()
            .map(|item| *item.downcast_ref::<i32>().unwrap())
            .collect();
        assert_eq!(items, [1, 2]);
    }

    #[test]
    fn list_identity() {
        let empty: Vec<u8> = Vec::new();
        assert_eq!(List::ref_id(&empty), None);

        let a = vec![1_u8, 2];
        let b = vec![1_u8, 2];
        assert!(List::ref_id(&a).is_some());
        assert_ne!(List::ref_id(&a), List::ref_id(&b));

        let deque: VecDeque<u8> = VecDeque::from(vec![1, 2]);
        assert!(List::ref_id(&deque).is_some());
    }

    #[test]
    fn list_info() {
        let info = <Vec<String>>::type_info().as_list().unwrap();
        assert!(info.item_is::<String>());
        assert_eq!(<Vec<String>>::type_path(), "alloc::vec::Vec<alloc::string::String>");
        assert_eq!(<VecDeque<u8>>::type_name(), "VecDeque<u8>");

        let fresh = info.new_with_capacity(3);
        assert_eq!(fresh.downcast_ref::<Vec<String>>().map(Vec::len), Some(0));
    }

    #[test]
    fn list_debug() {
        let value: Box<dyn Reflect> = Box::new(vec![vec![1_u8], vec![]]);
        assert_eq!(alloc::format!("{value:?}"), "[[1], []]");
    }
}
