use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{ArrayInfo, TypeInfo, TypePath, Typed};
use crate::ops::Array;

impl<T: TypePath, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["[", T::type_path(), "; ", &N.to_string(), "]"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["[", T::type_name(), "; ", &N.to_string(), "]"]))
    }
}

impl<T: Reflect + Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Array(ArrayInfo::new::<Self, T>(N)))
    }
}

impl<T: Reflect + Typed, const N: usize> Reflect for [T; N] {
    crate::reflection::impl_reflect_cast_fn!(Array);
}

impl<T: Reflect + Typed, const N: usize> Array for [T; N] {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(Reflect::as_reflect_mut)
    }

    #[inline]
    fn len(&self) -> usize {
        N
    }

    fn from_items(items: Vec<Box<dyn Reflect>>) -> Option<Self> {
        if items.len() != N {
            return None;
        }
        let items = items
            .into_iter()
            .map(|item| item.take::<T>().ok())
            .collect::<Option<Vec<T>>>()?;
        items.try_into().ok()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::Array;

    #[test]
    fn array_from_items() {
        let info = <[u16; 2]>::type_info().as_array().unwrap();
        assert_eq!(info.capacity(), 2);

        let built = info
            .from_items(vec![Box::new(1_u16) as Box<dyn Reflect>, Box::new(2_u16)])
            .unwrap();
        assert_eq!(built.downcast_ref::<[u16; 2]>(), Some(&[1, 2]));

        assert!(info.from_items(vec![Box::new(1_u16) as Box<dyn Reflect>]).is_none());
        assert!(
            info.from_items(vec![Box::new(1_u16) as Box<dyn Reflect>, Box::new(2_i16)])
                .is_none()
        );
    }

    #[test]
    fn array_paths() {
        assert_eq!(<[u8; 4]>::type_path(), "[u8; 4]");
        assert_eq!(<[bool; 0]>::type_name(), "[bool; 0]");

        let arr = [3_i64, 4];
        assert_eq!(Array::len(&arr), 2);
        assert_eq!(Array::get(&arr, 1).unwrap().downcast_ref::<i64>(), Some(&4));
    }
}
