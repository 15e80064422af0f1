use alloc::boxed::Box;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{OptionalInfo, TypeInfo, Typed};
use crate::ops::Optional;

impl_generic_type_path!("core::option", Option<T>);

impl<T: Reflect + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Optional(OptionalInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
    crate::reflection::impl_reflect_cast_fn!(Optional);
}

impl<T: Reflect + Typed> Optional for Option<T> {
    #[inline]
    fn get(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(Reflect::as_reflect_mut)
    }

    #[inline]
    fn none() -> Self {
        None
    }

    fn from_some(inner: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        inner.take::<T>().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use crate::Reflect;
    use crate::info::{ReflectKind, TypePath, Typed};
    use crate::ops::Optional;

    #[test]
    fn optional_ops() {
        let info = <Option<u32>>::type_info().as_optional().unwrap();

        let some = info.new_some(Box::new(5_u32)).unwrap();
        assert_eq!(some.downcast_ref::<Option<u32>>(), Some(&Some(5)));
        assert!(info.new_some(Box::new(5_i32)).is_err());

        let mut value = Some(1_u32);
        *Optional::get_mut(&mut value).unwrap().downcast_mut::<u32>().unwrap() = 9;
        assert_eq!(value, Some(9));
        assert_eq!(value.reflect_kind(), ReflectKind::Optional);
    }

    #[test]
    fn optional_path_and_debug() {
        assert_eq!(
            <Option<String>>::type_path(),
            "core::option::Option<alloc::string::String>"
        );

        let none: Box<dyn Reflect> = Box::new(None::<u8>);
        let some: Box<dyn Reflect> = Box::new(Some(2_u8));
        assert_eq!(alloc::format!("{none:?} {some:?}"), "None Some(2)");
    }
}
