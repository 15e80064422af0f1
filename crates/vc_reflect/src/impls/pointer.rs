use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;
use core::cell::RefCell;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{PointerInfo, PointerKind, TypeInfo, Typed};
use crate::ops::{Pointee, Pointer, RefId};

macro_rules! impl_pointer_reflect {
    ($ptr:ident, $module:literal, $kind:ident) => {
        impl_generic_type_path!($module, $ptr<T>);

        impl<T: Reflect + Typed> Typed for $ptr<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Pointer(PointerInfo::new::<Self, T>(PointerKind::$kind))
                })
            }
        }

        impl<T: Reflect + Typed> Reflect for $ptr<T> {
            crate::reflection::impl_reflect_cast_fn!(Pointer);
        }
    };
}

// -----------------------------------------------------------------------------
// Box

impl_pointer_reflect!(Box, "alloc::boxed", Boxed);

impl<T: Reflect + Typed> Pointer for Box<T> {
    #[inline]
    fn pointee(&self) -> Option<Pointee<'_>> {
        Some(Pointee::Plain(&**self))
    }

    #[inline]
    fn ref_id(&self) -> Option<RefId> {
        RefId::of::<Self, T>(&**self)
    }

    fn wrap(pointee: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        pointee.downcast::<T>()
    }
}

// -----------------------------------------------------------------------------
// Rc

impl_pointer_reflect!(Rc, "alloc::rc", Shared);

impl<T: Reflect + Typed> Pointer for Rc<T> {
    #[inline]
    fn pointee(&self) -> Option<Pointee<'_>> {
        Some(Pointee::Plain(&**self))
    }

    #[inline]
    fn ref_id(&self) -> Option<RefId> {
        RefId::of::<Self, T>(Rc::as_ptr(self))
    }

    fn wrap(pointee: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        pointee.take::<T>().map(Rc::new)
    }
}

// -----------------------------------------------------------------------------
// Arc

impl_pointer_reflect!(Arc, "alloc::sync", Shared);

impl<T: Reflect + Typed> Pointer for Arc<T> {
    #[inline]
    fn pointee(&self) -> Option<Pointee<'_>> {
        Some(Pointee::Plain(&**self))
    }

    #[inline]
    fn ref_id(&self) -> Option<RefId> {
        RefId::of::<Self, T>(Arc::as_ptr(self))
    }

    fn wrap(pointee: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        pointee.take::<T>().map(Arc::new)
    }
}

// -----------------------------------------------------------------------------
// RefCell

impl_pointer_reflect!(RefCell, "core::cell", Cell);

impl<T: Reflect + Typed> Pointer for RefCell<T> {
    fn pointee(&self) -> Option<Pointee<'_>> {
        let guard = self.try_borrow().ok()?;
        Some(Pointee::Borrowed(guard))
    }

    #[inline]
    fn ref_id(&self) -> Option<RefId> {
        RefId::of::<Self, T>(self.as_ptr())
    }

    fn wrap(pointee: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        pointee.take::<T>().map(RefCell::new)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::sync::Arc;
    use core::cell::RefCell;

    use crate::Reflect;
    use crate::info::{PointerKind, TypePath, Typed};
    use crate::ops::{Pointee, Pointer};

    #[test]
    fn shared_identity() {
        let a = Arc::new(1_u64);
        let b = Arc::clone(&a);
        assert_eq!(a.ref_id(), b.ref_id());
        assert_ne!(a.ref_id(), Arc::new(1_u64).ref_id());

        // Zero-sized targets have no identity.
        assert_eq!(Rc::new([0_u8; 0]).ref_id(), None);
    }

    #[test]
    fn box_and_rc_identity_differ() {
        let rc = Rc::new(3_u8);
        let cell = RefCell::new(3_u8);
        assert_ne!(rc.ref_id().unwrap().type_id(), cell.ref_id().unwrap().type_id());
    }

    #[test]
    fn refcell_pointee() {
        let cell = RefCell::new(vec_of_two());
        {
            let pointee = cell.pointee().unwrap();
            assert!(matches!(pointee, Pointee::Borrowed(_)));
            assert_eq!(pointee.reflect_type_path(), "alloc::vec::Vec<u8>");
            assert_eq!(pointee.downcast_ref::<alloc::vec::Vec<u8>>().map(|v| v.len()), Some(2));
            // The guard holds a shared borrow until dropped.
            assert!(cell.try_borrow_mut().is_err());
        }
        assert!(cell.try_borrow_mut().is_ok());

        let _guard = cell.borrow_mut();
        assert!(cell.pointee().is_none());
        assert_eq!(alloc::format!("{:?}", &cell as &dyn Reflect), "<borrowed>");
    }

    #[test]
    fn wrap_pointers() {
        let info = <RefCell<i8>>::type_info().as_pointer().unwrap();
        assert_eq!(info.pointer_kind(), PointerKind::Cell);
        assert!(info.pointee_info().type_is::<i8>());

        let wrapped = info.wrap(Box::new(-1_i8)).unwrap();
        assert_eq!(*wrapped.downcast_ref::<RefCell<i8>>().unwrap().borrow(), -1);
        assert!(info.wrap(Box::new(1_u8)).is_err());

        let boxed = <Box<u8> as Pointer>::wrap(Box::new(4_u8)).unwrap();
        assert_eq!(*boxed, 4);
        assert_eq!(<Box<u8>>::type_path(), "alloc::boxed::Box<u8>");
    }

    fn vec_of_two() -> alloc::vec::Vec<u8> {
        alloc::vec![1, 2]
    }
}
