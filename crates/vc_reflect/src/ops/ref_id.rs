use core::any::TypeId;
use core::fmt;

/// The identity of a shareable instance: the type that refers to it and the
/// address it lives at.
///
/// Two `RefId`s are equal only if both parts are. The type part keeps apart
/// instances that happen to start at the same address, e.g. a `Box<Inner>`
/// and the `Vec` buffer stored first inside `Inner`.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use vc_reflect::{Reflect, ops::Pointer};
///
/// let a = Rc::new(5_u32);
/// let b = Rc::clone(&a);
/// let c = Rc::new(5_u32);
///
/// assert_eq!(a.ref_id(), b.ref_id());
/// assert_ne!(a.ref_id(), c.ref_id());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefId {
    ty: TypeId,
    addr: usize,
}

impl RefId {
    /// Identity of the instance at `ptr`, referred to by `Owner`.
    ///
    /// Returns `None` for zero-sized targets: they have no distinct address.
    #[inline]
    pub fn of<Owner: 'static, T>(ptr: *const T) -> Option<Self> {
        if size_of::<T>() == 0 {
            return None;
        }
        Some(Self {
            ty: TypeId::of::<Owner>(),
            addr: ptr.cast::<()>().addr(),
        })
    }

    /// Identity built from a raw address, for containers that know their
    /// buffer is non-empty.
    #[inline]
    pub fn from_addr<Owner: 'static>(addr: usize) -> Self {
        Self {
            ty: TypeId::of::<Owner>(),
            addr,
        }
    }

    /// Returns the type part.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty
    }

    /// Returns the address part.
    #[inline]
    pub const fn addr(&self) -> usize {
        self.addr
    }
}

impl fmt::Debug for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RefId({:#x})", self.addr)
    }
}

