use alloc::boxed::Box;
use core::any::TypeId;

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::{Optional, Pointer};

// -----------------------------------------------------------------------------
// OptionalInfo

/// Type info for `Option<T>`.
///
/// # Examples
///
/// ```
/// use vc_reflect::info::Typed;
///
/// let info = <Option<i64> as Typed>::type_info().as_optional().unwrap();
/// assert!(info.inner_info().type_is::<i64>());
///
/// let none = info.new_none();
/// assert_eq!(none.downcast_ref::<Option<i64>>(), Some(&None));
/// ```
#[derive(Clone, Debug)]
pub struct OptionalInfo {
    ty: Type,
    inner_id: TypeId,
    inner_info: fn() -> &'static TypeInfo,
    none: fn() -> Box<dyn Reflect>,
    some: fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>,
}

impl OptionalInfo {
    impl_type_fn!(ty);

    /// Creates a new [`OptionalInfo`].
    #[inline]
    pub const fn new<TOpt: Optional + TypePath, TInner: Reflect + Typed>() -> Self {
        Self {
            ty: Type::of::<TOpt>(),
            inner_id: TypeId::of::<TInner>(),
            inner_info: TInner::type_info,
            none: optional_none::<TOpt>,
            some: optional_some::<TOpt>,
        }
    }

    /// Returns the `TypeId` of the wrapped type.
    #[inline]
    pub const fn inner_id(&self) -> TypeId {
        self.inner_id
    }

    /// Returns the [`TypeInfo`] of the wrapped type.
    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner_info)()
    }

    /// Returns the lazy accessor of the wrapped [`TypeInfo`].
    #[inline]
    pub const fn inner_info_fn(&self) -> fn() -> &'static TypeInfo {
        self.inner_info
    }

    /// Creates the empty variant.
    #[inline]
    pub fn new_none(&self) -> Box<dyn Reflect> {
        (self.none)()
    }

    /// Wraps `inner` in the present variant.
    ///
    /// Returns `inner` back if it is not of the wrapped type.
    #[inline]
    pub fn new_some(&self, inner: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.some)(inner)
    }
}

fn optional_none<O: Optional>() -> Box<dyn Reflect> {
    Box::new(O::none())
}

fn optional_some<O: Optional>(inner: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
    O::from_some(inner).map(|opt| Box::new(opt) as Box<dyn Reflect>)
}

// -----------------------------------------------------------------------------
// PointerInfo

/// The flavour of a reflected pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// `Box<T>`: unique ownership.
    Boxed,
    /// `Rc<T>` and `Arc<T>`: shared ownership.
    Shared,
    /// `RefCell<T>`: interior mutability, read through a borrow.
    Cell,
}

/// Type info for pointer-like wrappers whose target has an address of its
/// own: `Box<T>`, `Rc<T>`, `Arc<T>` and `RefCell<T>`.
///
/// Pointers are never null; an absent pointer is spelled `Option<Rc<T>>`.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use vc_reflect::info::{PointerKind, Typed};
///
/// let info = <Rc<u8> as Typed>::type_info().as_pointer().unwrap();
/// assert_eq!(info.pointer_kind(), PointerKind::Shared);
///
/// let rc = info.wrap(Box::new(7_u8)).unwrap();
/// assert_eq!(**rc.downcast_ref::<Rc<u8>>().unwrap(), 7);
/// ```
#[derive(Clone, Debug)]
pub struct PointerInfo {
    ty: Type,
    kind: PointerKind,
    pointee_id: TypeId,
    pointee_info: fn() -> &'static TypeInfo,
    wrap: fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>,
}

impl PointerInfo {
    impl_type_fn!(ty);

    /// Creates a new [`PointerInfo`].
    #[inline]
    pub const fn new<TPtr: Pointer + TypePath, TPointee: Reflect + Typed>(
        kind: PointerKind,
    ) -> Self {
        Self {
            ty: Type::of::<TPtr>(),
            kind,
            pointee_id: TypeId::of::<TPointee>(),
            pointee_info: TPointee::type_info,
            wrap: pointer_wrap::<TPtr>,
        }
    }

    /// Returns the pointer flavour.
    #[inline]
    pub const fn pointer_kind(&self) -> PointerKind {
        self.kind
    }

    /// Returns the `TypeId` of the pointee.
    #[inline]
    pub const fn pointee_id(&self) -> TypeId {
        self.pointee_id
    }

    /// Returns the [`TypeInfo`] of the pointee.
    #[inline]
    pub fn pointee_info(&self) -> &'static TypeInfo {
        (self.pointee_info)()
    }

    /// Returns the lazy accessor of the pointee [`TypeInfo`].
    #[inline]
    pub const fn pointee_info_fn(&self) -> fn() -> &'static TypeInfo {
        self.pointee_info
    }

    /// Allocates a new pointer owning `pointee`.
    ///
    /// Returns `pointee` back if it is not of the pointee type.
    #[inline]
    pub fn wrap(&self, pointee: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.wrap)(pointee)
    }
}

fn pointer_wrap<P: Pointer>(pointee: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
    P::wrap(pointee).map(|ptr| Box::new(ptr) as Box<dyn Reflect>)
}

// -----------------------------------------------------------------------------
// DynamicInfo

/// Type info for self-describing values whose shape is discovered at runtime,
/// such as a neutral value tree.
///
/// Consumers handle these by downcasting to the concrete type they know.
#[derive(Clone, Debug)]
pub struct DynamicInfo {
    ty: Type,
}

impl DynamicInfo {
    impl_type_fn!(ty);

    /// Creates a new [`DynamicInfo`].
    #[inline]
    pub const fn new<T: TypePath + ?Sized>() -> Self {
        Self { ty: Type::of::<T>() }
    }
}
