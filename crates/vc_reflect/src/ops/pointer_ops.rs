use alloc::boxed::Box;
use core::cell::Ref;
use core::ops::Deref;

use crate::Reflect;
use crate::ops::RefId;

// -----------------------------------------------------------------------------
// Pointer

/// Access to pointer-like wrappers: `Box<T>`, `Rc<T>`, `Arc<T>`, `RefCell<T>`.
///
/// A pointer is never null. What makes it different from an inline value is
/// that its target has an identity ([`RefId`]) that several paths of a graph
/// may share.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use vc_reflect::ops::Pointer;
///
/// let cell = RefCell::new(3_i16);
/// assert_eq!(cell.pointee().unwrap().downcast_ref::<i16>(), Some(&3));
///
/// let guard = cell.borrow_mut();
/// assert!(cell.pointee().is_none());
/// drop(guard);
/// ```
pub trait Pointer: Reflect {
    /// Returns the target, or `None` if it cannot be read right now
    /// (a `RefCell` that is mutably borrowed).
    fn pointee(&self) -> Option<Pointee<'_>>;

    /// Identity of the target, `None` for zero-sized targets.
    fn ref_id(&self) -> Option<RefId>;

    /// Allocates a new pointer owning `pointee`.
    fn wrap(pointee: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>>
    where
        Self: Sized;
}

/// A readable pointer target.
///
/// Either a plain reference or a live `RefCell` borrow that is released on drop.
pub enum Pointee<'a> {
    Plain(&'a dyn Reflect),
    Borrowed(Ref<'a, dyn Reflect>),
}

impl Deref for Pointee<'_> {
    type Target = dyn Reflect;

    #[inline]
    fn deref(&self) -> &Self::Target {
        match self {
            Self::Plain(value) => *value,
            Self::Borrowed(guard) => &**guard,
        }
    }
}

// -----------------------------------------------------------------------------
// Optional

/// Access to values that may be absent, i.e. `Option<T>`.
///
/// Absence is a value, not a reference: optionals have no identity.
///
/// # Examples
///
/// ```
/// use vc_reflect::ops::Optional;
///
/// let some = Some(1_u8);
/// assert!(some.get().is_some());
///
/// let none: Option<u8> = Optional::none();
/// assert!(none.get().is_none());
/// ```
pub trait Optional: Reflect {
    /// Returns the wrapped value if present.
    fn get(&self) -> Option<&dyn Reflect>;

    /// Returns the wrapped value mutably if present.
    fn get_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Creates the empty variant.
    fn none() -> Self
    where
        Self: Sized;

    /// Wraps `inner` in the present variant.
    fn from_some(inner: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>>
    where
        Self: Sized;
}
