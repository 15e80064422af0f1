use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to the [`TypeInfo`] of a type.
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect) and by the
/// built-in impls. The returned reference is `'static` and unique per type,
/// so it can be cached by its `TypeId`.
///
/// # Examples
///
/// ```
/// use vc_reflect::{derive::Reflect, info::{Typed, ReflectKind}};
///
/// #[derive(Reflect, Default)]
/// struct Point { x: i32, y: i32 }
///
/// let info = Point::type_info();
/// assert_eq!(info.kind(), ReflectKind::Struct);
/// assert_eq!(info.as_struct().unwrap().field_len(), 2);
/// ```
///
/// # Manual implementation
///
/// Non-generic types store the info in a [`NonGenericTypeInfoCell`], generic
/// ones in a [`GenericTypeInfoCell`], which keeps one entry per instantiation.
/// The built-in impls for `Vec<T>` or `Option<T>` are written that way.
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: TypePath {
    /// Returns the compile-time shape of the type.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Object-safe access to [`Typed`].
///
/// Blanket implemented for every `Typed` type, so any `&dyn Reflect` can
/// report its own descriptor.
pub trait DynamicTyped {
    /// See [`Typed::type_info`].
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_reflect::{Reflect, info::DynamicTyped};
    ///
    /// let v: Box<dyn Reflect> = Box::new(vec![1_u8]);
    /// assert!(v.reflect_type_info().type_is::<Vec<u8>>());
    /// ```
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
