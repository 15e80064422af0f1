use crate::Reflect;
use crate::info::{StructInfo, TypeInfo};

// -----------------------------------------------------------------------------
// Struct

/// Field access for records.
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect) on structs
/// with named fields. Indices follow the declaration order of the visible
/// (not `#[reflect(skip)]`) fields and agree with
/// [`StructInfo::field_at`](crate::info::StructInfo::field_at).
///
/// # Examples
///
/// ```
/// use vc_reflect::{derive::Reflect, ops::Struct};
///
/// #[derive(Reflect, Default)]
/// struct Foo {
///     a: i32,
///     b: bool,
/// }
///
/// let foo = Foo { a: 10, b: true };
/// let foo_ref: &dyn Struct = &foo;
///
/// assert_eq!(foo_ref.field_len(), 2);
/// assert_eq!(foo_ref.name_at(1), Some("b"));
/// assert_eq!(foo_ref.field("a").unwrap().downcast_ref::<i32>(), Some(&10));
/// ```
pub trait Struct: Reflect {
    /// Returns the field named `name`.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns the field named `name` mutably.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vc_reflect::{derive::Reflect, ops::Struct};
    /// #[derive(Reflect, Default)]
    /// struct Foo { a: i32 }
    ///
    /// let mut foo = Foo { a: 1 };
    /// if let Some(field) = foo.field_mut("a") {
    ///     *field.downcast_mut::<i32>().unwrap() = 42;
    /// }
    /// assert_eq!(foo.a, 42);
    /// ```
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Returns the field at `index`.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the field at `index` mutably.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the name of the field at `index`.
    fn name_at(&self, index: usize) -> Option<&str>;

    /// Returns the number of visible fields.
    fn field_len(&self) -> usize;

    /// Returns an iterator over `(name, value)` pairs in declaration order.
    fn iter_fields(&self) -> StructFieldIter<'_>;

    /// Returns the [`StructInfo`] of the record.
    ///
    /// The default implementation reads it from [`DynamicTyped`].
    ///
    /// [`DynamicTyped`]: crate::info::DynamicTyped
    fn struct_info(&self) -> Option<&'static StructInfo> {
        match self.reflect_type_info() {
            TypeInfo::Struct(info) => Some(info),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// StructFieldIter

/// An iterator over the fields of a [`Struct`], in declaration order.
pub struct StructFieldIter<'a> {
    value: &'a dyn Struct,
    index: usize,
}

impl<'a> StructFieldIter<'a> {
    /// Creates a new iterator for the given record.
    #[inline(always)]
    pub const fn new(value: &'a dyn Struct) -> Self {
        Self { value, index: 0 }
    }
}

impl<'a> Iterator for StructFieldIter<'a> {
    type Item = (&'a str, &'a dyn Reflect);

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.value.name_at(self.index)?;
        let field = self.value.field_at(self.index)?;
        self.index += 1;
        Some((name, field))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.value.field_len() - self.index;
        (size, Some(size))
    }
}

impl ExactSizeIterator for StructFieldIter<'_> {}
