use alloc::boxed::Box;
use core::any::{Any, TypeId};

use vc_utils::hash::HashMap;

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};

// -----------------------------------------------------------------------------
// NamedField

/// Information for a reflected record field.
///
/// `name` is the key the field is known by on the value side; it is the
/// Rust ident unless renamed with `#[reflect(rename = "...")]`.
///
/// # Examples
///
/// ```
/// use vc_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect, Default)]
/// struct Foo {
///     #[reflect(rename = "fieldA")]
///     field_a: f32,
/// }
///
/// let info = Foo::type_info().as_struct().unwrap();
/// let field = info.field_at(0).unwrap();
///
/// assert!(field.type_is::<f32>());
/// assert_eq!(field.name(), "fieldA");
/// ```
#[derive(Clone, Debug)]
pub struct NamedField {
    ty_id: TypeId,
    name: &'static str,
    // Resolved on first access, which lets a record contain itself.
    type_info: fn() -> &'static TypeInfo,
}

impl NamedField {
    /// Creates a new [`NamedField`] for the given field `name` and type `T`.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            type_info: T::type_info,
            ty_id: TypeId::of::<T>(),
        }
    }

    /// Returns the `TypeId` of the field type.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the given type matches the field type.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the field's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Returns the lazy accessor of the field's [`TypeInfo`].
    #[inline]
    pub const fn type_info_fn(&self) -> fn() -> &'static TypeInfo {
        self.type_info
    }
}

// -----------------------------------------------------------------------------
// StructInfo

/// Type info for records with named fields.
///
/// Fields keep declaration order. Records are constructed from their
/// [`Default`] value, see [`StructInfo::default_value`].
///
/// # Examples
///
/// ```rust
/// use vc_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect, Default)]
/// struct A {
///     val: f32,
///     #[reflect(skip)]
///     cache: u64,
/// }
///
/// let info = <A as Typed>::type_info().as_struct().unwrap();
///
/// assert_eq!(info.field_len(), 1);
/// assert_eq!(info.index_of("val"), Some(0));
/// assert_eq!(info.index_of("cache"), None);
/// ```
#[derive(Clone, Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    indices: HashMap<&'static str, usize>,
    default: fn() -> Box<dyn Reflect>,
}

impl StructInfo {
    impl_type_fn!(ty);

    /// Create a new [`StructInfo`].
    ///
    /// The field order is the input order, which must match the indices used
    /// by the type's [`Struct`](crate::ops::Struct) impl.
    pub fn new<T: Reflect + TypePath + Default>(fields: &[NamedField]) -> Self {
        let indices = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.name(), index))
            .collect();

        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            indices,
            default: default_boxed::<T>,
        }
    }

    /// Returns the [`NamedField`] for the given `name`, if present.
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.get(*self.indices.get(name)?)
    }

    /// Returns the [`NamedField`] at the given index, if present.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    /// Returns an iterator over the fields in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &NamedField> {
        self.fields.iter()
    }

    /// Returns the index for the given field `name`, if present.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Creates a boxed `Default::default()` of the record.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_reflect::{derive::Reflect, info::Typed};
    ///
    /// #[derive(Reflect, Default)]
    /// struct Empty {}
    ///
    /// let info = Empty::type_info().as_struct().unwrap();
    /// assert!(info.default_value().is::<Empty>());
    /// ```
    #[inline]
    pub fn default_value(&self) -> Box<dyn Reflect> {
        (self.default)()
    }
}

fn default_boxed<T: Reflect + Default>() -> Box<dyn Reflect> {
    Box::new(T::default())
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::Reflect;
    use crate::derive::{Reflect, TypePath};
    use crate::info::{ReflectKind, TypePath, Typed};
    use crate::ops::Struct;

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Tree {
        label: String,
        #[reflect(rename = "kids")]
        children: Vec<Tree>,
        #[reflect(skip)]
        visits: u32,
    }

    #[derive(Reflect, Default)]
    #[reflect(type_path = "test::Pair")]
    struct Pair<A, B> {
        first: A,
        second: B,
    }

    #[derive(TypePath)]
    struct Marker;

    #[test]
    fn derived_struct_info() {
        let info = Tree::type_info().as_struct().unwrap();
        let names: Vec<&str> = info.iter().map(|field| field.name()).collect();
        assert_eq!(names, ["label", "kids"]);
        assert!(info.field("kids").unwrap().type_is::<Vec<Tree>>());

        // Recursive field infos resolve lazily to the same descriptor.
        let item = info.field("kids").unwrap().type_info().as_list().unwrap();
        assert!(core::ptr::eq(item.item_info(), Tree::type_info()));
    }

    #[test]
    fn derived_struct_access() {
        let mut tree = Tree {
            label: String::from("root"),
            children: Vec::new(),
            visits: 3,
        };

        assert_eq!(tree.reflect_kind(), ReflectKind::Struct);
        assert_eq!(tree.field_len(), 2);
        assert!(tree.field("visits").is_none());
        assert!(tree.field("children").is_none());

        tree.field_mut("label")
            .unwrap()
            .set(Box::new(String::from("top")))
            .unwrap();
        assert_eq!(tree.label, "top");

        let fields: Vec<&str> = tree.iter_fields().map(|(name, _)| name).collect();
        assert_eq!(fields, ["label", "kids"]);

        let fresh = Tree::type_info().as_struct().unwrap().default_value();
        assert_eq!(fresh.downcast_ref::<Tree>(), Some(&Tree::default()));
    }

    #[test]
    fn derived_type_paths() {
        assert!(Tree::type_path().ends_with("::Tree"));
        assert_eq!(Tree::type_name(), "Tree");

        assert_eq!(<Pair<u8, String>>::type_path(), "test::Pair<u8, alloc::string::String>");
        assert_eq!(<Pair<u8, bool>>::type_name(), "Pair<u8, bool>");
        assert_eq!(<Pair<u8, bool>>::module_path(), Some("test"));

        assert_eq!(Marker::type_name(), "Marker");
        assert_eq!(Marker::module_path(), Some(module_path!()));
    }

    #[test]
    fn generic_infos_are_per_instantiation() {
        let a = <Pair<u8, u16>>::type_info().as_struct().unwrap();
        let b = <Pair<i8, i16>>::type_info().as_struct().unwrap();
        assert!(a.field("first").unwrap().type_is::<u8>());
        assert!(b.field("first").unwrap().type_is::<i8>());
    }
}
