//! Compile-time type descriptors.
//!
//! ## Menu
//!
//! - [`TypePath`]: stable type names, without the `::` prefix.
//! - [`DynamicTypePath`]: object-safe `TypePath`.
//! - [`Type`]: a `TypeId` plus its names.
//! - [`TypeInfo`]: the shape of a type, one of:
//!     - [`ScalarInfo`]: leaves (`bool`, numbers, `String`, `Bytes`, `Url`, `DateTime<Utc>`), see [`ScalarKind`].
//!     - [`StructInfo`]: records, with [`NamedField`]s in declaration order.
//!     - [`ListInfo`]: growable sequences.
//!     - [`ArrayInfo`]: fixed-length sequences.
//!     - [`MapInfo`]: associative containers.
//!     - [`OptionalInfo`]: `Option<T>`.
//!     - [`PointerInfo`]: `Box`, `Rc`, `Arc`, `RefCell`, see [`PointerKind`].
//!     - [`DynamicInfo`]: runtime-shaped values.
//! - [`ReflectKind`]: the discriminant of `TypeInfo`.
//! - [`Typed`]: static access to `TypeInfo`.
//! - [`DynamicTyped`]: object-safe `Typed`.

// -----------------------------------------------------------------------------
// Modules

mod list_info;
mod map_info;
mod scalar_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;
mod wrapper_info;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use type_path::impl_type_fn;

// -----------------------------------------------------------------------------
// Exports

pub use list_info::{ArrayInfo, ListInfo};
pub use map_info::MapInfo;
pub use scalar_info::{ScalarInfo, ScalarKind};
pub use struct_info::{NamedField, StructInfo};
pub use type_info::{ReflectKind, ReflectKindError, TypeInfo};
pub use type_path::{DynamicTypePath, Type, TypePath};
pub use typed::{DynamicTyped, Typed};
pub use wrapper_info::{DynamicInfo, OptionalInfo, PointerInfo, PointerKind};
