//! Kind-specific access to reflected values.
//!
//! ## Menu
//!
//! The following are subtraits of [`Reflect`], one per [`ReflectKind`]:
//!
//! - [`Struct`]: records (e.g. `Foo { .. }`).
//! - [`List`]: growable sequences (e.g. `Vec<i32>`).
//! - [`Array`]: fixed-length sequences (e.g. `[i32; 5]`).
//! - [`Map`]: associative containers (e.g. `BTreeMap<String, f32>`).
//! - [`Optional`]: `Option<T>`.
//! - [`Pointer`]: `Box<T>`, `Rc<T>`, `Arc<T>`, `RefCell<T>`.
//!
//! [`ReflectRef`] and [`ReflectMut`] hand out the matching trait object.
//! [`RefId`] names the instance behind a pointer or a container buffer, so
//! two paths reaching the same instance can be told apart from two equal
//! values.
//!
//! [`Reflect`]: crate::Reflect
//! [`ReflectKind`]: crate::info::ReflectKind

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod list_ops;
mod map_ops;
mod pointer_ops;
mod ref_id;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ReflectMut, ReflectRef};
pub use list_ops::{Array, ArrayItemIter, List, ListItemIter};
pub use map_ops::Map;
pub use pointer_ops::{Optional, Pointee, Pointer};
pub use ref_id::RefId;
pub use struct_ops::{Struct, StructFieldIter};
