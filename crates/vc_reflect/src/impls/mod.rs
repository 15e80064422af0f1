//! Built-in reflection impls and the utilities used to write them.
//!
//! - [`concat`]: An efficient string concatenation function.
//! - [`NonGenericTypeInfoCell`]: Used to implement [`Typed`] for non-generic types.
//! - [`GenericTypePathCell`]: Used to implement [`TypePath`] for generic types.
//! - [`GenericTypeInfoCell`]: Used to implement [`Typed`] for generic types.
//!
//! ## Implemented Menu
//!
//! - scalar:
//!     - `bool`, `i8`-`i64`, `isize`, `u8`-`u64`, `usize`, `f32`, `f64`
//!     - `String`, `bytes::Bytes`, `url::Url`, `chrono::DateTime<chrono::Utc>`
//! - list: `Vec<T>`, `VecDeque<T>`
//! - array: `[T; N]`
//! - map: `BTreeMap<K, V>`, `HashMap<K, V, S>`
//! - optional: `Option<T>`
//! - pointer: `Box<T>`, `Rc<T>`, `Arc<T>`, `RefCell<T>`
//!
//! [`TypePath`]: crate::info::TypePath
//! [`Typed`]: crate::info::Typed

use alloc::string::String;
use alloc::vec::Vec;

// -----------------------------------------------------------------------------
// Internal macros

/// Implements `TypePath` for `$name<P0, P1, ..>` defined in `$module`.
macro_rules! impl_generic_type_path {
    ($module:literal, $name:ident < $($param:ident),+ >) => {
        impl<$($param: $crate::info::TypePath),+> $crate::info::TypePath for $name<$($param),+> {
            fn type_path() -> &'static str {
                static CELL: $crate::impls::GenericTypePathCell =
                    $crate::impls::GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    $crate::impls::generic_name(
                        concat!($module, "::", stringify!($name)),
                        &[$($param::type_path()),+],
                    )
                })
            }

            fn type_name() -> &'static str {
                static CELL: $crate::impls::GenericTypePathCell =
                    $crate::impls::GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    $crate::impls::generic_name(
                        stringify!($name),
                        &[$($param::type_name()),+],
                    )
                })
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                Some($module)
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Modules

mod cell;

mod array;
mod list;
mod map;
mod optional;
mod pointer;
mod scalar;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};

/// An efficient string concatenation function.
///
/// This is usually used for the implementation of `TypePath`.
///
/// # Example
///
/// ```
/// use vc_reflect::impls;
///
/// let s = impls::concat(&["module", "::", "name", "<", "T" , ">"]);
///
/// assert_eq!(s.capacity(), 15);
/// ```
///
/// Inline is prohibited here to reduce compilation time.
#[inline(never)]
pub fn concat(arr: &[&str]) -> String {
    let len = arr.iter().map(|item| item.len()).sum();
    let mut res = String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}

/// Builds `base<P0, P1, ..>`.
///
/// # Example
///
/// ```
/// use vc_reflect::impls;
///
/// assert_eq!(impls::generic_name("Map", &["K", "V"]), "Map<K, V>");
/// ```
pub fn generic_name(base: &str, params: &[&str]) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(params.len() * 2 + 2);
    parts.push(base);
    parts.push("<");
    for (index, param) in params.iter().enumerate() {
        if index > 0 {
            parts.push(", ");
        }
        parts.push(param);
    }
    parts.push(">");
    concat(&parts)
}
