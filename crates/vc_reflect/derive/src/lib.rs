//! See following macros:
//!
//! - [`Reflect`]
//! - [`TypePath`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Full Reflection Derivation
///
/// `#[derive(Reflect)]` implements the following traits for a struct with
/// named fields (or a unit struct):
///
/// - `TypePath`
/// - `Typed`, with a `StructInfo`
/// - `Reflect`
/// - `Struct`
///
/// Records are rebuilt from their default value, so the type must also
/// implement [`Default`]. Enums, unions and tuple structs are rejected.
///
/// Type parameters are bounded by `Reflect + Typed`; lifetime parameters are
/// rejected because reflected types are `'static`.
///
/// ## Field attributes
///
/// - `#[reflect(skip)]`: the field is not reflected. It keeps its default
///   value when the record is rebuilt.
/// - `#[reflect(rename = "name")]`: the field is reflected under `name`.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// struct Account {
///     #[reflect(rename = "id")]
///     account_id: u64,
///     #[reflect(skip)]
///     session: Option<Token>,
/// }
/// ```
///
/// ## Custom Type Path
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(type_path = "you::me::Foo")]
/// struct Foo { /* ... */ }
/// ```
///
/// The path does not include generics, they are appended automatically.
/// Without the attribute the path is `module_path!()` joined with the ident.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_full_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ReflectStruct::new(&ast) {
        Ok(info) => impls::impl_struct(&info).into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Implements `TypePath` only.
///
/// Accepts any struct, enum or union without lifetime parameters, and the
/// container attribute `#[reflect(type_path = "...")]`.
///
/// ```rust, ignore
/// #[derive(TypePath)]
/// #[reflect(type_path = "shop::Order")]
/// struct Order;
/// ```
#[proc_macro_derive(TypePath, attributes(reflect))]
pub fn derive_type_path(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ReflectMeta::new(&ast) {
        Ok(meta) => impls::impl_trait_type_path(&meta).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
