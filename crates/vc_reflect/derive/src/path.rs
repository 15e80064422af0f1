//! Paths into `vc_reflect` used by the generated code.
//!
//! Kept in one place so that moving an item in `vc_reflect` touches only
//! this module.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the correct access path to the `vc_reflect` crate.
///
/// 1. Crates that depend on `vc_reflect` get `::vc_reflect`.
/// 2. Crates that depend on `vc_reconstruct` get `::vc_reconstruct::reflect`.
/// 3. Otherwise `::vc_reflect`, which may be wrong.
///
/// Reading the manifest is costly, so the path is computed once per derive
/// and passed around.
pub(crate) fn vc_reflect() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_reflect"))
}

#[inline(always)]
pub(crate) fn macro_exports_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! { #vc_reflect_path::__macro_exports }
}

#[inline(always)]
pub(crate) fn reflect_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! { #vc_reflect_path::Reflect }
}

#[inline(always)]
pub(crate) fn type_path_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! { #vc_reflect_path::info::TypePath }
}

#[inline(always)]
pub(crate) fn typed_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! { #vc_reflect_path::info::Typed }
}

#[inline(always)]
pub(crate) fn type_info_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! { #vc_reflect_path::info::TypeInfo }
}

#[inline(always)]
pub(crate) fn struct_info_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! { #vc_reflect_path::info::StructInfo }
}

#[inline(always)]
pub(crate) fn named_field_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! { #vc_reflect_path::info::NamedField }
}

#[inline(always)]
pub(crate) fn reflect_kind_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! { #vc_reflect_path::info::ReflectKind }
}

#[inline(always)]
pub(crate) fn reflect_ref_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! { #vc_reflect_path::ops::ReflectRef }
}

#[inline(always)]
pub(crate) fn reflect_mut_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! { #vc_reflect_path::ops::ReflectMut }
}

#[inline(always)]
pub(crate) fn struct_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! { #vc_reflect_path::ops::Struct }
}

#[inline(always)]
pub(crate) fn struct_field_iter_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! { #vc_reflect_path::ops::StructFieldIter }
}

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! { #vc_reflect_path::impls::NonGenericTypeInfoCell }
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! { #vc_reflect_path::impls::GenericTypeInfoCell }
}

#[inline(always)]
pub(crate) fn generic_type_path_cell_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! { #vc_reflect_path::impls::GenericTypePathCell }
}

#[inline(always)]
pub(crate) fn generic_name_(vc_reflect_path: &syn::Path) -> TokenStream {
    quote! { #vc_reflect_path::impls::generic_name }
}
