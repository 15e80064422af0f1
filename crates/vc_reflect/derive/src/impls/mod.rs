// -----------------------------------------------------------------------------
// Modules

mod struct_kind;
mod trait_reflect;
mod trait_type_path;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use struct_kind::impl_struct;
pub(crate) use trait_type_path::impl_trait_type_path;

use proc_macro2::TokenStream;
use quote::quote;
use syn::GenericParam;

use crate::derive_data::ReflectMeta;

/// The where clause of a generated impl.
///
/// Every type parameter gets `param_bound`. With `require_default`, the
/// type itself must be `Default` (records are rebuilt from their default).
pub(crate) fn where_clause(
    meta: &ReflectMeta,
    param_bound: &TokenStream,
    require_default: bool,
) -> TokenStream {
    let ident = meta.ident();
    let (_, ty_generics, where_clause) = meta.generics().split_for_impl();

    let mut predicates: Vec<TokenStream> = where_clause
        .map(|clause| clause.predicates.iter().map(|p| quote!(#p)).collect())
        .unwrap_or_default();

    for param in meta.params() {
        if let GenericParam::Type(param) = param {
            let param = &param.ident;
            predicates.push(quote! { #param: #param_bound });
        }
    }

    if require_default && meta.is_generic() {
        predicates.push(quote! { #ident #ty_generics: ::core::default::Default });
    }

    if predicates.is_empty() {
        TokenStream::new()
    } else {
        quote! { where #(#predicates,)* }
    }
}

/// `Reflect + Typed`, the bound on type parameters of reflected records.
pub(crate) fn reflect_bound(meta: &ReflectMeta) -> TokenStream {
    let vc_reflect_path = meta.vc_reflect_path();
    let reflect_ = crate::path::reflect_(vc_reflect_path);
    let typed_ = crate::path::typed_(vc_reflect_path);
    quote! { #reflect_ + #typed_ }
}
