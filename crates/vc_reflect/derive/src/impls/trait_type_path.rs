use proc_macro2::TokenStream;
use quote::quote;
use syn::GenericParam;

use crate::derive_data::ReflectMeta;

fn static_path_cell(vc_reflect_path: &syn::Path, generator: TokenStream) -> TokenStream {
    let path_cell_ = crate::path::generic_type_path_cell_(vc_reflect_path);

    quote! {
        static CELL: #path_cell_ = #path_cell_::new();
        CELL.get_or_insert::<Self>(|| {
            #generator
        })
    }
}

/// Generate implementation codes for `TypePath`
pub(crate) fn impl_trait_type_path(meta: &ReflectMeta) -> TokenStream {
    let vc_reflect_path = meta.vc_reflect_path();
    let type_path_ = crate::path::type_path_(vc_reflect_path);

    let base_path = meta.base_path();
    let base_name = meta.base_name();
    let module_path = meta.module_path();

    let (type_path, type_name, inline_flag) = if meta.is_generic() {
        let generic_name_ = crate::path::generic_name_(vc_reflect_path);
        let macro_exports_ = crate::path::macro_exports_(vc_reflect_path);

        let (paths, names): (Vec<_>, Vec<_>) = meta
            .params()
            .map(|param| match param {
                GenericParam::Type(param) => {
                    let ident = &param.ident;
                    (
                        quote! { <#ident as #type_path_>::type_path() },
                        quote! { <#ident as #type_path_>::type_name() },
                    )
                }
                GenericParam::Const(param) => {
                    let ident = &param.ident;
                    let text = quote! {
                        #macro_exports_::ToString::to_string(&#ident).as_str()
                    };
                    (text.clone(), text)
                }
                GenericParam::Lifetime(_) => unreachable!("lifetimes are rejected earlier"),
            })
            .unzip();

        (
            static_path_cell(
                vc_reflect_path,
                quote! { #generic_name_(#base_path, &[#(#paths),*]) },
            ),
            static_path_cell(
                vc_reflect_path,
                quote! { #generic_name_(#base_name, &[#(#names),*]) },
            ),
            TokenStream::new(),
        )
    } else {
        (
            quote! { #base_path },
            quote! { #base_name },
            quote! { #[inline] },
        )
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, _) = meta.generics().split_for_impl();
    let where_clause = super::where_clause(meta, &type_path_, false);

    quote! {
        impl #impl_generics #type_path_ for #ident #ty_generics #where_clause {
            #inline_flag
            fn type_path() -> &'static str {
                #type_path
            }

            #inline_flag
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn module_path() -> ::core::option::Option<&'static str> {
                #module_path
            }
        }
    }
}
