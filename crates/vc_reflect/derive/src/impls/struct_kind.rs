use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

use super::impl_trait_type_path;
use super::trait_reflect::impl_trait_reflect;
use super::trait_typed::impl_trait_typed;

use crate::derive_data::ReflectStruct;

/// Implement full reflect for struct type.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();

    let type_path_trait_tokens = impl_trait_type_path(meta);
    let typed_trait_tokens = impl_trait_typed(meta, struct_info_tokens(info));
    let reflect_trait_tokens = impl_trait_reflect(meta, Ident::new("Struct", Span::call_site()));
    let struct_trait_tokens = impl_trait_struct(info);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #reflect_trait_tokens

        #struct_trait_tokens
    }
}

/// `TypeInfo::Struct(StructInfo::new::<Self>(&[NamedField::new::<Ty>("name"), ..]))`
fn struct_info_tokens(info: &ReflectStruct) -> TokenStream {
    let vc_reflect_path = info.meta().vc_reflect_path();
    let type_info_ = crate::path::type_info_(vc_reflect_path);
    let struct_info_ = crate::path::struct_info_(vc_reflect_path);
    let named_field_ = crate::path::named_field_(vc_reflect_path);

    let fields = info.fields().iter().map(|field| {
        let ty = field.ty;
        let name = &field.name;
        quote! { #named_field_::new::<#ty>(#name) }
    });

    quote! {
        #type_info_::Struct(#struct_info_::new::<Self>(&[
            #(#fields),*
        ]))
    }
}

/// Generate `Struct` trait implementation tokens.
fn impl_trait_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let vc_reflect_path = meta.vc_reflect_path();
    let struct_ = crate::path::struct_(vc_reflect_path);
    let reflect_ = crate::path::reflect_(vc_reflect_path);
    let struct_field_iter_ = crate::path::struct_field_iter_(vc_reflect_path);

    let idents: Vec<&Ident> = info.fields().iter().map(|field| field.ident).collect();
    let names: Vec<_> = info.fields().iter().map(|field| &field.name).collect();
    let indices: Vec<usize> = (0..idents.len()).collect();
    let field_len = idents.len();

    let ident = meta.ident();
    let (impl_generics, ty_generics, _) = meta.generics().split_for_impl();
    let where_clause = super::where_clause(meta, &super::reflect_bound(meta), true);

    quote! {
        impl #impl_generics #struct_ for #ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> ::core::option::Option<&dyn #reflect_> {
                match name {
                    #(#names => ::core::option::Option::Some(#reflect_::as_reflect(&self.#idents)),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> ::core::option::Option<&mut dyn #reflect_> {
                match name {
                    #(#names => ::core::option::Option::Some(#reflect_::as_reflect_mut(&mut self.#idents)),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(#reflect_::as_reflect(&self.#idents)),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(#reflect_::as_reflect_mut(&mut self.#idents)),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn name_at(&self, index: usize) -> ::core::option::Option<&str> {
                match index {
                    #(#indices => ::core::option::Option::Some(#names),)*
                    _ => ::core::option::Option::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_len
            }

            #[inline]
            fn iter_fields(&self) -> #struct_field_iter_<'_> {
                #struct_field_iter_::new(self)
            }
        }
    }
}
