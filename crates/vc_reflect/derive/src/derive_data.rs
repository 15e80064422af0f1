use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, GenericParam, Generics, Ident, LitStr, Type};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// Container level `#[reflect(..)]` options.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `#[reflect(type_path = "a::b::Name")]`
    pub type_path: Option<LitStr>,
}

impl TypeAttributes {
    fn parse(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type_path") {
                    let lit: LitStr = meta.value()?.parse()?;
                    let value = lit.value();
                    if value.is_empty() || value.starts_with("::") {
                        return Err(meta.error("`type_path` must be a non-empty path without a leading `::`"));
                    }
                    result.type_path = Some(lit);
                    Ok(())
                } else {
                    Err(meta.error("unknown container attribute, expected `type_path`"))
                }
            })?;
        }
        Ok(result)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field level `#[reflect(..)]` options.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// `#[reflect(skip)]`: the field is neither emitted nor reconstructed.
    pub skip: bool,
    /// `#[reflect(rename = "name")]`
    pub rename: Option<LitStr>,
}

impl FieldAttributes {
    fn parse(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    result.skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    result.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unknown field attribute, expected `skip` or `rename`"))
                }
            })?;
        }
        Ok(result)
    }
}

// -----------------------------------------------------------------------------
// ReflectMeta

/// Everything the generators need to know about the deriving type.
pub(crate) struct ReflectMeta<'a> {
    vc_reflect_path: syn::Path,
    ident: &'a Ident,
    generics: &'a Generics,
    attrs: TypeAttributes,
}

impl<'a> ReflectMeta<'a> {
    pub fn new(input: &'a DeriveInput) -> syn::Result<Self> {
        for param in &input.generics.params {
            if let GenericParam::Lifetime(lifetime) = param {
                return Err(syn::Error::new(
                    lifetime.span(),
                    "reflected types must be 'static, lifetime parameters are not supported",
                ));
            }
        }

        Ok(Self {
            vc_reflect_path: crate::path::vc_reflect(),
            ident: &input.ident,
            generics: &input.generics,
            attrs: TypeAttributes::parse(&input.attrs)?,
        })
    }

    #[inline]
    pub fn vc_reflect_path(&self) -> &syn::Path {
        &self.vc_reflect_path
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn generics(&self) -> &Generics {
        self.generics
    }

    /// `true` if the type has type or const parameters.
    #[inline]
    pub fn is_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    /// Path without generics, as a `&'static str` expression.
    pub fn base_path(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(lit) => quote! { #lit },
            None => {
                let name = self.ident.to_string();
                quote! { ::core::concat!(::core::module_path!(), "::", #name) }
            }
        }
    }

    /// Name without module and generics, as a string literal.
    pub fn base_name(&self) -> LitStr {
        match &self.attrs.type_path {
            Some(lit) => {
                let value = lit.value();
                let name = value.rsplit("::").next().unwrap_or(&value);
                LitStr::new(name, lit.span())
            }
            None => LitStr::new(&self.ident.to_string(), self.ident.span()),
        }
    }

    /// Module part of the path, as an `Option<&'static str>` expression.
    pub fn module_path(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(lit) => match lit.value().rsplit_once("::") {
                Some((module, _)) => {
                    let module = LitStr::new(module, lit.span());
                    quote! { ::core::option::Option::Some(#module) }
                }
                None => quote! { ::core::option::Option::None },
            },
            None => quote! { ::core::option::Option::Some(::core::module_path!()) },
        }
    }

    /// Type and const parameter idents, in declaration order.
    pub fn params(&self) -> impl Iterator<Item = &GenericParam> {
        self.generics
            .params
            .iter()
            .filter(|param| !matches!(param, GenericParam::Lifetime(_)))
    }
}

// -----------------------------------------------------------------------------
// ReflectStruct

/// A visible field of a record.
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub name: LitStr,
}

/// A struct with named fields.
pub(crate) struct ReflectStruct<'a> {
    meta: ReflectMeta<'a>,
    fields: Vec<StructField<'a>>,
}

impl<'a> ReflectStruct<'a> {
    pub fn new(input: &'a DeriveInput) -> syn::Result<Self> {
        let meta = ReflectMeta::new(input)?;

        let data = match &input.data {
            Data::Struct(data) => data,
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span(),
                    "`Reflect` cannot be derived for enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span(),
                    "`Reflect` cannot be derived for unions",
                ));
            }
        };

        let mut fields = Vec::new();
        match &data.fields {
            Fields::Named(named) => {
                for field in &named.named {
                    let attrs = FieldAttributes::parse(&field.attrs)?;
                    if attrs.skip {
                        continue;
                    }
                    let Some(ident) = field.ident.as_ref() else {
                        continue;
                    };
                    let name = attrs.rename.unwrap_or_else(|| {
                        let unraw = ident.to_string();
                        let unraw = unraw.strip_prefix("r#").unwrap_or(&unraw);
                        LitStr::new(unraw, ident.span())
                    });
                    if fields.iter().any(|f: &StructField| f.name.value() == name.value()) {
                        return Err(syn::Error::new(name.span(), "duplicate field name"));
                    }
                    fields.push(StructField {
                        ident,
                        ty: &field.ty,
                        name,
                    });
                }
            }
            Fields::Unit => {}
            Fields::Unnamed(unnamed) => {
                return Err(syn::Error::new(
                    unnamed.span(),
                    "`Reflect` can only be derived for structs with named fields",
                ));
            }
        }

        Ok(Self { meta, fields })
    }

    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }
}
