//! Locate the transform field of a derived component

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, Index};

/// The single field a derived component stores its transform in
pub enum TransformField {
    /// Tuple struct, always position 0
    Unnamed(Index),
    /// Struct with one named field
    Named(Ident),
}

impl TransformField {
    /// Find the field, rejecting enums, unions and multi-field structs
    pub fn from_input(input: &DeriveInput) -> syn::Result<Self> {
        let Data::Struct(data) = &input.data else {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "AbsoluteTransform can only be derived for structs",
            ));
        };

        match &data.fields {
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                Ok(TransformField::Unnamed(Index::from(0)))
            }
            Fields::Named(fields) if fields.named.len() == 1 => {
                let field = fields.named.first().and_then(|f| f.ident.clone());
                field.map(TransformField::Named).ok_or_else(|| {
                    syn::Error::new_spanned(&input.ident, "expected a named transform field")
                })
            }
            _ => Err(syn::Error::new_spanned(
                &input.ident,
                "AbsoluteTransform requires exactly one field holding a TransformQvvs",
            )),
        }
    }

    /// Member access expression (`0` or `field_name`)
    pub fn access(&self) -> TokenStream {
        match self {
            TransformField::Unnamed(index) => quote! { #index },
            TransformField::Named(ident) => quote! { #ident },
        }
    }

    /// Constructor expression wrapping `value`
    pub fn construct(&self, value: TokenStream) -> TokenStream {
        match self {
            TransformField::Unnamed(_) => quote! { Self(#value) },
            TransformField::Named(ident) => quote! { Self { #ident: #value } },
        }
    }
}
