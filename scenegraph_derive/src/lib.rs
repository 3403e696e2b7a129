use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

mod transform_field;

use transform_field::TransformField;

/// Derive macro for the AbsoluteTransform trait
///
/// The struct must have exactly one field holding a `TransformQvvs`, either as a
/// newtype (`struct WorldTransform(pub TransformQvvs);`) or as a single named field.
#[proc_macro_derive(AbsoluteTransform, attributes(absolute_transform))]
pub fn derive_absolute_transform(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    // Extract component name from attribute or use struct name
    let mut component_name = name.to_string();
    for attr in &input.attrs {
        if attr.path().is_ident("absolute_transform") {
            let result = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value = meta.value()?;
                    let s: syn::LitStr = value.parse()?;
                    component_name = s.value();
                    Ok(())
                } else {
                    Err(meta.error("unsupported absolute_transform attribute"))
                }
            });
            if let Err(err) = result {
                return err.to_compile_error().into();
            }
        }
    }

    let field = match TransformField::from_input(&input) {
        Ok(field) => field,
        Err(err) => return err.to_compile_error().into(),
    };
    let access = field.access();
    let construct = field.construct(quote! { transform });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::scenegraph::core::entity::AbsoluteTransform for #name #ty_generics #where_clause {
            const NAME: &'static str = #component_name;

            fn transform(&self) -> ::scenegraph::core::math::TransformQvvs {
                self.#access
            }

            fn set_transform(&mut self, transform: ::scenegraph::core::math::TransformQvvs) {
                self.#access = transform;
            }

            fn from_transform(transform: ::scenegraph::core::math::TransformQvvs) -> Self {
                #construct
            }
        }
    };

    TokenStream::from(expanded)
}
