//! ToParameters derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result};

use crate::attrs::struct_fields;

pub fn derive_to_parameters_impl(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let field_configs = struct_fields(&input)?;

    let bound: Vec<_> = field_configs.iter().filter(|c| !c.skip_param).collect();

    let parameter_names: Vec<&str> = bound.iter().map(|c| c.column_name.as_str()).collect();

    let parameters: Vec<TokenStream> = bound
        .iter()
        .map(|config| {
            let field_ident = &config.ident;
            let parameter_name = &config.column_name;
            quote! {
                ::sqlconn::Parameter::input(
                    #parameter_name,
                    ::sqlconn::ToValue::to_value(&self.#field_ident),
                )
            }
        })
        .collect();

    let expanded = quote! {
        impl #impl_generics ::sqlconn::ToParameters for #name #ty_generics #where_clause {
            fn parameter_names() -> &'static [&'static str] {
                &[#(#parameter_names),*]
            }

            fn to_parameters(&self) -> ::std::vec::Vec<::sqlconn::Parameter> {
                vec![#(#parameters),*]
            }
        }
    };

    Ok(expanded)
}
