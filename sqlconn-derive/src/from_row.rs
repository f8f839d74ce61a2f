//! FromRow derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result};

use crate::attrs::struct_fields;

pub fn derive_from_row_impl(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let field_configs = struct_fields(&input)?;

    // Missing columns and NULLs leave the field at its default
    let field_extractions: Vec<TokenStream> = field_configs
        .iter()
        .map(|config| {
            let field_ident = &config.ident;
            let column_name = &config.column_name;
            let ty = &config.ty;

            if config.skip {
                quote! {
                    #field_ident: <#ty as ::std::default::Default>::default()
                }
            } else {
                quote! {
                    #field_ident: ::sqlconn::RowExt::mapped_or_default::<#ty>(row, #column_name)?
                }
            }
        })
        .collect();

    let column_names: Vec<&str> = field_configs
        .iter()
        .filter(|c| !c.skip)
        .map(|c| c.column_name.as_str())
        .collect();

    let expanded = quote! {
        impl #impl_generics ::sqlconn::FromRow for #name #ty_generics #where_clause {
            fn from_row<R: ::sqlconn::Row + ?Sized>(row: &R) -> ::sqlconn::Result<Self> {
                Ok(Self {
                    #(#field_extractions),*
                })
            }

            fn column_names() -> &'static [&'static str] {
                &[#(#column_names),*]
            }
        }
    };

    Ok(expanded)
}
