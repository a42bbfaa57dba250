//! ToValue derive macro implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result, parse_quote};

use crate::attrs::{field_key, parse_value_field};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;

    let mut generics = input.generics.clone();
    let type_params: Vec<syn::Ident> = generics.type_params().map(|p| p.ident.clone()).collect();
    if !type_params.is_empty() {
        let where_clause = generics.make_where_clause();
        for ident in &type_params {
            where_clause
                .predicates
                .push(parse_quote!(#ident: paramql::ToValue));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input,
            "ToValue can only be derived for structs",
        ));
    };

    let body = match &data.fields {
        Fields::Named(fields) => {
            let mut entries: Vec<TokenStream> = Vec::new();
            for field in &fields.named {
                let Some(ident) = field.ident.as_ref() else {
                    continue;
                };
                let attr = parse_value_field(field)?;
                if attr.skip {
                    continue;
                }
                let key = attr.rename.unwrap_or_else(|| field_key(ident));
                entries.push(quote! {
                    (#key, paramql::ToValue::to_value(&self.#ident))
                });
            }
            if entries.is_empty() {
                quote! { paramql::Value::Composite(::std::collections::BTreeMap::new()) }
            } else {
                quote! { paramql::Value::composite([#(#entries),*]) }
            }
        }
        Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
            quote! { paramql::ToValue::to_value(&self.0) }
        }
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "ToValue can only be derived for structs with named fields or a single unnamed field",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics paramql::ToValue for #name #ty_generics #where_clause {
            fn to_value(&self) -> paramql::Value {
                #body
            }
        }
    })
}
