//! QueryModel derive macro implementation.
//!
//! Generates a `QueryModel` impl that reads annotated fields by name, and
//! submits the field descriptors to the global registry through `inventory`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Result};

use crate::attrs::{field_key, parse_field_params};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "QueryModel cannot be derived for generic structs (descriptors are registered per concrete type)",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "QueryModel can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "QueryModel can only be derived for structs",
            ));
        }
    };

    let mut read_arms: Vec<TokenStream> = Vec::new();
    let mut register_stmts: Vec<TokenStream> = Vec::new();

    for field in fields {
        let Some(field_ident) = field.ident.clone() else {
            continue;
        };
        let params = parse_field_params(field)?;
        if params.is_empty() {
            continue;
        }

        let field_name = field_key(&field_ident);
        read_arms.push(quote! {
            #field_name => paramql::ToValue::to_value(&self.#field_ident),
        });

        for param in params {
            let sql = &param.sql;
            let key = &param.key;
            let alias = &param.alias;
            let kind = format_ident!("{}", param.kind.variant());
            register_stmts.push(quote! {
                registry.register::<#name>(
                    paramql::FieldDescriptor::new(#field_name, #sql, #key, #alias)
                        .kind(paramql::ClauseKind::#kind),
                );
            });
        }
    }

    let registry = if register_stmts.is_empty() {
        format_ident!("_registry")
    } else {
        format_ident!("registry")
    };

    Ok(quote! {
        impl paramql::QueryModel for #name {
            fn field_value(&self, field: &str) -> paramql::Value {
                match field {
                    #(#read_arms)*
                    _ => paramql::Value::Absent,
                }
            }
        }

        // Auto-register this model's descriptors via inventory
        paramql::inventory::submit! {
            paramql::ModelRegistration {
                register_fn: |#registry: &mut paramql::DescriptorRegistry| {
                    #(#register_stmts)*
                }
            }
        }
    })
}
