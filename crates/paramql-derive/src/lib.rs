//! Derive macros for paramql
//!
//! Provides `#[derive(QueryModel)]` and `#[derive(ToValue)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod query_model;
mod to_value;

/// Derive `QueryModel` for a filter struct and register its descriptors.
///
/// # Example
///
/// ```ignore
/// use paramql::QueryModel;
///
/// #[derive(QueryModel)]
/// struct UserSearch {
///     #[param(sql = "u.name ILIKE :name", key = "name", alias = "u")]
///     name: Option<String>,
///     #[param(sql = "u.created_at BETWEEN :from AND :to", key = "from:to", alias = "u")]
///     created: Option<Period>,
///     #[param(sql = "u.created_at DESC", alias = "u", kind = "order_by")]
///     newest_first: bool,
/// }
/// ```
///
/// # Attributes
///
/// - `#[param(sql = "...", alias = "...")]` - Fragment and clause group (required)
/// - `#[param(key = "...")]` - Parameter name, or `a:b` sub-keys for composite values
/// - `#[param(kind = "...")]` - `condition` (default), `select`, `order_by`, `group_by`
///
/// A field may carry several `#[param(...)]` attributes; each one becomes a
/// descriptor, in declaration order.
#[proc_macro_derive(QueryModel, attributes(param))]
pub fn derive_query_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    query_model::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derive `ToValue` for a struct.
///
/// Named-field structs become composite values keyed by field name; newtype
/// structs convert as their inner value.
///
/// # Attributes
///
/// - `#[param(rename = "name")]` - Use a different key for the field
/// - `#[param(skip)]` - Leave the field out
#[proc_macro_derive(ToValue, attributes(param))]
pub fn derive_to_value(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    to_value::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
