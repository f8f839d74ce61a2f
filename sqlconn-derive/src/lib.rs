//! Derive macros for sqlconn
//!
//! This crate provides:
//! - `#[derive(FromRow)]` - Map a result row onto a struct
//! - `#[derive(ToParameters)]` - Turn a struct into named input parameters
//!
//! These macros are re-exported from the `sqlconn` crate, so users typically
//! don't need to depend on this crate directly.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod attrs;
mod from_row;
mod to_parameters;

/// Derive macro for mapping result rows to Rust structs.
///
/// Each field is read from the column with the same name, matched exactly
/// first and then ignoring ASCII case. A missing column or a NULL leaves the
/// field at `Default::default()`; a value that cannot be converted fails
/// with `Error::Mapping` naming the column.
///
/// # Attributes
///
/// - `#[sqlconn(rename_all = "PascalCase")]` on the struct - Derive column
///   names from field names (`PascalCase`, `camelCase`, `snake_case`,
///   `SCREAMING_SNAKE_CASE`, `lowercase`, `UPPERCASE`)
/// - `#[sqlconn(rename = "column_name")]` - Use a different column name for this field
/// - `#[sqlconn(skip)]` - Skip this field when reading from the row
///
/// # Example
///
/// ```ignore
/// use sqlconn::FromRow;
///
/// #[derive(FromRow)]
/// #[sqlconn(rename_all = "PascalCase")]
/// pub struct Customer {
///     pub customer_id: i64,
///     pub first_name: String,
///     #[sqlconn(rename = "Surname")]
///     pub last_name: String,
///     #[sqlconn(skip)]
///     pub display_name: String,
/// }
/// ```
#[proc_macro_derive(FromRow, attributes(sqlconn))]
pub fn derive_from_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    from_row::derive_from_row_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derive macro for turning Rust structs into input parameters.
///
/// Generates an implementation of the `ToParameters` trait with one
/// `Direction::Input` parameter per field, named like the column.
///
/// # Attributes
///
/// - `#[sqlconn(rename_all = "...")]` on the struct - As for `FromRow`
/// - `#[sqlconn(rename = "name")]` - Use a different parameter name for this field
/// - `#[sqlconn(skip_param)]` - Leave this field out (e.g., identity columns)
///
/// # Example
///
/// ```ignore
/// use sqlconn::ToParameters;
///
/// #[derive(ToParameters)]
/// #[sqlconn(rename_all = "PascalCase")]
/// pub struct Customer {
///     #[sqlconn(skip_param)]
///     pub customer_id: i64,
///     pub first_name: String,
///     pub last_name: String,
/// }
/// ```
#[proc_macro_derive(ToParameters, attributes(sqlconn))]
pub fn derive_to_parameters(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    to_parameters::derive_to_parameters_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
