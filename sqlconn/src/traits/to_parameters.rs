//! ToParameters trait for turning structs into input parameter lists

use crate::parameter::Parameter;

/// Trait for types whose fields become named input parameters.
///
/// Usually implemented via `#[derive(ToParameters)]`. Fields marked
/// `#[sqlconn(skip_param)]` (identity columns, computed fields) are left out.
///
/// ```ignore
/// let params = customer.to_parameters();
/// conn.execute_non_query_proc("sp_InsertCustomer", &params).await?;
/// ```
pub trait ToParameters {
    /// Parameter names in field order.
    fn parameter_names() -> &'static [&'static str];

    /// One `Direction::Input` parameter per non-skipped field.
    fn to_parameters(&self) -> Vec<Parameter>;
}
