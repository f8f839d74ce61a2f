//! sqlconn - single-connection SQL helper
//!
//! A thin layer over `mysql_async` that runs parameterized SQL text and
//! stored procedures on one lazily opened connection, maps result rows onto
//! structs, reads output parameters back and manages an optional ad-hoc
//! transaction.
//!
//! # Features
//!
//! - **Lazy connection**: opened on first execute, closed afterwards unless a
//!   transaction is active
//! - **Output parameters**: `Output`, `InputOutput` and `ReturnValue`
//!   parameters come back in [`ExecuteResult::outputs`]
//! - **Derive Macros**: `#[derive(FromRow, ToParameters)]` for mapping
//!   between structs, rows and parameter lists
//! - **Mappers**: closures over `&dyn Row` for hand-written mapping
//! - **Blocking facade**: [`blocking::Connection`] for synchronous callers
//!
//! # Example
//!
//! ```ignore
//! use sqlconn::{Connection, FromRow, Parameter, ToParameters};
//!
//! #[derive(FromRow, ToParameters)]
//! pub struct Customer {
//!     #[sqlconn(skip_param)]
//!     pub customer_id: i64,
//!     pub first_name: String,
//!     pub last_name: String,
//! }
//!
//! async fn add(conn: &mut Connection, customer: &Customer) -> sqlconn::Result<i64> {
//!     let mut params = customer.to_parameters();
//!     params.push(Parameter::output("Identity"));
//!     let result = conn.execute_non_query_proc("sp_InsertCustomer", &params).await?;
//!     let id = result.output("Identity").map(|p| p.value().clone()).unwrap_or_default();
//!     sqlconn::FromValue::from_value(id)
//! }
//! ```

pub mod blocking;
pub mod command;
pub mod config;
pub mod connection;
pub mod cursor;
pub mod error;
pub mod factory;
pub mod mapper;
pub mod mysql;
pub mod parameter;
pub mod traits;
pub mod value;

#[cfg(test)]
mod testing;

// Re-export the derive macros
pub use sqlconn_derive::{FromRow, ToParameters};

// Re-export main types
pub use command::{Command, CommandKind, ExecuteMode};
pub use config::ConnectionSettings;
pub use connection::{Connection, ExecuteResult, RETURN_VALUE};
pub use cursor::{drain_all, first_or_default, Cursor, DbRow, MappedRows, RowCursor};
pub use error::{Error, Result};
pub use factory::ConnectionFactory;
pub use mapper::{plain, with_index, FromRowMapper, Mapper};
pub use mysql::{MySqlDriver, MySqlDriverBuilder};
pub use parameter::{find_parameter, Direction, Parameter};
pub use traits::{
    Driver, FromRow, FromValue, IsolationLevel, Response, Row, RowExt, ToParameters, ToValue,
    TransactionState,
};
pub use value::Value;
