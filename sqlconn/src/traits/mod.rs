//! Core traits for sqlconn

mod driver;
mod from_row;
mod from_value;
mod to_parameters;
mod to_value;
mod transaction;

pub use driver::{Driver, Response};
pub use from_row::{FromRow, Row, RowExt};
pub use from_value::FromValue;
pub use to_parameters::ToParameters;
pub use to_value::ToValue;
pub use transaction::{IsolationLevel, TransactionState};
