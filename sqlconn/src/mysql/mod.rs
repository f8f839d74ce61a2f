//! MySQL implementation for sqlconn

mod driver;
mod row;
pub mod statement;
mod types;

pub use driver::{MySqlDriver, MySqlDriverBuilder};
