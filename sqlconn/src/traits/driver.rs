//! Driver trait: one physical database connection

use crate::command::{Command, ExecuteMode};
use crate::cursor::RowCursor;
use crate::error::Result;
use crate::parameter::Parameter;
use crate::traits::IsolationLevel;
use crate::value::Value;
use async_trait::async_trait;

/// What a driver hands back after running one command.
#[derive(Debug, Default)]
pub struct Response {
    /// Result rows, for `ExecuteMode::Reader`.
    pub cursor: Option<RowCursor>,
    /// Rows affected, for `ExecuteMode::NonQuery`.
    pub rows_affected: u64,
    /// Last generated identity, if the server reported one.
    pub last_insert_id: Option<u64>,
    /// First column of the first row, for `ExecuteMode::Scalar`.
    pub scalar: Value,
    /// Every bound parameter with its final value, in binding order.
    pub parameters: Vec<Parameter>,
}

/// A single physical connection to a database server.
///
/// This trait abstracts over database backends. [`Connection`](crate::Connection)
/// owns exactly one driver and calls it from `&mut self` methods, so
/// implementations never see concurrent calls.
#[async_trait]
pub trait Driver: Send {
    /// Open the physical connection. Must be a no-op if already open.
    async fn open(&mut self) -> Result<()>;

    /// Close the physical connection. Must be a no-op if already closed.
    async fn close(&mut self) -> Result<()>;

    /// Whether the physical connection is currently open.
    fn is_open(&self) -> bool;

    /// Drop the physical connection without a protocol goodbye.
    ///
    /// Used when the session can no longer be trusted, e.g. after a timeout
    /// interrupted a command midway. The server rolls back any open
    /// transaction when the session goes away.
    fn discard(&mut self);

    /// Start a transaction on the open connection.
    async fn begin(&mut self, level: Option<IsolationLevel>) -> Result<()>;

    /// Commit the open transaction.
    async fn commit(&mut self) -> Result<()>;

    /// Roll back the open transaction.
    async fn rollback(&mut self) -> Result<()>;

    /// Run one command on the open connection.
    async fn execute(&mut self, command: &Command, mode: ExecuteMode) -> Result<Response>;
}
