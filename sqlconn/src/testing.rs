//! Scripted in-memory driver for wrapper tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::command::{Command, ExecuteMode};
use crate::cursor::RowCursor;
use crate::error::{Error, Result};
use crate::traits::{Driver, IsolationLevel, Response};
use crate::value::Value;

type Script = Box<dyn FnMut(&Command) -> Result<Response> + Send>;

/// In-memory driver that records every call and answers from a script.
#[derive(Default)]
pub(crate) struct ScriptedDriver {
    log: Arc<Mutex<Vec<String>>>,
    script: VecDeque<Script>,
    open: bool,
    pub(crate) fail_open: bool,
    pub(crate) delay: Option<Duration>,
}

impl ScriptedDriver {
    pub(crate) fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let driver = Self::default();
        let log = Arc::clone(&driver.log);
        (driver, log)
    }

    pub(crate) fn then(
        mut self,
        step: impl FnMut(&Command) -> Result<Response> + Send + 'static,
    ) -> Self {
        self.script.push_back(Box::new(step));
        self
    }

    fn record(&self, entry: impl Into<String>) {
        self.log.lock().unwrap().push(entry.into());
    }
}

#[async_trait]
impl Driver for ScriptedDriver {
    async fn open(&mut self) -> Result<()> {
        self.record("open");
        if self.fail_open {
            return Err(Error::Connection("refused".into()));
        }
        self.open = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.record("close");
        self.open = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn discard(&mut self) {
        self.record("discard");
        self.open = false;
    }

    async fn begin(&mut self, level: Option<IsolationLevel>) -> Result<()> {
        match level {
            Some(level) => self.record(format!("begin {}", level.as_sql())),
            None => self.record("begin"),
        }
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        self.record("commit");
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        self.record("rollback");
        Ok(())
    }

    async fn execute(&mut self, command: &Command, mode: ExecuteMode) -> Result<Response> {
        assert!(self.open, "execute on a closed connection");
        self.record(format!("execute {:?} {}", command.kind(), command.command_text()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let mut step = self.script.pop_front().expect("script exhausted");
        let mut response = step(command)?;
        // Scalar reads the first column of the first row, like the MySQL driver
        if mode == ExecuteMode::Scalar {
            if let Some(cursor) = response.cursor.take() {
                response.scalar = cursor.into_scalar();
            }
        }
        Ok(response)
    }
}

pub(crate) fn log_of(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub(crate) fn ok(_: &Command) -> Result<Response> {
    Ok(Response::default())
}

pub(crate) fn rows(
    columns: &[&str],
    rows: Vec<Vec<Value>>,
) -> impl FnMut(&Command) -> Result<Response> + Send + 'static {
    let columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    move |_: &Command| {
        Ok(Response {
            cursor: Some(RowCursor::new(columns.clone(), rows.clone())),
            ..Response::default()
        })
    }
}

/// Echo the parameters back, setting every output to `value`.
pub(crate) fn outputs(value: Value) -> impl FnMut(&Command) -> Result<Response> + Send + 'static {
    move |command: &Command| {
        Ok(Response {
            rows_affected: 1,
            parameters: command
                .parameters()
                .iter()
                .map(|p| {
                    if p.direction().is_output() {
                        p.with_value(value.clone())
                    } else {
                        p.clone()
                    }
                })
                .collect(),
            ..Response::default()
        })
    }
}

pub(crate) fn fail(_: &Command) -> Result<Response> {
    Err(Error::Execution("duplicate key".into()))
}
