//! Command descriptor: what to run and how

use crate::error::{Error, Result};
use crate::parameter::{Direction, Parameter};
use crate::value::Value;

/// How the command text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CommandKind {
    /// Raw SQL text.
    #[default]
    Text,
    /// Name of a stored routine.
    StoredProcedure,
}

/// What the caller wants back from a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecuteMode {
    /// A forward-only row cursor.
    Reader,
    /// The number of affected rows.
    NonQuery,
    /// The first column of the first row.
    Scalar,
}

/// A command built fresh for one call.
///
/// # Example
///
/// ```ignore
/// use sqlconn::{Command, ExecuteMode};
///
/// let command = Command::procedure("sp_InsertCustomer")
///     .bind("FirstName", "Ada")
///     .bind("LastName", "Lovelace")
///     .output("Identity")
///     .timeout(30);
///
/// let response = conn.execute_command(&command, ExecuteMode::NonQuery).await?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    text: String,
    kind: CommandKind,
    parameters: Vec<Parameter>,
    timeout: Option<u32>,
}

impl Command {
    pub fn new(text: impl Into<String>, kind: CommandKind) -> Self {
        Self {
            text: text.into(),
            kind,
            parameters: Vec::new(),
            timeout: None,
        }
    }

    /// A raw SQL text command.
    pub fn text(sql: impl Into<String>) -> Self {
        Self::new(sql, CommandKind::Text)
    }

    /// A stored procedure call by name.
    pub fn procedure(name: impl Into<String>) -> Self {
        Self::new(name, CommandKind::StoredProcedure)
    }

    /// Append a parameter.
    pub fn param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Append several parameters in order.
    pub fn params<I: IntoIterator<Item = Parameter>>(mut self, parameters: I) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Append an input parameter.
    pub fn bind(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.param(Parameter::input(name, value))
    }

    /// Append an output parameter.
    pub fn output(self, name: impl Into<String>) -> Self {
        self.param(Parameter::output(name))
    }

    /// Override the wrapper's command timeout, in seconds. Zero means no limit.
    pub fn timeout(mut self, seconds: u32) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn command_text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn timeout_seconds(&self) -> Option<u32> {
        self.timeout
    }

    /// The return-value parameter, if the command declares one.
    pub fn return_parameter(&self) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.direction() == Direction::ReturnValue)
    }

    /// Check the command before anything is sent to the server.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(Error::invalid_argument("command_text", "command text is empty"));
        }
        for parameter in &self.parameters {
            parameter.validate()?;
        }
        let returns = self
            .parameters
            .iter()
            .filter(|p| p.direction() == Direction::ReturnValue)
            .count();
        if returns > 1 {
            return Err(Error::invalid_argument(
                "parameters",
                "at most one return value parameter is allowed",
            ));
        }
        if returns == 1 && self.kind != CommandKind::StoredProcedure {
            return Err(Error::invalid_argument(
                "parameters",
                "return value parameters require a stored procedure command",
            ));
        }
        Ok(())
    }
}
