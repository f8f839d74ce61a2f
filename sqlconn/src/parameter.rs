//! Named command parameters and their directions

use crate::error::{Error, Result};
use crate::value::Value;

/// Direction of a bound parameter, mirroring the driver's parameter modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Value flows into the command only.
    #[default]
    Input,
    /// Value is produced by the command.
    Output,
    /// Value flows in and the command may replace it.
    InputOutput,
    /// Return value of a stored routine.
    ReturnValue,
}

impl Direction {
    /// Whether the parameter's final value is reported back after execution.
    pub fn is_output(self) -> bool {
        !matches!(self, Direction::Input)
    }

    /// Whether the caller's value is sent to the server.
    pub fn sends_value(self) -> bool {
        matches!(self, Direction::Input | Direction::InputOutput)
    }
}

/// An immutable `{name, direction, value}` triple.
///
/// The name is written without the driver's marker character; the driver
/// adds it when binding. Surrounding whitespace is trimmed.
///
/// # Example
///
/// ```ignore
/// use sqlconn::Parameter;
///
/// let params = vec![
///     Parameter::input("FirstName", "Ada"),
///     Parameter::input("LastName", "Lovelace"),
///     Parameter::output("Identity"),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    direction: Direction,
    value: Value,
}

impl Parameter {
    pub fn new(name: impl Into<String>, direction: Direction, value: impl Into<Value>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            direction,
            value: value.into(),
        }
    }

    pub fn input(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(name, Direction::Input, value)
    }

    pub fn output(name: impl Into<String>) -> Self {
        Self::new(name, Direction::Output, Value::Null)
    }

    pub fn input_output(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(name, Direction::InputOutput, value)
    }

    pub fn return_value(name: impl Into<String>) -> Self {
        Self::new(name, Direction::ReturnValue, Value::Null)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// A copy of this parameter carrying the value the command produced.
    pub fn with_value(&self, value: Value) -> Self {
        Self {
            name: self.name.clone(),
            direction: self.direction,
            value,
        }
    }

    /// Reject names that are empty or could break out of the placeholder.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::invalid_argument("parameters", "parameter name is empty"));
        }
        if let Some(c) = self
            .name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '$'))
        {
            return Err(Error::invalid_argument(
                "parameters",
                format!("parameter `{}` contains invalid character {:?}", self.name, c),
            ));
        }
        Ok(())
    }
}

/// Find a parameter by name, ignoring ASCII case.
pub fn find_parameter<'a>(parameters: &'a [Parameter], name: &str) -> Option<&'a Parameter> {
    parameters
        .iter()
        .find(|p| p.name().eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed() {
        let p = Parameter::output("Identity ");
        assert_eq!(p.name(), "Identity");
        assert_eq!(p.direction(), Direction::Output);
        assert!(p.value().is_null());
    }

    #[test]
    fn test_direction_flags() {
        assert!(!Direction::Input.is_output());
        assert!(Direction::Output.is_output());
        assert!(Direction::InputOutput.is_output());
        assert!(Direction::ReturnValue.is_output());
        assert!(Direction::InputOutput.sends_value());
        assert!(!Direction::Output.sends_value());
    }

    #[test]
    fn test_with_value_leaves_original_untouched() {
        let p = Parameter::input_output("Counter", 1);
        let updated = p.with_value(Value::Int(2));
        assert_eq!(p.value(), &Value::Int(1));
        assert_eq!(updated.value(), &Value::Int(2));
        assert_eq!(updated.name(), "Counter");
    }

    #[test]
    fn test_validate() {
        assert!(Parameter::input("First_Name$1", 1).validate().is_ok());
        assert!(matches!(
            Parameter::input("  ", 1).validate(),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(Parameter::input("a; DROP", 1).validate().is_err());
    }

    #[test]
    fn test_find_parameter_ignores_case() {
        let params = vec![Parameter::input("a", 1), Parameter::output("Identity")];
        assert_eq!(find_parameter(&params, "IDENTITY").unwrap().name(), "Identity");
        assert!(find_parameter(&params, "missing").is_none());
    }
}
