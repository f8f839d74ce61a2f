//! SQL text built around a command's parameters
//!
//! MySQL has no client-side output parameters, so every parameter is bound
//! as a session user variable (`@name`). Values go in with one `SET`, stored
//! routines are called with the variables as arguments, and output values are
//! read back with one `SELECT`.

use crate::error::{Error, Result};
use crate::parameter::{Direction, Parameter};
use crate::value::Value;

/// Prefix MySQL uses for session user variables.
pub const MARKER: char = '@';

pub(crate) fn variable(name: &str) -> String {
    format!("{}{}", MARKER, name)
}

/// `SET @a = ?, @b = NULL` for every parameter, with the values to bind.
///
/// Output and return-value variables are reset to NULL so nothing from a
/// previous command leaks into this one. Returns `None` without parameters.
pub fn bind_variables(params: &[Parameter]) -> Option<(String, Vec<Value>)> {
    if params.is_empty() {
        return None;
    }

    let mut values = Vec::new();
    let assignments: Vec<String> = params
        .iter()
        .map(|p| {
            if p.direction().sends_value() {
                values.push(p.value().clone());
                format!("{} = ?", variable(p.name()))
            } else {
                format!("{} = NULL", variable(p.name()))
            }
        })
        .collect();

    Some((format!("SET {}", assignments.join(", ")), values))
}

/// Invocation of a stored routine over the bound variables.
///
/// Without a return-value parameter this is `CALL name(@a, @b)`. With one,
/// the routine is a stored function and its result lands in the return
/// variable: `SET @ret = name(@a, @b)`.
pub fn routine_call(name: &str, params: &[Parameter]) -> Result<String> {
    let name = name.trim();
    if !is_routine_name(name) {
        return Err(Error::invalid_argument(
            "command_text",
            format!("'{}' is not a valid routine name", name),
        ));
    }

    let args: Vec<String> = params
        .iter()
        .filter(|p| p.direction() != Direction::ReturnValue)
        .map(|p| variable(p.name()))
        .collect();
    let call = format!("{}({})", name, args.join(", "));

    match params.iter().find(|p| p.direction() == Direction::ReturnValue) {
        Some(ret) => Ok(format!("SET {} = {}", variable(ret.name()), call)),
        None => Ok(format!("CALL {}", call)),
    }
}

/// `SELECT @a, @b` over the output-direction parameters, if any.
pub fn select_outputs(params: &[Parameter]) -> Option<String> {
    let outputs: Vec<String> = params
        .iter()
        .filter(|p| p.direction().is_output())
        .map(|p| variable(p.name()))
        .collect();

    if outputs.is_empty() {
        None
    } else {
        Some(format!("SELECT {}", outputs.join(", ")))
    }
}

/// Copy the read-back output values onto the parameters, in binding order.
pub fn apply_outputs(params: &[Parameter], mut outputs: Vec<Value>) -> Vec<Parameter> {
    outputs.reverse();
    params
        .iter()
        .map(|p| {
            if p.direction().is_output() {
                p.with_value(outputs.pop().unwrap_or_default())
            } else {
                p.clone()
            }
        })
        .collect()
}

// Plain or schema-qualified identifier, optionally backquoted.
fn is_routine_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let part = part
                .strip_prefix('`')
                .and_then(|p| p.strip_suffix('`'))
                .unwrap_or(part);
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Vec<Parameter> {
        vec![
            Parameter::input("FirstName", "Ada"),
            Parameter::output("Identity"),
            Parameter::input_output("Counter", 5i64),
        ]
    }

    #[test]
    fn test_bind_variables() {
        let (sql, values) = bind_variables(&params()).unwrap();
        assert_eq!(sql, "SET @FirstName = ?, @Identity = NULL, @Counter = ?");
        assert_eq!(values, vec![Value::Text("Ada".into()), Value::Int(5)]);
        assert!(bind_variables(&[]).is_none());
    }

    #[test]
    fn test_procedure_call() {
        assert_eq!(
            routine_call("sp_InsertCustomer", &params()).unwrap(),
            "CALL sp_InsertCustomer(@FirstName, @Identity, @Counter)"
        );
        assert_eq!(routine_call("shop.sp_Count", &[]).unwrap(), "CALL shop.sp_Count()");
    }

    #[test]
    fn test_function_call_with_return_value() {
        let params = vec![
            Parameter::input("CustomerId", 1i64),
            Parameter::return_value("ReturnValue"),
        ];
        assert_eq!(
            routine_call("fn_OrderCount", &params).unwrap(),
            "SET @ReturnValue = fn_OrderCount(@CustomerId)"
        );
    }

    #[test]
    fn test_invalid_routine_name() {
        let err = routine_call("sp_Drop; DROP TABLE Customer", &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert!(routine_call("`my proc`", &[]).is_err());
        assert!(routine_call("`shop`.`sp_Get`", &[]).is_ok());
    }

    #[test]
    fn test_select_outputs() {
        assert_eq!(
            select_outputs(&params()).unwrap(),
            "SELECT @Identity, @Counter"
        );
        assert!(select_outputs(&[Parameter::input("a", 1i64)]).is_none());
    }

    #[test]
    fn test_apply_outputs_keeps_order() {
        let applied = apply_outputs(&params(), vec![Value::UInt(42), Value::Int(6)]);
        assert_eq!(applied[0].value(), &Value::Text("Ada".into()));
        assert_eq!(applied[1].value(), &Value::UInt(42));
        assert_eq!(applied[2].value(), &Value::Int(6));
    }
}
