//! FromValue trait for coercing database values into Rust types

use crate::error::{Error, Result};
use crate::value::Value;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Trait for types that can be constructed from a database value.
///
/// Implemented for the common Rust scalar types; implement it by hand for
/// custom types such as enums stored as text.
pub trait FromValue: Sized {
    /// Convert a database value to this type.
    fn from_value(value: Value) -> Result<Self>;
}

fn mismatch<T>(expected: &'static str, value: &Value) -> Result<T> {
    Err(Error::TypeConversion {
        expected,
        actual: value.describe(),
    })
}

fn out_of_range<T>(expected: &'static str, value: &Value) -> Result<T> {
    Err(Error::TypeConversion {
        expected,
        actual: format!("{} out of range", value.describe()),
    })
}

// Integers accept either signedness as long as the value fits. Decimal and
// text are accepted too because scalar aggregates (SUM, COUNT over a
// procedure) frequently come back as DECIMAL or text.
macro_rules! from_value_int {
    ($($t:ty => $name:literal),*) => {
        $(impl FromValue for $t {
            fn from_value(value: Value) -> Result<Self> {
                match &value {
                    Value::Int(v) => <$t>::try_from(*v).or_else(|_| out_of_range($name, &value)),
                    Value::UInt(v) => <$t>::try_from(*v).or_else(|_| out_of_range($name, &value)),
                    Value::Bool(v) => Ok(<$t>::from(*v)),
                    Value::Decimal(d) if d.fract().is_zero() => match d.to_i128() {
                        Some(v) => <$t>::try_from(v).or_else(|_| out_of_range($name, &value)),
                        None => out_of_range($name, &value),
                    },
                    Value::Text(s) => match s.trim().parse::<$t>() {
                        Ok(v) => Ok(v),
                        Err(_) => mismatch($name, &value),
                    },
                    _ => mismatch($name, &value),
                }
            }
        })*
    };
}

from_value_int!(
    i8 => "i8", i16 => "i16", i32 => "i32", i64 => "i64",
    u8 => "u8", u16 => "u16", u32 => "u32", u64 => "u64"
);

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Bool(v) => Ok(*v),
            Value::Int(v) => Ok(*v != 0),
            Value::UInt(v) => Ok(*v != 0),
            _ => mismatch("bool", &value),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Float(v) => Ok(*v),
            Value::Double(v) => Ok(*v as f32),
            Value::Int(v) => Ok(*v as f32),
            Value::UInt(v) => Ok(*v as f32),
            Value::Decimal(d) => d.to_f32().map_or_else(|| out_of_range("f32", &value), Ok),
            _ => mismatch("f32", &value),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Float(v) => Ok(*v as f64),
            Value::Double(v) => Ok(*v),
            Value::Int(v) => Ok(*v as f64),
            Value::UInt(v) => Ok(*v as f64),
            Value::Decimal(d) => d.to_f64().map_or_else(|| out_of_range("f64", &value), Ok),
            _ => mismatch("f64", &value),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(v) => Ok(v),
            Value::Bytes(v) => String::from_utf8(v).map_err(|e| Error::TypeConversion {
                expected: "utf8 string",
                actual: format!("invalid utf8: {}", e),
            }),
            Value::Decimal(v) => Ok(v.to_string()),
            Value::Json(v) => Ok(v.to_string()),
            other => mismatch("string", &other),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(v) => Ok(v),
            Value::Text(v) => Ok(v.into_bytes()),
            other => mismatch("bytes", &other),
        }
    }
}

impl FromValue for NaiveDate {
    fn from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Date(v) => Ok(*v),
            Value::DateTime(v) => Ok(v.date()),
            _ => mismatch("date", &value),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: Value) -> Result<Self> {
        match &value {
            Value::DateTime(v) => Ok(*v),
            Value::Date(v) => Ok(v.and_time(NaiveTime::default())),
            _ => mismatch("datetime", &value),
        }
    }
}

impl FromValue for NaiveTime {
    fn from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Time(v) => Ok(*v),
            Value::DateTime(v) => Ok(v.time()),
            _ => mismatch("time", &value),
        }
    }
}

impl FromValue for Decimal {
    fn from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Decimal(v) => Ok(*v),
            Value::Int(v) => Ok(Decimal::from(*v)),
            Value::UInt(v) => Ok(Decimal::from(*v)),
            Value::Text(v) => v.parse().map_err(|_| Error::TypeConversion {
                expected: "decimal",
                actual: format!("invalid decimal string: {}", v),
            }),
            _ => mismatch("decimal", &value),
        }
    }
}

impl FromValue for serde_json::Value {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Json(v) => Ok(v),
            Value::Text(v) => serde_json::from_str(&v).map_err(|e| Error::TypeConversion {
                expected: "json",
                actual: format!("invalid json: {}", e),
            }),
            other => mismatch("json", &other),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            _ => Ok(Some(T::from_value(value)?)),
        }
    }
}
