//! Type conversion utilities for MySQL

use crate::error::{Error, Result};
use crate::value::Value;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use mysql_async::consts::{ColumnFlags, ColumnType};
use mysql_async::{Column, Value as MySqlValue};

/// Character set id MySQL reports for binary strings and blobs.
const BINARY_CHARSET: u16 = 63;

/// Largest fractional part MySQL accepts, in microseconds.
const MAX_MICROS: u32 = 999_999;

/// Convert a sqlconn Value to a mysql_async Value for binding.
///
/// Dates outside MySQL's year range 0..=9999 are rejected. A leap second's
/// fraction is clamped to the last representable microsecond.
pub fn to_mysql_value(value: &Value) -> Result<MySqlValue> {
    Ok(match value {
        Value::Null => MySqlValue::NULL,
        Value::Bool(v) => MySqlValue::from(*v),
        Value::Int(v) => MySqlValue::Int(*v),
        Value::UInt(v) => MySqlValue::UInt(*v),
        Value::Float(v) => MySqlValue::Float(*v),
        Value::Double(v) => MySqlValue::Double(*v),
        Value::Text(v) => MySqlValue::from(v.as_str()),
        Value::Bytes(v) => MySqlValue::from(v.as_slice()),
        Value::Date(v) => {
            MySqlValue::Date(mysql_year(v.year())?, v.month() as u8, v.day() as u8, 0, 0, 0, 0)
        }
        Value::DateTime(v) => MySqlValue::Date(
            mysql_year(v.year())?,
            v.month() as u8,
            v.day() as u8,
            v.hour() as u8,
            v.minute() as u8,
            v.second() as u8,
            micros(v.nanosecond()),
        ),
        Value::Time(v) => MySqlValue::Time(
            false,
            0,
            v.hour() as u8,
            v.minute() as u8,
            v.second() as u8,
            micros(v.nanosecond()),
        ),
        Value::Decimal(v) => MySqlValue::from(v.to_string()),
        Value::Json(v) => MySqlValue::from(v.to_string()),
    })
}

fn mysql_year(year: i32) -> Result<u16> {
    match u16::try_from(year) {
        Ok(y) if y <= 9999 => Ok(y),
        _ => Err(Error::TypeConversion {
            expected: "date with year 0..=9999",
            actual: format!("year {}", year),
        }),
    }
}

// chrono reports leap seconds as nanosecond >= 1_000_000_000
fn micros(nanosecond: u32) -> u32 {
    (nanosecond / 1000).min(MAX_MICROS)
}

/// Decode one column value using the column's metadata.
///
/// The text protocol delivers every non-NULL value as bytes, so the column
/// type decides how to parse them. Values that already arrive typed (binary
/// protocol) are converted directly.
pub fn decode_value(value: MySqlValue, column: &Column) -> Result<Value> {
    match value {
        MySqlValue::NULL => Ok(Value::Null),
        MySqlValue::Bytes(bytes) => decode_text(bytes, column),
        MySqlValue::Int(v) => Ok(Value::Int(v)),
        MySqlValue::UInt(v) => Ok(Value::UInt(v)),
        MySqlValue::Float(v) => Ok(Value::Float(v)),
        MySqlValue::Double(v) => Ok(Value::Double(v)),
        MySqlValue::Date(year, month, day, hour, min, sec, micro) => {
            let date = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
                .ok_or_else(|| conversion("date", format!("{}-{}-{}", year, month, day)))?;
            if column.column_type() == ColumnType::MYSQL_TYPE_DATE {
                return Ok(Value::Date(date));
            }
            let time = NaiveTime::from_hms_micro_opt(hour as u32, min as u32, sec as u32, micro)
                .ok_or_else(|| conversion("time", format!("{}:{}:{}.{}", hour, min, sec, micro)))?;
            Ok(Value::DateTime(NaiveDateTime::new(date, time)))
        }
        MySqlValue::Time(is_neg, days, hours, mins, secs, micro) => {
            // NaiveTime only covers 00:00:00 to 23:59:59
            if is_neg || days > 0 || hours >= 24 {
                return Err(conversion(
                    "time (00:00:00 to 23:59:59)",
                    format!(
                        "{}{}:{:02}:{:02}",
                        if is_neg { "-" } else { "" },
                        days * 24 + hours as u32,
                        mins,
                        secs
                    ),
                ));
            }
            NaiveTime::from_hms_micro_opt(hours as u32, mins as u32, secs as u32, micro)
                .map(Value::Time)
                .ok_or_else(|| conversion("time", format!("{}:{}:{}.{}", hours, mins, secs, micro)))
        }
    }
}

fn conversion(expected: &'static str, actual: String) -> Error {
    Error::TypeConversion { expected, actual }
}

fn decode_text(bytes: Vec<u8>, column: &Column) -> Result<Value> {
    use ColumnType::*;

    let column_type = column.column_type();
    let binary = column.character_set() == BINARY_CHARSET;

    // Binary strings keep their raw bytes.
    if binary
        && matches!(
            column_type,
            MYSQL_TYPE_TINY_BLOB
                | MYSQL_TYPE_MEDIUM_BLOB
                | MYSQL_TYPE_LONG_BLOB
                | MYSQL_TYPE_BLOB
                | MYSQL_TYPE_VAR_STRING
                | MYSQL_TYPE_STRING
                | MYSQL_TYPE_VARCHAR
                | MYSQL_TYPE_BIT
                | MYSQL_TYPE_GEOMETRY
        )
    {
        return Ok(Value::Bytes(bytes));
    }

    let text = String::from_utf8(bytes)
        .map_err(|e| conversion("utf8 text", format!("invalid utf8: {}", e)))?;

    match column_type {
        MYSQL_TYPE_TINY | MYSQL_TYPE_SHORT | MYSQL_TYPE_LONG | MYSQL_TYPE_INT24
        | MYSQL_TYPE_LONGLONG | MYSQL_TYPE_YEAR => {
            if column.flags().contains(ColumnFlags::UNSIGNED_FLAG) {
                parse(&text, "unsigned integer").map(Value::UInt)
            } else {
                parse(&text, "integer").map(Value::Int)
            }
        }
        MYSQL_TYPE_FLOAT => parse(&text, "float").map(Value::Float),
        MYSQL_TYPE_DOUBLE => parse(&text, "double").map(Value::Double),
        MYSQL_TYPE_DECIMAL | MYSQL_TYPE_NEWDECIMAL => parse(&text, "decimal").map(Value::Decimal),
        MYSQL_TYPE_DATE | MYSQL_TYPE_NEWDATE => {
            if is_zero_date(&text) {
                return Ok(Value::Null);
            }
            NaiveDate::parse_from_str(&text, "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|_| conversion("date", text))
        }
        MYSQL_TYPE_DATETIME | MYSQL_TYPE_DATETIME2 | MYSQL_TYPE_TIMESTAMP
        | MYSQL_TYPE_TIMESTAMP2 => {
            if is_zero_date(&text) {
                return Ok(Value::Null);
            }
            NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S%.f")
                .map(Value::DateTime)
                .map_err(|_| conversion("datetime", text))
        }
        MYSQL_TYPE_TIME | MYSQL_TYPE_TIME2 => NaiveTime::parse_from_str(&text, "%H:%M:%S%.f")
            .map(Value::Time)
            .map_err(|_| conversion("time (00:00:00 to 23:59:59)", text)),
        MYSQL_TYPE_JSON => serde_json::from_str(&text)
            .map(Value::Json)
            .map_err(|e| conversion("json", format!("invalid json: {}", e))),
        _ => Ok(Value::Text(text)),
    }
}

fn parse<T: std::str::FromStr>(text: &str, expected: &'static str) -> Result<T> {
    text.trim()
        .parse()
        .map_err(|_| conversion(expected, text.to_string()))
}

fn is_zero_date(text: &str) -> bool {
    text.starts_with("0000-00-00")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn column(column_type: ColumnType) -> Column {
        Column::new(column_type).with_name(b"c")
    }

    #[test]
    fn test_decode_text_integers() {
        let col = column(ColumnType::MYSQL_TYPE_LONGLONG);
        assert_eq!(decode_value(MySqlValue::Bytes(b"42".to_vec()), &col).unwrap(), Value::Int(42));

        let unsigned = column(ColumnType::MYSQL_TYPE_LONGLONG).with_flags(ColumnFlags::UNSIGNED_FLAG);
        assert_eq!(
            decode_value(MySqlValue::Bytes(b"18446744073709551615".to_vec()), &unsigned).unwrap(),
            Value::UInt(u64::MAX)
        );
    }

    #[test]
    fn test_decode_text_decimal_and_dates() {
        let col = column(ColumnType::MYSQL_TYPE_NEWDECIMAL);
        assert_eq!(
            decode_value(MySqlValue::Bytes(b"12.50".to_vec()), &col).unwrap(),
            Value::Decimal(Decimal::new(1250, 2))
        );

        let col = column(ColumnType::MYSQL_TYPE_DATETIME);
        let decoded = decode_value(MySqlValue::Bytes(b"2024-03-01 10:20:30".to_vec()), &col).unwrap();
        assert_eq!(
            decoded,
            Value::DateTime(
                NaiveDate::from_ymd_opt(2024, 3, 1)
                    .unwrap()
                    .and_hms_opt(10, 20, 30)
                    .unwrap()
            )
        );

        let col = column(ColumnType::MYSQL_TYPE_DATE);
        assert_eq!(
            decode_value(MySqlValue::Bytes(b"0000-00-00".to_vec()), &col).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_decode_text_strings_and_blobs() {
        let text = column(ColumnType::MYSQL_TYPE_VAR_STRING).with_character_set(45);
        assert_eq!(
            decode_value(MySqlValue::Bytes(b"Ada".to_vec()), &text).unwrap(),
            Value::Text("Ada".into())
        );

        let blob = column(ColumnType::MYSQL_TYPE_BLOB).with_character_set(BINARY_CHARSET);
        assert_eq!(
            decode_value(MySqlValue::Bytes(vec![0xff, 0x00]), &blob).unwrap(),
            Value::Bytes(vec![0xff, 0x00])
        );
    }

    #[test]
    fn test_decode_bad_integer_is_conversion_error() {
        let col = column(ColumnType::MYSQL_TYPE_LONG);
        assert!(matches!(
            decode_value(MySqlValue::Bytes(b"abc".to_vec()), &col),
            Err(Error::TypeConversion { .. })
        ));
    }

    #[test]
    fn test_decode_binary_protocol_values() {
        let col = column(ColumnType::MYSQL_TYPE_DATE);
        assert_eq!(
            decode_value(MySqlValue::Date(2024, 1, 2, 0, 0, 0, 0), &col).unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
        );
        let col = column(ColumnType::MYSQL_TYPE_TIME);
        assert!(decode_value(MySqlValue::Time(true, 0, 1, 0, 0, 0), &col).is_err());
    }

    #[test]
    fn test_to_mysql_value() {
        assert_eq!(to_mysql_value(&Value::Int(-3)).unwrap(), MySqlValue::Int(-3));
        assert_eq!(to_mysql_value(&Value::Null).unwrap(), MySqlValue::NULL);
        assert_eq!(
            to_mysql_value(&Value::Decimal(Decimal::new(1250, 2))).unwrap(),
            MySqlValue::Bytes(b"12.50".to_vec())
        );
    }

    #[test]
    fn test_to_mysql_value_rejects_out_of_range_years() {
        let bc = NaiveDate::from_ymd_opt(-44, 3, 15).unwrap();
        assert!(matches!(
            to_mysql_value(&Value::Date(bc)),
            Err(Error::TypeConversion { .. })
        ));

        let far = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
        assert!(to_mysql_value(&Value::DateTime(far.and_hms_opt(0, 0, 0).unwrap())).is_err());

        let last = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
        assert_eq!(
            to_mysql_value(&Value::Date(last)).unwrap(),
            MySqlValue::Date(9999, 12, 31, 0, 0, 0, 0)
        );
    }

    #[test]
    fn test_to_mysql_value_clamps_leap_second() {
        let leap = NaiveTime::from_hms_micro_opt(23, 59, 59, 1_500_000).unwrap();
        assert_eq!(
            to_mysql_value(&Value::Time(leap)).unwrap(),
            MySqlValue::Time(false, 0, 23, 59, 59, 999_999)
        );

        let at = NaiveDate::from_ymd_opt(2016, 12, 31).unwrap().and_time(leap);
        assert_eq!(
            to_mysql_value(&Value::DateTime(at)).unwrap(),
            MySqlValue::Date(2016, 12, 31, 23, 59, 59, 999_999)
        );
    }
}
