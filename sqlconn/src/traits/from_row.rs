//! Row access and the FromRow trait for mapping rows onto structs

use crate::error::{Error, Result};
use crate::traits::FromValue;
use crate::value::Value;

/// The current row of a result cursor.
///
/// Columns can be read by ordinal or by name. Rows are only valid while the
/// cursor sits on them, so mappers receive `&dyn Row` and must not keep it.
pub trait Row {
    /// Number of columns in the row shape.
    fn column_count(&self) -> usize;

    /// Name of the column at `ordinal`.
    fn column_name(&self, ordinal: usize) -> Option<&str>;

    /// Value of the column at `ordinal`.
    ///
    /// Returns `FieldNotFound` if the ordinal is out of range.
    fn value_at(&self, ordinal: usize) -> Result<&Value>;

    /// Position of a named column. Exact matches win over case-insensitive ones.
    fn ordinal(&self, column: &str) -> Option<usize> {
        let count = self.column_count();
        (0..count)
            .find(|&i| self.column_name(i) == Some(column))
            .or_else(|| {
                (0..count).find(|&i| {
                    self.column_name(i)
                        .is_some_and(|name| name.eq_ignore_ascii_case(column))
                })
            })
    }

    /// Get a value from the row by column name as a dynamic Value.
    ///
    /// Returns `FieldNotFound` if the column doesn't exist.
    fn get_value(&self, column: &str) -> Result<Value> {
        let ordinal = self
            .ordinal(column)
            .ok_or_else(|| Error::FieldNotFound(column.to_string()))?;
        self.value_at(ordinal).cloned()
    }
}

/// Typed access to row values.
pub trait RowExt: Row {
    /// Get a typed value by column name. NULL only converts into `Option`.
    fn get<T: FromValue>(&self, column: &str) -> Result<T> {
        T::from_value(self.get_value(column)?)
    }

    /// Get a typed value by ordinal.
    fn get_at<T: FromValue>(&self, ordinal: usize) -> Result<T> {
        T::from_value(self.value_at(ordinal)?.clone())
    }

    /// Like [`get`](RowExt::get), but a NULL field yields `T::default()`.
    ///
    /// An unknown column is still an error.
    fn value_or_default<T: FromValue + Default>(&self, column: &str) -> Result<T> {
        let ordinal = self
            .ordinal(column)
            .ok_or_else(|| Error::FieldNotFound(column.to_string()))?;
        self.value_or_default_at(ordinal)
    }

    /// Like [`get_at`](RowExt::get_at), but a NULL field yields `T::default()`.
    fn value_or_default_at<T: FromValue + Default>(&self, ordinal: usize) -> Result<T> {
        match self.value_at(ordinal)? {
            Value::Null => Ok(T::default()),
            value => T::from_value(value.clone()),
        }
    }

    /// Field lookup used by `#[derive(FromRow)]`: a missing or NULL column
    /// yields `T::default()`, a conversion failure names the column.
    #[doc(hidden)]
    fn mapped_or_default<T: FromValue + Default>(&self, column: &str) -> Result<T> {
        match self.ordinal(column) {
            Some(ordinal) => match self.value_at(ordinal)? {
                Value::Null => Ok(T::default()),
                value => T::from_value(value.clone()).map_err(|e| Error::mapping(column, e)),
            },
            None => Ok(T::default()),
        }
    }
}

impl<R: Row + ?Sized> RowExt for R {}

/// Trait for types that can be constructed from a database row.
///
/// This trait is typically implemented via the `#[derive(FromRow)]` macro,
/// which generates the column table at compile time: each field reads the
/// same-named column, and missing or NULL columns leave the field at its
/// `Default`.
///
/// # Manual Implementation
///
/// ```ignore
/// use sqlconn::{FromRow, Row, RowExt, Result};
///
/// pub struct Customer {
///     pub customer_id: i64,
///     pub first_name: String,
/// }
///
/// impl FromRow for Customer {
///     fn from_row<R: Row + ?Sized>(row: &R) -> Result<Self> {
///         Ok(Self {
///             customer_id: row.value_or_default("CustomerId")?,
///             first_name: row.value_or_default("FirstName")?,
///         })
///     }
///
///     fn column_names() -> &'static [&'static str] {
///         &["CustomerId", "FirstName"]
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Construct an instance of this type from a database row.
    fn from_row<R: Row + ?Sized>(row: &R) -> Result<Self>;

    /// Get the column names that this type reads from.
    fn column_names() -> &'static [&'static str];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::DbRow;

    fn row() -> DbRow {
        DbRow::new(
            vec!["Count".into(), "Name".into(), "name".into()],
            vec![Value::Null, Value::Text("Ada".into()), Value::Text("lower".into())],
        )
    }

    #[test]
    fn test_value_or_default_on_null() {
        let row = row();
        let count: i32 = row.value_or_default("Count").unwrap();
        assert_eq!(count, 0);
        let count: i32 = row.value_or_default_at(0).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_value_or_default_unknown_field() {
        let row = row();
        let err = row.value_or_default::<i32>("Missing").unwrap_err();
        assert!(matches!(err, Error::FieldNotFound(ref f) if f == "Missing"));
        assert!(matches!(
            row.value_or_default_at::<i32>(9),
            Err(Error::FieldNotFound(_))
        ));
    }

    #[test]
    fn test_exact_name_wins_over_case_insensitive() {
        let row = row();
        assert_eq!(row.get::<String>("name").unwrap(), "lower");
        assert_eq!(row.get::<String>("Name").unwrap(), "Ada");
        assert_eq!(row.get::<String>("NAME").unwrap(), "Ada");
    }

    #[test]
    fn test_get_null_requires_option() {
        let row = row();
        assert!(row.get::<i32>("Count").is_err());
        assert_eq!(row.get::<Option<i32>>("Count").unwrap(), None);
    }

    #[test]
    fn test_mapped_or_default() {
        let row = row();
        assert_eq!(row.mapped_or_default::<String>("Missing").unwrap(), "");
        let err = row.mapped_or_default::<i64>("Name").unwrap_err();
        assert!(matches!(err, Error::Mapping { ref column, .. } if column == "Name"));
    }
}
