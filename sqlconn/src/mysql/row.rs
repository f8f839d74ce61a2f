//! Conversion of MySQL result sets into buffered cursors

use crate::cursor::RowCursor;
use crate::error::{Error, Result};
use crate::value::Value;
use mysql_async::{Column, Row as MySqlAsyncRow};

use super::types::decode_value;

/// Column names of a result set, in ordinal order.
pub(crate) fn column_names(columns: &[Column]) -> Vec<String> {
    columns.iter().map(|c| c.name_str().into_owned()).collect()
}

/// Decode every value of one mysql_async row.
pub(crate) fn decode_row(row: &MySqlAsyncRow, columns: &[Column]) -> Result<Vec<Value>> {
    columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let raw = row
                .as_ref(i)
                .ok_or_else(|| Error::FieldNotFound(column.name_str().into_owned()))?
                .clone();
            decode_value(raw, column).map_err(|e| Error::mapping(column.name_str(), e))
        })
        .collect()
}

/// Buffer a whole result set into a [`RowCursor`].
pub(crate) fn into_cursor(columns: &[Column], rows: Vec<MySqlAsyncRow>) -> Result<RowCursor> {
    let mut values = Vec::with_capacity(rows.len());
    for row in &rows {
        values.push(decode_row(row, columns)?);
    }
    Ok(RowCursor::new(column_names(columns), values))
}
