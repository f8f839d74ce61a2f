//! Forward-only result cursors and the helpers that drive mappers over them

use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::mapper::Mapper;
use crate::traits::Row;
use crate::value::Value;

/// One materialized result row. Column names are shared with its cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct DbRow {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl DbRow {
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self {
            columns: columns.into(),
            values,
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl Row for DbRow {
    fn column_count(&self) -> usize {
        self.values.len()
    }

    fn column_name(&self, ordinal: usize) -> Option<&str> {
        self.columns.get(ordinal).map(String::as_str)
    }

    fn value_at(&self, ordinal: usize) -> Result<&Value> {
        self.values
            .get(ordinal)
            .ok_or_else(|| Error::FieldNotFound(format!("ordinal {}", ordinal)))
    }
}

/// A forward-only, non-restartable cursor over result rows.
pub trait Cursor {
    /// Column names of the result shape.
    fn columns(&self) -> &[String];

    /// Advance to the next row and return it, or `None` once exhausted.
    fn next_row(&mut self) -> Result<Option<&dyn Row>>;

    /// Lazily map the remaining rows.
    ///
    /// The iterator borrows the cursor, so it cannot outlive it.
    fn rows<T, M: Mapper<T>>(&mut self, mapper: M) -> MappedRows<'_, Self, T, M>
    where
        Self: Sized,
    {
        MappedRows {
            cursor: self,
            mapper,
            index: 0,
            done: false,
            _marker: PhantomData,
        }
    }
}

/// A buffered result set as returned by a driver.
#[derive(Debug)]
pub struct RowCursor {
    columns: Arc<[String]>,
    rows: std::vec::IntoIter<Vec<Value>>,
    current: Option<DbRow>,
}

impl RowCursor {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns: columns.into(),
            rows: rows.into_iter(),
            current: None,
        }
    }

    /// A cursor with no columns and no rows.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Rows not yet visited.
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }

    /// First column of the first remaining row, or NULL.
    pub(crate) fn into_scalar(mut self) -> Value {
        self.rows
            .next()
            .and_then(|row| row.into_iter().next())
            .unwrap_or(Value::Null)
    }
}

impl Cursor for RowCursor {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn next_row(&mut self) -> Result<Option<&dyn Row>> {
        self.current = self.rows.next().map(|values| DbRow {
            columns: Arc::clone(&self.columns),
            values,
        });
        Ok(self.current.as_ref().map(|row| row as &dyn Row))
    }
}

/// Iterator returned by [`Cursor::rows`]. Stops after the first error.
pub struct MappedRows<'c, C: ?Sized, T, M> {
    cursor: &'c mut C,
    mapper: M,
    index: usize,
    done: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<C: Cursor + ?Sized, T, M: Mapper<T>> Iterator for MappedRows<'_, C, T, M> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = match self.cursor.next_row() {
            Ok(Some(row)) => self.mapper.map(row, self.index),
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(e) => Err(e),
        };
        self.index += 1;
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

fn require<A>(value: Option<A>, name: &'static str) -> Result<A> {
    value.ok_or_else(|| Error::invalid_argument(name, format!("{} is absent", name)))
}

/// Advance the cursor to completion, mapping every row in order.
///
/// The mapper sees a zero-based row index. Either argument being `None`
/// fails with `InvalidArgument`; a mapping error aborts the whole drain.
pub fn drain_all<C, T, M>(cursor: Option<&mut C>, mapper: Option<M>) -> Result<Vec<T>>
where
    C: Cursor + ?Sized,
    M: Mapper<T>,
{
    let cursor = require(cursor, "cursor")?;
    let mut mapper = require(mapper, "mapper")?;

    let mut results = Vec::new();
    while let Some(row) = cursor.next_row()? {
        let entity = mapper.map(row, results.len())?;
        results.push(entity);
    }
    Ok(results)
}

/// Advance once and map that row, or return `None` if there is none.
///
/// Remaining rows are left unread.
pub fn first_or_default<C, T, M>(cursor: Option<&mut C>, mapper: Option<M>) -> Result<Option<T>>
where
    C: Cursor + ?Sized,
    M: Mapper<T>,
{
    let cursor = require(cursor, "cursor")?;
    let mut mapper = require(mapper, "mapper")?;

    match cursor.next_row()? {
        Some(row) => Ok(Some(mapper.map(row, 0)?)),
        None => Ok(None),
    }
}
