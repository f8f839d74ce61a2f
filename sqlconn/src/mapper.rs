//! Mapper contract: turn the cursor's current row into a value

use std::marker::PhantomData;

use crate::error::Result;
use crate::traits::{FromRow, Row};

/// Converts the current row of a cursor into a `T`.
///
/// `index` is the zero-based position of the row in its result set. The row
/// is only valid for the duration of the call.
pub trait Mapper<T> {
    fn map(&mut self, row: &dyn Row, index: usize) -> Result<T>;
}

impl<T, M: Mapper<T> + ?Sized> Mapper<T> for &mut M {
    fn map(&mut self, row: &dyn Row, index: usize) -> Result<T> {
        (**self).map(row, index)
    }
}

/// Index-aware closure mapper, see [`with_index`].
pub struct WithIndex<F>(F);

impl<T, F> Mapper<T> for WithIndex<F>
where
    F: FnMut(&dyn Row, usize) -> Result<T>,
{
    fn map(&mut self, row: &dyn Row, index: usize) -> Result<T> {
        (self.0)(row, index)
    }
}

/// Closure mapper that ignores the row index, see [`plain`].
pub struct Plain<F>(F);

impl<T, F> Mapper<T> for Plain<F>
where
    F: FnMut(&dyn Row) -> Result<T>,
{
    fn map(&mut self, row: &dyn Row, index: usize) -> Result<T> {
        let f = &mut self.0;
        with_index(|row: &dyn Row, _| f(row)).map(row, index)
    }
}

/// Wrap a `(row, index)` closure as a mapper.
///
/// ```ignore
/// let numbered = conn
///     .execute_list_with("SELECT FirstName FROM Customer", &[], with_index(|row, i| {
///         Ok(format!("{}. {}", i + 1, row.get::<String>("FirstName")?))
///     }))
///     .await?;
/// ```
pub fn with_index<T, F>(f: F) -> WithIndex<F>
where
    F: FnMut(&dyn Row, usize) -> Result<T>,
{
    WithIndex(f)
}

/// Wrap a `row` closure as a mapper.
pub fn plain<T, F>(f: F) -> Plain<F>
where
    F: FnMut(&dyn Row) -> Result<T>,
{
    Plain(f)
}

/// Mapper backed by a type's [`FromRow`] implementation.
pub struct FromRowMapper<T>(PhantomData<fn() -> T>);

impl<T> FromRowMapper<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for FromRowMapper<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FromRow> Mapper<T> for FromRowMapper<T> {
    fn map(&mut self, row: &dyn Row, _index: usize) -> Result<T> {
        T::from_row(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::DbRow;
    use crate::traits::RowExt;
    use crate::value::Value;

    fn row() -> DbRow {
        DbRow::new(vec!["FirstName".into()], vec![Value::Text("Ada".into())])
    }

    #[test]
    fn test_plain_ignores_index() {
        let mut mapper = plain(|row: &dyn Row| row.get::<String>("FirstName"));
        assert_eq!(mapper.map(&row(), 7).unwrap(), "Ada");
    }

    #[test]
    fn test_with_index_sees_index() {
        let mut mapper = with_index(|row: &dyn Row, i| {
            Ok(format!("{}:{}", i, row.get::<String>("FirstName")?))
        });
        assert_eq!(mapper.map(&row(), 3).unwrap(), "3:Ada");
    }

    #[test]
    fn test_mutable_borrow_is_a_mapper() {
        let mut calls = 0;
        let mut inner = plain(|_: &dyn Row| {
            calls += 1;
            Ok(())
        });
        fn run<M: Mapper<()>>(mut mapper: M) {
            mapper.map(&row(), 0).unwrap();
        }
        run(&mut inner);
        run(&mut inner);
        drop(inner);
        assert_eq!(calls, 2);
    }
}
