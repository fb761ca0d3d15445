//! The column-level capability the cleaning and analysis operations need from a table.
//!
//! Two adapters ship with the crate:
//!
//! - [`crate::types::DataSet`], the in-memory table used throughout the tests
//! - [`polars::prelude::DataFrame`], where polars nulls and float NaN count as missing
//!
//! ```rust
//! use rust_data_cleaning::dataset::Dataset;
//! use rust_data_cleaning::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let ds = DataSet::new(
//!     Schema::new(vec![Field::new("a", DataType::Int64), Field::new("b", DataType::Utf8)]),
//!     vec![
//!         vec![Value::Int64(1), Value::Null],
//!         vec![Value::Int64(2), Value::Utf8("x".to_string())],
//!     ],
//! );
//!
//! assert_eq!(ds.column_names(), vec!["a", "b"]);
//! assert_eq!(ds.non_missing_count("b").unwrap(), 1);
//! let only_a = ds.drop_columns(&["b"]).unwrap();
//! assert_eq!(only_a.column_names(), vec!["a"]);
//! ```

use std::collections::HashSet;

use polars::prelude::{DataFrame, DataType as PolarsDataType, PlSmallStr};

use crate::error::{CleaningError, CleaningResult};
use crate::types::DataSet;

/// A table of named, ordered columns whose cells may be missing.
///
/// Every column is assumed to have [`Dataset::row_count`] cells. Implementations never mutate
/// `self`; `select_columns`/`drop_columns` build a new table.
pub trait Dataset: Sized {
    /// Column names in table order.
    fn column_names(&self) -> Vec<String>;

    /// Number of rows shared by all columns.
    fn row_count(&self) -> usize;

    /// Number of non-missing cells in `column`.
    fn non_missing_count(&self, column: &str) -> CleaningResult<usize>;

    /// Per-row presence flags for `column` (`true` = value recorded).
    fn presence(&self, column: &str) -> CleaningResult<Vec<bool>>;

    /// New table holding `columns`, in the order given.
    fn select_columns(&self, columns: &[&str]) -> CleaningResult<Self>;

    /// New table without `columns`; the remaining columns keep their order.
    fn drop_columns(&self, columns: &[&str]) -> CleaningResult<Self>;

    /// Returns `true` if the table has a column called `name`.
    fn has_column(&self, name: &str) -> bool {
        self.column_names().iter().any(|c| c == name)
    }
}

/// Fails with [`CleaningError::ColumnNotFound`] on the first name `dataset` does not have.
pub(crate) fn require_columns<D: Dataset>(dataset: &D, columns: &[&str]) -> CleaningResult<()> {
    match columns.iter().find(|c| !dataset.has_column(c)) {
        Some(missing) => Err(CleaningError::ColumnNotFound((*missing).to_string())),
        None => Ok(()),
    }
}

/// Fails with [`CleaningError::InvalidArgument`] on the first column name that repeats.
pub(crate) fn require_unique_columns<D: Dataset>(dataset: &D) -> CleaningResult<()> {
    let names = dataset.column_names();
    let mut seen = HashSet::with_capacity(names.len());
    match names.iter().find(|name| !seen.insert(name.as_str())) {
        Some(dup) => Err(CleaningError::invalid_argument(format!(
            "duplicate column name '{dup}'"
        ))),
        None => Ok(()),
    }
}

impl DataSet {
    fn column_index(&self, column: &str) -> CleaningResult<usize> {
        self.schema
            .index_of(column)
            .ok_or_else(|| CleaningError::ColumnNotFound(column.to_string()))
    }
}

impl Dataset for DataSet {
    fn column_names(&self) -> Vec<String> {
        self.schema.field_names().map(str::to_string).collect()
    }

    fn row_count(&self) -> usize {
        DataSet::row_count(self)
    }

    fn non_missing_count(&self, column: &str) -> CleaningResult<usize> {
        let idx = self.column_index(column)?;
        Ok(self.column_values(idx).filter(|v| !v.is_missing()).count())
    }

    fn presence(&self, column: &str) -> CleaningResult<Vec<bool>> {
        let idx = self.column_index(column)?;
        Ok(self.column_values(idx).map(|v| !v.is_missing()).collect())
    }

    fn select_columns(&self, columns: &[&str]) -> CleaningResult<Self> {
        let indices = columns
            .iter()
            .map(|c| self.column_index(c))
            .collect::<CleaningResult<Vec<_>>>()?;
        Ok(self.project(&indices))
    }

    fn drop_columns(&self, columns: &[&str]) -> CleaningResult<Self> {
        require_columns(self, columns)?;
        let keep = self
            .schema
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| !columns.contains(&f.name.as_str()))
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        Ok(self.project(&keep))
    }

    fn has_column(&self, name: &str) -> bool {
        self.schema.index_of(name).is_some()
    }
}

impl Dataset for DataFrame {
    fn column_names(&self) -> Vec<String> {
        self.get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    fn row_count(&self) -> usize {
        self.height()
    }

    fn non_missing_count(&self, column: &str) -> CleaningResult<usize> {
        Ok(self.presence(column)?.into_iter().filter(|p| *p).count())
    }

    fn presence(&self, column: &str) -> CleaningResult<Vec<bool>> {
        let col = self
            .column(column)
            .map_err(|_| CleaningError::ColumnNotFound(column.to_string()))?;
        let series = col.as_materialized_series();

        if series.dtype().is_float() {
            let floats = series.cast(&PolarsDataType::Float64)?;
            let present = floats
                .f64()?
                .into_iter()
                .map(|v| v.is_some_and(|x| !x.is_nan()))
                .collect();
            return Ok(present);
        }

        let mask = series.is_not_null();
        Ok((&mask).into_iter().map(|v| v == Some(true)).collect())
    }

    fn select_columns(&self, columns: &[&str]) -> CleaningResult<Self> {
        require_columns(self, columns)?;
        Ok(DataFrame::select(self, columns.iter().copied())?)
    }

    fn drop_columns(&self, columns: &[&str]) -> CleaningResult<Self> {
        require_columns(self, columns)?;
        let names: Vec<PlSmallStr> = columns.iter().map(|c| (*c).into()).collect();
        Ok(self.drop_many(names))
    }
}
