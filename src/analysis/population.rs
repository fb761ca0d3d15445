//! Per-column population summary.

use serde::Serialize;

use crate::dataset::{require_unique_columns, Dataset};
use crate::engineering::ratio;
use crate::error::CleaningResult;

/// How many cells of one column hold a value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnPopulation {
    /// Column name.
    pub name: String,
    /// Number of non-missing cells.
    pub non_missing: usize,
    /// Number of missing cells.
    pub missing: usize,
    /// Number of rows in the table.
    pub rows: usize,
    /// `non_missing / rows`, or `0.0` for a table with no rows.
    pub fill_ratio: f64,
}

/// Population summary for every column, in table order.
///
/// Fails with [`crate::CleaningError::InvalidArgument`] if two columns share a name.
pub fn columns_population<D: Dataset>(dataset: &D) -> CleaningResult<Vec<ColumnPopulation>> {
    require_unique_columns(dataset)?;
    let rows = dataset.row_count();
    dataset
        .column_names()
        .into_iter()
        .map(|name| {
            let non_missing = dataset.non_missing_count(&name)?;
            Ok(ColumnPopulation {
                name,
                non_missing,
                missing: rows.saturating_sub(non_missing),
                rows,
                fill_ratio: ratio(non_missing, rows),
            })
        })
        .collect()
}

/// [`columns_population`] serialized as pretty-printed JSON.
pub fn population_report_json<D: Dataset>(dataset: &D) -> CleaningResult<String> {
    let report = columns_population(dataset)?;
    Ok(serde_json::to_string_pretty(&report)?)
}
