//! Column-removal operations (the "data engineering" half of the crate).
//!
//! - [`remove_columns_by_percentage`]: drop columns whose fill ratio is below a threshold
//! - [`remove_columns_by_name`]: drop an explicit list of columns
//!
//! Both work on any [`Dataset`] and return a new table; the input is never modified.
//!
//! ```rust
//! use rust_data_cleaning::dataset::Dataset;
//! use rust_data_cleaning::engineering::remove_columns_by_percentage;
//! use rust_data_cleaning::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let ds = DataSet::new(
//!     Schema::new(vec![Field::new("a", DataType::Int64), Field::new("b", DataType::Int64)]),
//!     vec![
//!         vec![Value::Int64(1), Value::Null],
//!         vec![Value::Int64(2), Value::Null],
//!     ],
//! );
//!
//! let out = remove_columns_by_percentage(&ds, 0.5).unwrap();
//! assert_eq!(out.dataset.column_names(), vec!["a"]);
//! assert_eq!(out.removed, 1);
//! assert_eq!(out.logs, vec!["column 'b' removed: only 0.0% populated values"]);
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::dataset::{require_columns, require_unique_columns, Dataset};
use crate::error::{CleaningError, CleaningResult};
use crate::observability::{CleaningObserver, CleaningOperation, CleaningStats, ColumnRemoved};

/// What to do with names passed to [`remove_columns_by_name_with`] that the table lacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownColumnPolicy {
    /// Fail with [`CleaningError::ColumnNotFound`] (default).
    #[default]
    Error,
    /// Skip unknown names.
    Ignore,
}

/// Options controlling column removal.
///
/// Use [`Default`] for common cases.
#[derive(Clone, Default)]
pub struct CleaningOptions {
    /// Optional observer for removal decisions and failures.
    pub observer: Option<Arc<dyn CleaningObserver>>,
    /// Handling of unknown names in by-name removal.
    pub unknown_columns: UnknownColumnPolicy,
}

impl fmt::Debug for CleaningOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleaningOptions")
            .field("observer_set", &self.observer.is_some())
            .field("unknown_columns", &self.unknown_columns)
            .finish()
    }
}

impl CleaningOptions {
    fn emit_removed(&self, op: CleaningOperation, event: &ColumnRemoved) {
        if let Some(obs) = &self.observer {
            obs.on_column_removed(op, event);
        }
    }

    fn emit_completed(&self, op: CleaningOperation, stats: CleaningStats) {
        if let Some(obs) = &self.observer {
            obs.on_completed(op, stats);
        }
    }

    fn fail<T>(&self, op: CleaningOperation, error: CleaningError) -> CleaningResult<T> {
        if let Some(obs) = &self.observer {
            obs.on_failure(op, &error);
        }
        Err(error)
    }
}

/// Result of [`remove_columns_by_percentage`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRemoval<D> {
    /// The table without the removed columns, in original column order.
    pub dataset: D,
    /// One message per removed column, in original column order.
    pub logs: Vec<String>,
    /// Number of removed columns.
    pub removed: usize,
}

/// Fraction of rows in `column` holding a value.
///
/// A table with no rows has a fill ratio of `0.0` for every column.
pub fn fill_ratio<D: Dataset>(dataset: &D, column: &str) -> CleaningResult<f64> {
    let non_missing = dataset.non_missing_count(column)?;
    Ok(ratio(non_missing, dataset.row_count()))
}

pub(crate) fn ratio(non_missing: usize, rows: usize) -> f64 {
    if rows == 0 {
        0.0
    } else {
        non_missing as f64 / rows as f64
    }
}

/// Removes every column whose fill ratio is strictly below `percent` (a fraction in `[0, 1]`).
///
/// Returns the filtered table, one log message per removed column, and the removal count.
///
/// # Errors
///
/// [`CleaningError::InvalidArgument`] if `percent` is outside `[0, 1]` or NaN, or if two
/// columns share a name.
pub fn remove_columns_by_percentage<D: Dataset>(
    dataset: &D,
    percent: f64,
) -> CleaningResult<ColumnRemoval<D>> {
    remove_columns_by_percentage_with(dataset, percent, &CleaningOptions::default())
}

/// [`remove_columns_by_percentage`] with explicit [`CleaningOptions`].
///
/// Every failure, including ones raised by the table adapter, is reported to the observer
/// before it is returned.
pub fn remove_columns_by_percentage_with<D: Dataset>(
    dataset: &D,
    percent: f64,
    options: &CleaningOptions,
) -> CleaningResult<ColumnRemoval<D>> {
    let op = CleaningOperation::ByPercentage;
    match remove_sparse_columns(dataset, percent, options) {
        Ok(out) => Ok(out),
        Err(e) => options.fail(op, e),
    }
}

fn remove_sparse_columns<D: Dataset>(
    dataset: &D,
    percent: f64,
    options: &CleaningOptions,
) -> CleaningResult<ColumnRemoval<D>> {
    let op = CleaningOperation::ByPercentage;
    if !(0.0..=1.0).contains(&percent) {
        return Err(CleaningError::invalid_argument(format!(
            "percent must be between 0 and 1, got {percent}"
        )));
    }
    // Columns are scored by name, so a repeated name would be scored twice as the first one.
    require_unique_columns(dataset)?;

    let columns = dataset.column_names();
    let mut to_remove: Vec<&str> = Vec::new();
    let mut logs = Vec::new();

    for column in &columns {
        let fill = fill_ratio(dataset, column)?;
        if fill < percent {
            let message = format!(
                "column '{column}' removed: only {}% populated values",
                format_percentage(fill)
            );
            debug!(
                column = %column,
                fill_ratio = fill,
                threshold = percent,
                "removing sparse column"
            );
            options.emit_removed(
                op,
                &ColumnRemoved {
                    column: column.clone(),
                    fill_ratio: Some(fill),
                },
            );
            logs.push(message);
            to_remove.push(column);
        }
    }

    let out = dataset.drop_columns(&to_remove)?;
    let removed = to_remove.len();
    info!(
        columns_before = columns.len(),
        removed,
        threshold = percent,
        "removed sparse columns"
    );
    options.emit_completed(
        op,
        CleaningStats {
            columns_before: columns.len(),
            columns_removed: removed,
        },
    );

    Ok(ColumnRemoval {
        dataset: out,
        logs,
        removed,
    })
}

/// Removes the named columns. Unknown names fail with [`CleaningError::ColumnNotFound`].
///
/// An empty `columns` list returns a table equal to the input.
pub fn remove_columns_by_name<D, S>(dataset: &D, columns: &[S]) -> CleaningResult<D>
where
    D: Dataset,
    S: AsRef<str>,
{
    remove_columns_by_name_with(dataset, columns, &CleaningOptions::default())
}

/// [`remove_columns_by_name`] with explicit [`CleaningOptions`].
///
/// With [`UnknownColumnPolicy::Ignore`], names the table lacks are skipped.
pub fn remove_columns_by_name_with<D, S>(
    dataset: &D,
    columns: &[S],
    options: &CleaningOptions,
) -> CleaningResult<D>
where
    D: Dataset,
    S: AsRef<str>,
{
    let op = CleaningOperation::ByName;
    let requested: Vec<&str> = columns.iter().map(AsRef::as_ref).collect();
    match remove_named_columns(dataset, requested, options) {
        Ok(out) => Ok(out),
        Err(e) => options.fail(op, e),
    }
}

fn remove_named_columns<D: Dataset>(
    dataset: &D,
    requested: Vec<&str>,
    options: &CleaningOptions,
) -> CleaningResult<D> {
    let op = CleaningOperation::ByName;
    let targets: Vec<&str> = match options.unknown_columns {
        UnknownColumnPolicy::Error => {
            require_columns(dataset, &requested)?;
            requested
        }
        UnknownColumnPolicy::Ignore => requested
            .into_iter()
            .filter(|c| dataset.has_column(c))
            .collect(),
    };

    let columns_before = dataset.column_names();
    for column in columns_before.iter().filter(|c| targets.contains(&c.as_str())) {
        debug!(column = %column, "removing named column");
        options.emit_removed(
            op,
            &ColumnRemoved {
                column: column.clone(),
                fill_ratio: None,
            },
        );
    }

    let out = dataset.drop_columns(&targets)?;
    options.emit_completed(
        op,
        CleaningStats {
            columns_before: columns_before.len(),
            columns_removed: columns_before.len() - out.column_names().len(),
        },
    );
    Ok(out)
}

/// `ratio` as a percentage rounded half-to-even to two decimals: `40.0`, `12.5`, `33.33`.
fn format_percentage(ratio: f64) -> String {
    let pct = (ratio * 100.0 * 100.0).round_ties_even() / 100.0;
    if pct.fract() == 0.0 {
        format!("{pct:.1}")
    } else {
        format!("{pct}")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::{
        fill_ratio, format_percentage, remove_columns_by_name, remove_columns_by_name_with,
        remove_columns_by_percentage, remove_columns_by_percentage_with, CleaningOptions,
        UnknownColumnPolicy,
    };
    use crate::dataset::Dataset;
    use crate::error::{CleaningError, CleaningResult};
    use crate::observability::{CleaningObserver, CleaningOperation, CleaningStats, ColumnRemoved};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    /// Columns A (5/5 filled), B (2/5 filled), C (0/5 filled).
    fn abc_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("A", DataType::Int64),
            Field::new("B", DataType::Float64),
            Field::new("C", DataType::Utf8),
        ]);
        let rows = (0..5)
            .map(|i| {
                let b = if i < 2 { Value::Float64(i as f64) } else { Value::Null };
                vec![Value::Int64(i), b, Value::Null]
            })
            .collect();
        DataSet::new(schema, rows)
    }

    #[derive(Default)]
    struct RecordingObserver {
        removed: Mutex<Vec<String>>,
        completed: Mutex<Vec<CleaningStats>>,
        failures: Mutex<usize>,
    }

    impl CleaningObserver for RecordingObserver {
        fn on_column_removed(&self, _op: CleaningOperation, event: &ColumnRemoved) {
            self.removed.lock().unwrap().push(event.column.clone());
        }

        fn on_completed(&self, _op: CleaningOperation, stats: CleaningStats) {
            self.completed.lock().unwrap().push(stats);
        }

        fn on_failure(&self, _op: CleaningOperation, _error: &CleaningError) {
            *self.failures.lock().unwrap() += 1;
        }
    }

    #[test]
    fn removes_columns_below_threshold() {
        let ds = abc_dataset();
        let out = remove_columns_by_percentage(&ds, 0.5).unwrap();

        assert_eq!(out.dataset.column_names(), vec!["A"]);
        assert_eq!(out.removed, 2);
        assert_eq!(
            out.logs,
            vec![
                "column 'B' removed: only 40.0% populated values",
                "column 'C' removed: only 0.0% populated values",
            ]
        );
        // Original unchanged
        assert_eq!(ds.column_names(), vec!["A", "B", "C"]);
    }

    #[test]
    fn threshold_is_strict_less_than() {
        let ds = abc_dataset();
        let out = remove_columns_by_percentage(&ds, 0.4).unwrap();
        assert_eq!(out.dataset.column_names(), vec!["A", "B"]);
        assert_eq!(out.removed, 1);
    }

    #[test]
    fn zero_threshold_keeps_everything() {
        let ds = abc_dataset();
        let out = remove_columns_by_percentage(&ds, 0.0).unwrap();
        assert_eq!(out.dataset, ds);
        assert!(out.logs.is_empty());
        assert_eq!(out.removed, 0);
    }

    #[test]
    fn full_threshold_keeps_only_complete_columns() {
        let ds = abc_dataset();
        let out = remove_columns_by_percentage(&ds, 1.0).unwrap();
        assert_eq!(out.dataset.column_names(), vec!["A"]);
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let ds = abc_dataset();
        for bad in [-0.1, 1.5, f64::NAN] {
            let err = remove_columns_by_percentage(&ds, bad).unwrap_err();
            assert!(matches!(err, CleaningError::InvalidArgument { .. }), "{bad}");
        }
    }

    #[test]
    fn zero_row_dataset_has_zero_fill_ratio() {
        let schema = Schema::new(vec![
            Field::new("x", DataType::Int64),
            Field::new("y", DataType::Utf8),
        ]);
        let ds = DataSet::new(schema, Vec::new());

        let keep = remove_columns_by_percentage(&ds, 0.0).unwrap();
        assert_eq!(keep.removed, 0);

        let drop = remove_columns_by_percentage(&ds, 0.5).unwrap();
        assert_eq!(drop.removed, 2);
        assert!(drop.dataset.column_names().is_empty());
        assert_eq!(drop.logs[0], "column 'x' removed: only 0.0% populated values");
    }

    #[test]
    fn percentage_formatting_matches_two_decimal_rounding() {
        assert_eq!(format_percentage(0.4), "40.0");
        assert_eq!(format_percentage(0.125), "12.5");
        assert_eq!(format_percentage(1.0 / 3.0), "33.33");
        assert_eq!(format_percentage(0.0), "0.0");
        assert_eq!(format_percentage(2.0 / 3.0), "66.67");
        // 0.125% sits exactly halfway; ties go to the even digit.
        assert_eq!(format_percentage(1.0 / 800.0), "0.12");
    }

    #[test]
    fn fill_ratio_per_column() {
        let ds = abc_dataset();
        assert_eq!(fill_ratio(&ds, "A").unwrap(), 1.0);
        assert_eq!(fill_ratio(&ds, "B").unwrap(), 0.4);
        assert_eq!(fill_ratio(&ds, "C").unwrap(), 0.0);
        let err = fill_ratio(&ds, "Z").unwrap_err();
        assert!(matches!(err, CleaningError::ColumnNotFound(name) if name == "Z"));
    }

    #[test]
    fn repeated_column_names_are_rejected_by_percentage() {
        let schema = Schema::new(vec![
            Field::new("x", DataType::Int64),
            Field::new("x", DataType::Int64),
        ]);
        let ds = DataSet::new(schema, vec![vec![Value::Int64(1), Value::Null]]);
        let obs = Arc::new(RecordingObserver::default());
        let opts = CleaningOptions {
            observer: Some(obs.clone()),
            ..Default::default()
        };

        let err = remove_columns_by_percentage_with(&ds, 0.5, &opts).unwrap_err();
        assert!(matches!(err, CleaningError::InvalidArgument { .. }));
        assert!(obs.removed.lock().unwrap().is_empty());
        assert_eq!(*obs.failures.lock().unwrap(), 1);
    }

    /// A table whose column drops always fail, as a read-only backend would.
    #[derive(Debug)]
    struct ReadOnlyTable(DataSet);

    impl Dataset for ReadOnlyTable {
        fn column_names(&self) -> Vec<String> {
            self.0.column_names()
        }

        fn row_count(&self) -> usize {
            Dataset::row_count(&self.0)
        }

        fn non_missing_count(&self, column: &str) -> CleaningResult<usize> {
            self.0.non_missing_count(column)
        }

        fn presence(&self, column: &str) -> CleaningResult<Vec<bool>> {
            self.0.presence(column)
        }

        fn select_columns(&self, columns: &[&str]) -> CleaningResult<Self> {
            Ok(Self(self.0.select_columns(columns)?))
        }

        fn drop_columns(&self, _columns: &[&str]) -> CleaningResult<Self> {
            Err(CleaningError::SchemaMismatch {
                message: "table is read-only".to_string(),
            })
        }
    }

    #[test]
    fn table_failures_reach_the_observer() {
        let ds = ReadOnlyTable(abc_dataset());
        let obs = Arc::new(RecordingObserver::default());
        let opts = CleaningOptions {
            observer: Some(obs.clone()),
            ..Default::default()
        };

        let err = remove_columns_by_percentage_with(&ds, 0.5, &opts).unwrap_err();
        assert!(matches!(err, CleaningError::SchemaMismatch { .. }));
        assert_eq!(*obs.failures.lock().unwrap(), 1);

        let err = remove_columns_by_name_with(&ds, &["A"], &opts).unwrap_err();
        assert!(matches!(err, CleaningError::SchemaMismatch { .. }));
        assert_eq!(*obs.failures.lock().unwrap(), 2);
        assert!(obs.completed.lock().unwrap().is_empty());
    }

    #[test]
    fn observer_sees_each_removal_in_order() {
        let obs = Arc::new(RecordingObserver::default());
        let opts = CleaningOptions {
            observer: Some(obs.clone()),
            ..Default::default()
        };

        let _ = remove_columns_by_percentage_with(&abc_dataset(), 0.5, &opts).unwrap();

        assert_eq!(*obs.removed.lock().unwrap(), vec!["B", "C"]);
        assert_eq!(
            *obs.completed.lock().unwrap(),
            vec![CleaningStats {
                columns_before: 3,
                columns_removed: 2
            }]
        );

        let _ = remove_columns_by_percentage_with(&abc_dataset(), 2.0, &opts).unwrap_err();
        assert_eq!(*obs.failures.lock().unwrap(), 1);
    }

    #[test]
    fn remove_by_name_keeps_order() {
        let ds = abc_dataset();
        let out = remove_columns_by_name(&ds, &["B"]).unwrap();
        assert_eq!(out.column_names(), vec!["A", "C"]);
        assert_eq!(out.rows[0], vec![Value::Int64(0), Value::Null]);
    }

    #[test]
    fn remove_by_name_with_empty_list_is_identity() {
        let ds = abc_dataset();
        let none: [&str; 0] = [];
        assert_eq!(remove_columns_by_name(&ds, &none).unwrap(), ds);
    }

    #[test]
    fn remove_by_name_is_strict_by_default() {
        let ds = abc_dataset();
        let err = remove_columns_by_name(&ds, &["A", "Z"]).unwrap_err();
        assert!(matches!(err, CleaningError::ColumnNotFound(name) if name == "Z"));
    }

    #[test]
    fn remove_by_name_can_ignore_unknown_columns() {
        let ds = abc_dataset();
        let opts = CleaningOptions {
            unknown_columns: UnknownColumnPolicy::Ignore,
            ..Default::default()
        };
        let names = vec!["C".to_string(), "Z".to_string(), "C".to_string()];
        let out = remove_columns_by_name_with(&ds, &names, &opts).unwrap();
        assert_eq!(out.column_names(), vec!["A", "B"]);
    }
}
