//! Missing-value reporting (the "data analysis" half of the crate).
//!
//! - [`show_columns_population`]: print a missingness chart to stdout
//! - [`render_columns_population`]: the same chart written to any [`std::io::Write`]
//! - [`columns_population`] / [`population_report_json`]: the per-column summary behind the
//!   bar chart
//!
//! Chart modes are the closed set [`ChartKind`]; the string form accepted by
//! [`show_columns_population`] is validated before anything is written.
//!
//! ## Example
//!
//! ```rust
//! use rust_data_cleaning::analysis::{render_columns_population, ChartKind, ChartOptions};
//! use rust_data_cleaning::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let ds = DataSet::new(
//!     Schema::new(vec![Field::new("a", DataType::Int64)]),
//!     vec![vec![Value::Int64(1)], vec![Value::Null]],
//! );
//!
//! let mut out = Vec::new();
//! render_columns_population(&ds, ChartKind::Bar, &ChartOptions::default(), &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().ends_with("1/2 (50.00%)\n"));
//!
//! assert!("pie".parse::<ChartKind>().is_err());
//! ```

mod bar;
mod matrix;
pub mod population;

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use tracing::debug;

use crate::dataset::{require_unique_columns, Dataset};
use crate::error::{CleaningError, CleaningResult};

pub use population::{columns_population, population_report_json, ColumnPopulation};

/// Supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Presence/absence matrix across rows and columns.
    Matrix,
    /// Non-missing count per column.
    Bar,
}

impl FromStr for ChartKind {
    type Err = CleaningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "matrix" => Ok(Self::Matrix),
            "bar" => Ok(Self::Bar),
            other => Err(CleaningError::invalid_argument(format!(
                "chart type must be 'matrix' or 'bar', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Matrix => "matrix",
            Self::Bar => "bar",
        })
    }
}

/// Rendering options shared by both chart kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    /// Matrix lines before rows are bucketed. Must be > 0.
    pub max_rows: usize,
    /// Bar length in cells for a fully populated column. Must be > 0.
    pub bar_width: usize,
    /// Glyph for present cells / filled bar cells.
    pub present_glyph: char,
    /// Glyph for missing cells / bar padding.
    pub missing_glyph: char,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            max_rows: 50,
            bar_width: 40,
            present_glyph: '█',
            missing_glyph: ' ',
        }
    }
}

impl ChartOptions {
    fn validate(&self) -> CleaningResult<()> {
        if self.max_rows == 0 {
            return Err(CleaningError::invalid_argument("max_rows must be > 0"));
        }
        if self.bar_width == 0 {
            return Err(CleaningError::invalid_argument("bar_width must be > 0"));
        }
        Ok(())
    }
}

/// Prints a missingness chart of `dataset` to stdout.
///
/// `kind` must be `"matrix"` or `"bar"`.
///
/// # Errors
///
/// [`CleaningError::InvalidArgument`] for any other `kind`; [`CleaningError::Io`] if stdout
/// cannot be written.
pub fn show_columns_population<D: Dataset>(dataset: &D, kind: &str) -> CleaningResult<()> {
    let kind: ChartKind = kind.parse()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_columns_population(dataset, kind, &ChartOptions::default(), &mut out)?;
    out.flush()?;
    Ok(())
}

/// Writes a missingness chart of `dataset` to `out`.
pub fn render_columns_population<D, W>(
    dataset: &D,
    kind: ChartKind,
    options: &ChartOptions,
    out: &mut W,
) -> CleaningResult<()>
where
    D: Dataset,
    W: Write + ?Sized,
{
    options.validate()?;
    require_unique_columns(dataset)?;
    debug!(%kind, rows = dataset.row_count(), "rendering population chart");
    match kind {
        ChartKind::Matrix => matrix::render_matrix(dataset, options, out),
        ChartKind::Bar => bar::render_bar(dataset, options, out),
    }
}
