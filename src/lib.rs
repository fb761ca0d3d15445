//! `rust-data-cleaning` provides column-level cleaning and missing-value reporting for tabular
//! data.
//!
//! Every operation works against the [`dataset::Dataset`] trait, which is implemented for the
//! in-memory [`types::DataSet`] and for polars' `DataFrame`. Operations borrow their input and
//! return a new table; nothing is mutated in place.
//!
//! ## Cleaning
//!
//! - [`engineering::remove_columns_by_percentage`]: drop columns whose fill ratio (share of
//!   non-missing cells) is strictly below a threshold in `[0, 1]`, with one log line per
//!   removed column
//! - [`engineering::remove_columns_by_name`]: drop an explicit list of columns (unknown names
//!   fail with [`CleaningError::ColumnNotFound`] unless
//!   [`engineering::UnknownColumnPolicy::Ignore`] is set)
//!
//! ```rust
//! use rust_data_cleaning::dataset::Dataset;
//! use rust_data_cleaning::engineering::{remove_columns_by_name, remove_columns_by_percentage};
//! use rust_data_cleaning::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("id", DataType::Int64),
//!     Field::new("email", DataType::Utf8),
//!     Field::new("fax", DataType::Utf8),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(1), Value::Utf8("a@x.io".to_string()), Value::Null],
//!         vec![Value::Int64(2), Value::Null, Value::Null],
//!     ],
//! );
//!
//! let sparse = remove_columns_by_percentage(&ds, 0.5)?;
//! assert_eq!(sparse.dataset.column_names(), vec!["id", "email"]);
//! assert_eq!(sparse.removed, 1);
//!
//! let no_email = remove_columns_by_name(&sparse.dataset, &["email"])?;
//! assert_eq!(no_email.column_names(), vec!["id"]);
//! # Ok::<(), rust_data_cleaning::CleaningError>(())
//! ```
//!
//! ## Reporting
//!
//! [`analysis::show_columns_population`] prints a missingness matrix (`"matrix"`) or a
//! per-column population bar chart (`"bar"`); [`analysis::render_columns_population`] writes
//! the same chart to any writer.
//!
//! ## Modules
//!
//! - [`types`]: schema + in-memory dataset types
//! - [`dataset`]: the table capability trait and its adapters
//! - [`engineering`]: column removal
//! - [`analysis`]: population summaries and charts
//! - [`ingestion`]: CSV loading with configurable missing-value markers
//! - [`observability`]: observer hooks for removal decisions
//! - [`error`]: the crate error type

pub mod analysis;
pub mod dataset;
pub mod engineering;
pub mod error;
pub mod ingestion;
pub mod observability;
pub mod types;

pub use error::{CleaningError, CleaningResult};
