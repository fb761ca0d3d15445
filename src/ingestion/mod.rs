//! Loading tables from CSV.
//!
//! [`read_csv_path`] and [`read_csv_reader`] build a [`crate::types::DataSet`] from CSV with
//! headers, using a caller-provided [`crate::types::Schema`]. Cells matching
//! [`NullMarkers`] become [`crate::types::Value::Null`], so the usual spellings of "no value"
//! (`NA`, `N/A`, `NaN`, `null`, ...) count as missing in the cleaning and analysis operations.

pub mod csv;

pub use csv::{read_csv_path, read_csv_reader};

/// Cell spellings treated as missing during ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullMarkers {
    /// Markers compared against each cell.
    pub markers: Vec<String>,
    /// Trim surrounding whitespace before comparing.
    pub trim: bool,
    /// Compare case-sensitively.
    pub case_sensitive: bool,
}

impl Default for NullMarkers {
    fn default() -> Self {
        Self {
            markers: ["", "NA", "N/A", "NaN", "null", "None"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            trim: true,
            case_sensitive: false,
        }
    }
}

impl NullMarkers {
    /// Only empty cells are missing.
    pub fn empty_only() -> Self {
        Self {
            markers: vec![String::new()],
            ..Self::default()
        }
    }

    /// Returns `true` if `raw` should be read as a missing value.
    pub fn is_null(&self, raw: &str) -> bool {
        let cell = if self.trim { raw.trim() } else { raw };
        self.markers.iter().any(|m| {
            if self.case_sensitive {
                cell == m.as_str()
            } else {
                cell.eq_ignore_ascii_case(m)
            }
        })
    }
}
