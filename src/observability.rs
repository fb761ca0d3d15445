//! Observer hooks for column-removal operations.
//!
//! Operations in [`crate::engineering`] report each removed column, the final outcome, and
//! any validation failure to the observer configured in
//! [`crate::engineering::CleaningOptions`]. Implementors can record metrics, write logs, or
//! collect the removal decisions for an audit trail.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::CleaningError;

/// Which column-removal operation produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleaningOperation {
    /// Removal of columns whose fill ratio is below a threshold.
    ByPercentage,
    /// Removal of explicitly named columns.
    ByName,
}

/// A single column-removal decision.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRemoved {
    /// Removed column.
    pub column: String,
    /// Fill ratio of the column at removal time, when the operation computed one.
    pub fill_ratio: Option<f64>,
}

/// Summary reported once an operation succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleaningStats {
    /// Number of columns in the input.
    pub columns_before: usize,
    /// Number of columns removed.
    pub columns_removed: usize,
}

/// Observer interface for column-removal operations.
pub trait CleaningObserver: Send + Sync {
    /// Called once per removed column, in original column order.
    fn on_column_removed(&self, _op: CleaningOperation, _event: &ColumnRemoved) {}

    /// Called when an operation succeeds.
    fn on_completed(&self, _op: CleaningOperation, _stats: CleaningStats) {}

    /// Called when an operation fails validation, before the error is returned.
    fn on_failure(&self, _op: CleaningOperation, _error: &CleaningError) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn CleaningObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn CleaningObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl CleaningObserver for CompositeObserver {
    fn on_column_removed(&self, op: CleaningOperation, event: &ColumnRemoved) {
        for o in &self.observers {
            o.on_column_removed(op, event);
        }
    }

    fn on_completed(&self, op: CleaningOperation, stats: CleaningStats) {
        for o in &self.observers {
            o.on_completed(op, stats);
        }
    }

    fn on_failure(&self, op: CleaningOperation, error: &CleaningError) {
        for o in &self.observers {
            o.on_failure(op, error);
        }
    }
}

/// Forwards events to `tracing` under the `cleaning` target.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl CleaningObserver for TracingObserver {
    fn on_column_removed(&self, op: CleaningOperation, event: &ColumnRemoved) {
        tracing::info!(
            target: "cleaning",
            ?op,
            column = %event.column,
            fill_ratio = ?event.fill_ratio,
            "column removed"
        );
    }

    fn on_completed(&self, op: CleaningOperation, stats: CleaningStats) {
        tracing::info!(
            target: "cleaning",
            ?op,
            columns_before = stats.columns_before,
            columns_removed = stats.columns_removed,
            "cleaning completed"
        );
    }

    fn on_failure(&self, op: CleaningOperation, error: &CleaningError) {
        tracing::warn!(target: "cleaning", ?op, %error, "cleaning failed");
    }
}

/// Appends events to a local log file, one line per event.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl CleaningObserver for FileObserver {
    fn on_column_removed(&self, op: CleaningOperation, event: &ColumnRemoved) {
        let ratio = event
            .fill_ratio
            .map(|r| format!(" fill_ratio={r:.4}"))
            .unwrap_or_default();
        self.append_line(&format!(
            "{} removed op={:?} column={}{}",
            unix_ts(),
            op,
            event.column,
            ratio
        ));
    }

    fn on_completed(&self, op: CleaningOperation, stats: CleaningStats) {
        self.append_line(&format!(
            "{} ok op={:?} columns_before={} removed={}",
            unix_ts(),
            op,
            stats.columns_before,
            stats.columns_removed
        ));
    }

    fn on_failure(&self, op: CleaningOperation, error: &CleaningError) {
        self.append_line(&format!("{} fail op={:?} err={}", unix_ts(), op, error));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
