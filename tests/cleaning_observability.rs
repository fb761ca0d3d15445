use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use rust_data_cleaning::engineering::{
    remove_columns_by_name_with, remove_columns_by_percentage_with, CleaningOptions,
};
use rust_data_cleaning::observability::{
    CleaningObserver, CleaningOperation, ColumnRemoved, CompositeObserver, FileObserver,
    TracingObserver,
};
use rust_data_cleaning::types::{DataSet, DataType, Field, Schema, Value};
use rust_data_cleaning::CleaningError;

#[derive(Default)]
struct RecordingObserver {
    removed: Mutex<Vec<(CleaningOperation, String)>>,
    failures: Mutex<Vec<CleaningOperation>>,
}

impl CleaningObserver for RecordingObserver {
    fn on_column_removed(&self, op: CleaningOperation, event: &ColumnRemoved) {
        self.removed.lock().unwrap().push((op, event.column.clone()));
    }

    fn on_failure(&self, op: CleaningOperation, _error: &CleaningError) {
        self.failures.lock().unwrap().push(op);
    }
}

fn tmp_file(ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("rust-data-cleaning-observer-{nanos}.{ext}"))
}

fn dataset() -> DataSet {
    let schema = Schema::new(vec![
        Field::new("full", DataType::Int64),
        Field::new("half", DataType::Int64),
        Field::new("empty", DataType::Int64),
    ]);
    DataSet::new(
        schema,
        vec![
            vec![Value::Int64(1), Value::Int64(1), Value::Null],
            vec![Value::Int64(2), Value::Null, Value::Null],
        ],
    )
}

#[test]
fn composite_observer_fans_out_to_file_and_recorder() {
    let path = tmp_file("log");
    let recorder = Arc::new(RecordingObserver::default());
    let observers: Vec<Arc<dyn CleaningObserver>> = vec![
        recorder.clone(),
        Arc::new(FileObserver::new(&path)),
        Arc::new(TracingObserver),
    ];
    let composite = CompositeObserver::new(observers);
    let opts = CleaningOptions {
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    let out = remove_columns_by_percentage_with(&dataset(), 0.6, &opts).unwrap();
    assert_eq!(out.removed, 2);
    let _ = remove_columns_by_name_with(&out.dataset, &["full"], &opts).unwrap();

    assert_eq!(
        *recorder.removed.lock().unwrap(),
        vec![
            (CleaningOperation::ByPercentage, "half".to_string()),
            (CleaningOperation::ByPercentage, "empty".to_string()),
            (CleaningOperation::ByName, "full".to_string()),
        ]
    );

    let log = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].contains("removed op=ByPercentage column=half fill_ratio=0.5000"));
    assert!(lines[2].contains("ok op=ByPercentage columns_before=3 removed=2"));
    assert!(lines[3].contains("removed op=ByName column=full"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn observer_receives_failures_before_error_returns() {
    let recorder = Arc::new(RecordingObserver::default());
    let opts = CleaningOptions {
        observer: Some(recorder.clone()),
        ..Default::default()
    };

    let err = remove_columns_by_percentage_with(&dataset(), -0.1, &opts).unwrap_err();
    assert!(matches!(err, CleaningError::InvalidArgument { .. }));
    let err = remove_columns_by_name_with(&dataset(), &["missing"], &opts).unwrap_err();
    assert!(matches!(err, CleaningError::ColumnNotFound(_)));

    assert_eq!(
        *recorder.failures.lock().unwrap(),
        vec![CleaningOperation::ByPercentage, CleaningOperation::ByName]
    );
    assert!(recorder.removed.lock().unwrap().is_empty());
}
