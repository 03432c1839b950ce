//! Loader, memoization and export round-trip tests

use std::sync::Arc;

use zipscope::data::export::{select_columns, view_to_csv};
use zipscope::data::filter::View;
use zipscope::data::loader::{load_csv, CachedLoader};
use zipscope::data::model::Field;

#[path = "common/mod.rs"]
mod common;

/// Export the full schema and reload it: the records must survive intact.
#[test]
fn csv_round_trip_preserves_records() {
    let ds = common::scenario_dataset();
    let fields: Vec<Field> = Field::ALL.to_vec();
    let csv_text = view_to_csv(&View::all(&ds), &fields).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    std::fs::write(&path, csv_text).unwrap();

    let reloaded = load_csv(&path).unwrap();
    assert_eq!(reloaded.records, ds.records);
}

#[test]
fn round_trip_of_a_projected_subset_keeps_row_order() {
    let ds = common::scenario_dataset();
    let fields = select_columns(&["zip_code", "primary_city", "composite_score"]).unwrap();
    let csv_text = view_to_csv(&View::all(&ds).search("Los"), &fields).unwrap();

    let lines: Vec<&str> = csv_text.lines().collect();
    assert_eq!(lines[0], "zip_code,primary_city,composite_score");
    assert_eq!(lines[1], "90001,Los Angeles,10");
    assert_eq!(lines[2], "90002,Los Angeles,50");
    assert_eq!(lines.len(), 3);
}

#[test]
fn cached_loader_invalidates_on_modification() {
    let ds = common::scenario_dataset();
    let csv_text = view_to_csv(&View::all(&ds), &Field::ALL.to_vec()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.csv");
    std::fs::write(&path, &csv_text).unwrap();

    let mut loader = CachedLoader::new();
    let first = loader.load(&path).unwrap();
    let again = loader.load(&path).unwrap();
    assert!(Arc::ptr_eq(&first, &again));

    // Rewrite with one record fewer and an older-but-different mtime.
    let shorter: String = csv_text
        .lines()
        .take(3)
        .map(|l| format!("{l}\n"))
        .collect();
    std::fs::write(&path, shorter).unwrap();
    let mtime = std::time::SystemTime::now() - std::time::Duration::from_secs(60);
    let f = std::fs::File::options().write(true).open(&path).unwrap();
    f.set_modified(mtime).unwrap();

    let reloaded = loader.load(&path).unwrap();
    assert!(!Arc::ptr_eq(&first, &reloaded));
    assert_eq!(reloaded.len(), 2);
}
