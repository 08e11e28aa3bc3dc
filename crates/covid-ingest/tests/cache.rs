//! Integration tests for the dataset cache.

use std::fs;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use covid_ingest::{DatasetCache, LoadError, LoadOptions};

#[test]
fn reuses_dataset_while_file_is_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analysis.csv");
    fs::write(&path, "SEX\nFEMALE\n").unwrap();

    let mut cache = DatasetCache::new();
    let options = LoadOptions::permissive();
    let first = cache.get_or_load(&path, &options).unwrap();
    let second = cache.get_or_load(&path, &options).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn reloads_when_modification_time_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analysis.csv");
    fs::write(&path, "SEX\nFEMALE\n").unwrap();

    let mut cache = DatasetCache::new();
    let options = LoadOptions::permissive();
    let first = cache.get_or_load(&path, &options).unwrap();

    fs::write(&path, "SEX\nFEMALE\nMALE\n").unwrap();
    let file = fs::File::options().write(true).open(&path).unwrap();
    file.set_modified(SystemTime::now() + Duration::from_secs(60))
        .unwrap();

    let second = cache.get_or_load(&path, &options).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(second.record_count(), 2);
}

#[test]
fn reloads_when_options_change() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analysis.csv");
    fs::write(&path, "SEX\nFEMALE\n").unwrap();

    let mut cache = DatasetCache::new();
    let first = cache.get_or_load(&path, &LoadOptions::permissive()).unwrap();
    let options = LoadOptions::permissive().with_required_columns(["SEX"]);
    let second = cache.get_or_load(&path, &options).unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn invalidate_and_clear_drop_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analysis.csv");
    fs::write(&path, "SEX\nFEMALE\n").unwrap();

    let mut cache = DatasetCache::new();
    cache.get_or_load(&path, &LoadOptions::permissive()).unwrap();
    assert!(cache.invalidate(&path));
    assert!(!cache.invalidate(&path));
    assert!(cache.is_empty());

    cache.get_or_load(&path, &LoadOptions::permissive()).unwrap();
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn missing_file_is_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let mut cache = DatasetCache::new();
    let result = cache.get_or_load(&dir.path().join("absent.csv"), &LoadOptions::permissive());

    assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    assert!(cache.is_empty());
}
