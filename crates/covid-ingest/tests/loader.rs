//! Integration tests for dataset loading.

use std::fs;
use std::io::Write;
use std::path::Path;

use covid_ingest::{LoadError, LoadOptions, SchemaError, load_dataset};
use tempfile::NamedTempFile;

const FULL_HEADER: &str = "sex,age_group,intubated,icu,date_of_death,diabetes,copd,asthma,\
inmusupr,hypertension,cardiovascular,obesity,chronic_kidney,tobacco,pneumonia";

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

fn full_row(sex: &str, icu: &str, death: &str) -> String {
    format!("{sex},30-39,NO,{icu},{death},YES,NO,NO,NO,YES,NO,NO,NO,NO,YES")
}

#[test]
fn loads_full_schema_and_uppercases_columns() {
    let content = format!(
        "{FULL_HEADER}\n{}\n{}\n",
        full_row("FEMALE", "YES", ""),
        full_row("MALE", "NO", "2020-06-01")
    );
    let file = create_temp_csv(&content);
    let dataset = load_dataset(file.path(), &LoadOptions::default()).unwrap();

    assert_eq!(dataset.record_count(), 2);
    assert_eq!(dataset.column_count(), 15);
    assert_eq!(dataset.cell_count(), 30);
    assert!(dataset.column_names().iter().all(|c| *c == c.to_uppercase()));
    assert_eq!(dataset.source(), Some(file.path()));
}

#[test]
fn accepts_immunosuppression_alias() {
    let header = FULL_HEADER.replace("inmusupr", "Immunosuppression");
    let content = format!("{header}\n{}\n", full_row("FEMALE", "YES", ""));
    let file = create_temp_csv(&content);
    let dataset = load_dataset(file.path(), &LoadOptions::default()).unwrap();

    assert!(dataset.has_column("INMUSUPR"));
}

#[test]
fn missing_required_columns_are_all_reported() {
    let file = create_temp_csv("sex,age_group\nFEMALE,30-39\n");
    let options = LoadOptions::permissive().with_required_columns(["SEX", "ICU", "PNEUMONIA"]);
    let result = load_dataset(file.path(), &options);

    match result {
        Err(LoadError::MissingColumns { columns, .. }) => {
            assert_eq!(columns, vec!["ICU".to_string(), "PNEUMONIA".to_string()]);
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn missing_file_is_file_not_found() {
    let result = load_dataset(
        Path::new("/definitely/not/here/analysis.csv"),
        &LoadOptions::default(),
    );
    assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
}

#[test]
fn directory_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_dataset(dir.path(), &LoadOptions::permissive());
    assert!(matches!(result, Err(LoadError::FileRead { .. })));
}

#[test]
fn empty_file_is_empty_csv() {
    let file = create_temp_csv("");
    let result = load_dataset(file.path(), &LoadOptions::permissive());
    assert!(matches!(result, Err(LoadError::EmptyCsv { .. })));
}

#[test]
fn header_only_file_is_an_empty_dataset() {
    let file = create_temp_csv(&format!("{FULL_HEADER}\n"));
    let dataset = load_dataset(file.path(), &LoadOptions::default()).unwrap();

    assert!(dataset.is_empty());
    assert_eq!(dataset.column_count(), 15);
}

#[test]
fn semicolon_delimited_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cases.csv");
    fs::write(&path, "SEX;ICU\nFEMALE;YES\nMALE;NO\n").unwrap();
    let options = LoadOptions::permissive().with_delimiter(b';');
    let dataset = load_dataset(&path, &options).unwrap();

    assert_eq!(dataset.column_names(), vec!["SEX", "ICU"]);
    assert_eq!(dataset.record_count(), 2);
}

#[test]
fn unknown_field_is_schema_error() {
    let file = create_temp_csv("sex\nFEMALE\n");
    let dataset = load_dataset(file.path(), &LoadOptions::permissive()).unwrap();

    assert!(matches!(
        dataset.resolve_column("nonexistent_field"),
        Err(SchemaError::ColumnNotFound { .. })
    ));
    assert!(dataset.require_columns(&["sex"]).is_ok());
}

#[test]
fn quoted_empty_fields_load_as_null() {
    let file = create_temp_csv("sex,date_of_death\n\"\",\"\"\nMALE,2020-01-01\n \t ,\n");
    let dataset = load_dataset(file.path(), &LoadOptions::permissive()).unwrap();

    let sex = dataset.string_column("SEX").unwrap();
    assert_eq!(sex.null_count(), 2);
    assert_eq!(sex.get(1), Some("MALE"));
    assert_eq!(dataset.string_column("DATE_OF_DEATH").unwrap().null_count(), 2);
}

#[test]
fn ragged_row_is_csv_parse() {
    let file = create_temp_csv("sex,icu\nFEMALE,YES,EXTRA\n");
    let result = load_dataset(file.path(), &LoadOptions::permissive());

    assert!(matches!(result, Err(LoadError::CsvParse { .. })));
}
