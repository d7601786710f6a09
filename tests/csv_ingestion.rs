use sankey_crosstab::ingestion::csv::{
    ingest_csv_from_path, ingest_csv_from_path_with_delimiter, ingest_csv_from_reader,
};
use sankey_crosstab::student;
use sankey_crosstab::types::{DataType, Field, Schema, Value};

fn school_sex_schema() -> Schema {
    Schema::new(vec![
        Field::new("school", DataType::Utf8),
        Field::new("sex", DataType::Utf8),
    ])
}

#[test]
fn ingest_csv_from_path_happy_path() {
    let ds = ingest_csv_from_path("tests/fixtures/school_sex.csv", &school_sex_schema()).unwrap();

    assert_eq!(ds.row_count(), 7);
    assert_eq!(
        ds.rows[0],
        vec![Value::Utf8("GP".to_string()), Value::Utf8("M".to_string())]
    );
}

#[test]
fn ingest_uci_student_file_through_aliases() {
    let ds = ingest_csv_from_path_with_delimiter(
        "tests/fixtures/students.csv",
        &student::schema(),
        b';',
    )
    .unwrap();

    assert_eq!(ds.row_count(), 8);
    assert_eq!(ds.value(0, "school"), Some(&Value::Utf8("GP".to_string())));
    assert_eq!(ds.value(0, "age"), Some(&Value::Int64(18)));
    assert_eq!(ds.value(0, "famSize"), Some(&Value::Utf8("GT3".to_string())));
    assert_eq!(ds.value(0, "motherJob"), Some(&Value::Utf8("at_home".to_string())));
    assert_eq!(ds.value(0, "schoolSup"), Some(&Value::Utf8("yes".to_string())));
    assert_eq!(ds.value(2, "failures"), Some(&Value::Utf8("3".to_string())));
    assert_eq!(ds.value(7, "weekdayAlc"), Some(&Value::Utf8("3".to_string())));
    assert_eq!(ds.value(7, "G3"), Some(&Value::Int64(8)));
}

#[test]
fn ingest_csv_allows_reordered_columns() {
    let input = "sex,school\nF,MS\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let ds = ingest_csv_from_reader(&mut rdr, &school_sex_schema()).unwrap();
    assert_eq!(ds.row_count(), 1);
    assert_eq!(ds.rows[0][0], Value::Utf8("MS".to_string()));
    assert_eq!(ds.rows[0][1], Value::Utf8("F".to_string()));
}

#[test]
fn ingest_csv_empty_cells_are_null() {
    let ds = ingest_csv_from_path(
        "tests/fixtures/school_sex_anomalies.csv",
        &school_sex_schema(),
    )
    .unwrap();

    assert_eq!(ds.row_count(), 6);
    assert!(ds.rows[2][1].is_null());
    assert!(ds.rows[3][0].is_null());
}

#[test]
fn ingest_csv_errors_on_missing_required_column() {
    let input = "school\nGP\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let err = ingest_csv_from_reader(&mut rdr, &school_sex_schema()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("schema mismatch"));
    assert!(msg.contains("missing required column 'sex'"));
}

#[test]
fn ingest_csv_errors_on_type_parse() {
    let schema = Schema::new(vec![
        Field::new("school", DataType::Utf8),
        Field::new("age", DataType::Int64),
    ]);
    let input = "school,age\nGP,eighteen\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let err = ingest_csv_from_reader(&mut rdr, &schema).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("failed to parse value at row 2"));
    assert!(msg.contains("column 'age'"));
}
