use sankey_crosstab::crosstab::build;
use sankey_crosstab::domain::DomainRegistry;
use sankey_crosstab::ingestion::json::{ingest_json_from_path, ingest_json_from_str};
use sankey_crosstab::types::{DataType, Field, Schema, Value};

fn schema() -> Schema {
    Schema::new(vec![
        Field::new("school", DataType::Utf8),
        Field::new("sex", DataType::Utf8),
        Field::new("studyTime", DataType::Utf8).with_alias("studytime"),
    ])
}

#[test]
fn ingest_json_array_from_path_happy_path() {
    let ds = ingest_json_from_path("tests/fixtures/students.json", &schema()).unwrap();

    assert_eq!(ds.row_count(), 9);
    assert_eq!(ds.rows[0][0], Value::Utf8("GP".to_string()));
    assert_eq!(ds.rows[0][2], Value::Utf8("2".to_string()));
    assert_eq!(ds.rows[8][1], Value::Null);
}

#[test]
fn ingest_json_ndjson_with_alias() {
    let input = r#"
{"school":"GP","sex":"F","studytime":"3"}
{"school":"MS","sex":"M","studytime":1}
"#;
    let ds = ingest_json_from_str(input, &schema()).unwrap();
    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.rows[0][2], Value::Utf8("3".to_string()));
    assert_eq!(ds.rows[1][2], Value::Utf8("1".to_string()));
}

#[test]
fn ingest_json_absent_key_reads_as_null() {
    let input = r#"[{"school":"GP","sex":"M","studyTime":2},{"school":"MS","studyTime":"1"}]"#;
    let ds = ingest_json_from_str(input, &schema()).unwrap();
    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.rows[1][0], Value::Utf8("MS".to_string()));
    assert_eq!(ds.rows[1][1], Value::Null);
}

#[test]
fn absent_key_is_excluded_like_null_when_building() {
    let registry = DomainRegistry::new()
        .with_domain("school", [("GP", "Gabriel Pereira"), ("MS", "Mousinho Da Silveira")])
        .unwrap()
        .with_domain("sex", [("M", "Male"), ("F", "Female")])
        .unwrap();
    let input = r#"[{"school":"GP","sex":"M","studyTime":2},{"school":"MS","studyTime":1}]"#;
    let ds = ingest_json_from_str(input, &schema()).unwrap();

    let graph = build(&ds, &["school", "sex"], &registry).unwrap();
    assert_eq!(graph.links.iter().map(|l| l.value).sum::<u64>(), 1);
    assert_eq!(graph.links[0].value, 1);
}

#[test]
fn ingest_json_errors_on_non_object_row() {
    let err = ingest_json_from_str(r#"[{"school":"GP"}, 3]"#, &schema()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("schema mismatch"));
    assert!(msg.contains("row 2 is not a json object"));
}

#[test]
fn ingest_json_errors_on_type_mismatch() {
    let input = r#"[{"school":["GP"],"sex":"F","studyTime":"2"}]"#;
    let err = ingest_json_from_str(input, &schema()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("failed to parse value"));
    assert!(msg.contains("column 'school'"));
}
