//! Loader tests over temporary delimited fixtures.

use tabula_model::{ColumnType, Value};

use tabula_ingest::{
    ColumnSpec, IngestError, ReadOptions, SourceSpec, ensure_cached, read_table, read_table_wide,
    write_delimited,
};

fn spec(name: &str, ty: ColumnType) -> ColumnSpec {
    ColumnSpec::new(name, ty)
}

#[test]
fn reads_requested_columns_with_types() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    std::fs::write(
        &path,
        "NTD ID,Agency,Mode,Total\n1,Metro,MB,1000.5\n2,Rail Co,CR,NA\n",
    )
    .unwrap();

    let table = read_table(
        &SourceSpec::csv(&path),
        &[
            spec("NTD ID", ColumnType::Integer),
            spec("Mode", ColumnType::Categorical),
            spec("Total", ColumnType::Real),
        ],
        &ReadOptions::default(),
    )
    .unwrap();

    let names: Vec<&str> = table.schema().names().collect();
    assert_eq!(names, vec!["NTD ID", "Mode", "Total"]);
    assert_eq!(table.height(), 2);
    assert_eq!(table.value(0, 0), &Value::Int(1));
    assert_eq!(table.value(0, 2), &Value::Real(1000.5));
    // "NA" is a missing marker, never zero.
    assert_eq!(table.value(1, 2), &Value::Missing);
}

#[test]
fn imdb_na_token_becomes_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("basics.tsv");
    std::fs::write(
        &path,
        "tconst\tprimaryTitle\tstartYear\ntt0001\tSome Movie\t\\N\n",
    )
    .unwrap();

    let table = read_table(
        &SourceSpec::tsv(&path),
        &[
            spec("tconst", ColumnType::Text),
            spec("startYear", ColumnType::Integer),
        ],
        &ReadOptions::default(),
    )
    .unwrap();
    assert_eq!(table.value(0, 1), &Value::Missing);
}

#[test]
fn missing_requested_column_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.csv");
    std::fs::write(&path, "a,b\n1,2\n").unwrap();

    let err = read_table(
        &SourceSpec::csv(&path),
        &[spec("c", ColumnType::Integer)],
        &ReadOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn { column, .. } if column == "c"));
}

#[test]
fn unreachable_source_is_an_error() {
    let err = read_table(
        &SourceSpec::csv("/nonexistent/nowhere.csv"),
        &[spec("a", ColumnType::Integer)],
        &ReadOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, IngestError::SourceNotFound { .. }));
}

#[test]
fn unparsable_cell_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.csv");
    std::fs::write(&path, "a\nnot-a-number\n").unwrap();

    let err = read_table(
        &SourceSpec::csv(&path),
        &[spec("a", ColumnType::Real)],
        &ReadOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, IngestError::Parse { row: 1, .. }));
}

#[test]
fn wide_read_types_unlisted_headers_as_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upt.csv");
    std::fs::write(
        &path,
        "NTD ID,Mode,2022-01,2022-02\n1,MB,100,110\n2,CR,,40\n",
    )
    .unwrap();

    let table = read_table_wide(
        &SourceSpec::csv(&path),
        &[
            spec("NTD ID", ColumnType::Integer),
            spec("Mode", ColumnType::Categorical),
        ],
        ColumnType::Real,
        &ReadOptions::default(),
    )
    .unwrap();

    let names: Vec<&str> = table.schema().names().collect();
    assert_eq!(names, vec!["NTD ID", "Mode", "2022-01", "2022-02"]);
    assert_eq!(table.value(0, 2), &Value::Real(100.0));
    assert_eq!(table.value(1, 2), &Value::Missing);
}

#[test]
fn snapshot_round_trips_through_write_and_read() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src.csv");
    std::fs::write(&src, "id,score\n1,2.5\n2,\n").unwrap();

    let specs = [
        spec("id", ColumnType::Integer),
        spec("score", ColumnType::Real),
    ];
    let table = read_table(&SourceSpec::csv(&src), &specs, &ReadOptions::default()).unwrap();

    let snapshot = dir.path().join("snapshot.tsv");
    write_delimited(&table, &snapshot, b'\t').unwrap();
    let reread = read_table(&SourceSpec::tsv(&snapshot), &specs, &ReadOptions::default()).unwrap();

    assert_eq!(table, reread);
}

#[test]
fn ensure_cached_returns_existing_file_without_fetching() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("cached.tsv");
    std::fs::write(&dest, "already here").unwrap();

    // An invalid host would fail if a fetch were attempted.
    let path = ensure_cached("http://invalid.invalid/data.tsv.gz", &dest).unwrap();
    assert_eq!(std::fs::read_to_string(path).unwrap(), "already here");
}
