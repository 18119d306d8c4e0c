use tabrs::io::{csv, json};
use tabrs::{Cell, ColumnType, LoadOptions, Table};

const POSTS_CSV: &str = "\
id,lang,likes,posted_at
p1,en,10,2024-05-01 10:00:00
p2,es,3,2024-05-01 11:30:00
p3,en,,2024-05-02 09:15:00
";

#[test]
fn test_read_csv_into_raw_rows() {
    let raw = csv::read_csv(POSTS_CSV.as_bytes()).unwrap();
    assert_eq!(raw.headers(), &["id", "lang", "likes", "posted_at"]);
    assert_eq!(raw.len(), 3);
    assert_eq!(raw.rows()[2][2], "");
}

#[test]
fn test_csv_to_table_and_back() {
    let raw = csv::read_csv(POSTS_CSV.as_bytes()).unwrap();
    let options = LoadOptions::new(["id", "lang", "likes", "posted_at"])
        .dtype("likes", ColumnType::Int)
        .parse_date("posted_at")
        .index_column("id");
    let table = Table::from_records(&raw, &options).unwrap();
    assert_eq!(table.row_count(), 3);
    assert!(table.column("likes").unwrap().is_null(2));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posts.csv");
    csv::write_csv_path(&table, &path).unwrap();

    let back_raw = csv::read_csv_path(&path).unwrap();
    // the index is written first under its own name
    assert_eq!(back_raw.headers()[0], "id");
    let back_options = LoadOptions::new(["id", "lang", "likes", "posted_at"])
        .dtype("likes", ColumnType::Int)
        .parse_date("posted_at")
        .index_column("id");
    let back = Table::from_records(&back_raw, &back_options).unwrap();
    assert_eq!(back.index().labels(), table.index().labels());
    assert_eq!(
        back.column("likes").unwrap().cells(),
        table.column("likes").unwrap().cells()
    );
    assert_eq!(
        back.column("posted_at").unwrap().cells(),
        table.column("posted_at").unwrap().cells()
    );
}

#[test]
fn test_json_records_round_trip() {
    let raw = csv::read_csv(POSTS_CSV.as_bytes()).unwrap();
    let options = LoadOptions::new(["lang", "likes"]).dtype("likes", ColumnType::Int);
    let table = Table::from_records(&raw, &options).unwrap();

    let value = json::to_json_records(&table).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["lang"], "en");
    assert_eq!(records[0]["likes"], 10);
    // nulls serialize as JSON null
    assert!(records[2]["likes"].is_null());

    let back_raw = json::from_json_records(&value).unwrap();
    let back = Table::from_records(&back_raw, &options).unwrap();
    assert_eq!(
        back.column("likes").unwrap().cells(),
        vec![Cell::Int(10), Cell::Int(3), Cell::Null]
    );
}

#[test]
fn test_json_rejects_non_record_input() {
    let value = serde_json::json!({"not": "an array"});
    assert!(json::from_json_records(&value).is_err());
}
