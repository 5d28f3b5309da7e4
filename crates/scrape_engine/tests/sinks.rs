use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rusqlite::Connection;
use scrape_core::{ScrapedRecord, SinkTarget};
use scrape_engine::{
    load_json, save_records, CsvSink, JsonSink, RecordSink, SaveOutcome, SqliteSink,
};
use tempfile::TempDir;

fn spans(values: &[&str]) -> Vec<ScrapedRecord> {
    values.iter().map(|v| ScrapedRecord::new("Span", *v)).collect()
}

#[test]
fn csv_has_header_from_field_and_one_row_per_record() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("scraped_data.csv");

    let outcome = CsvSink::new(&path)
        .save(&spans(&["$10", "$20", "Deal, \"hot\""]))
        .unwrap();

    assert_eq!(
        outcome,
        SaveOutcome::Saved {
            destination: path.clone(),
            rows: 3
        }
    );
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Span\n$10\n$20\n\"Deal, \"\"hot\"\"\"\n"
    );
}

#[test]
fn csv_overwrites_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("out.csv");
    fs::write(&path, "old contents\nthat are longer\n").unwrap();

    CsvSink::new(&path).save(&spans(&["new"])).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "Span\nnew\n");
}

#[test]
fn csv_with_mixed_fields_uses_one_column_per_field() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("mixed.csv");
    let records = vec![
        ScrapedRecord::new("Span", "$1"),
        ScrapedRecord::new("H1", "Title"),
    ];

    CsvSink::new(&path).save(&records).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "Span,H1\n$1,\n,Title\n");
}

#[test]
fn json_is_pretty_printed_with_four_spaces() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("scraped_data.json");

    JsonSink::new(&path).save(&spans(&["$10", "$20"])).unwrap();

    let expected = "[\n    {\n        \"Span\": \"$10\"\n    },\n    {\n        \"Span\": \"$20\"\n    }\n]";
    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn json_round_trip_reconstructs_records() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("round.json");
    let records = vec![
        ScrapedRecord::new("Span", " padded? no, stored verbatim "),
        ScrapedRecord::new("H1", "Ünïcödé"),
        ScrapedRecord::new("Span", "$30"),
    ];

    JsonSink::new(&path).save(&records).unwrap();
    assert_eq!(load_json(&path).unwrap(), records);
}

#[test]
fn sqlite_replaces_table_on_every_save() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("scraped_data.db");
    let sink = SqliteSink::new(&db_path, "data");

    sink.save(&spans(&["$1", "$2", "$3"])).unwrap();
    let outcome = sink.save(&spans(&["$4"])).unwrap();
    assert_eq!(
        outcome,
        SaveOutcome::Saved {
            destination: db_path.clone(),
            rows: 1
        }
    );

    let conn = Connection::open(&db_path).unwrap();
    let mut stmt = conn.prepare("SELECT \"Span\" FROM \"data\"").unwrap();
    let values: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(values, vec!["$4"]);
}

#[test]
fn sqlite_has_a_column_per_distinct_field() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("mixed.db");
    let records = vec![
        ScrapedRecord::new("Span", "$1"),
        ScrapedRecord::new("H1", "Title"),
    ];

    SqliteSink::new(&db_path, "my table").save(&records).unwrap();

    let conn = Connection::open(&db_path).unwrap();
    let mut stmt = conn
        .prepare("SELECT \"Span\", \"H1\" FROM \"my table\" ORDER BY rowid")
        .unwrap();
    let rows: Vec<(Option<String>, Option<String>)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        rows,
        vec![
            (Some("$1".to_string()), None),
            (None, Some("Title".to_string())),
        ]
    );
}

#[test]
fn empty_records_touch_nothing() {
    let temp = TempDir::new().unwrap();
    let targets = vec![
        SinkTarget::Csv {
            path: temp.path().join("a.csv"),
        },
        SinkTarget::Json {
            path: temp.path().join("a.json"),
        },
        SinkTarget::Sqlite {
            db_path: temp.path().join("a.db"),
            table: "data".to_string(),
        },
    ];

    for target in &targets {
        assert_eq!(
            save_records(target, &[]).unwrap(),
            SaveOutcome::NothingToSave
        );
    }
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn save_records_dispatches_by_target() {
    let temp = TempDir::new().unwrap();
    let path: PathBuf = temp.path().join("sub").join("data.json");

    let outcome = save_records(&SinkTarget::Json { path: path.clone() }, &spans(&["$1"])).unwrap();

    assert_eq!(
        outcome,
        SaveOutcome::Saved {
            destination: path.clone(),
            rows: 1
        }
    );
    assert_eq!(load_json(&path).unwrap(), spans(&["$1"]));
}

#[test]
fn csv_keeps_rows_with_an_empty_value() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("empty_cell.csv");

    let outcome = CsvSink::new(&path).save(&spans(&["$10", "", "$30"])).unwrap();

    assert_eq!(
        outcome,
        SaveOutcome::Saved {
            destination: path.clone(),
            rows: 3
        }
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), "Span\n$10\n\"\"\n$30\n");
}

#[test]
fn sqlite_folds_fields_differing_only_in_case() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("case.db");
    let records = vec![
        ScrapedRecord::new("Span", "$1"),
        ScrapedRecord::new("span", "$2"),
    ];

    SqliteSink::new(&db_path, "data").save(&records).unwrap();

    let conn = Connection::open(&db_path).unwrap();
    let mut stmt = conn
        .prepare("SELECT \"Span\" FROM \"data\" ORDER BY rowid")
        .unwrap();
    let values: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(values, vec!["$1", "$2"]);
    let column_count = conn
        .prepare("SELECT * FROM \"data\"")
        .unwrap()
        .column_count();
    assert_eq!(column_count, 1);
}
