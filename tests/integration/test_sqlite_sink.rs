//! End-to-end runs against the real SQLite sink.

use rusqlite::Connection;
use serde_json::Value;
use tempfile::TempDir;

use vcfload_lib::{LoaderBuilder, SinkConfig, SqliteSink};

use crate::helpers::{HEADER_LINES, data_line, write_vcf};

#[test]
fn test_load_into_sqlite_database() {
    let dir = TempDir::new().unwrap();
    let mut lines: Vec<String> =
        HEADER_LINES.iter().map(|line| (*line).to_string()).collect();
    for i in 0..25 {
        lines.push(data_line(100 + i));
    }
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let path = write_vcf(dir.path(), "input.vcf", &refs);

    let sink_config = SinkConfig {
        db_path: dir.path().join("records.db"),
        table: "vcf_records".to_string(),
    };
    let sink = SqliteSink::open(&sink_config).unwrap();
    let summary = LoaderBuilder::new()
        .with_parser_threads(2)
        .with_batch_size(10)
        .build()
        .unwrap()
        .run(&path, sink)
        .unwrap();

    assert_eq!(summary.records_processed, 25);
    assert_eq!(summary.records_inserted, 25);
    assert_eq!(summary.batches_flushed, 3);

    // Reopen the database and check what actually landed.
    let conn = Connection::open(&sink_config.db_path).unwrap();
    let count: i64 =
        conn.query_row("SELECT COUNT(*) FROM vcf_records", [], |row| row.get(0)).unwrap();
    assert_eq!(count, 25);

    let (position, document): (i64, String) = conn
        .query_row(
            "SELECT position, data FROM vcf_records WHERE position = 100",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(position, 100);
    let value: Value = serde_json::from_str(&document).unwrap();
    assert_eq!(value["FILTER"], "PASS");
    assert_eq!(value["INFO"]["DP"], 30);
    assert_eq!(value["FORMAT"]["GT"], "0/1");
}

#[test]
fn test_reloading_appends_records() {
    let dir = TempDir::new().unwrap();
    let line = data_line(42);
    let path = write_vcf(dir.path(), "input.vcf", &[line.as_str()]);

    let sink_config = SinkConfig {
        db_path: dir.path().join("records.db"),
        table: "vcf_records".to_string(),
    };
    let loader = LoaderBuilder::new().with_parser_threads(1).build().unwrap();

    for _ in 0..2 {
        let sink = SqliteSink::open(&sink_config).unwrap();
        loader.run(&path, sink).unwrap();
    }

    let conn = Connection::open(&sink_config.db_path).unwrap();
    let count: i64 =
        conn.query_row("SELECT COUNT(*) FROM vcf_records", [], |row| row.get(0)).unwrap();
    assert_eq!(count, 2);
}
