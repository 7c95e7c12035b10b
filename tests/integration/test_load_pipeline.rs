//! End-to-end pipeline tests against test sinks.

use serde_json::json;
use tempfile::TempDir;

use vcfload_lib::{
    LineParser, LoaderBuilder, ParsedRecord, RawLine, Result, VcfLoadError, VcfLoader,
};

use crate::helpers::{CollectingSink, FailingSink, HEADER_LINES, data_line, write_vcf};

fn loader(parser_threads: usize, batch_size: usize) -> VcfLoader {
    LoaderBuilder::new()
        .with_parser_threads(parser_threads)
        .with_batch_size(batch_size)
        .with_line_queue_capacity(batch_size.max(64))
        .with_record_queue_capacity(batch_size.max(64))
        .build()
        .unwrap()
}

#[test]
fn test_headers_only_file_skips_everything() {
    let dir = TempDir::new().unwrap();
    let path = write_vcf(dir.path(), "headers.vcf", &HEADER_LINES);

    let sink = CollectingSink::default();
    let summary = loader(2, 1000).run(&path, sink.clone()).unwrap();

    assert_eq!(summary.records_processed, 0);
    assert_eq!(summary.records_skipped, 2);
    assert_eq!(summary.batches_flushed, 0);
    assert!(sink.batches.lock().unwrap().is_empty());
}

#[test]
fn test_single_record_content() {
    let dir = TempDir::new().unwrap();
    let line = data_line(100);
    let path = write_vcf(
        dir.path(),
        "single.vcf",
        &[HEADER_LINES[0], HEADER_LINES[1], &line],
    );

    let sink = CollectingSink::default();
    let summary = loader(2, 1000).run(&path, sink.clone()).unwrap();

    assert_eq!(summary.records_processed, 1);
    assert_eq!(summary.records_skipped, 2);
    assert_eq!(summary.batches_flushed, 1);

    let batches = sink.batches.lock().unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 1);
    let record = batches[0][0].vcf_data.as_ref().unwrap();
    assert_eq!(record.chromosome, "chr1");
    assert_eq!(record.position, 100);
    assert_eq!(record.ref_allele, "A");
    assert_eq!(record.alt_allele, "G");
    assert_eq!(
        record.data,
        json!({
            "FILTER": "PASS",
            "QUAL": 50.0,
            "INFO": {"DP": 30, "AF": 0.5},
            "FORMAT": {"GT": "0/1", "DP": 30},
        })
    );
}

#[test]
fn test_flush_boundary_splits_batches() {
    let dir = TempDir::new().unwrap();
    let lines: Vec<String> = (0..3).map(|i| data_line(100 + i)).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let path = write_vcf(dir.path(), "three.vcf", &refs);

    // A single parser keeps arrival order deterministic, so batch sizes are
    // exactly 2 then 1.
    let sink = CollectingSink::default();
    let summary = loader(1, 2).run(&path, sink.clone()).unwrap();

    assert_eq!(summary.records_processed, 3);
    assert_eq!(summary.batches_flushed, 2);
    assert_eq!(sink.batch_sizes(), vec![2, 1]);
}

#[test]
fn test_malformed_line_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let good = data_line(100);
    let path = write_vcf(
        dir.path(),
        "malformed.vcf",
        &[
            HEADER_LINES[0],
            &good,
            "chr1\t101\tonly\tfive\tfields",
            &good,
        ],
    );

    let err = loader(4, 10).run(&path, CollectingSink::default()).unwrap_err();
    match err {
        VcfLoadError::Parse { line_number, reason } => {
            assert_eq!(line_number, 3);
            assert!(reason.contains("got 5"), "unexpected reason: {reason}");
        }
        other => panic!("expected Parse error, got {other}"),
    }
    // Returning at all means the writer saw its full sentinel count
    // (survivors plus one synthetic) and every thread was joined.
}

#[test]
fn test_sink_failure_completes_with_warnings() {
    let dir = TempDir::new().unwrap();
    let lines: Vec<String> = (0..6).map(|i| data_line(100 + i)).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let path = write_vcf(dir.path(), "sinkfail.vcf", &refs);

    // First batch fails, later batches succeed.
    let sink = FailingSink::failing_first(1);
    let summary = loader(1, 2).run(&path, sink.clone()).unwrap();

    assert_eq!(summary.records_processed, 6);
    assert_eq!(summary.batches_flushed, 3);
    assert_eq!(summary.records_inserted, 4);
    assert_eq!(sink.attempts.load(std::sync::atomic::Ordering::SeqCst), 3);
}

#[test]
fn test_every_batch_failing_still_terminates() {
    let dir = TempDir::new().unwrap();
    let lines: Vec<String> = (0..10).map(|i| data_line(100 + i)).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let path = write_vcf(dir.path(), "allfail.vcf", &refs);

    let sink = FailingSink::failing_first(usize::MAX);
    let summary = loader(2, 4).run(&path, sink.clone()).unwrap();

    assert_eq!(summary.records_processed, 10);
    assert_eq!(summary.records_inserted, 0);
    assert_eq!(summary.batches_flushed, 3);
}

#[test]
fn test_missing_file_is_file_not_found() {
    let err = loader(2, 10)
        .run("/nonexistent/input.vcf", CollectingSink::default())
        .unwrap_err();
    assert!(matches!(err, VcfLoadError::FileNotFound { .. }));
}

#[test]
fn test_qual_dot_is_stored_as_null() {
    let dir = TempDir::new().unwrap();
    let path = write_vcf(
        dir.path(),
        "qualnull.vcf",
        &["chr1\t100\t.\tA\tG\t.\tPASS\tDP=30"],
    );

    let sink = CollectingSink::default();
    loader(1, 10).run(&path, sink.clone()).unwrap();

    let batches = sink.batches.lock().unwrap();
    let record = batches[0][0].vcf_data.as_ref().unwrap();
    assert_eq!(record.data["QUAL"], json!(null));
}

#[test]
fn test_line_accounting_over_many_lines() {
    let dir = TempDir::new().unwrap();
    let mut lines: Vec<String> =
        HEADER_LINES.iter().map(|line| (*line).to_string()).collect();
    for i in 0..1000 {
        lines.push(data_line(1000 + i));
        if i % 100 == 0 {
            lines.push(format!("##contig=<ID=batch{i}>"));
        }
    }
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let path = write_vcf(dir.path(), "many.vcf", &refs);

    let sink = CollectingSink::default();
    let summary = loader(4, 32).run(&path, sink.clone()).unwrap();

    // processed + skipped == total lines read; nothing was lost or
    // double-counted across four parsers.
    assert_eq!(summary.records_processed, 1000);
    assert_eq!(summary.records_skipped, 12);
    assert_eq!(
        summary.records_processed + summary.records_skipped,
        lines.len() as u64
    );
    assert_eq!(sink.total_records(), 1000);
    // Every non-final batch is exactly the batch size.
    let sizes = sink.batch_sizes();
    assert!(sizes[..sizes.len() - 1].iter().all(|&size| size == 32));
    assert!(*sizes.last().unwrap() <= 32);
}

#[test]
fn test_injected_faulty_parser_fails_every_worker() {
    #[derive(Clone)]
    struct FaultyParser;

    impl LineParser for FaultyParser {
        fn parse(&self, raw: &RawLine) -> Result<ParsedRecord> {
            Err(VcfLoadError::Parse {
                line_number: raw.line_number,
                reason: "always fails".to_string(),
            })
        }
    }

    let dir = TempDir::new().unwrap();
    let lines: Vec<String> = (0..50).map(|i| data_line(100 + i)).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let path = write_vcf(dir.path(), "faulty.vcf", &refs);

    // Every parser fails on its first line; the run must still join all
    // workers and surface a parse error.
    let err = loader(3, 10)
        .run_with_parser(&path, FaultyParser, CollectingSink::default())
        .unwrap_err();
    assert!(matches!(err, VcfLoadError::Parse { .. }));
}

#[test]
fn test_small_queues_apply_backpressure_without_deadlock() {
    let dir = TempDir::new().unwrap();
    let lines: Vec<String> = (0..500).map(|i| data_line(100 + i)).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let path = write_vcf(dir.path(), "pressure.vcf", &refs);

    // Queues barely bigger than the batch force every stage to block on the
    // next one repeatedly.
    let sink = CollectingSink::default();
    let summary = LoaderBuilder::new()
        .with_parser_threads(3)
        .with_batch_size(8)
        .with_line_queue_capacity(8)
        .with_record_queue_capacity(8)
        .build()
        .unwrap()
        .run(&path, sink.clone())
        .unwrap();

    assert_eq!(summary.records_processed, 500);
    assert_eq!(sink.total_records(), 500);
}
