//! Helper utilities for integration tests.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use vcfload_lib::{ParsedRecord, RecordSink, Result, VcfLoadError};

/// The two standard header lines most fixtures start with.
pub const HEADER_LINES: [&str; 2] = [
    "##fileformat=VCFv4.2",
    "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO",
];

/// Write `lines` into `name` under `dir` and return its path.
pub fn write_vcf(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).expect("failed to create fixture");
    for line in lines {
        writeln!(file, "{line}").expect("failed to write fixture");
    }
    path
}

/// A standard data line at the given position.
pub fn data_line(position: u64) -> String {
    format!("chr1\t{position}\t.\tA\tG\t50.0\tPASS\tDP=30;AF=0.5\tGT:DP\t0/1:30")
}

/// Sink that records every batch it receives; clones share the state so a
/// test can keep observing after `run` consumed the sink.
#[derive(Default, Clone)]
pub struct CollectingSink {
    pub batches: Arc<Mutex<Vec<Vec<ParsedRecord>>>>,
    pub ready_calls: Arc<AtomicUsize>,
}

impl CollectingSink {
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().iter().map(Vec::len).collect()
    }

    pub fn total_records(&self) -> usize {
        self.batches.lock().unwrap().iter().map(Vec::len).sum()
    }
}

impl RecordSink for CollectingSink {
    fn ensure_ready(&mut self) -> Result<()> {
        self.ready_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn insert_batch(&mut self, batch: &[ParsedRecord]) -> Result<u64> {
        self.batches.lock().unwrap().push(batch.to_vec());
        Ok(batch.len() as u64)
    }
}

/// Sink whose inserts fail for the first `failures` batches (or all of them
/// when `failures` is `usize::MAX`).
#[derive(Clone)]
pub struct FailingSink {
    pub failures: usize,
    pub attempts: Arc<AtomicUsize>,
    pub inserted: Arc<AtomicUsize>,
}

impl FailingSink {
    pub fn failing_first(failures: usize) -> Self {
        Self {
            failures,
            attempts: Arc::new(AtomicUsize::new(0)),
            inserted: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl RecordSink for FailingSink {
    fn ensure_ready(&mut self) -> Result<()> {
        Ok(())
    }

    fn insert_batch(&mut self, batch: &[ParsedRecord]) -> Result<u64> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures {
            return Err(VcfLoadError::Database {
                reason: "simulated insert failure".to_string(),
            });
        }
        self.inserted.fetch_add(batch.len(), Ordering::SeqCst);
        Ok(batch.len() as u64)
    }
}
