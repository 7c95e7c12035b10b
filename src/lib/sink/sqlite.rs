//! SQLite-backed record sink.
//!
//! Each batch is written in a single transaction with a prepared INSERT,
//! with the variant document serialized as JSON text. The schema and the
//! `(chromosome, position)` index are created idempotently on
//! [`RecordSink::ensure_ready`].

use std::env;
use std::path::PathBuf;

use log::debug;
use rusqlite::{Connection, params};

use crate::errors::{Result, VcfLoadError};
use crate::record::ParsedRecord;
use crate::sink::RecordSink;

/// Environment variable overriding the default database path.
pub const ENV_DB_PATH: &str = "VCFLOAD_DB_PATH";
/// Environment variable overriding the default table name.
pub const ENV_TABLE: &str = "VCFLOAD_TABLE";

const DEFAULT_DB_PATH: &str = "vcf_records.db";
const DEFAULT_TABLE: &str = "vcf_records";

/// Where the SQLite sink writes.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Path of the database file; created if absent.
    pub db_path: PathBuf,
    /// Table name for variant records.
    pub table: String,
}

impl SinkConfig {
    /// Resolve the configuration from the environment, falling back to
    /// `vcf_records.db` / `vcf_records`.
    #[must_use]
    pub fn from_environment() -> Self {
        Self {
            db_path: env::var_os(ENV_DB_PATH)
                .map_or_else(|| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from),
            table: env::var(ENV_TABLE).unwrap_or_else(|_| DEFAULT_TABLE.to_string()),
        }
    }
}

/// Record sink writing to a local SQLite database.
///
/// Holds a single connection and is used from the writer thread only.
pub struct SqliteSink {
    conn: Connection,
    table: String,
}

impl SqliteSink {
    /// Open (or create) the database named by `config`.
    pub fn open(config: &SinkConfig) -> Result<Self> {
        validate_table_name(&config.table)?;
        let conn = Connection::open(&config.db_path).map_err(db_error)?;
        debug!("opened database '{}' (table {})", config.db_path.display(), config.table);
        Ok(Self { conn, table: config.table.clone() })
    }

    /// In-memory database, for tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(db_error)?;
        Ok(Self { conn, table: DEFAULT_TABLE.to_string() })
    }
}

impl RecordSink for SqliteSink {
    fn ensure_ready(&mut self) -> Result<()> {
        let table = &self.table;
        self.conn
            .execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                     id INTEGER PRIMARY KEY,
                     chromosome TEXT NOT NULL,
                     position INTEGER NOT NULL,
                     ref_allele TEXT NOT NULL,
                     alt_allele TEXT NOT NULL,
                     data TEXT NOT NULL
                 );
                 CREATE INDEX IF NOT EXISTS {table}_chrom_pos
                     ON {table} (chromosome, position);"
            ))
            .map_err(db_error)
    }

    fn insert_batch(&mut self, batch: &[ParsedRecord]) -> Result<u64> {
        let tx = self.conn.transaction().map_err(db_error)?;
        let mut inserted = 0u64;
        {
            let mut stmt = tx
                .prepare(&format!(
                    "INSERT INTO {} (chromosome, position, ref_allele, alt_allele, data)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    self.table
                ))
                .map_err(db_error)?;
            for record in batch {
                let Some(data) = record.vcf_data.as_ref() else { continue };
                let document = serde_json::to_string(&data.data).map_err(|err| {
                    VcfLoadError::Database { reason: format!("serializing record: {err}") }
                })?;
                let rows = stmt
                    .execute(params![
                        data.chromosome,
                        i64::try_from(data.position).unwrap_or(i64::MAX),
                        data.ref_allele,
                        data.alt_allele,
                        document,
                    ])
                    .map_err(db_error)?;
                inserted += rows as u64;
            }
        }
        tx.commit().map_err(db_error)?;
        Ok(inserted)
    }
}

/// Table names are interpolated into SQL, so restrict them to identifiers.
fn validate_table_name(table: &str) -> Result<()> {
    let mut chars = table.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if !valid {
        return Err(VcfLoadError::InvalidParameter {
            parameter: "table".to_string(),
            reason: format!("'{table}' is not a valid table name"),
        });
    }
    Ok(())
}

fn db_error(err: rusqlite::Error) -> VcfLoadError {
    VcfLoadError::Database { reason: err.to_string() }
}
