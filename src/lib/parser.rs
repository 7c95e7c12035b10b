//! Line parsing: raw VCF text lines into structured records.
//!
//! Parsing is a pure function of the input line, so any number of parser
//! workers can run it concurrently without coordination. The [`LineParser`]
//! trait is the seam the pipeline is generic over; [`VcfLineParser`] is the
//! production implementation and tests inject alternatives through the same
//! trait.

use serde_json::{Map, Number, Value};

use crate::errors::{Result, VcfLoadError};
use crate::record::{ParsedRecord, RawLine, VcfRecord};

/// Minimum number of TAB-separated fields for a data line
/// (CHROM through INFO).
const MIN_FIELDS: usize = 8;

/// Number of fields required before a FORMAT/SAMPLE pair is present.
const FORMAT_FIELDS: usize = 10;

/// Capability to turn one raw line into a parsed record.
///
/// Implementations must be pure: no I/O, no shared mutable state, and the
/// same input always yields the same output.
pub trait LineParser {
    /// Parse one raw line.
    ///
    /// Header (`#`-prefixed) and blank lines yield a record with
    /// `vcf_data: None`. Malformed data lines are an error naming the line.
    fn parse(&self, raw: &RawLine) -> Result<ParsedRecord>;
}

/// Parser for VCF data lines.
///
/// Splits on TAB and assembles the fixed columns plus a JSON document with
/// `FILTER`, `QUAL`, `INFO` and `FORMAT`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VcfLineParser;

impl LineParser for VcfLineParser {
    fn parse(&self, raw: &RawLine) -> Result<ParsedRecord> {
        // Blank lines and headers carry no variant data.
        if raw.text.is_empty() || raw.text.starts_with('#') {
            return Ok(ParsedRecord::skipped(raw.line_number, raw.text.clone()));
        }

        let fields: Vec<&str> = raw.text.split('\t').collect();
        if fields.len() < MIN_FIELDS {
            return Err(VcfLoadError::Parse {
                line_number: raw.line_number,
                reason: format!(
                    "expected at least {MIN_FIELDS} tab-separated fields, got {}",
                    fields.len()
                ),
            });
        }

        let position: u64 = fields[1].parse().map_err(|_| VcfLoadError::Parse {
            line_number: raw.line_number,
            reason: format!("invalid position '{}'", fields[1]),
        })?;

        let mut data = Map::new();
        data.insert("FILTER".to_string(), Value::String(fields[6].to_string()));
        data.insert("QUAL".to_string(), parse_qual(fields[5]));
        data.insert("INFO".to_string(), parse_info(fields[7]));
        let format = if fields.len() >= FORMAT_FIELDS {
            parse_format(fields[8], fields[9])
        } else {
            Value::Object(Map::new())
        };
        data.insert("FORMAT".to_string(), format);

        Ok(ParsedRecord {
            line_number: raw.line_number,
            raw_text: raw.text.clone(),
            vcf_data: Some(VcfRecord {
                chromosome: fields[0].to_string(),
                position,
                ref_allele: fields[3].to_string(),
                alt_allele: fields[4].to_string(),
                data: Value::Object(data),
            }),
        })
    }
}

/// Parse the QUAL column: `.` is null, otherwise a float.
///
/// A non-`.` value that is not a number falls back to `0.0` rather than
/// failing the line.
fn parse_qual(field: &str) -> Value {
    if field == "." {
        return Value::Null;
    }
    field
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or_else(|| json_f64(0.0), Value::Number)
}

/// Parse the INFO column into an object.
///
/// Tokens are `;`-separated. `KEY=VALUE` stores the value as a number when
/// the whole token is numeric, otherwise as a string; a bare `FLAG` token is
/// stored as boolean `true`. An empty column or `.` yields an empty object.
fn parse_info(field: &str) -> Value {
    let mut info = Map::new();
    if field.is_empty() || field == "." {
        return Value::Object(info);
    }

    for token in field.split(';').filter(|token| !token.is_empty()) {
        match token.split_once('=') {
            Some((key, value)) => {
                let parsed = numeric_value(value)
                    .unwrap_or_else(|| Value::String(value.to_string()));
                info.insert(key.to_string(), parsed);
            }
            None => {
                info.insert(token.to_string(), Value::Bool(true));
            }
        }
    }
    Value::Object(info)
}

/// Zip the FORMAT keys with the first sample's values, up to the shorter of
/// the two lists. A value of `.` becomes null; numeric values become numbers.
fn parse_format(format_field: &str, sample_field: &str) -> Value {
    let mut format = Map::new();
    if format_field.is_empty() || sample_field.is_empty() {
        return Value::Object(format);
    }

    for (key, value) in format_field.split(':').zip(sample_field.split(':')) {
        let parsed = if value == "." {
            Value::Null
        } else {
            numeric_value(value).unwrap_or_else(|| Value::String(value.to_string()))
        };
        format.insert(key.to_string(), parsed);
    }
    Value::Object(format)
}

/// Interpret a token as a JSON number if the entire token is numeric.
///
/// Integers are kept as integers; anything else that parses as a finite
/// float becomes a float. Returns `None` for non-numeric tokens (including
/// `inf`/`NaN`, which JSON cannot represent).
fn numeric_value(token: &str) -> Option<Value> {
    if let Ok(int) = token.parse::<i64>() {
        return Some(Value::from(int));
    }
    token.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number)
}

fn json_f64(value: f64) -> Value {
    // 0.0 is always representable.
    Value::Number(Number::from_f64(value).unwrap_or_else(|| Number::from(0)))
}
