//! # CSV Query Source
//!
//! Reads `hostname,start_time,end_time` rows. The first row is a header and is
//! skipped. Rows whose timestamps cannot be parsed are dropped so a single bad
//! line never aborts the benchmark.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

use crate::constants::{csv_columns, TIME_LAYOUT};
use crate::error::{BenchError, Result};
use crate::models::QueryInput;

/// Read all query inputs from the CSV file at `path`
pub fn read_query_inputs(path: impl AsRef<Path>) -> Result<Vec<QueryInput>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        BenchError::Ingest(format!("failed to open {}: {e}", path.display()))
    })?;

    let query_inputs = read_query_inputs_from(BufReader::new(file))?;
    info!(
        path = %path.display(),
        queries = query_inputs.len(),
        "Loaded query parameters"
    );
    Ok(query_inputs)
}

/// Read all query inputs from any CSV reader
pub fn read_query_inputs_from<R: Read>(reader: R) -> Result<Vec<QueryInput>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    if csv_reader.headers()?.is_empty() {
        return Err(BenchError::Ingest("missing header row".to_string()));
    }

    let mut query_inputs = Vec::new();
    let mut skipped = 0usize;
    for record in csv_reader.records() {
        let record = record?;
        match parse_record(&record) {
            Some(query) => query_inputs.push(query),
            None => {
                skipped += 1;
                debug!(
                    line = record.position().map(|p| p.line()),
                    "Skipping unparseable query row"
                );
            }
        }
    }

    if skipped > 0 {
        debug!(skipped, "Dropped rows with invalid timestamps");
    }

    Ok(query_inputs)
}

fn parse_record(record: &csv::StringRecord) -> Option<QueryInput> {
    let host_name = record.get(csv_columns::HOSTNAME)?;
    let start_time = parse_time(record.get(csv_columns::START_TIME)?)?;
    let end_time = parse_time(record.get(csv_columns::END_TIME)?)?;
    Some(QueryInput::new(host_name, start_time, end_time))
}

fn parse_time(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, TIME_LAYOUT)
        .ok()
        .map(|naive| naive.and_utc())
}
