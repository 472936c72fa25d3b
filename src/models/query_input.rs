//! # Query Input Model
//!
//! One benchmark work item: a CPU usage query for a single host over a
//! closed time range. Immutable once ingested.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryInput {
    pub host_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl QueryInput {
    pub fn new(
        host_name: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            host_name: host_name.into(),
            start_time,
            end_time,
        }
    }
}

/// Number of queries per host across the whole batch
pub fn host_query_counts(query_inputs: &[QueryInput]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for query in query_inputs {
        *counts.entry(query.host_name.clone()).or_insert(0) += 1;
    }
    counts
}
