//! # Benchmark Statistics
//!
//! Summary statistics over per-query durations and the report rendering used
//! by the `query-bench` binary. All values are nanoseconds.

use serde::Serialize;
use std::fmt;

/// Aggregate timing for one batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchmarkStats {
    pub total_elapsed: i64,
    /// `None` when no query ran
    pub summary: Option<QueryTimeSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryTimeSummary {
    pub count: usize,
    pub sum: i64,
    pub mean: i64,
    pub median: i64,
    pub min: i64,
    pub max: i64,
}

impl BenchmarkStats {
    pub fn summarize(durations: &[i64], total_elapsed: i64) -> Self {
        Self {
            total_elapsed,
            summary: QueryTimeSummary::from_durations(durations),
        }
    }

    pub fn has_data(&self) -> bool {
        self.summary.is_some()
    }
}

impl QueryTimeSummary {
    pub fn from_durations(durations: &[i64]) -> Option<Self> {
        if durations.is_empty() {
            return None;
        }

        let mut sorted = durations.to_vec();
        sorted.sort();

        let count = sorted.len();
        // Durations saturate at i64::MAX, so the sum does too
        let sum = sorted
            .iter()
            .fold(0i64, |total, duration| total.saturating_add(*duration));
        let mid = count / 2;
        let median = if count % 2 == 0 {
            sorted[mid - 1] + (sorted[mid] - sorted[mid - 1]) / 2
        } else {
            sorted[mid]
        };

        Some(Self {
            count,
            sum,
            mean: sum / count as i64,
            median,
            min: sorted[0],
            max: sorted[count - 1],
        })
    }
}

impl fmt::Display for BenchmarkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stats in Nanosecond:")?;
        writeln!(f)?;
        match &self.summary {
            None => {
                writeln!(f, "No queries were run")?;
                writeln!(
                    f,
                    "Total processing time: {}",
                    format_integer(self.total_elapsed)
                )
            }
            Some(summary) => {
                writeln!(
                    f,
                    "Total number of queries ran: {}",
                    format_integer(summary.count as i64)
                )?;
                writeln!(
                    f,
                    "Total processing time: {}",
                    format_integer(self.total_elapsed)
                )?;
                writeln!(f, "Sum of query times: {}", format_integer(summary.sum))?;
                writeln!(f, "Mean: {}", format_integer(summary.mean))?;
                writeln!(f, "Median: {}", format_integer(summary.median))?;
                writeln!(f, "Max: {}", format_integer(summary.max))?;
                writeln!(f, "Min: {}", format_integer(summary.min))
            }
        }
    }
}

/// Render an integer with comma thousands separators, e.g. `1,234,567`
pub fn format_integer(num: i64) -> String {
    let digits = num.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if num < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
