//! # Query Execution
//!
//! The benchmark only needs one capability from a data store: run the CPU usage
//! query for a host over a time range and report whether it succeeded. Any
//! store can be benchmarked by implementing [`QueryExecutor`].

pub mod timescale;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

pub use timescale::TimescaleDb;

#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run the per-minute CPU usage query for `host_name` between `start_time`
    /// and `end_time` (inclusive).
    async fn run_cpu_usage_query(
        &self,
        host_name: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<()>;
}
