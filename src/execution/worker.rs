//! # Query Worker
//!
//! A worker owns one input queue and runs its queries strictly in the order
//! they were enqueued. It reports all of its timings at once when the queue is
//! closed and drained.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::database::QueryExecutor;
use crate::models::QueryInput;

/// Timings produced by one worker, in that worker's completion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker_index: usize,
    pub durations: Vec<i64>,
}

impl WorkerReport {
    pub fn new(worker_index: usize) -> Self {
        Self {
            worker_index,
            durations: Vec::new(),
        }
    }

    /// Time this worker spent inside query calls
    pub fn busy_nanos(&self) -> i64 {
        self.durations
            .iter()
            .fold(0i64, |total, duration| total.saturating_add(*duration))
    }
}

/// Drain `queue`, timing every query, then push the report onto `results`.
///
/// Query failures are ignored: the query still counts and its duration is
/// still recorded. A query that never returns blocks this worker forever.
pub async fn run_worker(
    worker_index: usize,
    mut queue: mpsc::Receiver<QueryInput>,
    executor: Arc<dyn QueryExecutor>,
    results: mpsc::Sender<WorkerReport>,
) {
    let mut report = WorkerReport::new(worker_index);

    while let Some(query) = queue.recv().await {
        let started_at = Instant::now();
        let _ = executor
            .run_cpu_usage_query(&query.host_name, query.start_time, query.end_time)
            .await;
        report.durations.push(duration_nanos(started_at.elapsed()));
    }

    debug!(
        worker_index,
        queries = report.durations.len(),
        busy_nanos = report.busy_nanos(),
        "Worker queue drained"
    );

    if results.send(report).await.is_err() {
        warn!(worker_index, "Result channel closed before worker could report");
    }
}

pub(crate) fn duration_nanos(elapsed: Duration) -> i64 {
    i64::try_from(elapsed.as_nanos()).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BenchError, Result};
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingExecutor {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl QueryExecutor for RecordingExecutor {
        async fn run_cpu_usage_query(
            &self,
            host_name: &str,
            _start_time: DateTime<Utc>,
            _end_time: DateTime<Utc>,
        ) -> Result<()> {
            self.calls.lock().unwrap().push(host_name.to_string());
            if self.fail {
                Err(BenchError::InvalidInput("boom".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn query(host: &str) -> QueryInput {
        let start = Utc.with_ymd_and_hms(2017, 1, 1, 8, 0, 0).unwrap();
        QueryInput::new(host, start, start + chrono::Duration::hours(1))
    }

    async fn drive(executor: Arc<RecordingExecutor>, hosts: &[&str]) -> WorkerReport {
        let (input_tx, input_rx) = mpsc::channel(1);
        let (result_tx, mut result_rx) = mpsc::channel(1);
        let handle = tokio::spawn(run_worker(7, input_rx, executor, result_tx));

        for host in hosts {
            input_tx.send(query(host)).await.unwrap();
        }
        drop(input_tx);

        handle.await.unwrap();
        result_rx.recv().await.unwrap()
    }

    #[tokio::test]
    async fn test_worker_runs_queries_in_enqueue_order() {
        let executor = Arc::new(RecordingExecutor::default());
        let report = drive(Arc::clone(&executor), &["h1", "h2", "h1"]).await;

        assert_eq!(report.worker_index, 7);
        assert_eq!(report.durations.len(), 3);
        assert_eq!(*executor.calls.lock().unwrap(), vec!["h1", "h2", "h1"]);
    }

    #[tokio::test]
    async fn test_worker_times_failed_queries() {
        let executor = Arc::new(RecordingExecutor {
            fail: true,
            ..Default::default()
        });
        let report = drive(Arc::clone(&executor), &["h1", "h2"]).await;

        assert_eq!(report.durations.len(), 2);
        assert!(report.durations.iter().all(|d| *d >= 0));
    }

    #[tokio::test]
    async fn test_worker_with_closed_empty_queue_reports_nothing() {
        let report = drive(Arc::new(RecordingExecutor::default()), &[]).await;
        assert!(report.durations.is_empty());
        assert_eq!(report.busy_nanos(), 0);
    }

    #[test]
    fn test_busy_nanos_saturates() {
        let report = WorkerReport {
            worker_index: 0,
            durations: vec![i64::MAX, 10],
        };
        assert_eq!(report.busy_nanos(), i64::MAX);
    }

    #[test]
    fn test_duration_nanos_saturates() {
        assert_eq!(duration_nanos(Duration::from_nanos(1_500)), 1_500);
        assert_eq!(duration_nanos(Duration::MAX), i64::MAX);
    }
}
