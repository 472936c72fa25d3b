//! # Query Runner
//!
//! Runs a whole batch of queries across `W` concurrent workers.
//!
//! ## Flow
//!
//! ```text
//! queries ──► host counts ──► LoadBalancer ──► Assignment
//!                                                  │
//!      ┌───────────────┬───────────────┬───────────┘
//!      ▼               ▼               ▼
//!  queue[0]        queue[1]   ...  queue[W-1]     (one per worker, FIFO)
//!      │               │               │
//!  worker 0        worker 1   ...  worker W-1    (time each query)
//!      └───────────────┴───────┬───────┘
//!                              ▼
//!                  results channel (capacity W)  ◄── closed by supervisor
//!                              │                      after joining all workers
//!                              ▼
//!                         BatchResult
//! ```
//!
//! The assignment is computed once before anything is dispatched and never
//! changes during the batch, so every query for a host runs on the same worker
//! in input order. There is no retry, timeout or cancellation: a query call
//! that never returns stalls the whole batch.

use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{error, info, instrument};

use super::worker::{duration_nanos, run_worker, WorkerReport};
use crate::balancer::LoadBalancer;
use crate::database::QueryExecutor;
use crate::error::{BenchError, Result};
use crate::models::{host_query_counts, QueryInput};
use crate::stats::BenchmarkStats;

/// Per-query durations and total wall-clock time of one batch, in nanoseconds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    /// All worker timings concatenated; no relation to input order
    pub durations: Vec<i64>,
    /// From the first enqueue to the last worker finishing
    pub total_elapsed: i64,
    /// Time each worker spent inside query calls, indexed by worker
    pub worker_busy: Vec<i64>,
}

impl BatchResult {
    pub fn summarize(&self) -> BenchmarkStats {
        BenchmarkStats::summarize(&self.durations, self.total_elapsed)
    }

    /// Longest time any single worker spent running queries
    pub fn max_worker_busy(&self) -> i64 {
        self.worker_busy.iter().copied().max().unwrap_or(0)
    }
}

pub struct QueryRunner {
    load_balancer: Arc<dyn LoadBalancer>,
    executor: Arc<dyn QueryExecutor>,
    workers_count: usize,
}

impl std::fmt::Debug for QueryRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryRunner")
            .field("workers_count", &self.workers_count)
            .finish_non_exhaustive()
    }
}

impl QueryRunner {
    pub fn new(
        load_balancer: Arc<dyn LoadBalancer>,
        executor: Arc<dyn QueryExecutor>,
        workers_count: usize,
    ) -> Result<Self> {
        if workers_count == 0 {
            return Err(BenchError::Configuration(
                "number of workers must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            load_balancer,
            executor,
            workers_count,
        })
    }

    pub fn workers_count(&self) -> usize {
        self.workers_count
    }

    /// Run every query exactly once on its assigned worker and collect timings.
    ///
    /// Returns once all workers have drained their queues.
    #[instrument(skip_all, fields(queries = query_inputs.len(), workers = self.workers_count))]
    pub async fn run(&self, query_inputs: &[QueryInput]) -> Result<BatchResult> {
        let demand = host_query_counts(query_inputs);
        let assignment = self.load_balancer.balance(&demand, self.workers_count);
        assignment.validate(&demand, self.workers_count)?;

        // Each worker sends exactly one report, so W slots never block a worker
        let (result_tx, mut result_rx) = mpsc::channel::<WorkerReport>(self.workers_count);

        let mut queues = Vec::with_capacity(self.workers_count);
        let mut handles = Vec::with_capacity(self.workers_count);
        for worker_index in 0..self.workers_count {
            let (queue_tx, queue_rx) = mpsc::channel::<QueryInput>(1);
            queues.push(queue_tx);
            handles.push(tokio::spawn(run_worker(
                worker_index,
                queue_rx,
                Arc::clone(&self.executor),
                result_tx.clone(),
            )));
        }

        info!(
            hosts = assignment.len(),
            "Dispatching queries to workers"
        );
        let started_at = Instant::now();

        for query in query_inputs {
            let Some(worker_index) = assignment.worker_for(&query.host_name) else {
                return Err(BenchError::InvalidAssignment(format!(
                    "host {} has no worker",
                    query.host_name
                )));
            };
            if queues[worker_index].send(query.clone()).await.is_err() {
                // The worker is gone; the join below reports why
                error!(worker_index, "Worker queue closed during dispatch");
                break;
            }
        }

        // No more work: workers finish once their queues drain
        drop(queues);

        let (total_tx, total_rx) = oneshot::channel();
        tokio::spawn(async move {
            let outcomes = join_all(handles).await;
            let total_elapsed = duration_nanos(started_at.elapsed());
            let failures: Vec<String> = outcomes
                .into_iter()
                .filter_map(|outcome| outcome.err().map(|e| e.to_string()))
                .collect();
            // Last sender: dropping it closes the result channel
            drop(result_tx);
            let _ = total_tx.send((total_elapsed, failures));
        });

        let mut durations = Vec::with_capacity(query_inputs.len());
        let mut worker_busy = vec![0i64; self.workers_count];
        while let Some(report) = result_rx.recv().await {
            worker_busy[report.worker_index] = report.busy_nanos();
            durations.extend(report.durations);
        }

        let (total_elapsed, failures) = total_rx
            .await
            .map_err(|_| BenchError::Worker("supervisor exited before reporting".to_string()))?;
        if !failures.is_empty() {
            return Err(BenchError::Worker(failures.join("; ")));
        }

        info!(
            completed = durations.len(),
            total_elapsed_ns = total_elapsed,
            "Batch finished"
        );

        Ok(BatchResult {
            durations,
            total_elapsed,
            worker_busy,
        })
    }
}
