//! # Load Balancing
//!
//! Assigns every host in a batch to exactly one worker before any query is
//! dispatched. Different heuristics can be compared by implementing
//! [`LoadBalancer`] and injecting the implementation into the
//! [`QueryRunner`](crate::execution::QueryRunner).

pub mod greedy;

use std::collections::HashMap;

use crate::error::{BenchError, Result};

pub use greedy::GreedyLoadBalancer;

/// Strategy for distributing per-host query demand across a fixed worker count
pub trait LoadBalancer: Send + Sync {
    /// Compute a host to worker assignment for the given demand.
    ///
    /// `workers` is always at least one. Every host in `demand` must appear in
    /// the returned assignment with a worker index below `workers`.
    fn balance(&self, demand: &HashMap<String, usize>, workers: usize) -> Assignment;
}

/// Host to worker mapping together with the resulting per-worker query load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    host_to_worker: HashMap<String, usize>,
    worker_loads: Vec<usize>,
}

impl Assignment {
    pub fn new(host_to_worker: HashMap<String, usize>, worker_loads: Vec<usize>) -> Self {
        Self {
            host_to_worker,
            worker_loads,
        }
    }

    /// Worker index that runs every query for `host_name`
    pub fn worker_for(&self, host_name: &str) -> Option<usize> {
        self.host_to_worker.get(host_name).copied()
    }

    pub fn host_to_worker(&self) -> &HashMap<String, usize> {
        &self.host_to_worker
    }

    pub fn worker_loads(&self) -> &[usize] {
        &self.worker_loads
    }

    pub fn len(&self) -> usize {
        self.host_to_worker.len()
    }

    pub fn is_empty(&self) -> bool {
        self.host_to_worker.is_empty()
    }

    /// Check that the assignment covers exactly the demanded hosts and only
    /// names workers in `[0, workers)`.
    pub fn validate(&self, demand: &HashMap<String, usize>, workers: usize) -> Result<()> {
        for host in demand.keys() {
            match self.host_to_worker.get(host) {
                None => {
                    return Err(BenchError::InvalidAssignment(format!(
                        "host {host} was not assigned to any worker"
                    )))
                }
                Some(&worker) if worker >= workers => {
                    return Err(BenchError::InvalidAssignment(format!(
                        "host {host} assigned to worker {worker}, but only {workers} workers exist"
                    )))
                }
                Some(_) => {}
            }
        }

        if let Some(extra) = self.host_to_worker.keys().find(|h| !demand.contains_key(*h)) {
            return Err(BenchError::InvalidAssignment(format!(
                "host {extra} is assigned but has no queries"
            )));
        }

        Ok(())
    }
}
