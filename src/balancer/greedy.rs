//! # Greedy Load Balancer
//!
//! Balancing hosts across workers is multi-way number partitioning: split the
//! per-host query counts into `W` buckets so the largest bucket sum is as small
//! as possible. That problem is NP-hard, so this balancer uses the classic
//! greedy approximation: take hosts from the largest count down and give each
//! one to the worker with the smallest running load.
//!
//! The whole batch is known up front, which is what makes the sort possible.
//! Queries are assumed to cost roughly the same, so a host's weight is its
//! query count.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use tracing::info;

use super::{Assignment, LoadBalancer};

#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyLoadBalancer;

impl GreedyLoadBalancer {
    pub fn new() -> Self {
        Self
    }

    /// Hosts in assignment order: query count descending, host name ascending on ties
    pub fn ordered_hosts(demand: &HashMap<String, usize>) -> Vec<(&str, usize)> {
        let mut hosts: Vec<(&str, usize)> = demand
            .iter()
            .map(|(host, count)| (host.as_str(), *count))
            .collect();
        hosts.sort_by(|(host_a, count_a), (host_b, count_b)| {
            match count_b.cmp(count_a) {
                Ordering::Equal => host_a.cmp(host_b),
                other => other,
            }
        });
        hosts
    }
}

impl LoadBalancer for GreedyLoadBalancer {
    fn balance(&self, demand: &HashMap<String, usize>, workers: usize) -> Assignment {
        let workers = workers.max(1);
        let mut worker_loads = vec![0usize; workers];
        let mut host_to_worker = HashMap::with_capacity(demand.len());

        // Min-heap on (load, worker index): equal loads resolve to the lowest index
        let mut least_loaded: BinaryHeap<Reverse<(usize, usize)>> =
            (0..workers).map(|worker| Reverse((0, worker))).collect();

        for (host, count) in Self::ordered_hosts(demand) {
            if let Some(Reverse((load, worker))) = least_loaded.pop() {
                let load = load + count;
                worker_loads[worker] = load;
                host_to_worker.insert(host.to_string(), worker);
                least_loaded.push(Reverse((load, worker)));
            }
        }

        info!(
            hosts = host_to_worker.len(),
            workers,
            loads = ?worker_loads,
            "Number of queries assigned to each worker"
        );

        Assignment::new(host_to_worker, worker_loads)
    }
}
