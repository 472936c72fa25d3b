#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use query_bench::{BenchError, QueryExecutor, QueryInput, Result};

/// One call observed by [`MockQueryExecutor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockQueryCall {
    pub host_name: String,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<MockQueryCall>,
    in_flight: HashSet<String>,
    in_flight_count: usize,
    max_in_flight: usize,
    host_overlaps: usize,
}

/// Executor double that records calls and tracks concurrency
///
/// A host running twice at the same time means it was split across workers.
#[derive(Debug, Default)]
pub struct MockQueryExecutor {
    state: Mutex<MockState>,
    delay: Option<Duration>,
    failing_hosts: HashSet<String>,
}

impl MockQueryExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing_for(mut self, hosts: &[&str]) -> Self {
        self.failing_hosts = hosts.iter().map(|h| (*h).to_string()).collect();
        self
    }

    pub fn calls(&self) -> Vec<MockQueryCall> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.lock().max_in_flight
    }

    pub fn host_overlaps(&self) -> usize {
        self.state.lock().host_overlaps
    }

    /// Start times observed for each host, in execution order
    pub fn starts_by_host(&self) -> HashMap<String, Vec<DateTime<Utc>>> {
        let mut by_host: HashMap<String, Vec<DateTime<Utc>>> = HashMap::new();
        for call in self.state.lock().calls.iter() {
            by_host
                .entry(call.host_name.clone())
                .or_default()
                .push(call.start_time);
        }
        by_host
    }
}

#[async_trait]
impl QueryExecutor for MockQueryExecutor {
    async fn run_cpu_usage_query(
        &self,
        host_name: &str,
        start_time: DateTime<Utc>,
        _end_time: DateTime<Utc>,
    ) -> Result<()> {
        {
            let mut state = self.state.lock();
            state.calls.push(MockQueryCall {
                host_name: host_name.to_string(),
                start_time,
            });
            if !state.in_flight.insert(host_name.to_string()) {
                state.host_overlaps += 1;
            }
            state.in_flight_count += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight_count);
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        {
            let mut state = self.state.lock();
            state.in_flight.remove(host_name);
            state.in_flight_count -= 1;
        }

        if self.failing_hosts.contains(host_name) {
            return Err(BenchError::InvalidInput(format!("query failed for {host_name}")));
        }
        Ok(())
    }
}

/// Build `n` queries, cycling through `hosts`, with strictly increasing start times
pub fn queries_for_hosts(hosts: &[&str], n: usize) -> Vec<QueryInput> {
    let base = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let start = base + ChronoDuration::minutes(i as i64);
            QueryInput::new(hosts[i % hosts.len()], start, start + ChronoDuration::hours(1))
        })
        .collect()
}
