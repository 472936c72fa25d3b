#![allow(clippy::doc_markdown)] // Allow technical terms like TimescaleDB, PostgreSQL in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Query Bench
//!
//! Concurrent benchmarking of per-host time-series queries.
//!
//! ## Overview
//!
//! A batch of CPU usage queries, each bound to one host and a time range, is
//! spread over a fixed number of workers. All queries for a host run on the
//! same worker. Hosts are assigned up front by a [`balancer::LoadBalancer`]
//! so that workers end up with roughly equal query counts, then the
//! [`execution::QueryRunner`] fans the queries out, times every call and
//! collects the timings once all workers are done.
//!
//! ## Module Organization
//!
//! - [`models`] - Query inputs and per-host demand
//! - [`ingest`] - CSV work source
//! - [`balancer`] - Host to worker assignment
//! - [`database`] - Query execution against TimescaleDB
//! - [`execution`] - Worker pool and batch timing
//! - [`stats`] - Summary statistics and report rendering
//! - [`config`] - Database connection configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use query_bench::balancer::GreedyLoadBalancer;
//! use query_bench::config::DatabaseConfig;
//! use query_bench::database::TimescaleDb;
//! use query_bench::execution::QueryRunner;
//! use query_bench::ingest::read_query_inputs;
//!
//! # async fn example() -> query_bench::Result<()> {
//! let config = DatabaseConfig::from_env()?;
//! let db = TimescaleDb::connect(&config, 4).await?;
//! let runner = QueryRunner::new(Arc::new(GreedyLoadBalancer), Arc::new(db), 4)?;
//!
//! let queries = read_query_inputs("query_params.csv")?;
//! let stats = runner.run(&queries).await?.summarize();
//! println!("{stats}");
//! # Ok(())
//! # }
//! ```

pub mod balancer;
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod execution;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod stats;

pub use crate::balancer::{Assignment, GreedyLoadBalancer, LoadBalancer};
pub use crate::config::DatabaseConfig;
pub use crate::database::{QueryExecutor, TimescaleDb};
pub use crate::error::{BenchError, Result};
pub use crate::execution::{BatchResult, QueryRunner, WorkerReport};
pub use crate::models::{host_query_counts, QueryInput};
pub use crate::stats::{BenchmarkStats, QueryTimeSummary};
