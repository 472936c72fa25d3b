//! # Batch Execution
//!
//! Fan-out/fan-in execution of a planned query batch over a fixed pool of
//! concurrent workers.

pub mod query_runner;
pub mod worker;

pub use query_runner::{BatchResult, QueryRunner};
pub use worker::WorkerReport;
