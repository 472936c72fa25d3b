//! # Work Source
//!
//! Loads benchmark query parameters from CSV files.

pub mod csv_source;

pub use csv_source::{read_query_inputs, read_query_inputs_from};
