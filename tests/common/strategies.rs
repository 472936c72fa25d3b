#![allow(dead_code)]

use proptest::prelude::*;
use std::collections::HashMap;

/// Host names in the `host_000042` style used by the benchmark dataset
pub fn host_name_strategy() -> impl Strategy<Value = String> {
    (0u32..500).prop_map(|i| format!("host_{i:06}"))
}

/// Per-host query counts, always positive
pub fn demand_strategy() -> impl Strategy<Value = HashMap<String, usize>> {
    prop::collection::hash_map(host_name_strategy(), 1usize..200, 0..40)
}

pub fn worker_count_strategy() -> impl Strategy<Value = usize> {
    1usize..16
}
