mod common;

use common::*;
use std::io::Write;
use std::sync::Arc;

use query_bench::ingest::read_query_inputs;
use query_bench::{host_query_counts, BenchError, GreedyLoadBalancer, LoadBalancer, QueryRunner};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/query_params.csv");

#[test]
fn test_fixture_loads_and_drops_bad_rows() {
    let queries = read_query_inputs(FIXTURE).unwrap();

    assert_eq!(queries.len(), 9);
    assert!(queries.iter().all(|q| q.host_name != "host_000005"));
    assert_eq!(queries[0].host_name, "host_000008");
    assert!(queries.iter().all(|q| q.start_time < q.end_time));
}

#[test]
fn test_fixture_demand_balances_across_workers() {
    let queries = read_query_inputs(FIXTURE).unwrap();
    let demand = host_query_counts(&queries);

    assert_eq!(demand["host_000008"], 3);
    assert_eq!(demand["host_000001"], 2);
    assert_eq!(demand["host_000002"], 2);

    let assignment = GreedyLoadBalancer.balance(&demand, 2);
    let mut loads = assignment.worker_loads().to_vec();
    loads.sort();
    assert_eq!(loads, vec![4, 5]);
}

#[test]
fn test_reads_temp_file_with_leading_spaces() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "hostname, start_time, end_time").unwrap();
    writeln!(file, "host_000010, 2017-01-01 00:00:00, 2017-01-01 01:00:00").unwrap();
    writeln!(file, "host_000011, 2017-01-01 00:00:00, bogus").unwrap();
    file.flush().unwrap();

    let queries = read_query_inputs(file.path()).unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].host_name, "host_000010");
}

#[test]
fn test_missing_file_is_ingest_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_query_inputs(dir.path().join("missing.csv")).unwrap_err();
    assert!(matches!(err, BenchError::Ingest(_)));
}

#[tokio::test]
async fn test_fixture_end_to_end_with_mock_executor() {
    let queries = read_query_inputs(FIXTURE).unwrap();
    let executor = Arc::new(MockQueryExecutor::new());
    let runner = QueryRunner::new(Arc::new(GreedyLoadBalancer), executor.clone(), 3).unwrap();

    let result = runner.run(&queries).await.unwrap();
    let stats = result.summarize();

    assert_eq!(stats.summary.unwrap().count, 9);
    assert_eq!(executor.call_count(), 9);
    assert!(stats.to_string().contains("Total number of queries ran: 9"));
}
