//! # Query Benchmark
//!
//! Runs the CPU usage queries listed in a CSV file against TimescaleDB with a
//! fixed number of concurrent workers and prints timing statistics.
//!
//! Connection parameters come from `POSTGRES_HOST`, `POSTGRES_PORT`,
//! `POSTGRES_DBNAME`, `POSTGRES_USER` and `POSTGRES_PASSWORD`.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::error;

use query_bench::balancer::GreedyLoadBalancer;
use query_bench::config::DatabaseConfig;
use query_bench::database::TimescaleDb;
use query_bench::execution::QueryRunner;
use query_bench::ingest::read_query_inputs;
use query_bench::logging::init_structured_logging;

#[derive(Parser)]
#[command(name = "query-bench")]
#[command(about = "Benchmark per-host CPU usage queries across concurrent workers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Number of concurrent workers
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    workers: u32,

    /// CSV file with hostname,start_time,end_time rows
    csv_file: PathBuf,

    /// Print statistics as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_structured_logging();

    if let Err(e) = run(cli).await {
        error!("Benchmark failed: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let db_config = DatabaseConfig::from_env().context("failed to load database configuration")?;
    let db = TimescaleDb::connect(&db_config, cli.workers)
        .await
        .context("failed to create the query runner")?;

    let runner = QueryRunner::new(
        Arc::new(GreedyLoadBalancer::new()),
        Arc::new(db.clone()),
        cli.workers as usize,
    )?;

    let query_inputs = read_query_inputs(&cli.csv_file)
        .with_context(|| format!("failed to read {}", cli.csv_file.display()))?;

    let result = runner.run(&query_inputs).await?;
    db.close().await;

    let stats = result.summarize();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{stats}");
    }

    Ok(())
}
