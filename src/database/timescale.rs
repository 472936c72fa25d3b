use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{info, warn};

use super::QueryExecutor;
use crate::config::DatabaseConfig;
use crate::constants::database::CPU_USAGE_QUERY;
use crate::error::{BenchError, Result};

/// TimescaleDB-backed query executor
///
/// The pool is shared by every worker. Its size matches the worker count so
/// each worker can hold one connection without waiting on the others.
#[derive(Debug, Clone)]
pub struct TimescaleDb {
    pool: PgPool,
}

impl TimescaleDb {
    pub async fn connect(config: &DatabaseConfig, max_connections: u32) -> Result<Self> {
        if max_connections == 0 {
            return Err(BenchError::Configuration(
                "connection pool needs at least one connection".to_string(),
            ));
        }

        info!(
            host = %config.host,
            port = config.port,
            dbname = %config.dbname,
            max_connections,
            "Connecting to TimescaleDB"
        );

        let pool = Self::pool_options(max_connections)
            .connect_with(config.connect_options())
            .await?;

        Ok(Self { pool })
    }

    /// One connection per worker, so no worker waits on another for a connection
    pub fn pool_options(max_connections: u32) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(0)
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl QueryExecutor for TimescaleDb {
    async fn run_cpu_usage_query(
        &self,
        host_name: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(CPU_USAGE_QUERY)
            .bind(start_time)
            .bind(end_time)
            .bind(host_name)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(host = %host_name, error = %e, "Unable to execute query");
                BenchError::Database(e)
            })?;

        Ok(())
    }
}
