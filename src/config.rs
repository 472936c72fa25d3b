use crate::constants::{database, DATABASE_ENV_PREFIX};
use crate::error::{BenchError, Result};
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;

/// Connection parameters for the benchmarked TimescaleDB instance
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    #[serde(default)]
    pub password: String,
}

impl DatabaseConfig {
    /// Load from `POSTGRES_*` process environment variables
    pub fn from_env() -> Result<Self> {
        Self::load_from(::config::Environment::with_prefix(DATABASE_ENV_PREFIX))
    }

    /// Load from an explicit environment source, applying defaults for host and port
    pub fn load_from(environment: ::config::Environment) -> Result<Self> {
        let loaded: DatabaseConfig = ::config::Config::builder()
            .set_default("host", database::DEFAULT_HOST)?
            .set_default("port", i64::from(database::DEFAULT_PORT))?
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(BenchError::Configuration("database host is empty".to_string()));
        }
        if self.dbname.trim().is_empty() {
            return Err(BenchError::Configuration(
                "database name is empty".to_string(),
            ));
        }
        if self.user.trim().is_empty() {
            return Err(BenchError::Configuration("database user is empty".to_string()));
        }
        Ok(())
    }

    /// Connection options for the benchmarked database.
    ///
    /// Fields are set individually so credentials need no URL escaping.
    /// Statement logging is off: sqlx would otherwise log every query at
    /// `debug` inside the timed window of each worker.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.dbname)
            .username(&self.user)
            .password(&self.password)
            .disable_statement_logging()
    }
}
