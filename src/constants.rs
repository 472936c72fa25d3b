//! # Benchmark Constants
//!
//! Fixed formats and defaults shared by the work source, the database
//! executor and the configuration layer.

/// Layout of the start/end timestamps in the query parameter file
pub const TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Environment variable prefix for database connection parameters
pub const DATABASE_ENV_PREFIX: &str = "POSTGRES";

pub mod database {
    pub const DEFAULT_HOST: &str = "postgres";
    pub const DEFAULT_PORT: u16 = 5432;

    /// Per-minute min/max CPU usage for one host, buckets aligned to the range start
    pub const CPU_USAGE_QUERY: &str = r#"
        SELECT time_bucket('1 minute', ts, origin => $1) AS minute,
               min(usage) AS min_usage,
               max(usage) AS max_usage
        FROM cpu_usage
        WHERE ts >= $1 AND ts <= $2 AND host = $3
        GROUP BY minute
    "#;
}

pub mod csv_columns {
    pub const HOSTNAME: usize = 0;
    pub const START_TIME: usize = 1;
    pub const END_TIME: usize = 2;
}
