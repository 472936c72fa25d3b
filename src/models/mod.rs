pub mod query_input;

// Re-export core models for easy access
pub use query_input::{host_query_counts, QueryInput};
