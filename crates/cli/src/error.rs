use planner::error::QueryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read or write a file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse the request file as JSON: {0}")]
    RequestParse(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid dialect provided: {0}")]
    InvalidDialect(String),

    #[error("Failed to render the statement: {0}")]
    Query(#[from] QueryError),

    #[error("Request has {0} pending diagnostic(s)")]
    Diagnostics(usize),
}
