use serde_json::Value;
use thiserror::Error;

/// Column labels plus raw cell values, exactly as the transport saw them.
/// Cells are untyped (`string | number | empty`) until normalization.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub column_labels: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Transport-level failures.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network error or non-success HTTP status.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),
    /// Response arrived but the table envelope could not be located in it.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
