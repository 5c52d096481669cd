use crate::sources::types::{FetchError, RawTable};
use async_trait::async_trait;

/// Common trait for all tabular listing sources
/// This allows swapping the published-spreadsheet transport for other
/// backends (CSV export, a REST endpoint, etc) in the future
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Fetch one named table from the source
    async fn fetch_table(&self, source_id: &str, table_name: &str)
        -> Result<RawTable, FetchError>;

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}
