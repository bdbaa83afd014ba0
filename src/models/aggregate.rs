//! Aggregation response DTOs.
//!
//! - `EnvExampleResponse`: Sorted env keys plus the rendered `.env.example`
//! - `MergeResponse`: Merged file blob with one block per selected file
//!
//! Both are derived from the current selection on demand, never stored.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct EnvExampleResponse {
    /// Deduplicated keys, sorted ascending.
    pub keys: Vec<String>,
    /// One `KEY=` per line.
    pub content: String,
    /// Files that could not be fetched and contributed no keys.
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeResponse {
    pub content: String,
    /// Number of `######## path` blocks, equal to the selected file count.
    pub block_count: usize,
}
