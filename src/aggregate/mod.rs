//! Content aggregation over the current selection.
//!
//! Two independent derivations, both recomputed on demand and never stored:
//! - `env`: scan selected files for environment-variable references and
//!   render a `.env.example` listing
//! - `merge`: concatenate selected files into one path-delimited blob
//!
//! Directories never contribute content; a file that cannot be fetched
//! degrades (zero keys / inline marker) instead of failing the operation.

pub mod env;
pub mod merge;

use crate::error::Result;
use crate::github::GitHubClient;
use crate::models::Entry;

pub use env::{extract_env_keys, render_env_example, scan_env_keys};
pub use merge::{format_block, merge_file_blocks, merge_files};

/// Bounded fan-out for per-file content fetches; results are reassembled
/// in selection order regardless.
const CONTENT_FETCH_CONCURRENCY: usize = 4;

/// Source of raw file contents. Production uses the GitHub client; tests
/// use an in-memory stub.
pub trait ContentSource {
    async fn file_content(&self, entry: &Entry) -> Result<String>;
}

impl ContentSource for GitHubClient {
    async fn file_content(&self, entry: &Entry) -> Result<String> {
        self.fetch_file_content(entry).await
    }
}
