//! Repository tree fetching and flattening.
//!
//! Walks the contents API from the repository root and flattens every
//! subdirectory into one depth-first pre-order sequence: a directory's own
//! entry always precedes its children, siblings keep their original listing
//! order. The walk uses an explicit frame stack, not call recursion, so
//! deeply nested repositories cannot exhaust the call stack.
//!
//! Partial-success policy: a subdirectory whose listing cannot be fetched or
//! is not a JSON array is abandoned with a warning; its siblings and the
//! rest of the tree still come back. Only a failure at the repository root
//! is fatal.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{AppError, Result};
use crate::github::client::{GitHubClient, contents_url};
use crate::models::{Entry, EntryType};

/// Source of directory listings. Production uses the HTTP client; tests use
/// an in-memory stub.
pub trait ListingSource {
    async fn fetch_listing(&self, url: &str) -> Result<Value>;
}

impl ListingSource for GitHubClient {
    async fn fetch_listing(&self, url: &str) -> Result<Value> {
        self.get_json(url).await
    }
}

#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub entries: Vec<Entry>,
    pub warnings: Vec<String>,
}

/// One element of a contents listing as the host returns it.
#[derive(Debug, Deserialize)]
struct RawEntry {
    name: String,
    #[serde(rename = "type")]
    entry_type: String,
    url: String,
    download_url: Option<String>,
}

/// A fetched listing currently being walked.
struct Frame {
    items: std::vec::IntoIter<Value>,
    depth: usize,
    parent_path: String,
}

pub async fn fetch_tree<S: ListingSource>(source: &S, repo_path: &str) -> Result<FetchOutcome> {
    let root_url = contents_url(repo_path);
    let root = source.fetch_listing(&root_url).await?;

    let Value::Array(items) = root else {
        return Err(AppError::RemoteApi(format!(
            "Unexpected response shape for {}",
            repo_path
        )));
    };

    let mut entries = Vec::new();
    let mut warnings = Vec::new();
    let mut stack = vec![Frame {
        items: items.into_iter(),
        depth: 0,
        parent_path: String::new(),
    }];

    while let Some(mut frame) = stack.pop() {
        let Some(item) = frame.items.next() else {
            continue;
        };

        let depth = frame.depth;
        let parent_path = frame.parent_path.clone();
        // The parent frame goes back first so a child frame pushed below is
        // processed ahead of the remaining siblings (pre-order).
        stack.push(frame);

        let raw: RawEntry = match serde_json::from_value(item) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Skipping malformed listing entry under '{}': {}", parent_path, e);
                warnings.push(format!("Skipped a malformed entry under '{}/'", parent_path));
                continue;
            }
        };

        let entry = Entry {
            path: format!("{}/{}", parent_path, raw.name),
            name: raw.name,
            entry_type: if raw.entry_type == "dir" {
                EntryType::Dir
            } else {
                EntryType::File
            },
            url: raw.url,
            download_url: raw.download_url,
            depth,
        };

        let is_dir = entry.is_dir();
        let path = entry.path.clone();
        let url = entry.url.clone();
        entries.push(entry);

        if !is_dir {
            continue;
        }

        match source.fetch_listing(&url).await {
            Ok(Value::Array(children)) => {
                stack.push(Frame {
                    items: children.into_iter(),
                    depth: depth + 1,
                    parent_path: path,
                });
            }
            Ok(_) => {
                warn!("Listing for '{}' was not an array; branch abandoned", path);
                warnings.push(format!("Skipped '{}': listing was not an array", path));
            }
            Err(e) => {
                warn!("Could not list '{}': {}; branch abandoned", path, e);
                warnings.push(format!("Skipped '{}': {}", path, e));
            }
        }
    }

    Ok(FetchOutcome { entries, warnings })
}
