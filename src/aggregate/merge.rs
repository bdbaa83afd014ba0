//! Merged-file blob for prompting.
//!
//! Every selected file becomes one block of `######## <path>` followed by
//! its raw content; blocks are joined with newlines in selection order. A
//! file that cannot be fetched keeps its block, with an inline error marker
//! standing in for the content, so one bad file never aborts the merge.

use futures::stream::{self, StreamExt};
use tracing::warn;

use crate::aggregate::{CONTENT_FETCH_CONCURRENCY, ContentSource};
use crate::models::{Entry, MergeResponse};

pub const BLOCK_MARKER: &str = "########";

pub fn format_block(path: &str, content: &str) -> String {
    format!("{} {}\n{}", BLOCK_MARKER, path, content)
}

/// One block per selected file, in selection order. Fetches run with
/// bounded concurrency but `buffered` keeps the output ordered.
pub async fn merge_file_blocks<S: ContentSource>(source: &S, entries: &[Entry]) -> Vec<String> {
    let files: Vec<Entry> = entries.iter().filter(|e| !e.is_dir()).cloned().collect();

    stream::iter(files)
        .map(|entry| async move {
            let content = match source.file_content(&entry).await {
                Ok(content) => content,
                Err(e) => {
                    warn!("Could not fetch '{}': {}", entry.path, e);
                    format!("Error fetching file content: {}", e)
                }
            };
            format_block(&entry.path, &content)
        })
        .buffered(CONTENT_FETCH_CONCURRENCY)
        .collect()
        .await
}

pub async fn merge_files<S: ContentSource>(source: &S, entries: &[Entry]) -> MergeResponse {
    let blocks = merge_file_blocks(source, entries).await;
    MergeResponse {
        block_count: blocks.len(),
        content: blocks.join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Result};
    use crate::models::EntryType;
    use std::collections::HashMap;

    struct StubContent {
        files: HashMap<String, String>,
    }

    impl StubContent {
        fn new(files: Vec<(&str, &str)>) -> Self {
            Self {
                files: files
                    .into_iter()
                    .map(|(path, content)| (path.to_string(), content.to_string()))
                    .collect(),
            }
        }
    }

    impl ContentSource for StubContent {
        async fn file_content(&self, entry: &Entry) -> Result<String> {
            self.files
                .get(&entry.path)
                .cloned()
                .ok_or_else(|| AppError::Network(format!("no stub for {}", entry.path)))
        }
    }

    fn entry(path: &str, entry_type: EntryType) -> Entry {
        Entry {
            name: path.rsplit('/').next().unwrap_or_default().to_string(),
            path: path.to_string(),
            entry_type,
            url: format!("api{}", path),
            download_url: None,
            depth: 0,
        }
    }

    #[tokio::test]
    async fn block_count_matches_selected_file_count() {
        let source = StubContent::new(vec![("/a.js", "aaa"), ("/src/b.js", "bbb")]);
        let entries = vec![
            entry("/src", EntryType::Dir),
            entry("/a.js", EntryType::File),
            entry("/src/b.js", EntryType::File),
        ];

        let result = merge_files(&source, &entries).await;
        assert_eq!(result.block_count, 2);
        assert_eq!(result.content, "######## /a.js\naaa\n######## /src/b.js\nbbb");
    }

    #[tokio::test]
    async fn blocks_follow_selection_order() {
        let source = StubContent::new(vec![("/a.js", "aaa"), ("/b.js", "bbb")]);
        let entries = vec![
            entry("/b.js", EntryType::File),
            entry("/a.js", EntryType::File),
        ];

        let blocks = merge_file_blocks(&source, &entries).await;
        assert!(blocks[0].starts_with("######## /b.js"));
        assert!(blocks[1].starts_with("######## /a.js"));
    }

    #[tokio::test]
    async fn failed_fetch_keeps_block_with_inline_marker() {
        let source = StubContent::new(vec![("/a.js", "aaa")]);
        let entries = vec![
            entry("/a.js", EntryType::File),
            entry("/gone.js", EntryType::File),
        ];

        let result = merge_files(&source, &entries).await;
        assert_eq!(result.block_count, 2);
        assert!(result.content.contains("######## /gone.js\nError fetching file content:"));
    }

    #[tokio::test]
    async fn empty_selection_merges_to_empty_string() {
        let source = StubContent::new(vec![]);
        let result = merge_files(&source, &[]).await;
        assert_eq!(result.block_count, 0);
        assert_eq!(result.content, "");
    }
}
