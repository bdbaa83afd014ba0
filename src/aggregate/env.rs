//! Environment-key extraction.
//!
//! Scans raw file text for the one accessor idiom the product recognizes,
//! `process.env.SOME_KEY`, with a single compiled pattern. Deliberately
//! naive: no source-language parsing, no other accessor spellings.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use futures::stream::{self, StreamExt};
use regex::Regex;
use tracing::warn;

use crate::aggregate::{CONTENT_FETCH_CONCURRENCY, ContentSource};
use crate::models::{Entry, EnvExampleResponse};

static ENV_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"process\.env\.([A-Z0-9_]+)").expect("env key pattern compiles"));

/// All key names referenced in one file's content, in match order.
pub fn scan_env_keys(content: &str) -> Vec<String> {
    ENV_KEY_PATTERN
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// One `KEY=` line per key.
pub fn render_env_example(keys: &[String]) -> String {
    keys.iter()
        .map(|key| format!("{}=", key))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Scan every selected file and collect the deduplicated, sorted key list.
///
/// Unfetchable files are logged and contribute zero keys; an empty
/// selection yields an empty result. Because the result is a sorted set,
/// re-running over the same files is idempotent and selection-order
/// independent.
pub async fn extract_env_keys<S: ContentSource>(
    source: &S,
    entries: &[Entry],
) -> EnvExampleResponse {
    let files: Vec<Entry> = entries.iter().filter(|e| !e.is_dir()).cloned().collect();

    let fetched: Vec<_> = stream::iter(files)
        .map(|entry| async move {
            let result = source.file_content(&entry).await;
            (entry, result)
        })
        .buffered(CONTENT_FETCH_CONCURRENCY)
        .collect()
        .await;

    let mut keys = BTreeSet::new();
    let mut skipped = Vec::new();
    for (entry, result) in fetched {
        match result {
            Ok(content) => keys.extend(scan_env_keys(&content)),
            Err(e) => {
                warn!("Could not scan '{}': {}", entry.path, e);
                skipped.push(entry.path.clone());
            }
        }
    }

    let keys: Vec<String> = keys.into_iter().collect();
    let content = render_env_example(&keys);
    EnvExampleResponse {
        keys,
        content,
        skipped,
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

    #[test]
    fn scans_keys_in_match_order() {
        let content = "process.env.ZEBRA; process.env.ALPHA; process.env.lowercase";
        assert_eq!(scan_env_keys(content), vec!["ZEBRA", "ALPHA"]);
    }

    #[test]
    fn renders_one_assignment_per_line() {
        let keys = vec!["BAZ".to_string(), "FOO_BAR".to_string()];
        assert_eq!(render_env_example(&keys), "BAZ=\nFOO_BAR=");
    }

    #[tokio::test]
    async fn deduplicates_and_sorts_across_files() {
        let source = StubContent::new(vec![(
            "/a.js",
            "const k = process.env.FOO_BAR; console.log(process.env.FOO_BAR, process.env.BAZ)",
        )]);
        let entries = vec![entry("/a.js", EntryType::File)];

        let result = extract_env_keys(&source, &entries).await;
        assert_eq!(result.keys, vec!["BAZ", "FOO_BAR"]);
        assert_eq!(result.content, "BAZ=\nFOO_BAR=");
        assert!(result.skipped.is_empty());
    }

    #[tokio::test]
    async fn result_is_independent_of_selection_order() {
        let source = StubContent::new(vec![
            ("/a.js", "process.env.ONE"),
            ("/b.js", "process.env.TWO"),
        ]);
        let forward = vec![
            entry("/a.js", EntryType::File),
            entry("/b.js", EntryType::File),
        ];
        let reverse: Vec<Entry> = forward.iter().rev().cloned().collect();

        let first = extract_env_keys(&source, &forward).await;
        let second = extract_env_keys(&source, &reverse).await;
        assert_eq!(first.keys, second.keys);
        assert_eq!(first.keys, vec!["ONE", "TWO"]);
    }

    #[tokio::test]
    async fn unfetchable_file_contributes_zero_keys() {
        let source = StubContent::new(vec![("/ok.js", "process.env.KEPT")]);
        let entries = vec![
            entry("/ok.js", EntryType::File),
            entry("/gone.js", EntryType::File),
        ];

        let result = extract_env_keys(&source, &entries).await;
        assert_eq!(result.keys, vec!["KEPT"]);
        assert_eq!(result.skipped, vec!["/gone.js"]);
    }

    #[tokio::test]
    async fn directories_are_not_fetched() {
        let source = StubContent::new(vec![]);
        let entries = vec![entry("/src", EntryType::Dir)];

        let result = extract_env_keys(&source, &entries).await;
        assert!(result.keys.is_empty());
        assert!(result.skipped.is_empty());
    }

    #[tokio::test]
    async fn empty_selection_yields_empty_output() {
        let source = StubContent::new(vec![]);
        let result = extract_env_keys(&source, &[]).await;
        assert!(result.keys.is_empty());
        assert_eq!(result.content, "");
    }
}
