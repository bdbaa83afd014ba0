//! Repository tree DTOs.
//!
//! - `Entry`: One flattened file/directory node (FileTree checklist)
//! - `EntryType`: file | dir, mirroring the contents API's `type` field
//! - `TreeView`: Full session snapshot (entries + selection + expansion)
//!
//! Entries are immutable once created; a new fetch replaces the whole set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Leaf segment shown in the tree.
    pub name: String,
    /// Slash-delimited path from the repository root, with a leading `/`.
    /// Unique within one fetch; for non-root entries it is always
    /// `parent_path + "/" + name`.
    pub path: String,
    pub entry_type: EntryType,
    /// Contents-API address: children listing for a dir, metadata/raw
    /// content for a file.
    pub url: String,
    /// Public raw-content address, present for files fetched without a token.
    pub download_url: Option<String>,
    /// Nesting level, used only for indentation.
    pub depth: usize,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Dir
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
}

#[derive(Debug, Clone, Serialize)]
pub struct TreeView {
    pub entries: Vec<Entry>,
    /// Selected paths in first-selection order.
    pub selected: Vec<String>,
    pub expanded: HashMap<String, bool>,
    /// Branches abandoned during the last fetch (partial success).
    pub warnings: Vec<String>,
}
