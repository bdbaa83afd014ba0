//! In-memory session state shared across request handlers.
//!
//! One instance serves one user: the current tree, its selection and
//! expansion state, and a busy flag for the in-flight completion. Handlers
//! take the write lock, compute the next value with the pure transitions
//! from `selection`, and replace the field wholesale.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{AppError, Result};
use crate::models::{Entry, Settings, TreeView};
use crate::session::selection::{SelectionSet, toggle_select};
use crate::settings::SettingsStore;

#[derive(Debug, Default)]
pub struct SessionState {
    pub tree: Vec<Entry>,
    pub selection: SelectionSet,
    pub expanded: HashMap<String, bool>,
    pub warnings: Vec<String>,
    pub completion_in_progress: bool,
}

impl SessionState {
    /// Install a freshly fetched tree. The previous entries are fully
    /// replaced, everything starts selected and all folders collapsed.
    pub fn replace_tree(&mut self, entries: Vec<Entry>, warnings: Vec<String>) {
        self.selection = SelectionSet::all(&entries);
        self.tree = entries;
        self.expanded = HashMap::new();
        self.warnings = warnings;
    }

    pub fn toggle_select(&mut self, path: &str, selected: bool) {
        self.selection = toggle_select(&self.tree, &self.selection, path, selected);
    }

    /// Flip a folder's expansion state. Expansion drives selection here:
    /// expanding selects the subtree, collapsing deselects it. Surprising,
    /// but it is the product's behavior and callers rely on it.
    pub fn toggle_folder_expansion(&mut self, path: &str) -> bool {
        let now_expanded = !self.expanded.get(path).copied().unwrap_or(false);
        self.expanded.insert(path.to_string(), now_expanded);
        self.selection = toggle_select(&self.tree, &self.selection, path, now_expanded);
        now_expanded
    }

    pub fn select_all(&mut self) {
        self.selection = SelectionSet::all(&self.tree);
    }

    pub fn select_none(&mut self) {
        self.selection = SelectionSet::new();
    }

    /// Selected entries in selection order.
    pub fn selected_entries(&self) -> Vec<Entry> {
        self.selection
            .as_slice()
            .iter()
            .filter_map(|path| self.tree.iter().find(|e| &e.path == path))
            .cloned()
            .collect()
    }

    pub fn view(&self) -> TreeView {
        TreeView {
            entries: self.tree.clone(),
            selected: self.selection.to_vec(),
            expanded: self.expanded.clone(),
            warnings: self.warnings.clone(),
        }
    }
}

pub struct AppState {
    pub session: RwLock<SessionState>,
    pub settings: RwLock<Settings>,
    pub store: SettingsStore,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(settings: Settings, store: SettingsStore) -> SharedState {
        Arc::new(Self {
            session: RwLock::new(SessionState::default()),
            settings: RwLock::new(settings),
            store,
        })
    }

    pub fn settings_snapshot(&self) -> Result<Settings> {
        Ok(self
            .settings
            .read()
            .map_err(|_| AppError::Internal("Lock poisoned".to_string()))?
            .clone())
    }
}

/// Marks a completion as in flight and guarantees the flag is released on
/// every exit path, including the handler future being dropped when the
/// client aborts the request.
pub struct CompletionGuard {
    state: SharedState,
}

impl CompletionGuard {
    pub fn acquire(state: &SharedState) -> Result<Self> {
        let mut session = state
            .session
            .write()
            .map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        if session.completion_in_progress {
            return Err(AppError::Internal(
                "A completion is already in progress".to_string(),
            ));
        }
        session.completion_in_progress = true;
        Ok(Self {
            state: state.clone(),
        })
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Ok(mut session) = self.state.session.write() {
            session.completion_in_progress = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryType;

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

    fn session_with_tree() -> SessionState {
        let mut session = SessionState::default();
        session.replace_tree(
            vec![
                entry("/src", EntryType::Dir),
                entry("/src/a.js", EntryType::File),
                entry("/README.md", EntryType::File),
            ],
            Vec::new(),
        );
        session
    }

    #[test]
    fn fetch_resets_selection_to_all_and_collapses_folders() {
        let session = session_with_tree();
        assert_eq!(session.selection.len(), 3);
        assert!(session.expanded.is_empty());
    }

    #[test]
    fn select_all_then_none_is_empty_despite_intervening_toggles() {
        let mut session = session_with_tree();
        session.toggle_select("/README.md", false);
        session.toggle_select("/src", true);
        session.select_all();
        session.select_none();
        assert!(session.selection.is_empty());
    }

    // Expanding a folder selects its subtree and collapsing deselects it.
    // This coupling of a presentation toggle to selection is intentional
    // product behavior, asserted here so nobody "fixes" it.
    #[test]
    fn expansion_toggle_drives_selection() {
        let mut session = session_with_tree();
        session.select_none();

        assert!(session.toggle_folder_expansion("/src"));
        assert!(session.selection.contains("/src"));
        assert!(session.selection.contains("/src/a.js"));
        assert!(!session.selection.contains("/README.md"));

        assert!(!session.toggle_folder_expansion("/src"));
        assert!(session.selection.is_empty());
    }

    #[test]
    fn selected_entries_come_back_in_selection_order() {
        let mut session = session_with_tree();
        session.select_none();
        session.toggle_select("/README.md", true);
        session.toggle_select("/src/a.js", true);

        let paths: Vec<String> = session
            .selected_entries()
            .iter()
            .map(|e| e.path.clone())
            .collect();
        assert_eq!(paths, vec!["/README.md", "/src/a.js"]);
    }

    #[test]
    fn completion_guard_releases_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(
            Settings::default(),
            SettingsStore::at(dir.path().join("settings.json")),
        );

        {
            let guard = CompletionGuard::acquire(&state).unwrap();
            assert!(state.session.read().unwrap().completion_in_progress);
            assert!(CompletionGuard::acquire(&state).is_err());
            drop(guard);
        }
        assert!(!state.session.read().unwrap().completion_in_progress);
    }
}
