pub mod selection;
pub mod state;

pub use selection::{SelectionSet, is_path_prefix, toggle_select};
pub use state::{AppState, CompletionGuard, SessionState, SharedState};
