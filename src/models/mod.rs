//! Data transfer objects (DTOs) for API responses.
//!
//! These structs are serialized to JSON for frontend consumption.
//! - `tree`: Entry, EntryType, TreeView
//! - `aggregate`: EnvExampleResponse, MergeResponse
//! - `chat`: ChatMessage, CompletionView
//! - `settings`: Settings with per-field defaults

pub mod aggregate;
pub mod chat;
pub mod settings;
pub mod tree;

pub use aggregate::*;
pub use chat::*;
pub use settings::*;
pub use tree::*;
