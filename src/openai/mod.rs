pub mod client;

pub use client::{Completion, OpenAiClient};
