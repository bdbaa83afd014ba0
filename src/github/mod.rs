pub mod client;
pub mod tree;

pub use client::{GitHubClient, parse_repo_url};
pub use tree::{FetchOutcome, ListingSource, fetch_tree};
