pub mod client;
pub mod config;
pub mod models;
pub mod parser;

pub use client::GitHubClient;
pub use config::GitHubConfig;
pub use parser::{parse_github_url, RepoRef};
