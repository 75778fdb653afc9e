// Service exports
pub mod github;

pub use github::{GithubClient, GithubError, CONTRIBUTIONS_QUERY};
