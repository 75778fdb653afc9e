use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Alignment;

/// Query for the single-user passthrough endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ContributionsQuery {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
}

/// Query for the combined heat-map endpoint
///
/// `usernames` is a comma-separated list, e.g. `?usernames=octocat,torvalds`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CombinedContributionsQuery {
    #[serde(default)]
    #[validate(length(min = 1, message = "At least one username is required"))]
    pub usernames: String,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub align: Alignment,
}

impl CombinedContributionsQuery {
    /// Split the raw list, trimming whitespace and dropping empty entries
    pub fn username_list(&self) -> Vec<String> {
        split_usernames(&self.usernames)
    }
}

pub fn split_usernames(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
