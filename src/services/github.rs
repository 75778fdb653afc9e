use crate::config::GithubSettings;
use crate::models::{ContributionCalendar, GraphQlResponse, UserData};
use futures::future::try_join_all;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// GraphQL query for a user's trailing-year contribution calendar
pub const CONTRIBUTIONS_QUERY: &str = "query($userName: String!) { user(login: $userName) { contributionsCollection { contributionCalendar { totalContributions weeks { contributionDays { contributionCount date } } } } } }";

/// Errors that can occur when talking to the GitHub GraphQL API
#[derive(Debug, Error)]
pub enum GithubError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("GitHub API returned HTTP {status} for user {username}")]
    Status { status: u16, username: String },

    #[error("GitHub user not found: {0}")]
    UserNotFound(String),

    #[error("GitHub GraphQL error for user {username}: {message}")]
    GraphQl { username: String, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// GitHub GraphQL client
///
/// Sends one query per username with the configured bearer token. No
/// retries and no caching.
pub struct GithubClient {
    endpoint: String,
    token: String,
    client: Client,
}

impl GithubClient {
    /// Create a new GitHub client
    pub fn new(endpoint: String, token: String, timeout: Duration) -> Result<Self, GithubError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GithubError::Client(e.to_string()))?;

        Ok(Self {
            endpoint,
            token,
            client,
        })
    }

    pub fn from_settings(settings: &GithubSettings) -> Result<Self, GithubError> {
        Self::new(
            settings.endpoint.clone(),
            settings.token.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    /// Fetch the raw GraphQL response for `username`
    ///
    /// The body is returned exactly as GitHub sent it, GraphQL `errors`
    /// included.
    pub async fn fetch_contributions(&self, username: &str) -> Result<Value, GithubError> {
        tracing::debug!("Fetching contributions for user: {}", username);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&json!({
                "query": CONTRIBUTIONS_QUERY,
                "variables": { "userName": username },
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("GitHub returned {} for {}: {}", status, username, body);
            return Err(GithubError::Status {
                status: status.as_u16(),
                username: username.to_string(),
            });
        }

        Ok(response.json().await?)
    }

    /// Fetch and decode a user's contribution calendar
    pub async fn fetch_calendar(&self, username: &str) -> Result<ContributionCalendar, GithubError> {
        let json = self.fetch_contributions(username).await?;
        parse_calendar(username, json)
    }

    /// Fetch calendars for every username concurrently
    ///
    /// Results keep the input order. The first failure resolves the whole
    /// batch and the remaining in-flight requests are dropped.
    pub async fn fetch_calendars(
        &self,
        usernames: &[String],
    ) -> Result<Vec<ContributionCalendar>, GithubError> {
        try_join_all(usernames.iter().map(|username| self.fetch_calendar(username))).await
    }
}

/// Pull `data.user.contributionsCollection.contributionCalendar` out of a response body
pub fn parse_calendar(username: &str, json: Value) -> Result<ContributionCalendar, GithubError> {
    let envelope: GraphQlResponse<UserData> = serde_json::from_value(json)
        .map_err(|e| GithubError::InvalidResponse(format!("Failed to parse calendar: {}", e)))?;

    if let Some(error) = envelope.errors.first() {
        if error.kind.as_deref() == Some("NOT_FOUND") {
            return Err(GithubError::UserNotFound(username.to_string()));
        }
        return Err(GithubError::GraphQl {
            username: username.to_string(),
            message: error.message.clone(),
        });
    }

    envelope
        .data
        .and_then(|data| data.user)
        .map(|user| user.contributions_collection.contribution_calendar)
        .ok_or_else(|| GithubError::UserNotFound(username.to_string()))
}
