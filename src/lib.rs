//! Contrib Heatmap - GitHub contribution calendar proxy and heat-map renderer
//!
//! Forwards contribution-calendar queries to the GitHub GraphQL API and
//! renders the summed daily counts of several users as a single PNG.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{combine, combine_by_date, render, render_png, RenderError, Theme};
pub use error::ApiError;
pub use models::{CombinedSeries, ContributionCalendar, ContributionDay, ContributionWeek};
pub use services::{GithubClient, GithubError};
