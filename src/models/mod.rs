// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Alignment, CombinedSeries, ContributionCalendar, ContributionDay, ContributionWeek};
pub use requests::{CombinedContributionsQuery, ContributionsQuery};
pub use responses::{ErrorResponse, GraphQlError, GraphQlResponse, HealthResponse, UserData};
