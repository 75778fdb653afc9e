use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single day in a user's contribution calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    #[serde(rename = "contributionCount")]
    pub contribution_count: u32,
    pub date: NaiveDate,
}

/// Up to seven chronological days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionWeek {
    #[serde(rename = "contributionDays", default)]
    pub contribution_days: Vec<ContributionDay>,
}

/// A user's trailing-year contribution calendar as returned by GitHub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionCalendar {
    #[serde(rename = "totalContributions")]
    pub total_contributions: u32,
    #[serde(default)]
    pub weeks: Vec<ContributionWeek>,
}

impl ContributionCalendar {
    /// Iterate over every day, week by week, in calendar order
    pub fn days(&self) -> impl Iterator<Item = &ContributionDay> {
        self.weeks.iter().flat_map(|week| week.contribution_days.iter())
    }

    /// Total number of days across all weeks
    pub fn day_count(&self) -> usize {
        self.weeks.iter().map(|week| week.contribution_days.len()).sum()
    }
}

/// Merged daily counts for one or more users, index-aligned with `dates`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedSeries {
    pub dates: Vec<NaiveDate>,
    pub contributions: Vec<u32>,
}

impl CombinedSeries {
    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }

    /// Highest single-day count, `None` for an empty series
    pub fn max_count(&self) -> Option<u32> {
        self.contributions.iter().copied().max()
    }
}

/// How several calendars are lined up before summing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Sum the i-th flattened day of every calendar
    #[default]
    Index,
    /// Sum days sharing the same date
    Date,
}
