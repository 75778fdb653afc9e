use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::core::renderer::RenderError;
use crate::models::{Alignment, CombinedSeries, ContributionCalendar};

/// Merge calendars with the requested alignment strategy
pub fn combine_with(
    calendars: &[ContributionCalendar],
    alignment: Alignment,
) -> Result<CombinedSeries, RenderError> {
    match alignment {
        Alignment::Index => combine(calendars),
        Alignment::Date => combine_by_date(calendars),
    }
}

/// Sum daily counts position by position
///
/// The first calendar is the reference: its dates are copied verbatim and
/// its day count fixes the series length. Every other calendar adds its
/// i-th flattened day to slot i. Days beyond the reference length are
/// dropped and a shorter calendar leaves the remaining slots untouched.
pub fn combine(calendars: &[ContributionCalendar]) -> Result<CombinedSeries, RenderError> {
    let (reference, rest) = calendars.split_first().ok_or(RenderError::NoCalendars)?;

    let mut series = CombinedSeries {
        dates: Vec::with_capacity(reference.day_count()),
        contributions: Vec::with_capacity(reference.day_count()),
    };
    for day in reference.days() {
        series.dates.push(day.date);
        series.contributions.push(day.contribution_count);
    }

    for calendar in rest {
        for (total, day) in series.contributions.iter_mut().zip(calendar.days()) {
            *total = total.saturating_add(day.contribution_count);
        }
    }

    Ok(series)
}

/// Sum daily counts keyed by date
///
/// Output dates are the sorted union of every calendar's dates, so users
/// with different history lengths still line up.
pub fn combine_by_date(calendars: &[ContributionCalendar]) -> Result<CombinedSeries, RenderError> {
    if calendars.is_empty() {
        return Err(RenderError::NoCalendars);
    }

    let mut totals: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for day in calendars.iter().flat_map(|calendar| calendar.days()) {
        let total = totals.entry(day.date).or_insert(0);
        *total = total.saturating_add(day.contribution_count);
    }

    let (dates, contributions) = totals.into_iter().unzip();
    Ok(CombinedSeries { dates, contributions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContributionDay, ContributionWeek};

    fn calendar(start: NaiveDate, counts: &[u32]) -> ContributionCalendar {
        let days: Vec<ContributionDay> = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| ContributionDay {
                contribution_count: count,
                date: start + chrono::Duration::days(i as i64),
            })
            .collect();
        ContributionCalendar {
            total_contributions: counts.iter().sum(),
            weeks: days
                .chunks(7)
                .map(|chunk| ContributionWeek { contribution_days: chunk.to_vec() })
                .collect(),
        }
    }

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_single_calendar_is_identity() {
        let cal = calendar(jan(1), &[1, 0, 3, 4, 5, 6, 7, 8, 9]);
        let series = combine(&[cal.clone()]).unwrap();

        assert_eq!(series.dates, cal.days().map(|d| d.date).collect::<Vec<_>>());
        assert_eq!(series.contributions, vec![1, 0, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_positional_sum() {
        let a = calendar(jan(1), &[1, 2, 3]);
        let b = calendar(jan(1), &[10, 20, 30]);
        let c = calendar(jan(1), &[100, 0, 0]);

        let series = combine(&[a, b, c]).unwrap();
        assert_eq!(series.contributions, vec![111, 22, 33]);
        assert_eq!(series.dates, vec![jan(1), jan(2), jan(3)]);
    }

    #[test]
    fn test_positional_keeps_reference_length() {
        let reference = calendar(jan(1), &[1, 1, 1]);
        let longer = calendar(jan(1), &[1, 1, 1, 1, 1]);
        let shorter = calendar(jan(1), &[5]);

        let series = combine(&[reference, longer, shorter]).unwrap();
        assert_eq!(series.contributions, vec![7, 2, 2]);
        assert_eq!(series.dates.len(), series.contributions.len());
    }

    #[test]
    fn test_positional_ignores_dates() {
        let a = calendar(jan(1), &[1, 1]);
        let b = calendar(jan(10), &[2, 2]);

        let series = combine(&[a, b]).unwrap();
        assert_eq!(series.dates, vec![jan(1), jan(2)]);
        assert_eq!(series.contributions, vec![3, 3]);
    }

    #[test]
    fn test_combine_saturates() {
        let a = calendar(jan(1), &[u32::MAX]);
        let b = calendar(jan(1), &[1]);
        assert_eq!(combine(&[a, b]).unwrap().contributions, vec![u32::MAX]);
    }

    #[test]
    fn test_no_calendars() {
        assert!(matches!(combine(&[]), Err(RenderError::NoCalendars)));
        assert!(matches!(combine_by_date(&[]), Err(RenderError::NoCalendars)));
    }

    #[test]
    fn test_by_date_unions_and_sums() {
        let a = calendar(jan(1), &[1, 2, 3]);
        let b = calendar(jan(2), &[10, 20, 30]);

        let series = combine_by_date(&[a, b]).unwrap();
        assert_eq!(series.dates, vec![jan(1), jan(2), jan(3), jan(4)]);
        assert_eq!(series.contributions, vec![1, 12, 23, 30]);
    }

    #[test]
    fn test_combine_with_dispatches() {
        let a = calendar(jan(1), &[1]);
        let b = calendar(jan(2), &[2]);
        let cals = [a, b];

        assert_eq!(combine_with(&cals, Alignment::Index).unwrap().contributions, vec![3]);
        assert_eq!(combine_with(&cals, Alignment::Date).unwrap().contributions, vec![1, 2]);
    }
}
