//! Generates the weekly schedule of a tracked year.

use crate::model::{Dataset, WeekRecord};
use crate::Result;
use anyhow::Context;
use chrono::{Days, NaiveDate};

/// The schedule starts on the second day of January.
const FIRST_DAY: u32 = 2;

/// Produces a zeroed record for every 7-day step from January 2 of `year` through December 31.
///
/// For 2026 this is 52 weeks; leap years whose steps reach December 31 get 53.
pub fn weeks_for_year(year: i32) -> Result<Dataset> {
    let start = NaiveDate::from_ymd_opt(year, 1, FIRST_DAY)
        .with_context(|| format!("The year {year} is out of range"))?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)
        .with_context(|| format!("The year {year} is out of range"))?;
    Ok(weeks_between(start, end))
}

/// Produces a zeroed record for every 7-day step from `start`, stopping once a step passes `end`.
/// Ids count up from 1. An `end` before `start` yields an empty dataset.
pub fn weeks_between(start: NaiveDate, end: NaiveDate) -> Dataset {
    let mut records = Vec::new();
    let mut current = Some(start);
    let mut id = 1;
    while let Some(date) = current.filter(|d| *d <= end) {
        records.push(WeekRecord::new(id, date));
        id += 1;
        current = date.checked_add_days(Days::new(7));
    }
    Dataset::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_2026_has_52_weeks() {
        let data = weeks_for_year(2026).unwrap();
        assert_eq!(data.len(), 52);
        let first = data.records().first().unwrap();
        assert_eq!(first.id(), 1);
        assert_eq!(first.label(), "Week 1");
        assert_eq!(first.date(), date(2026, 1, 2));
        let last = data.records().last().unwrap();
        assert_eq!(last.id(), 52);
        assert_eq!(last.date(), date(2026, 12, 25));
        assert_eq!(last.month(), "December");
    }

    #[test]
    fn test_leap_year_has_53_weeks() {
        // 2028-01-02 + 52 * 7 days lands exactly on 2028-12-31.
        let data = weeks_for_year(2028).unwrap();
        assert_eq!(data.len(), 53);
        assert_eq!(data.records().last().unwrap().date(), date(2028, 12, 31));
    }

    #[test]
    fn test_count_matches_days_in_range() {
        for year in [2023, 2024, 2025, 2026, 2027, 2028] {
            let start = date(year, 1, 2);
            let end = date(year, 12, 31);
            let days = (end - start).num_days() + 1;
            let expected = (days + 6) / 7;
            assert_eq!(weeks_for_year(year).unwrap().len() as i64, expected, "{year}");
        }
    }

    #[test]
    fn test_dates_step_by_seven_days() {
        let data = weeks_for_year(2026).unwrap();
        for pair in data.records().windows(2) {
            assert_eq!((pair[1].date() - pair[0].date()).num_days(), 7);
            assert_eq!(pair[1].id(), pair[0].id() + 1);
        }
    }

    #[test]
    fn test_all_amounts_start_at_zero() {
        let data = weeks_for_year(2026).unwrap();
        assert!(data
            .records()
            .iter()
            .all(|r| r.deposit().is_zero() && r.out().is_zero()));
    }

    #[test]
    fn test_months_follow_dates() {
        let data = weeks_for_year(2026).unwrap();
        // 2026-01-30 is the fifth week and still January; 2026-02-06 is February.
        assert_eq!(data.records()[4].month(), "January");
        assert_eq!(data.records()[5].month(), "February");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(weeks_for_year(2026).unwrap(), weeks_for_year(2026).unwrap());
    }

    #[test]
    fn test_end_before_start_is_empty() {
        assert!(weeks_between(date(2026, 2, 1), date(2026, 1, 1)).is_empty());
    }

    #[test]
    fn test_single_day_range() {
        let d = date(2026, 3, 4);
        assert_eq!(weeks_between(d, d).len(), 1);
    }

    #[test]
    fn test_year_out_of_range() {
        assert!(weeks_for_year(i32::MAX).is_err());
    }
}
