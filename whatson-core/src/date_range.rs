//! Date range for filtering events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Inclusive calendar-date range. A single-day selection collapses to
/// `start_date == end_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        DateRange {
            start_date,
            end_date,
        }
    }

    pub fn single_day(date: NaiveDate) -> Self {
        DateRange {
            start_date: date,
            end_date: date,
        }
    }

    /// Both bounds inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Predicate: does the event start on a day inside `range`?
///
/// Total over decoded events: timestamps are guaranteed well-formed by
/// decoding, so there is no failure channel here.
pub fn build_date_range_filter(range: DateRange) -> impl Fn(&Event) -> bool {
    move |event: &Event| range.contains(event.start_time.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2018, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2018, 1, 12).unwrap(),
        );
        assert!(range.contains(NaiveDate::from_ymd_opt(2018, 1, 10).unwrap()));
        assert!(range.contains(NaiveDate::from_ymd_opt(2018, 1, 12).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2018, 1, 9).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2018, 1, 13).unwrap()));
    }

    #[test]
    fn single_day_collapses_both_bounds() {
        let day = NaiveDate::from_ymd_opt(2018, 1, 10).unwrap();
        let range = DateRange::single_day(day);
        assert_eq!(range.start_date, range.end_date);
        assert!(range.contains(day));
    }
}
