//! Filter state and predicate construction for the event list.
//!
//! The list screen holds two structurally identical copies of
//! [`FilterState`]: *selected* (applied, drives the visible list) and
//! *staged* (being edited in the filter modal). [`build_event_filter`]
//! reads one branch and composes the date, time-of-day and category
//! components into a single predicate. Everything here is pure
//! predicate construction over already-validated state; nothing fails.

use std::collections::BTreeSet;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::date_range::{DateRange, build_date_range_filter};
use crate::event::{Event, EventCategory};

/// Fixed time-of-day buckets, each covering a half-open clock window.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TimeBucket {
    /// 06:00–12:00
    Morning,
    /// 12:00–18:00
    Afternoon,
    /// 18:00–24:00
    Evening,
    /// 00:00–06:00
    Night,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; 4] = [
        TimeBucket::Morning,
        TimeBucket::Afternoon,
        TimeBucket::Evening,
        TimeBucket::Night,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeBucket::Morning => "morning",
            TimeBucket::Afternoon => "afternoon",
            TimeBucket::Evening => "evening",
            TimeBucket::Night => "night",
        }
    }

    pub fn from_name(name: &str) -> Option<TimeBucket> {
        TimeBucket::ALL.iter().copied().find(|b| b.as_str() == name)
    }

    /// Whether a clock time falls inside this bucket's window
    /// (start inclusive, end exclusive).
    pub fn contains(self, time: NaiveTime) -> bool {
        let hour = time.hour();
        match self {
            TimeBucket::Morning => (6..12).contains(&hour),
            TimeBucket::Afternoon => (12..18).contains(&hour),
            TimeBucket::Evening => (18..24).contains(&hour),
            TimeBucket::Night => hour < 6,
        }
    }
}

/// Predicate: does the event start inside `bucket`'s clock window?
pub fn build_time_filter(bucket: TimeBucket) -> impl Fn(&Event) -> bool {
    move |event: &Event| bucket.contains(event.start_time.time())
}

/// One branch of the filter UI's state. Not persisted; lives for the
/// duration of a screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// `None` means no date filtering at all.
    pub date: Option<DateRange>,
    pub time: BTreeSet<TimeBucket>,
    /// Selected category names (API spelling, see
    /// [`EventCategory::as_str`]).
    pub categories: BTreeSet<String>,
}

/// The two parallel filter branches, with the commit/discard lifecycle
/// the filter modal drives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPanel {
    pub selected: FilterState,
    pub staged: FilterState,
}

impl FilterPanel {
    /// Replace the staged date selection.
    pub fn set_staged_date(&mut self, date: Option<DateRange>) {
        self.staged.date = date;
    }

    /// Toggle a time bucket in the staged branch.
    pub fn toggle_staged_time(&mut self, bucket: TimeBucket) {
        if !self.staged.time.remove(&bucket) {
            self.staged.time.insert(bucket);
        }
    }

    /// Toggle a category tag in the staged branch.
    pub fn toggle_staged_category(&mut self, name: &str) {
        if !self.staged.categories.remove(name) {
            self.staged.categories.insert(name.to_string());
        }
    }

    /// Commit: staged becomes selected ("Apply").
    pub fn apply(&mut self) {
        self.selected = self.staged.clone();
    }

    /// Cancel: staged reverts to selected (back navigation).
    pub fn discard(&mut self) {
        self.staged = self.selected.clone();
    }
}

/// Project the date selection of one branch; `staged = false` reads the
/// applied branch.
pub fn select_date_filter(panel: &FilterPanel, staged: bool) -> Option<DateRange> {
    if staged {
        panel.staged.date
    } else {
        panel.selected.date
    }
}

/// Project the time-bucket selection of one branch.
pub fn select_time_filter(panel: &FilterPanel, staged: bool) -> &BTreeSet<TimeBucket> {
    if staged {
        &panel.staged.time
    } else {
        &panel.selected.time
    }
}

/// Project the category selection of one branch.
pub fn select_category_filter(panel: &FilterPanel, staged: bool) -> &BTreeSet<String> {
    if staged {
        &panel.staged.categories
    } else {
        &panel.selected.categories
    }
}

/// Compose one branch of the panel into a single event predicate.
///
/// Components AND together; inside the time and category components the
/// selected members OR together. No date selection, an empty set, or a
/// set covering every possible value each mean "no filtering": no
/// selection and full selection are deliberately the same thing, so the
/// branches below are explicit rather than a side effect of set math.
pub fn build_event_filter(panel: &FilterPanel, staged: bool) -> impl Fn(&Event) -> bool + use<> {
    let date = select_date_filter(panel, staged);
    let time = select_time_filter(panel, staged).clone();
    let categories = select_category_filter(panel, staged).clone();

    let date_filter = date.map(build_date_range_filter);
    let time_unfiltered = time.is_empty() || time.len() == TimeBucket::ALL.len();
    let categories_unfiltered = categories.is_empty()
        || EventCategory::ALL
            .iter()
            .all(|c| categories.contains(c.as_str()));

    move |event: &Event| {
        let date_ok = match &date_filter {
            Some(filter) => filter(event),
            None => true,
        };
        let time_ok = time_unfiltered
            || time
                .iter()
                .any(|&bucket| build_time_filter(bucket)(event));
        let category_ok = categories_unfiltered
            || event
                .categories
                .iter()
                .any(|c| categories.contains(c.as_str()));

        let ok = date_ok && time_ok && category_ok;
        trace!(id = %event.id, date_ok, time_ok, category_ok, "event filter evaluation");
        ok
    }
}
