//! Expansion of recurring-event templates into concrete occurrences.
//!
//! A decoded event carrying recurrence dates is a template. Expansion
//! derives one additional occurrence per distinct recurrence start time,
//! each preserving the template's duration; the template itself is never
//! mutated, and the expansion is never persisted; it is recomputed on
//! every read.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::datetime::{format_display_date, format_timestamp, on_date, parse_display_date};
use crate::event::Event;

/// Expand one event into the full ordered set of its occurrences.
///
/// Returns the original first, then one occurrence per distinct
/// additional recurrence start time, chronologically. Candidate starts
/// are built by moving the original start to each recurrence date
/// (clock time and offset preserved); duplicates, including a
/// recurrence that lands on the original's own start, collapse by
/// exact equality of the normalized start-time string and produce no
/// extra occurrence. An event with no recurrence dates expands to
/// exactly `[original]`.
pub fn expand_recurring_events(event: &Event) -> Vec<Event> {
    if event.recurrence_dates.is_empty() {
        return vec![event.clone()];
    }

    // Candidate starts: the original's own start first, so a recurrence
    // equal to it is absorbed by the dedup rather than double-counted.
    let mut seen: HashSet<String> = HashSet::new();
    let mut additional: Vec<DateTime<FixedOffset>> = Vec::new();
    seen.insert(format_timestamp(&event.start_time));

    for raw in &event.recurrence_dates {
        let date = match parse_display_date(raw) {
            Ok(date) => date,
            Err(err) => {
                // Decoding guarantees parseable recurrence dates.
                debug_assert!(false, "unparseable recurrence date '{raw}': {err}");
                continue;
            }
        };
        let start = on_date(event.start_time, date);
        if seen.insert(format_timestamp(&start)) {
            additional.push(start);
        }
    }
    additional.sort();

    debug!(
        id = %event.id,
        occurrences = additional.len(),
        "expanded recurring event"
    );

    let mut events = Vec::with_capacity(1 + additional.len());
    events.push(event.clone());
    for start in additional {
        events.push(occurrence(event, start));
    }
    events
}

/// Expand a whole collection, in place of each template.
pub fn expand_events(events: &[Event]) -> Vec<Event> {
    events.iter().flat_map(expand_recurring_events).collect()
}

/// Build one derived occurrence: the template with start/end moved by
/// the same offset (duration preserved), a synthetic id carrying the
/// occurrence's display date, and the template's own start date
/// prepended to the recurrence list for provenance.
fn occurrence(original: &Event, start: DateTime<FixedOffset>) -> Event {
    let offset = start - original.start_time;

    let mut recurrence_dates = Vec::with_capacity(original.recurrence_dates.len() + 1);
    recurrence_dates.push(format_display_date(original.start_time.date_naive()));
    recurrence_dates.extend(original.recurrence_dates.iter().cloned());

    Event {
        id: format!(
            "{}-recurrence-{}",
            original.id,
            format_display_date(start.date_naive())
        ),
        locale: original.locale.clone(),
        revision: original.revision,
        name: original.name.clone(),
        categories: original.categories.clone(),
        audience: original.audience.clone(),
        start_time: start,
        end_time: original.end_time + offset,
        location: original.location,
        address_line1: original.address_line1.clone(),
        address_line2: original.address_line2.clone(),
        city: original.city.clone(),
        postcode: original.postcode.clone(),
        location_name: original.location_name.clone(),
        price_low: original.price_low,
        price_high: original.price_high,
        accessibility_options: original.accessibility_options.clone(),
        description: original.description.clone(),
        accessibility_details: original.accessibility_details.clone(),
        email: original.email.clone(),
        phone: original.phone.clone(),
        ticketing_url: original.ticketing_url.clone(),
        venue_details: original.venue_details.clone(),
        list_picture: original.list_picture.clone(),
        detail_picture: original.detail_picture.clone(),
        performances: original.performances.clone(),
        recurrence_dates,
    }
}
