use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use serde_json::Value;
use tracing::warn;
use whatson_core::content::decode_entries;
use whatson_core::filter::build_event_filter;
use whatson_core::recurrence::expand_events;
use whatson_core::{DateRange, Event, EventCategory, FilterPanel, FilterState, TimeBucket};

pub fn run(
    file: &Path,
    locale: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    time_names: &[String],
    category_names: &[String],
) -> Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let payload: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    let mut events: Vec<Event> = Vec::new();
    for result in decode_entries(locale, &payload)
        .with_context(|| format!("{} is not a content export", file.display()))?
    {
        match result {
            Ok(event) => events.push(event),
            Err(err) => warn!(error = %err, "skipping entry that failed to decode"),
        }
    }

    let expanded = expand_events(&events);

    // The flags play the part of the filter modal: stage, then apply.
    let mut panel = FilterPanel::default();
    panel.staged = filter_state(from, to, time_names, category_names)?;
    panel.apply();

    let filter = build_event_filter(&panel, false);
    let mut visible: Vec<&Event> = expanded.iter().filter(|e| filter(e)).collect();
    visible.sort_by_key(|e| e.start_time);

    if visible.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    let mut current_day: Option<NaiveDate> = None;
    for event in visible {
        let day = event.start_time.date_naive();
        if current_day != Some(day) {
            if current_day.is_some() {
                println!();
            }
            println!("{}", day.format("%a %-d %b %Y").to_string().bold());
            current_day = Some(day);
        }

        let categories: Vec<&str> = event.categories.iter().map(|c| c.as_str()).collect();
        let tag = format!("[{}]", categories.join(", "));
        let price = if event.is_free() {
            "free".to_string()
        } else if event.price_low == event.price_high {
            format!("£{:.2}", event.price_low)
        } else {
            format!("£{:.2}–£{:.2}", event.price_low, event.price_high)
        };
        println!(
            "  {} {} {} {} {}",
            event.start_time.format("%H:%M"),
            event.name,
            tag.dimmed(),
            event.location_name,
            price.dimmed()
        );
    }

    Ok(())
}

/// Build the filter state the flags describe. A single date bound
/// collapses to a one-day range.
fn filter_state(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    time_names: &[String],
    category_names: &[String],
) -> Result<FilterState> {
    let mut state = FilterState::default();

    state.date = match (from, to) {
        (None, None) => None,
        (Some(day), None) | (None, Some(day)) => Some(DateRange::single_day(day)),
        (Some(start), Some(end)) => Some(DateRange::new(start, end)),
    };

    for name in time_names {
        let bucket = TimeBucket::from_name(name).ok_or_else(|| {
            anyhow!("unknown time bucket '{name}' (morning, afternoon, evening or night)")
        })?;
        state.time.insert(bucket);
    }

    for name in category_names {
        let category = EventCategory::from_name(name)
            .ok_or_else(|| anyhow!("unknown category '{name}'"))?;
        state.categories.insert(category.as_str().to_string());
    }

    Ok(state)
}
