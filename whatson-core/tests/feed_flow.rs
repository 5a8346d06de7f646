//! End-to-end flow over a realistic payload: decode the batch, expand
//! recurring templates, and filter the result the way the list screen
//! does.

use chrono::NaiveDate;
use serde_json::{Value, json};

use whatson_core::content::decode_entries;
use whatson_core::filter::build_event_filter;
use whatson_core::recurrence::expand_events;
use whatson_core::{DateRange, Event, EventCategory, FilterPanel, TimeBucket};

fn entry(id: &str, name: &str, start: &str, end: &str, extras: Value) -> Value {
    let mut entry = json!({
        "sys": {
            "id": id,
            "revision": 2,
            "contentType": { "sys": { "id": "event" } }
        },
        "fields": {
            "name": { "en-GB": name },
            "eventCategories": { "en-GB": ["Music"] },
            "startTime": { "en-GB": start },
            "endTime": { "en-GB": end },
            "location": { "en-GB": { "lat": 51.5007, "lon": -0.1246 } },
            "locationName": { "en-GB": "Riverbank Hall" },
            "eventPriceLow": { "en-GB": 8 },
            "eventPriceHigh": { "en-GB": 12 },
            "eventDescription": { "en-GB": "A night out." },
            "eventsListPicture": { "en-GB": { "sys": { "id": "asset-list" } } },
            "individualEventPicture": { "en-GB": { "sys": { "id": "asset-detail" } } }
        }
    });
    if let Some(extra_fields) = extras.as_object() {
        for (key, value) in extra_fields {
            entry["fields"][key] = value.clone();
        }
    }
    entry
}

fn decode_ok(payload: &Value) -> Vec<Event> {
    decode_entries("en-GB", payload)
        .expect("payload should carry an items array")
        .into_iter()
        .filter_map(Result::ok)
        .collect()
}

#[test]
fn batch_decode_keeps_good_records_and_reports_bad_ones() {
    let payload = json!({
        "items": [
            entry(
                "ev-1",
                "Morning Rehearsal",
                "2018-01-09T11:00+00:00",
                "2018-01-09T13:30+00:00",
                json!({})
            ),
            // category outside the closed set
            entry(
                "ev-bad",
                "Mystery",
                "2018-01-09T11:00+00:00",
                "2018-01-09T12:00+00:00",
                json!({ "eventCategories": { "en-GB": ["Karaoke"] } })
            ),
        ]
    });

    let results = decode_entries("en-GB", &payload).unwrap();
    assert!(results[0].is_ok());
    let err = results[1].as_ref().unwrap_err();
    assert_eq!(
        err.path.to_string(),
        "items[1].fields.eventCategories.en-GB[0]"
    );
}

#[test]
fn decode_expand_filter_drives_the_list() {
    let payload = json!({
        "items": [
            entry(
                "ev-recurring",
                "Morning Rehearsal",
                "2018-01-09T11:00+00:00",
                "2018-01-09T13:30+00:00",
                json!({ "recurrenceDates": { "en-GB": ["13/1/18", "15/1/18"] } })
            ),
            entry(
                "ev-late",
                "Club Night",
                "2018-01-13T22:00+00:00",
                "2018-01-14T02:00+00:00",
                json!({ "eventCategories": { "en-GB": ["Nightlife"] } })
            ),
        ]
    });

    let events = decode_ok(&payload);
    assert_eq!(events.len(), 2);

    let expanded = expand_events(&events);
    assert_eq!(expanded.len(), 4, "template plus two occurrences plus the plain event");

    // Stage a filter the way the modal would, then apply it.
    let mut panel = FilterPanel::default();
    panel.set_staged_date(Some(DateRange::new(
        NaiveDate::from_ymd_opt(2018, 1, 13).unwrap(),
        NaiveDate::from_ymd_opt(2018, 1, 14).unwrap(),
    )));
    panel.toggle_staged_time(TimeBucket::Morning);
    panel.apply();

    let filter = build_event_filter(&panel, false);
    let visible: Vec<&Event> = expanded.iter().filter(|e| filter(e)).collect();

    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "ev-recurring-recurrence-13/1/2018");
    assert_eq!(visible[0].categories, vec![EventCategory::Music]);

    // Widening the staged time selection does nothing until applied.
    panel.toggle_staged_time(TimeBucket::Evening);
    let still_applied = build_event_filter(&panel, false);
    assert_eq!(expanded.iter().filter(|e| still_applied(e)).count(), 1);

    panel.apply();
    let after_apply = build_event_filter(&panel, false);
    let names: Vec<&str> = expanded
        .iter()
        .filter(|e| after_apply(e))
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["ev-recurring-recurrence-13/1/2018", "ev-late"],
        "evening bucket now admits the club night on the 13th"
    );
}
