//! Decoding raw content-API entries into [`Event`] records.
//!
//! The content API delivers entries shaped as
//! `{ sys: { id, revision, contentType: { sys: { id } } }, fields: { <name>: { <locale>: <value> } } }`,
//! with every field value behind a locale key. A record either decodes
//! fully or is rejected with a path-qualified [`DecodeError`]; there is
//! no partial success.

use chrono::{DateTime, FixedOffset};
use serde_json::Value;

use crate::datetime;
use crate::decode;
use crate::error::{DecodeError, DecodeErrorKind, DecodeResult};
use crate::event::{EntryRef, Event, EventCategory, GeoPoint, ImageRef};

const EVENT_CONTENT_TYPE: &str = "event";

/// Build a decoder for event entries under the given locale.
///
/// Required fields fail the whole record. Optional scalar fields stay
/// absent (`None`); optional list fields default to empty, so consumers
/// never see a missing list.
pub fn decode_event<'a>(locale: &'a str) -> impl Fn(&Value) -> DecodeResult<Event> + 'a {
    move |entry: &Value| {
        decode::at(&["sys", "contentType", "sys", "id"], content_type_is_event)(entry)?;

        Ok(Event {
            id: decode::at(&["sys", "id"], decode::string)(entry)?,
            locale: decode::succeed(locale.to_string())(entry)?,
            revision: decode::at(&["sys", "revision"], decode::integer)(entry)?,
            name: decode::at(&["fields", "name", locale], decode::string)(entry)?,
            categories: decode::at(
                &["fields", "eventCategories", locale],
                decode::array(category),
            )(entry)?,
            audience: decode::optional_at(
                &["fields", "audience", locale],
                Vec::new(),
                decode::array(decode::string),
            )(entry)?,
            start_time: decode::at(&["fields", "startTime", locale], timestamp)(entry)?,
            end_time: decode::at(&["fields", "endTime", locale], timestamp)(entry)?,
            location: decode::at(&["fields", "location", locale], geo_point)(entry)?,
            address_line1: decode::maybe(decode::at(
                &["fields", "addressLine1", locale],
                decode::string,
            ))(entry)?,
            address_line2: decode::maybe(decode::at(
                &["fields", "addressLine2", locale],
                decode::string,
            ))(entry)?,
            city: decode::maybe(decode::at(&["fields", "city", locale], decode::string))(entry)?,
            postcode: decode::maybe(decode::at(&["fields", "postcode", locale], decode::string))(
                entry,
            )?,
            location_name: decode::at(&["fields", "locationName", locale], decode::string)(entry)?,
            price_low: decode::at(&["fields", "eventPriceLow", locale], decode::float)(entry)?,
            price_high: decode::at(&["fields", "eventPriceHigh", locale], decode::float)(entry)?,
            accessibility_options: decode::optional_at(
                &["fields", "accessibilityOptions", locale],
                Vec::new(),
                decode::array(decode::string),
            )(entry)?,
            description: decode::at(&["fields", "eventDescription", locale], decode::string)(
                entry,
            )?,
            accessibility_details: decode::maybe(decode::at(
                &["fields", "accessibilityDetails", locale],
                decode::string,
            ))(entry)?,
            email: decode::maybe(decode::at(&["fields", "email", locale], decode::string))(entry)?,
            phone: decode::maybe(decode::at(&["fields", "phone", locale], decode::string))(entry)?,
            ticketing_url: decode::maybe(decode::at(
                &["fields", "ticketingUrl", locale],
                decode::string,
            ))(entry)?,
            venue_details: decode::optional_at(
                &["fields", "venueDetails", locale],
                Vec::new(),
                decode::array(decode::string),
            )(entry)?,
            list_picture: decode::at(&["fields", "eventsListPicture", locale], image_ref)(entry)?,
            detail_picture: decode::at(&["fields", "individualEventPicture", locale], image_ref)(
                entry,
            )?,
            performances: decode::optional_at(
                &["fields", "performances", locale],
                Vec::new(),
                decode::array(entry_ref),
            )(entry)?,
            recurrence_dates: decode::optional_at(
                &["fields", "recurrenceDates", locale],
                Vec::new(),
                decode::array(recurrence_date),
            )(entry)?,
        })
    }
}

/// Decode a whole API response (an `items` envelope, or a bare array of
/// entries) into per-record results.
///
/// One malformed record does not fail the batch; whether to skip it or
/// abort is the caller's policy.
pub fn decode_entries(locale: &str, payload: &Value) -> DecodeResult<Vec<DecodeResult<Event>>> {
    let (items, enveloped) = match payload {
        Value::Array(items) => (items, false),
        Value::Object(object) => {
            let value = object
                .get("items")
                .ok_or_else(|| DecodeError::missing_field("items"))?;
            let items = value
                .as_array()
                .ok_or_else(|| DecodeError::wrong_type("an array", value).in_field("items"))?;
            (items, true)
        }
        other => return Err(DecodeError::wrong_type("an object or an array", other)),
    };

    let decoder = decode_event(locale);
    Ok(items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            decoder(item).map_err(|err| {
                let err = err.at_index(index);
                if enveloped { err.in_field("items") } else { err }
            })
        })
        .collect())
}

fn content_type_is_event(value: &Value) -> DecodeResult<()> {
    let id = decode::string(value)?;
    if id == EVENT_CONTENT_TYPE {
        Ok(())
    } else {
        Err(DecodeError::new(DecodeErrorKind::WrongContentType(id)))
    }
}

/// One equality decoder per allowed category name; anything outside the
/// closed set fails the record rather than being dropped.
fn category(value: &Value) -> DecodeResult<EventCategory> {
    let alternatives = EventCategory::ALL
        .iter()
        .map(|&c| decode::literal(c.as_str(), c))
        .collect();
    decode::one_of(alternatives)(value)
}

fn timestamp(value: &Value) -> DecodeResult<DateTime<FixedOffset>> {
    let raw = decode::string(value)?;
    datetime::parse_timestamp(&raw)
        .map_err(|_| DecodeError::new(DecodeErrorKind::InvalidTimestamp(raw)))
}

/// Recurrence dates stay as the raw display strings, but must parse now
/// so expansion downstream is total.
fn recurrence_date(value: &Value) -> DecodeResult<String> {
    let raw = decode::string(value)?;
    match datetime::parse_display_date(&raw) {
        Ok(_) => Ok(raw),
        Err(_) => Err(DecodeError::new(DecodeErrorKind::InvalidDate(raw))),
    }
}

fn geo_point(value: &Value) -> DecodeResult<GeoPoint> {
    Ok(GeoPoint {
        lat: decode::field("lat", decode::float)(value)?,
        lon: decode::field("lon", decode::float)(value)?,
    })
}

fn image_ref(value: &Value) -> DecodeResult<ImageRef> {
    decode::map(
        |id| ImageRef { id },
        decode::at(&["sys", "id"], decode::string),
    )(value)
}

fn entry_ref(value: &Value) -> DecodeResult<EntryRef> {
    decode::map(
        |id| EntryRef { id },
        decode::at(&["sys", "id"], decode::string),
    )(value)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::datetime::format_timestamp;

    fn sample_entry() -> Value {
        json!({
            "sys": {
                "id": "3Xk9mP2qW",
                "revision": 4,
                "contentType": { "sys": { "id": "event" } }
            },
            "fields": {
                "name": { "en-GB": "Summer Choir Night" },
                "eventCategories": { "en-GB": ["Music", "Community"] },
                "audience": { "en-GB": ["Families"] },
                "startTime": { "en-GB": "2018-01-09T11:00+00:00" },
                "endTime": { "en-GB": "2018-01-09T13:30+00:00" },
                "location": { "en-GB": { "lat": 51.5007, "lon": -0.1246 } },
                "addressLine1": { "en-GB": "1 Riverbank Walk" },
                "city": { "en-GB": "London" },
                "postcode": { "en-GB": "SE1 7PB" },
                "locationName": { "en-GB": "Riverbank Hall" },
                "eventPriceLow": { "en-GB": 0 },
                "eventPriceHigh": { "en-GB": 0 },
                "accessibilityOptions": { "en-GB": ["Step-free access"] },
                "eventDescription": { "en-GB": "An open evening of song." },
                "email": { "en-GB": "hello@riverbankhall.example" },
                "venueDetails": { "en-GB": ["Outdoor area"] },
                "eventsListPicture": { "en-GB": { "sys": { "id": "asset-list-1" } } },
                "individualEventPicture": { "en-GB": { "sys": { "id": "asset-detail-1" } } },
                "performances": { "en-GB": [{ "sys": { "id": "perf-1" } }] },
                "recurrenceDates": { "en-GB": ["13/1/18", "15/1/18"] }
            }
        })
    }

    #[test]
    fn decodes_every_field_for_the_requested_locale() {
        let event = decode_event("en-GB")(&sample_entry()).unwrap();

        assert_eq!(event.id, "3Xk9mP2qW");
        assert_eq!(event.locale, "en-GB");
        assert_eq!(event.revision, 4);
        assert_eq!(event.name, "Summer Choir Night");
        assert_eq!(
            event.categories,
            vec![EventCategory::Music, EventCategory::Community]
        );
        assert_eq!(event.audience, vec!["Families"]);
        assert_eq!(format_timestamp(&event.start_time), "2018-01-09T11:00+00:00");
        assert_eq!(format_timestamp(&event.end_time), "2018-01-09T13:30+00:00");
        assert_eq!(event.location.lat, 51.5007);
        assert_eq!(event.address_line1.as_deref(), Some("1 Riverbank Walk"));
        assert_eq!(event.address_line2, None);
        assert_eq!(event.location_name, "Riverbank Hall");
        assert!(event.is_free());
        assert_eq!(event.list_picture.id, "asset-list-1");
        assert_eq!(event.detail_picture.id, "asset-detail-1");
        assert_eq!(event.performances.len(), 1);
        assert_eq!(event.recurrence_dates, vec!["13/1/18", "15/1/18"]);
    }

    #[test]
    fn fails_for_a_locale_the_record_does_not_contain() {
        let err = decode_event("de-DE")(&sample_entry()).unwrap_err();
        assert_eq!(err.to_string(), "missing field 'de-DE' at `fields.name`");
    }

    #[test]
    fn rejects_category_outside_the_closed_set() {
        let mut entry = sample_entry();
        entry["fields"]["eventCategories"]["en-GB"] = json!(["Music", "Karaoke"]);

        let err = decode_event("en-GB")(&entry).unwrap_err();
        assert_eq!(
            err.path.to_string(),
            "fields.eventCategories.en-GB[1]",
            "the invalid value must fail the decode, not be dropped: {err}"
        );
    }

    #[test]
    fn rejects_entries_of_other_content_types() {
        let mut entry = sample_entry();
        entry["sys"]["contentType"]["sys"]["id"] = json!("sponsor");

        let err = decode_event("en-GB")(&entry).unwrap_err();
        assert!(err.is_wrong_content_type());
    }

    #[test]
    fn rejects_malformed_recurrence_dates_at_decode_time() {
        let mut entry = sample_entry();
        entry["fields"]["recurrenceDates"]["en-GB"] = json!(["13.1.18"]);

        let err = decode_event("en-GB")(&entry).unwrap_err();
        assert_eq!(
            err.path.to_string(),
            "fields.recurrenceDates.en-GB[0]"
        );
    }

    #[test]
    fn rejects_malformed_timestamps() {
        let mut entry = sample_entry();
        entry["fields"]["startTime"]["en-GB"] = json!("next tuesday");

        let err = decode_event("en-GB")(&entry).unwrap_err();
        assert_eq!(err.path.to_string(), "fields.startTime.en-GB");
    }

    #[test]
    fn absent_optional_lists_decode_as_empty() {
        let mut entry = sample_entry();
        entry["fields"]
            .as_object_mut()
            .unwrap()
            .remove("recurrenceDates");
        entry["fields"].as_object_mut().unwrap().remove("audience");

        let event = decode_event("en-GB")(&entry).unwrap();
        assert!(event.recurrence_dates.is_empty());
        assert!(event.audience.is_empty());
        assert_eq!(event.email.as_deref(), Some("hello@riverbankhall.example"));
        assert_eq!(event.phone, None);
    }

    #[test]
    fn decode_entries_keeps_per_record_results() {
        let mut broken = sample_entry();
        broken["fields"].as_object_mut().unwrap().remove("name");
        let payload = json!({ "items": [sample_entry(), broken] });

        let results = decode_entries("en-GB", &payload).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        let err = results[1].as_ref().unwrap_err();
        assert_eq!(err.to_string(), "missing field 'name' at `items[1].fields`");
    }

    #[test]
    fn decode_entries_accepts_a_bare_array() {
        let payload = json!([sample_entry()]);
        let results = decode_entries("en-GB", &payload).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_ok());
    }
}
