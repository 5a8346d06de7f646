//! Feed-neutral event types.
//!
//! These represent decoded content entries; the decoding itself lives in
//! [`crate::content`]. Consumers (list screens, the CLI) work exclusively
//! with these records; raw content-API shapes never leak past decode.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A single event occurrence.
///
/// Records with a non-empty `recurrence_dates` are templates; expansion
/// ([`crate::recurrence::expand_recurring_events`]) derives concrete
/// occurrences from them and is recomputed on every read, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Stable per content entry; expanded occurrences get a synthetic
    /// `"{id}-recurrence-{d/m/yyyy}"` derived id.
    pub id: String,
    pub locale: String,
    /// Content-version counter; only meaningful for change detection.
    pub revision: i64,

    pub name: String,
    pub categories: Vec<EventCategory>,
    /// Free-text audience tags, e.g. "Families".
    pub audience: Vec<String>,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub location: GeoPoint,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub location_name: String,
    /// Low/high bounds; equal for a fixed price, low of 0 meaning free.
    pub price_low: f64,
    pub price_high: f64,
    pub accessibility_options: Vec<String>,
    pub description: String,
    pub accessibility_details: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub ticketing_url: Option<String>,
    pub venue_details: Vec<String>,
    pub list_picture: ImageRef,
    pub detail_picture: ImageRef,
    pub performances: Vec<EntryRef>,
    /// Display-format dates (`d/m/yy` or `d/m/yyyy`) of additional
    /// occurrences; validated parseable at decode time.
    pub recurrence_dates: Vec<String>,
}

impl Event {
    pub fn is_free(&self) -> bool {
        self.price_low == 0.0 && self.price_high == 0.0
    }
}

/// The closed set of event categories the content model allows.
///
/// Decoding fails on any value outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    #[serde(rename = "Cabaret and Variety")]
    CabaretAndVariety,
    #[serde(rename = "Community")]
    Community,
    #[serde(rename = "Talks and Debates")]
    TalksAndDebates,
    #[serde(rename = "Film and Screenings")]
    FilmAndScreenings,
    #[serde(rename = "Plays and Theatre")]
    PlaysAndTheatre,
    #[serde(rename = "Social and Networking")]
    SocialAndNetworking,
    #[serde(rename = "Nightlife")]
    Nightlife,
    #[serde(rename = "Exhibition and Tours")]
    ExhibitionAndTours,
    #[serde(rename = "Sports and Activities")]
    SportsAndActivities,
    #[serde(rename = "Health")]
    Health,
    #[serde(rename = "Music")]
    Music,
}

impl EventCategory {
    pub const ALL: [EventCategory; 11] = [
        EventCategory::CabaretAndVariety,
        EventCategory::Community,
        EventCategory::TalksAndDebates,
        EventCategory::FilmAndScreenings,
        EventCategory::PlaysAndTheatre,
        EventCategory::SocialAndNetworking,
        EventCategory::Nightlife,
        EventCategory::ExhibitionAndTours,
        EventCategory::SportsAndActivities,
        EventCategory::Health,
        EventCategory::Music,
    ];

    /// The category name as the content API spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            EventCategory::CabaretAndVariety => "Cabaret and Variety",
            EventCategory::Community => "Community",
            EventCategory::TalksAndDebates => "Talks and Debates",
            EventCategory::FilmAndScreenings => "Film and Screenings",
            EventCategory::PlaysAndTheatre => "Plays and Theatre",
            EventCategory::SocialAndNetworking => "Social and Networking",
            EventCategory::Nightlife => "Nightlife",
            EventCategory::ExhibitionAndTours => "Exhibition and Tours",
            EventCategory::SportsAndActivities => "Sports and Activities",
            EventCategory::Health => "Health",
            EventCategory::Music => "Music",
        }
    }

    /// Case-sensitive lookup by API name.
    pub fn from_name(name: &str) -> Option<EventCategory> {
        EventCategory::ALL.iter().copied().find(|c| c.as_str() == name)
    }
}

/// Geographic point for the event venue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Opaque link to an image asset. Decoded structurally (the linked
/// entry's `sys.id`), resolved by the consuming layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: String,
}

/// Opaque link to another content entry (e.g. a performance).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRef {
    pub id: String,
}
