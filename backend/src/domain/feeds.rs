//! Read models for the third-party feeds shown on the dashboard.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Latitude used when a weather or events request omits coordinates.
pub const DEFAULT_LATITUDE: f64 = 12.9716;
/// Longitude used when a weather or events request omits coordinates.
pub const DEFAULT_LONGITUDE: f64 = 77.5946;
/// Upper bound on news items returned.
pub const NEWS_LIMIT: usize = 10;
/// Upper bound on local events returned.
pub const EVENTS_LIMIT: usize = 10;
/// Search radius for local events, in kilometres.
pub const EVENTS_RADIUS_KM: u32 = 50;

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Default for Coordinates {
    fn default() -> Self {
        Self {
            lat: DEFAULT_LATITUDE,
            lon: DEFAULT_LONGITUDE,
        }
    }
}

/// Current conditions at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeatherReport {
    /// Temperature in degrees Celsius.
    pub temp: f64,
    pub city: Option<String>,
    pub desc: String,
    /// Provider icon code, e.g. `01d`.
    pub icon: String,
}

/// One headline from the news feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewsItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<String>,
}

/// A nearby event listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LocalEvent {
    pub name: Option<String>,
    pub url: Option<String>,
    /// Local start date, `YYYY-MM-DD`.
    pub date: Option<String>,
    pub venue: Option<String>,
}

/// YouTube video identifier (always 11 characters).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct VideoId(String);

/// Length of a YouTube video identifier in characters.
pub const VIDEO_ID_LEN: usize = 11;

impl VideoId {
    /// Wrap `raw` when it has exactly [`VIDEO_ID_LEN`] characters.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        (raw.chars().count() == VIDEO_ID_LEN).then_some(Self(raw))
    }

    /// Identifier string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// A non-blank search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Accept any query that is not blank once trimmed.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    /// Query text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
