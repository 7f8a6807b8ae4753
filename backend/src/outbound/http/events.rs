//! Ticketmaster Discovery adapter for nearby events.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::feeds::{Coordinates, LocalEvent};
use crate::domain::ports::{EventsSource, UpstreamError};

use super::{fetch, require_key};

/// Discovery API event search endpoint.
pub const DEFAULT_EVENTS_ENDPOINT: &str = "https://app.ticketmaster.com/discovery/v2/events.json";

/// Events source backed by the Ticketmaster Discovery API.
pub struct TicketmasterEvents {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl TicketmasterEvents {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint: DEFAULT_EVENTS_ENDPOINT.to_owned(),
            api_key,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SearchDto {
    #[serde(default, rename = "_embedded")]
    embedded: Option<EventsEmbeddedDto>,
}

#[derive(Debug, Default, Deserialize)]
struct EventsEmbeddedDto {
    #[serde(default)]
    events: Vec<EventDto>,
}

#[derive(Debug, Deserialize)]
struct EventDto {
    name: Option<String>,
    url: Option<String>,
    dates: Option<DatesDto>,
    #[serde(rename = "_embedded")]
    embedded: Option<VenuesEmbeddedDto>,
}

#[derive(Debug, Deserialize)]
struct DatesDto {
    start: Option<StartDto>,
}

#[derive(Debug, Deserialize)]
struct StartDto {
    #[serde(rename = "localDate")]
    local_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VenuesEmbeddedDto {
    #[serde(default)]
    venues: Vec<VenueDto>,
}

#[derive(Debug, Deserialize)]
struct VenueDto {
    name: Option<String>,
}

impl EventDto {
    fn into_domain(self) -> LocalEvent {
        LocalEvent {
            name: self.name,
            url: self.url,
            date: self
                .dates
                .and_then(|dates| dates.start)
                .and_then(|start| start.local_date),
            venue: self
                .embedded
                .and_then(|embedded| embedded.venues.into_iter().next())
                .and_then(|venue| venue.name),
        }
    }
}

fn parse_events(body: &[u8], limit: usize) -> Result<Vec<LocalEvent>, UpstreamError> {
    let dto: SearchDto = serde_json::from_slice(body)
        .map_err(|err| UpstreamError::decode(format!("invalid events JSON payload: {err}")))?;
    Ok(dto
        .embedded
        .unwrap_or_default()
        .events
        .into_iter()
        .take(limit)
        .map(EventDto::into_domain)
        .collect())
}

#[async_trait]
impl EventsSource for TicketmasterEvents {
    async fn nearby(
        &self,
        at: Coordinates,
        radius_km: u32,
        limit: usize,
    ) -> Result<Vec<LocalEvent>, UpstreamError> {
        let key = require_key(self.api_key.as_deref(), "events")?;
        let request = self.client.get(&self.endpoint).query(&[
            ("apikey", key.to_owned()),
            ("latlong", format!("{},{}", at.lat, at.lon)),
            ("radius", radius_km.to_string()),
            ("unit", "km".to_owned()),
            ("locale", "*".to_owned()),
            ("size", limit.to_string()),
            ("sort", "date,asc".to_owned()),
        ]);
        let body = fetch(request).await?;
        parse_events(&body, limit)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for Discovery payload decoding.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parses_nested_dates_and_first_venue() {
        let body = br#"{
            "_embedded": {
                "events": [
                    {
                        "name": "Jazz night",
                        "url": "https://tickets.example.com/1",
                        "dates": {"start": {"localDate": "2026-10-20", "localTime": "19:00:00"}},
                        "_embedded": {"venues": [{"name": "Town Hall"}, {"name": "Annex"}]}
                    },
                    {"name": "Mystery gig"}
                ]
            },
            "page": {"size": 10}
        }"#;

        let events = parse_events(body, 10).expect("payload should decode");
        assert_eq!(
            events[0],
            LocalEvent {
                name: Some("Jazz night".to_owned()),
                url: Some("https://tickets.example.com/1".to_owned()),
                date: Some("2026-10-20".to_owned()),
                venue: Some("Town Hall".to_owned()),
            }
        );
        assert_eq!(events[1].date, None);
        assert_eq!(events[1].venue, None);
    }

    #[rstest]
    fn no_results_page_is_empty() {
        let body = br#"{"page": {"size": 10, "totalElements": 0}}"#;
        assert!(parse_events(body, 10).expect("payload should decode").is_empty());
    }

    #[rstest]
    fn limit_caps_results() {
        let body = br#"{"_embedded": {"events": [{"name": "a"}, {"name": "b"}, {"name": "c"}]}}"#;
        assert_eq!(parse_events(body, 2).expect("payload should decode").len(), 2);
    }
}
