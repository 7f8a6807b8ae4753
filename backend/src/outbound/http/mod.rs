//! Reqwest-backed adapters for the third-party feeds.
//!
//! Adapters own transport details only: query parameters, timeout and status
//! mapping, and decoding upstream payloads into domain read models. They share
//! one [`reqwest::Client`] built by [`build_client`].

mod events;
mod news;
mod weather;
mod youtube;

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::domain::ports::UpstreamError;

pub use events::{DEFAULT_EVENTS_ENDPOINT, TicketmasterEvents};
pub use news::{DEFAULT_NEWS_FEED, RssNews};
pub use weather::{DEFAULT_WEATHER_ENDPOINT, OpenWeatherMap};
pub use youtube::{DEFAULT_SEARCH_ENDPOINT, YoutubeSearch};

const USER_AGENT: &str = concat!("dashboard/", env!("CARGO_PKG_VERSION"));

/// Build the shared client with an overall per-request timeout.
///
/// # Errors
///
/// Returns an error when the TLS backend cannot be initialised.
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Send `request` and return the body of a successful response.
async fn fetch(request: reqwest::RequestBuilder) -> Result<Vec<u8>, UpstreamError> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

fn map_transport_error(error: reqwest::Error) -> UpstreamError {
    if error.is_timeout() {
        UpstreamError::timeout(error.to_string())
    } else {
        UpstreamError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> UpstreamError {
    let preview = body_preview(body);
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            UpstreamError::timeout(format!("status {}", status.as_u16()))
        }
        _ => UpstreamError::status(status.as_u16(), preview),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

fn require_key<'a>(key: Option<&'a str>, what: &str) -> Result<&'a str, UpstreamError> {
    key.filter(|key| !key.trim().is_empty())
        .ok_or_else(|| UpstreamError::unconfigured(format!("{what} API key is not set")))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for shared status and preview helpers.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StatusCode::GATEWAY_TIMEOUT)]
    #[case(StatusCode::REQUEST_TIMEOUT)]
    fn timeout_statuses_map_to_timeout(#[case] status: StatusCode) {
        assert!(matches!(
            map_status_error(status, b""),
            UpstreamError::Timeout { .. }
        ));
    }

    #[rstest]
    fn other_statuses_keep_code_and_preview() {
        let error = map_status_error(
            StatusCode::UNAUTHORIZED,
            b"{\"cod\": 401,\n \"message\": \"bad key\"}",
        );
        assert_eq!(
            error,
            UpstreamError::status(401_u16, "{\"cod\": 401, \"message\": \"bad key\"}")
        );
    }

    #[rstest]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(500);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.len(), 163);
        assert!(preview.ends_with("..."));
    }

    #[rstest]
    #[case(None)]
    #[case(Some("  "))]
    fn blank_keys_are_unconfigured(#[case] key: Option<&str>) {
        assert!(matches!(
            require_key(key, "weather"),
            Err(UpstreamError::Unconfigured { .. })
        ));
    }
}
