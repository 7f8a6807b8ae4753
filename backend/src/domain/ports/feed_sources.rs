//! Port abstractions for the third-party feeds shown on the dashboard.

use async_trait::async_trait;

use crate::domain::feeds::{
    Coordinates, LocalEvent, NewsItem, SearchQuery, VideoId, WeatherReport,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by upstream HTTP adapters.
    pub enum UpstreamError {
        /// The upstream call did not finish in time.
        Timeout { message: String } => "upstream request timed out: {message}",
        /// The request could not be sent or the response not received.
        Transport { message: String } => "upstream transport failed: {message}",
        /// The upstream answered with a non-success status.
        Status { status: u16, message: String } => "upstream returned {status}: {message}",
        /// The payload did not have the expected shape.
        Decode { message: String } => "upstream payload invalid: {message}",
        /// A required API key or URL is not configured.
        Unconfigured { message: String } => "upstream not configured: {message}",
    }
}

/// Current-weather lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch current conditions in metric units.
    async fn current(&self, at: Coordinates) -> Result<WeatherReport, UpstreamError>;
}

/// Headline feed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch up to `limit` items in feed order.
    async fn headlines(&self, limit: usize) -> Result<Vec<NewsItem>, UpstreamError>;
}

/// Nearby event listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventsSource: Send + Sync {
    /// Fetch events within `radius_km` of `at`, soonest first.
    async fn nearby(
        &self,
        at: Coordinates,
        radius_km: u32,
        limit: usize,
    ) -> Result<Vec<LocalEvent>, UpstreamError>;
}

/// Video search shortcut.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// First matching video, if any.
    async fn first_video(&self, query: &SearchQuery) -> Result<Option<VideoId>, UpstreamError>;
}

/// Feed fixture returning empty results for every source.
///
/// Weather has no empty form, so it reports [`UpstreamError::Unconfigured`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFeeds;

#[async_trait]
impl WeatherSource for FixtureFeeds {
    async fn current(&self, _at: Coordinates) -> Result<WeatherReport, UpstreamError> {
        Err(UpstreamError::unconfigured("weather fixture"))
    }
}

#[async_trait]
impl NewsSource for FixtureFeeds {
    async fn headlines(&self, _limit: usize) -> Result<Vec<NewsItem>, UpstreamError> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl EventsSource for FixtureFeeds {
    async fn nearby(
        &self,
        _at: Coordinates,
        _radius_km: u32,
        _limit: usize,
    ) -> Result<Vec<LocalEvent>, UpstreamError> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl VideoSearch for FixtureFeeds {
    async fn first_video(&self, _query: &SearchQuery) -> Result<Option<VideoId>, UpstreamError> {
        Ok(None)
    }
}
