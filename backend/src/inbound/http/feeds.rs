//! Weather, news, events and video search handlers.
//!
//! Weather failures surface as `502`. News and events degrade to empty
//! lists so one broken feed does not blank the dashboard.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::{IntoParams, ToSchema};

use super::state::HttpState;
use super::validation::{FieldName, missing_field_error};
use crate::domain::feeds::{
    Coordinates, EVENTS_LIMIT, EVENTS_RADIUS_KM, LocalEvent, NEWS_LIMIT, NewsItem, SearchQuery,
    VideoId, WeatherReport,
};
use crate::domain::ports::UpstreamError;
use crate::domain::{ApiResult, Error};

const QUERY: FieldName = FieldName::new("query");

/// Optional coordinates for `GET /api/weather`.
///
/// Values are kept as text so that a missing or unparsable coordinate falls
/// back to its default instead of rejecting the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WeatherQuery {
    /// Latitude; defaults to 12.9716.
    #[param(value_type = Option<f64>)]
    pub lat: Option<String>,
    /// Longitude; defaults to 77.5946.
    #[param(value_type = Option<f64>)]
    pub lon: Option<String>,
}

fn coordinate(raw: Option<&str>, fallback: f64) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(fallback)
}

impl WeatherQuery {
    fn coordinates(&self) -> Coordinates {
        let fallback = Coordinates::default();
        Coordinates {
            lat: coordinate(self.lat.as_deref(), fallback.lat),
            lon: coordinate(self.lon.as_deref(), fallback.lon),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WeatherResponse {
    pub weather: WeatherReport,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NewsResponse {
    pub items: Vec<NewsItem>,
}

/// Body for `POST /search`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SearchRequest {
    #[schema(example = "lofi beats")]
    pub query: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[schema(value_type = String, example = "dQw4w9WgXcQ")]
    pub video_id: VideoId,
}

fn weather_error(err: &UpstreamError) -> Error {
    warn!(error = %err, "weather lookup failed");
    match err {
        UpstreamError::Decode { .. } => Error::upstream_unavailable("Invalid weather data"),
        _ => Error::upstream_unavailable("Weather unavailable"),
    }
}

/// Current weather for the given or default coordinates.
#[utoipa::path(
    get,
    path = "/api/weather",
    params(WeatherQuery),
    responses(
        (status = 200, description = "Current conditions", body = WeatherResponse),
        (status = 502, description = "Weather provider unavailable or invalid", body = Error)
    ),
    tags = ["feeds"],
    operation_id = "weather",
    security([])
)]
#[get("/api/weather")]
pub async fn weather(
    state: web::Data<HttpState>,
    query: web::Query<WeatherQuery>,
) -> ApiResult<web::Json<WeatherResponse>> {
    let report = state
        .weather
        .current(query.coordinates())
        .await
        .map_err(|err| weather_error(&err))?;
    Ok(web::Json(WeatherResponse { weather: report }))
}

/// Latest headlines; empty when the feed is unavailable.
#[utoipa::path(
    get,
    path = "/api/news",
    responses((status = 200, description = "Up to ten headlines", body = NewsResponse)),
    tags = ["feeds"],
    operation_id = "news",
    security([])
)]
#[get("/api/news")]
pub async fn news(state: web::Data<HttpState>) -> web::Json<NewsResponse> {
    let items = state.news.headlines(NEWS_LIMIT).await.unwrap_or_else(|err| {
        warn!(error = %err, "news feed unavailable");
        Vec::new()
    });
    web::Json(NewsResponse { items })
}

/// Upcoming events near the default location; empty when unavailable.
#[utoipa::path(
    get,
    path = "/api/events",
    responses((status = 200, description = "Up to ten events, soonest first", body = [LocalEvent])),
    tags = ["feeds"],
    operation_id = "events",
    security([])
)]
#[get("/api/events")]
pub async fn events(state: web::Data<HttpState>) -> web::Json<Vec<LocalEvent>> {
    let events = state
        .events
        .nearby(Coordinates::default(), EVENTS_RADIUS_KM, EVENTS_LIMIT)
        .await
        .unwrap_or_else(|err| {
            warn!(error = %err, "events feed unavailable");
            Vec::new()
        });
    web::Json(events)
}

/// First video matching a search query.
#[utoipa::path(
    post,
    path = "/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "First matching video", body = SearchResponse),
        (status = 400, description = "Blank query", body = Error),
        (status = 404, description = "No video found", body = Error)
    ),
    tags = ["feeds"],
    operation_id = "search",
    security([])
)]
#[post("/search")]
pub async fn search(
    state: web::Data<HttpState>,
    payload: web::Json<SearchRequest>,
) -> ApiResult<web::Json<SearchResponse>> {
    let query = payload
        .query
        .as_deref()
        .and_then(SearchQuery::new)
        .ok_or_else(|| missing_field_error(QUERY))?;
    let found = state.videos.first_video(&query).await.unwrap_or_else(|err| {
        warn!(error = %err, "video search failed");
        None
    });
    let video_id = found.ok_or_else(|| Error::not_found("No video found"))?;
    Ok(web::Json(SearchResponse { video_id }))
}
