//! OpenWeatherMap current-weather adapter.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::feeds::{Coordinates, WeatherReport};
use crate::domain::ports::{UpstreamError, WeatherSource};

use super::{fetch, require_key};

/// Current-weather endpoint used unless overridden.
pub const DEFAULT_WEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Weather source backed by the OpenWeatherMap REST API, in metric units.
pub struct OpenWeatherMap {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenWeatherMap {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint: DEFAULT_WEATHER_ENDPOINT.to_owned(),
            api_key,
        }
    }

    /// Point the adapter at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherDto {
    main: MainDto,
    name: Option<String>,
    #[serde(default)]
    weather: Vec<ConditionDto>,
}

#[derive(Debug, Deserialize)]
struct MainDto {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionDto {
    description: String,
    icon: String,
}

fn parse_report(body: &[u8]) -> Result<WeatherReport, UpstreamError> {
    let dto: CurrentWeatherDto = serde_json::from_slice(body)
        .map_err(|err| UpstreamError::decode(format!("invalid weather JSON payload: {err}")))?;
    let condition = dto
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| UpstreamError::decode("weather payload has no conditions"))?;
    Ok(WeatherReport {
        temp: dto.main.temp,
        city: dto.name,
        desc: condition.description,
        icon: condition.icon,
    })
}

#[async_trait]
impl WeatherSource for OpenWeatherMap {
    async fn current(&self, at: Coordinates) -> Result<WeatherReport, UpstreamError> {
        let key = require_key(self.api_key.as_deref(), "weather")?;
        let request = self.client.get(&self.endpoint).query(&[
            ("lat", at.lat.to_string()),
            ("lon", at.lon.to_string()),
            ("appid", key.to_owned()),
            ("units", "metric".to_owned()),
        ]);
        let body = fetch(request).await?;
        parse_report(&body)
    }
}
