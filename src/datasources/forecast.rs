use crate::config::ForecastApiConfig;
use crate::error::{Result, SkyglanceError};
use crate::models::{Forecast, ForecastSample, GeoLocation};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

/// Five-day / three-hour forecast via the RapidAPI open-weather13 endpoint
pub struct ForecastClient {
    client: reqwest::Client,
    config: ForecastApiConfig,
}

// OpenWeatherMap-shaped response structures
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Option<Vec<ForecastItem>>,
}

#[derive(Debug, Deserialize)]
struct ForecastItem {
    dt: i64,
    main: ForecastMain,
    #[serde(default)]
    weather: Vec<ForecastWeather>,
    #[serde(default)]
    wind: Option<ForecastWind>,
}

#[derive(Debug, Deserialize)]
struct ForecastMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastWeather {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ForecastWind {
    speed: f64,
}

impl ForecastClient {
    pub fn new(config: ForecastApiConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }

    fn forecast_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/city/fivedaysforcast/{}/{}?units={}",
            self.config.base_url.trim_end_matches('/'),
            latitude,
            longitude,
            self.config.units.as_query()
        )
    }

    /// Fetch the forecast for a location. The returned samples keep the API's order.
    pub async fn fetch_forecast(&self, location: &GeoLocation) -> Result<Forecast> {
        let url = self.forecast_url(location.latitude, location.longitude);
        tracing::debug!(%url, "Requesting forecast");

        let response = self
            .client
            .get(&url)
            .header("x-rapidapi-key", &self.config.api_key)
            .header("x-rapidapi-host", &self.config.host)
            .send()
            .await
            .map_err(|e| SkyglanceError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%status, %body, "Forecast request rejected");
            let reason = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string());
            return Err(SkyglanceError::Fetch(reason));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SkyglanceError::Fetch(e.to_string()))?;

        let samples = parse_samples(&body)?;

        Ok(Forecast {
            fetched_at: Utc::now(),
            location: location.clone(),
            samples,
        })
    }
}

fn parse_samples(body: &str) -> Result<Vec<ForecastSample>> {
    let response: ForecastResponse = serde_json::from_str(body)
        .map_err(|e| SkyglanceError::InvalidResponse(format!("undecodable body: {}", e)))?;

    let list = response
        .list
        .ok_or_else(|| SkyglanceError::InvalidResponse("missing `list` field".into()))?;

    if list.is_empty() {
        return Err(SkyglanceError::InvalidResponse(
            "`list` contains no samples".into(),
        ));
    }

    list.into_iter().map(convert_item).collect()
}

fn convert_item(item: ForecastItem) -> Result<ForecastSample> {
    let timestamp = DateTime::from_timestamp(item.dt, 0).ok_or_else(|| {
        SkyglanceError::InvalidResponse(format!("timestamp out of range: {}", item.dt))
    })?;

    let condition_description = item
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .unwrap_or_default();

    Ok(ForecastSample {
        timestamp,
        temperature: item.main.temp,
        feels_like: item.main.feels_like,
        temp_min: item.main.temp_min,
        temp_max: item.main.temp_max,
        humidity: item.main.humidity,
        wind_speed: item.wind.map(|w| w.speed).unwrap_or(0.0),
        condition_description,
    })
}
