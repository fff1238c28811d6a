use crate::config::Config;
use crate::datasources::{ForecastClient, GeoIpClient};
use crate::error::Result;
use crate::models::{Forecast, GeoLocation};
use std::time::Duration;

/// Runs the location lookup and the forecast fetch, strictly one after the other
pub struct ForecastService {
    geo_client: GeoIpClient,
    forecast_client: ForecastClient,
    fixed_location: Option<GeoLocation>,
}

impl ForecastService {
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.http.timeout_secs);

        if let Some(location) = &config.location {
            tracing::info!(
                city = %location.city,
                "Using configured location - GeoIP lookup disabled"
            );
        }

        Ok(Self {
            geo_client: GeoIpClient::new(config.geolocation.clone(), timeout)?,
            forecast_client: ForecastClient::new(config.forecast.clone(), timeout)?,
            fixed_location: config.location.clone(),
        })
    }

    pub async fn resolve_location(&self) -> Result<GeoLocation> {
        if let Some(location) = &self.fixed_location {
            return Ok(location.clone());
        }

        match self.geo_client.locate().await {
            Ok(location) => {
                tracing::info!(
                    city = %location.city,
                    latitude = location.latitude,
                    longitude = location.longitude,
                    "Resolved location"
                );
                Ok(location)
            }
            Err(e) => {
                tracing::warn!("Failed to resolve location: {}", e);
                Err(e)
            }
        }
    }

    /// Locate, then fetch. The forecast request is only issued once coordinates are known.
    pub async fn refresh(&self) -> Result<Forecast> {
        let location = self.resolve_location().await?;
        self.fetch_for(&location).await
    }

    pub async fn fetch_for(&self, location: &GeoLocation) -> Result<Forecast> {
        match self.forecast_client.fetch_forecast(location).await {
            Ok(forecast) => {
                tracing::info!(
                    city = %forecast.location.city,
                    samples = forecast.samples.len(),
                    "Forecast updated"
                );
                Ok(forecast)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch forecast: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ForecastApiConfig, GeoLocationConfig, HttpConfig, Units};
    use crate::error::SkyglanceError;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer, location: Option<GeoLocation>) -> Config {
        Config {
            forecast: ForecastApiConfig {
                api_key: "test_key".into(),
                host: "open-weather13.p.rapidapi.com".into(),
                base_url: server.uri(),
                units: Units::Metric,
            },
            geolocation: GeoLocationConfig {
                url: format!("{}/json/", server.uri()),
            },
            location,
            http: HttpConfig { timeout_secs: 5 },
        }
    }

    fn forecast_body() -> serde_json::Value {
        serde_json::json!({
            "list": [{
                "dt": 1_718_409_600,
                "main": {"temp": 18.2, "feels_like": 17.9, "temp_min": 16.0,
                         "temp_max": 19.5, "humidity": 55},
                "weather": [{"description": "scattered clouds"}],
                "wind": {"speed": 4.1}
            }]
        })
    }

    #[tokio::test]
    async fn refresh_uses_geoip_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": 48.85, "longitude": 2.35, "city": "Paris"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/city/fivedaysforcast/48.85/2.35"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .expect(1)
            .mount(&server)
            .await;

        let service = ForecastService::new(&config_for(&server, None)).unwrap();
        let forecast = service.refresh().await.unwrap();

        assert_eq!(forecast.location.city, "Paris");
        assert_eq!(forecast.samples.len(), 1);
        assert_eq!(forecast.samples[0].condition_description, "scattered clouds");
    }

    #[tokio::test]
    async fn geolocation_failure_skips_forecast_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/city/fivedaysforcast/.*"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .expect(0)
            .mount(&server)
            .await;

        let service = ForecastService::new(&config_for(&server, None)).unwrap();
        let err = service.refresh().await.unwrap_err();

        assert!(matches!(err, SkyglanceError::GeoLocation(_)));
    }

    #[tokio::test]
    async fn configured_location_skips_geoip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/city/fivedaysforcast/60.17/24.94"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .expect(1)
            .mount(&server)
            .await;

        let helsinki = GeoLocation {
            latitude: 60.17,
            longitude: 24.94,
            city: "Helsinki".into(),
        };
        let service = ForecastService::new(&config_for(&server, Some(helsinki))).unwrap();
        let forecast = service.refresh().await.unwrap();

        assert_eq!(forecast.location.city, "Helsinki");
    }
}
