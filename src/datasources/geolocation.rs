use crate::config::GeoLocationConfig;
use crate::error::{Result, SkyglanceError};
use crate::models::GeoLocation;
use serde::Deserialize;
use std::time::Duration;

/// Resolves the caller's approximate location from their public IP address
pub struct GeoIpClient {
    client: reqwest::Client,
    config: GeoLocationConfig,
}

// ipapi.co answers rate limits and reserved addresses with 200 + an error flag
#[derive(Debug, Deserialize)]
struct GeoIpResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    error: bool,
    #[serde(default)]
    reason: Option<String>,
}

impl GeoIpClient {
    pub fn new(config: GeoLocationConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }

    pub async fn locate(&self) -> Result<GeoLocation> {
        tracing::debug!(url = %self.config.url, "Requesting GeoIP location");

        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| SkyglanceError::GeoLocation(format!("GeoIP lookup: {}", e)))?;

        if !response.status().is_success() {
            return Err(SkyglanceError::GeoLocation(format!(
                "GeoIP service returned {}",
                response.status()
            )));
        }

        let body: GeoIpResponse = response.json().await.map_err(|e| {
            SkyglanceError::GeoLocation(format!("Failed to parse GeoIP response: {}", e))
        })?;

        if body.error {
            return Err(SkyglanceError::GeoLocation(
                body.reason
                    .unwrap_or_else(|| "GeoIP service reported an error".to_string()),
            ));
        }

        match (body.latitude, body.longitude) {
            (Some(latitude), Some(longitude)) => Ok(GeoLocation {
                latitude,
                longitude,
                city: body.city.unwrap_or_default(),
            }),
            _ => Err(SkyglanceError::GeoLocation(
                "GeoIP response has no coordinates".into(),
            )),
        }
    }
}
