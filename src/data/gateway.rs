//! OpenWeatherMap forecast client
//!
//! Fetches the 5-day / 3-hour forecast for a city name and categorizes every
//! failure into a [`ForecastError`]. Normalization is a separate, pure step.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use super::error::ForecastError;
use super::normalize::{normalize, NormalizeOptions, RawPayload};
use super::ForecastSet;

/// Default base URL for the OpenWeatherMap API
pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`OpenWeatherClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// API key; `None` or blank means not configured
    pub api_key: Option<String>,
    /// Base URL without trailing `/forecast`
    pub base_url: String,
    /// Upper bound for a whole request
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: OPENWEATHER_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Client for fetching forecasts from OpenWeatherMap
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenWeatherClient {
    /// Create a client with a bounded request timeout
    pub fn new(config: &GatewayConfig) -> Result<Self, ForecastError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a client around an existing HTTP client
    pub fn with_client(client: Client, config: &GatewayConfig) -> Self {
        Self {
            client,
            api_key: config
                .api_key
                .as_ref()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Whether an API key is present
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch the raw forecast payload for a city name
    ///
    /// # Errors
    /// * `NotConfigured` - no API key, checked before any I/O
    /// * `CityNotFound` - HTTP 404
    /// * `Unauthorized` - HTTP 401
    /// * `HttpError` - any other non-success status
    /// * `NetworkError` - transport failure or timeout
    /// * `MalformedPayload` - body is not a forecast document
    pub async fn fetch_raw_forecast(&self, city: &str) -> Result<RawPayload, ForecastError> {
        let api_key = self.api_key.as_deref().ok_or(ForecastError::NotConfigured)?;
        let url = format!("{}/forecast", self.base_url);

        tracing::debug!(url = %url, city, "requesting forecast");

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                // The URL carries the API key
                let e = e.without_url();
                tracing::warn!(city, error = %e, "forecast request failed");
                ForecastError::NetworkError(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(city, status = status.as_u16(), "forecast request rejected");
            return Err(match status {
                StatusCode::NOT_FOUND => ForecastError::CityNotFound(city.to_string()),
                StatusCode::UNAUTHORIZED => ForecastError::Unauthorized,
                other => ForecastError::HttpError(other.as_u16()),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ForecastError::NetworkError(e.without_url()))?;
        RawPayload::from_json(&body)
    }

    /// Fetch and normalize in one step
    pub async fn fetch_forecast(
        &self,
        city: &str,
        options: &NormalizeOptions,
    ) -> Result<ForecastSet, ForecastError> {
        let payload = self.fetch_raw_forecast(city).await?;
        let forecast = normalize(&payload, options)?;
        tracing::info!(city, days = forecast.len(), "forecast loaded");
        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> GatewayConfig {
        GatewayConfig {
            api_key: key.map(str::to_string),
            ..GatewayConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.base_url, OPENWEATHER_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_blank_key_is_not_configured() {
        let client = OpenWeatherClient::new(&config_with_key(Some("   "))).unwrap();
        assert!(!client.is_configured());

        let client = OpenWeatherClient::new(&config_with_key(Some("abc123"))).unwrap();
        assert!(client.is_configured());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = GatewayConfig {
            base_url: "http://localhost:8080/data/2.5/".to_string(),
            ..GatewayConfig::default()
        };
        let client = OpenWeatherClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/data/2.5");
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        // Unroutable base URL: reaching the network would give NetworkError instead
        let config = GatewayConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..GatewayConfig::default()
        };
        let client = OpenWeatherClient::new(&config).unwrap();
        let result = client.fetch_raw_forecast("Lisbon").await;
        assert!(matches!(result, Err(ForecastError::NotConfigured)));
    }
}
