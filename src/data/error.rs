//! Error taxonomy for fetching and normalizing forecasts
//!
//! Every failure in a lookup ends up as a single `ForecastError`. The display
//! layer never inspects the variants beyond `user_message` and `is_retryable`.

use thiserror::Error;

/// Errors that can occur while fetching or normalizing a forecast
#[derive(Debug, Error)]
pub enum ForecastError {
    /// No API key was configured
    #[error("API key not configured")]
    NotConfigured,

    /// The provider does not know the requested city
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// The provider rejected the API key
    #[error("API key rejected by provider")]
    Unauthorized,

    /// Any other non-success HTTP status
    #[error("Unexpected HTTP status: {0}")]
    HttpError(u16),

    /// Transport failure (DNS, connect, TLS, timeout)
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The payload did not match the expected forecast shape
    #[error("Malformed forecast payload: {0}")]
    MalformedPayload(String),
}

impl ForecastError {
    /// Message shown to the user for this error
    pub fn user_message(&self) -> String {
        match self {
            Self::NotConfigured => "API key not configured. Set OPENWEATHER_API_KEY or add \
                `api_key` to the config file."
                .to_string(),
            Self::CityNotFound(city) => format!(
                "City \"{}\" not found. Please check the spelling and try again.",
                city
            ),
            Self::Unauthorized => {
                "Invalid API key. Please check your OpenWeatherMap API key.".to_string()
            }
            Self::HttpError(status) => {
                format!("Failed to fetch forecast data. Status: {}", status)
            }
            Self::NetworkError(_) => {
                "Network error. Please check your internet connection.".to_string()
            }
            Self::MalformedPayload(_) => {
                "An unexpected error occurred. Please try again.".to_string()
            }
        }
    }

    /// Whether submitting the same or another query may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::CityNotFound(_) | Self::HttpError(_) | Self::NetworkError(_)
        )
    }

    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedPayload(detail.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_message_has_remediation() {
        let msg = ForecastError::NotConfigured.user_message();
        assert!(msg.contains("OPENWEATHER_API_KEY"));
        assert!(msg.contains("config file"));
    }

    #[test]
    fn test_city_not_found_message_names_city() {
        let msg = ForecastError::CityNotFound("Atlantis".to_string()).user_message();
        assert_eq!(
            msg,
            "City \"Atlantis\" not found. Please check the spelling and try again."
        );
    }

    #[test]
    fn test_http_error_message_includes_status() {
        let msg = ForecastError::HttpError(503).user_message();
        assert!(msg.ends_with("Status: 503"));
    }

    #[test]
    fn test_malformed_payload_is_generic_to_user() {
        let err = ForecastError::malformed("list[3].main.temp");
        assert_eq!(
            err.user_message(),
            "An unexpected error occurred. Please try again."
        );
        // The detail is kept for logs
        assert!(err.to_string().contains("list[3].main.temp"));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ForecastError::CityNotFound("x".to_string()).is_retryable());
        assert!(ForecastError::HttpError(500).is_retryable());
        assert!(!ForecastError::NotConfigured.is_retryable());
        assert!(!ForecastError::Unauthorized.is_retryable());
        assert!(!ForecastError::malformed("list").is_retryable());
    }
}
