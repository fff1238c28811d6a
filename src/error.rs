use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkyglanceError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Geolocation failed: {0}")]
    GeoLocation(String),

    #[error("Failed to fetch weather data: {0}")]
    Fetch(String),

    #[error("Invalid response structure: {0}")]
    InvalidResponse(String),
}

impl SkyglanceError {
    /// Message shown to the user in place of the forecast.
    pub fn user_message(&self) -> String {
        match self {
            SkyglanceError::InvalidResponse(_) => "Invalid response structure".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SkyglanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failure_message() {
        let err = SkyglanceError::Fetch("Unauthorized".into());
        assert_eq!(err.user_message(), "Failed to fetch weather data: Unauthorized");
    }

    #[test]
    fn structural_failure_hides_details() {
        let err = SkyglanceError::InvalidResponse("missing `list`".into());
        assert_eq!(err.user_message(), "Invalid response structure");
        assert!(err.to_string().contains("missing `list`"));
    }
}
