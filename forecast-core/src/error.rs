use thiserror::Error;

/// Errors surfaced by a [`WeatherProvider`](crate::WeatherProvider) and the dashboard.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The query was blank after trimming.
    #[error("No city name given")]
    EmptyCity,

    /// The provider reported that the requested place does not exist.
    #[error("City not found: {query}")]
    NotFound { query: String },

    /// The request never produced a response (connect, DNS, timeout, body read).
    #[error("Network failure talking to the weather service: {0}")]
    Transport(#[source] reqwest::Error),

    /// The request could not be built, e.g. a malformed `base_url` in the config.
    #[error("Invalid weather service configuration: {0}")]
    InvalidRequest(String),

    /// The provider answered with a server-side HTTP error.
    #[error("Weather service unavailable (HTTP {status})")]
    Unavailable { status: u16 },

    /// The provider refused the request, e.g. an invalid API key.
    #[error("Weather service rejected the request ({code}): {message}")]
    Rejected { code: u16, message: String },

    /// The payload did not have the expected shape.
    #[error("Malformed response from weather service: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            WeatherError::InvalidRequest(err.to_string())
        } else {
            WeatherError::Transport(err)
        }
    }
}

impl WeatherError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, WeatherError::NotFound { .. })
    }

    /// True for failures where retrying later may succeed.
    pub fn is_transport(&self) -> bool {
        matches!(self, WeatherError::Transport(_) | WeatherError::Unavailable { .. })
    }
}
