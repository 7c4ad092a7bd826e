use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::{ForecastSample, WeatherError, WeatherSnapshot};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// OpenWeather client. Temperatures are requested in the default Kelvin units.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    /// GET `endpoint` and decode it once the payload status says success.
    ///
    /// A 404 is `NotFound` only when `city` is set. Coordinate lookups have no
    /// city to miss, so there it is a `Rejected` request.
    async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        city: Option<&str>,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, ?params, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if status.is_server_error() {
            return Err(WeatherError::Unavailable {
                status: status.as_u16(),
            });
        }

        let envelope: OwStatus = serde_json::from_str(&body).map_err(|e| {
            WeatherError::Malformed(format!("{endpoint}: {e}: {}", truncate_body(&body)))
        })?;

        let code = envelope
            .cod
            .as_ref()
            .and_then(OwCode::as_u16)
            .unwrap_or(status.as_u16());
        debug!(endpoint, code, "OpenWeather responded");

        match (code, city) {
            (200, _) => {}
            (404, Some(city)) => {
                return Err(WeatherError::NotFound {
                    query: city.to_string(),
                });
            }
            (code, _) => {
                return Err(WeatherError::Rejected {
                    code,
                    message: envelope.message_text(),
                });
            }
        }

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::Malformed(format!("{endpoint}: {e}")))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwCode {
    Number(u16),
    Text(String),
}

impl OwCode {
    fn as_u16(&self) -> Option<u16> {
        match self {
            OwCode::Number(n) => Some(*n),
            OwCode::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Status fields present on every OpenWeather payload, success or not.
#[derive(Debug, Deserialize)]
struct OwStatus {
    #[serde(default)]
    cod: Option<OwCode>,
    #[serde(default)]
    message: Option<serde_json::Value>,
}

impl OwStatus {
    fn message_text(&self) -> String {
        match &self.message {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "no message".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentMain {
    temp: f64,
    feels_like: f64,
    pressure: u32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    coord: OwCoord,
    main: OwCurrentMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let parsed: OwCurrentResponse = self
            .request("weather", &[("q", city)], Some(city))
            .await?;

        Ok(WeatherSnapshot {
            location_name: parsed.name,
            temperature_k: parsed.main.temp,
            feels_like_k: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            wind_speed_mps: parsed.wind.speed,
            condition: first_description(&parsed.weather, "current weather")?,
            latitude: parsed.coord.lat,
            longitude: parsed.coord.lon,
            observed_at: unix_to_utc(parsed.dt)?,
        })
    }

    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<ForecastSample>, WeatherError> {
        let lat = latitude.to_string();
        let lon = longitude.to_string();

        let parsed: OwForecastResponse = self
            .request(
                "forecast",
                &[("lat", lat.as_str()), ("lon", lon.as_str())],
                None,
            )
            .await?;

        parsed
            .list
            .into_iter()
            .map(|entry| -> Result<ForecastSample, WeatherError> {
                Ok(ForecastSample {
                    timestamp: unix_to_utc(entry.dt)?,
                    temp_min_k: entry.main.temp_min,
                    temp_max_k: entry.main.temp_max,
                    condition: first_description(&entry.weather, "forecast entry")?,
                })
            })
            .collect()
    }
}

fn first_description(weather: &[OwWeather], context: &str) -> Result<String, WeatherError> {
    weather
        .first()
        .map(|w| w.description.clone())
        .ok_or_else(|| WeatherError::Malformed(format!("{context} has no weather conditions")))
}

fn unix_to_utc(ts: i64) -> Result<DateTime<Utc>, WeatherError> {
    DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| WeatherError::Malformed(format!("timestamp {ts} is out of range")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
