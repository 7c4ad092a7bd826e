use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::condition::ConditionCategory;

/// Offset between the Kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = 273.15;

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Current conditions for one queried place. Temperatures are in Kelvin,
/// as delivered by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub temperature_k: f64,
    pub feels_like_k: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub condition: String,
    pub latitude: f64,
    pub longitude: f64,
    pub observed_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn temperature_c(&self) -> f64 {
        kelvin_to_celsius(self.temperature_k)
    }

    pub fn feels_like_c(&self) -> f64 {
        kelvin_to_celsius(self.feels_like_k)
    }

    pub fn category(&self) -> ConditionCategory {
        ConditionCategory::classify(&self.condition)
    }
}

/// One 3-hour forecast interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temp_min_k: f64,
    pub temp_max_k: f64,
    pub condition: String,
}

/// The representative forecast for one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    /// Unique key within a collection, e.g. `"Monday, Jan 05"`.
    pub label: String,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub condition: String,
    pub category: ConditionCategory,
    pub icon: &'static str,
}

/// One point of the temperature chart, in Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperaturePoint {
    pub time: DateTime<Utc>,
    pub min_c: f64,
    pub max_c: f64,
}

/// Everything one successful query produced.
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// The city as the user typed it.
    pub city: String,
    pub snapshot: WeatherSnapshot,
    pub samples: Vec<ForecastSample>,
    pub daily: Vec<DailyForecast>,
    /// Why the forecast lookup failed. `samples` and `daily` are empty then.
    pub forecast_error: Option<String>,
    pub summary: String,
    pub marker: crate::map::MapMarker,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kelvin_conversion_subtracts_offset() {
        assert_eq!(kelvin_to_celsius(300.0), 300.0 - 273.15);
        assert!((kelvin_to_celsius(300.0) - 26.85).abs() < 1e-9);
        assert!((kelvin_to_celsius(273.15)).abs() < 1e-12);
    }

    #[test]
    fn snapshot_reports_celsius() {
        let snapshot = WeatherSnapshot {
            location_name: "Oslo".into(),
            temperature_k: 283.15,
            feels_like_k: 281.15,
            humidity_pct: 70,
            pressure_hpa: 1012,
            wind_speed_mps: 3.1,
            condition: "broken clouds".into(),
            latitude: 59.91,
            longitude: 10.75,
            observed_at: DateTime::<Utc>::UNIX_EPOCH,
        };

        assert!((snapshot.temperature_c() - 10.0).abs() < 1e-9);
        assert!((snapshot.feels_like_c() - 8.0).abs() < 1e-9);
        assert_eq!(snapshot.category(), ConditionCategory::Clouds);
    }
}
