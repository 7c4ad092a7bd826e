use tracing::{info, warn};

use crate::{
    Config, QueryResult, WeatherError,
    aggregate::aggregate_daily,
    map::MapMarker,
    provider::{WeatherProvider, provider_from_config},
    summary::{Summarizer, summarizer_from_config},
};

/// What the front-end shows between queries.
#[derive(Debug, Default)]
pub struct DashboardState {
    last: Option<QueryResult>,
}

impl DashboardState {
    pub fn last(&self) -> Option<&QueryResult> {
        self.last.as_ref()
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

/// Runs one query at a time against a provider and a summarizer.
#[derive(Debug)]
pub struct Dashboard {
    provider: Box<dyn WeatherProvider>,
    summarizer: Box<dyn Summarizer>,
    max_days: usize,
}

impl Dashboard {
    pub fn new(
        provider: Box<dyn WeatherProvider>,
        summarizer: Box<dyn Summarizer>,
        max_days: usize,
    ) -> Self {
        Self {
            provider,
            summarizer,
            max_days,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            provider_from_config(config)?,
            summarizer_from_config(config),
            config.forecast.max_days,
        ))
    }

    pub fn with_max_days(mut self, max_days: usize) -> Self {
        self.max_days = max_days;
        self
    }

    /// Fetch everything for `city` without touching any state.
    ///
    /// Only the current-conditions lookup can fail the query. A forecast
    /// failure is kept in `QueryResult::forecast_error` next to the snapshot.
    pub async fn fetch(&self, city: &str) -> Result<QueryResult, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyCity);
        }

        let snapshot = self.provider.fetch_current(city).await?;

        let (samples, forecast_error) = match self
            .provider
            .fetch_forecast(snapshot.latitude, snapshot.longitude)
            .await
        {
            Ok(samples) => (samples, None),
            Err(e) => {
                warn!(city, error = %e, "forecast lookup failed");
                (Vec::new(), Some(e.to_string()))
            }
        };
        let daily = aggregate_daily(&samples, self.max_days);
        let summary = self.summarizer.summarize(&snapshot).await;

        info!(
            city,
            location = %snapshot.location_name,
            category = %snapshot.category(),
            samples = samples.len(),
            days = daily.len(),
            "weather query complete"
        );

        Ok(QueryResult {
            city: city.to_string(),
            marker: MapMarker::for_snapshot(city, &snapshot),
            snapshot,
            samples,
            daily,
            forecast_error,
            summary,
        })
    }

    /// Run a query and make it the state's last result.
    ///
    /// On error the previous result is cleared and the error is returned as is.
    pub async fn query<'s>(
        &self,
        state: &'s mut DashboardState,
        city: &str,
    ) -> Result<&'s QueryResult, WeatherError> {
        state.clear();
        let result = self.fetch(city).await?;
        Ok(state.last.insert(result))
    }
}
