//! Reduction of 3-hourly forecast samples into one entry per calendar day.
//!
//! The first sample seen for a date decides that day's values. Later samples
//! for the same date are dropped, so `temp_min_c`/`temp_max_c` are those of a
//! single interval and not the true extremes of the day.

use std::collections::HashSet;

use chrono::{Local, TimeZone};

use crate::{
    condition::ConditionCategory,
    model::{DailyForecast, ForecastSample, TemperaturePoint, kelvin_to_celsius},
};

/// Number of days shown unless configured otherwise.
pub const DEFAULT_MAX_DAYS: usize = 7;

const DATE_LABEL_FORMAT: &str = "%A, %b %d";

/// Aggregate using the machine's local time zone.
pub fn aggregate_daily(samples: &[ForecastSample], max_days: usize) -> Vec<DailyForecast> {
    aggregate_daily_in(samples, max_days, &Local)
}

/// Aggregate with calendar dates taken in `tz`.
///
/// `samples` are expected in ascending timestamp order, as the provider
/// delivers them; the order is not re-checked.
pub fn aggregate_daily_in<Tz>(
    samples: &[ForecastSample],
    max_days: usize,
    tz: &Tz,
) -> Vec<DailyForecast>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut seen = HashSet::new();
    let mut days = Vec::with_capacity(max_days.min(samples.len()));

    for sample in samples {
        if days.len() >= max_days {
            break;
        }

        let local = sample.timestamp.with_timezone(tz);
        let label = local.format(DATE_LABEL_FORMAT).to_string();
        if !seen.insert(label.clone()) {
            continue;
        }

        let category = ConditionCategory::classify(&sample.condition);
        days.push(DailyForecast {
            date: local.date_naive(),
            label,
            temp_min_c: kelvin_to_celsius(sample.temp_min_k),
            temp_max_c: kelvin_to_celsius(sample.temp_max_k),
            condition: sample.condition.clone(),
            category,
            icon: category.glyph(),
        });
    }

    days
}

/// Every sample as a chart point, without per-day reduction.
pub fn temperature_series(samples: &[ForecastSample]) -> Vec<TemperaturePoint> {
    samples
        .iter()
        .map(|s| TemperaturePoint {
            time: s.timestamp,
            min_c: kelvin_to_celsius(s.temp_min_k),
            max_c: kelvin_to_celsius(s.temp_max_k),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, FixedOffset, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().expect("valid timestamp")
    }

    fn sample(ts: DateTime<Utc>, min: f64, max: f64, condition: &str) -> ForecastSample {
        ForecastSample {
            timestamp: ts,
            temp_min_k: min,
            temp_max_k: max,
            condition: condition.to_string(),
        }
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).expect("zero offset")
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn first_sample_of_each_day_wins() {
        let samples = vec![
            sample(at(2024, 1, 5, 9), 280.0, 285.0, "clear sky"),
            sample(at(2024, 1, 5, 15), 283.0, 290.0, "clouds"),
            sample(at(2024, 1, 6, 9), 278.0, 282.0, "rain"),
        ];

        let days = aggregate_daily_in(&samples, 7, &utc());

        assert_eq!(days.len(), 2);

        let first = &days[0];
        assert_eq!(first.label, "Friday, Jan 05");
        assert!(close(first.temp_min_c, 6.85), "min was {}", first.temp_min_c);
        assert!(close(first.temp_max_c, 11.85), "max was {}", first.temp_max_c);
        assert_eq!(first.condition, "clear sky");
        assert_eq!(first.category, ConditionCategory::Clear);
        assert_eq!(first.icon, "☀️");

        let second = &days[1];
        assert_eq!(second.label, "Saturday, Jan 06");
        assert_eq!(second.category, ConditionCategory::Rain);
    }

    #[test]
    fn output_is_capped_at_max_days() {
        let start = at(2024, 3, 1, 0);
        let samples: Vec<_> = (0..10 * 8)
            .map(|i| sample(start + Duration::hours(3 * i), 280.0, 285.0, "few clouds"))
            .collect();

        let days = aggregate_daily_in(&samples, DEFAULT_MAX_DAYS, &utc());
        assert_eq!(days.len(), DEFAULT_MAX_DAYS);
        assert_eq!(days.last().map(|d| d.label.as_str()), Some("Thursday, Mar 07"));

        let days = aggregate_daily_in(&samples, 3, &utc());
        assert_eq!(days.len(), 3);
    }

    #[test]
    fn zero_days_yields_nothing() {
        let samples = vec![sample(at(2024, 1, 5, 9), 280.0, 285.0, "clear sky")];
        assert!(aggregate_daily_in(&samples, 0, &utc()).is_empty());
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(aggregate_daily_in(&[], DEFAULT_MAX_DAYS, &utc()).is_empty());
    }

    #[test]
    fn labels_are_unique_and_in_first_seen_order() {
        let start = at(2024, 7, 10, 12);
        let samples: Vec<_> = (0..40)
            .map(|i| sample(start + Duration::hours(3 * i), 290.0, 295.0, "light rain"))
            .collect();

        let days = aggregate_daily_in(&samples, DEFAULT_MAX_DAYS, &utc());

        let labels: Vec<_> = days.iter().map(|d| d.label.clone()).collect();
        let unique: HashSet<_> = labels.iter().collect();
        assert_eq!(unique.len(), labels.len());

        let dates: Vec<_> = days.iter().map(|d| d.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);

        // 40 samples starting at noon span 6 calendar days
        assert_eq!(days.len(), 6);
    }

    #[test]
    fn calendar_date_follows_time_zone() {
        let samples = vec![
            sample(at(2024, 1, 5, 21), 280.0, 281.0, "mist"),
            sample(at(2024, 1, 5, 23), 282.0, 283.0, "snow"),
        ];

        let utc_days = aggregate_daily_in(&samples, 7, &utc());
        assert_eq!(utc_days.len(), 1);

        let plus_two = FixedOffset::east_opt(2 * 3600).expect("valid offset");
        let shifted = aggregate_daily_in(&samples, 7, &plus_two);
        assert_eq!(shifted.len(), 2);
        assert_eq!(shifted[0].label, "Friday, Jan 05");
        assert_eq!(shifted[0].category, ConditionCategory::Fog);
        assert_eq!(shifted[1].label, "Saturday, Jan 06");
        assert_eq!(shifted[1].category, ConditionCategory::Snow);
    }

    #[test]
    fn series_keeps_every_sample() {
        let samples = vec![
            sample(at(2024, 1, 5, 9), 280.0, 285.0, "clear sky"),
            sample(at(2024, 1, 5, 12), 283.0, 290.0, "clouds"),
        ];

        let series = temperature_series(&samples);
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].time, at(2024, 1, 5, 12));
        assert!(close(series[1].min_c, 9.85));
        assert!(close(series[1].max_c, 16.85));
    }
}
