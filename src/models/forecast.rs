use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Full deliverable from the weather provider: one observed sample plus an
/// hourly series and per-day aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherFeed {
    pub fetched_at: DateTime<Utc>,
    pub location: FeedLocation,
    pub current: CurrentWeather,
    /// Chronological hourly samples covering the forecast horizon.
    pub hourly: Vec<ForecastPoint>,
    pub daily_summary: Vec<DailySummary>,
}

impl WeatherFeed {
    /// Daily summaries for the next N calendar days.
    pub fn next_days(&self, days: usize) -> &[DailySummary] {
        &self.daily_summary[..self.daily_summary.len().min(days)]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedLocation {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Observed conditions at fetch time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub observed_at: DateTime<Utc>,
    pub temp_f: f64,
    pub wind_speed_mph: f64,
    pub humidity_percent: f64,
    /// Probability of precipitation, 0.0-1.0 as delivered by the provider.
    pub precip_probability: f64,
    /// Free-text condition description, e.g. "light rain".
    pub condition: String,
}

/// A single hourly forecast sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub temp_f: f64,
    pub wind_speed_mph: f64,
    pub humidity_percent: f64,
    /// Probability of precipitation, 0.0-1.0 as delivered by the provider.
    pub precip_probability: f64,
    pub condition: String,
}

/// Hourly samples aggregated over one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub high_temp_f: f64,
    pub low_temp_f: f64,
    pub avg_temp_f: f64,
    pub max_wind_mph: f64,
    pub avg_humidity: f64,
    /// Max probability of precipitation for the day, 0-100.
    pub max_precip_prob: f64,
    /// Most frequent condition description across the day's samples.
    pub dominant_condition: String,
    /// The day's hourly samples, retained for sub-day analysis.
    pub hourly: Vec<ForecastPoint>,
}

impl DailySummary {
    pub fn day_name(&self) -> &'static str {
        match self.date.weekday() {
            chrono::Weekday::Mon => "Monday",
            chrono::Weekday::Tue => "Tuesday",
            chrono::Weekday::Wed => "Wednesday",
            chrono::Weekday::Thu => "Thursday",
            chrono::Weekday::Fri => "Friday",
            chrono::Weekday::Sat => "Saturday",
            chrono::Weekday::Sun => "Sunday",
        }
    }

    /// Label used in recommendations and reports, e.g. "Tuesday (Mar 04)".
    pub fn day_label(&self) -> String {
        format!("{} ({})", self.day_name(), self.date.format("%b %d"))
    }
}
