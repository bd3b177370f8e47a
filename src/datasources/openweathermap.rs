use crate::config::OpenWeatherMapConfig;
use crate::error::{Result, RoofOpsError};
use crate::models::{CurrentWeather, DailySummary, FeedLocation, ForecastPoint, WeatherFeed};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashMap;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// The forecast API reports in 3-hour steps; each step is expanded into
/// this many hourly samples for the window scanner.
const HOURS_PER_FORECAST_STEP: i64 = 3;

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures

#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    wind: OwmWind,
}

#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
    city: OwmCity,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    wind: OwmWind,
    #[serde(default)]
    pop: f64, // probability of precipitation, 0.0-1.0
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCity {
    name: String,
    country: String,
    coord: OwmCoord,
}

#[derive(Debug, Deserialize)]
struct OwmCoord {
    lat: f64,
    lon: f64,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch current conditions plus the 5-day forecast and assemble the
    /// engine's input feed. Current conditions are required; a failed
    /// forecast fetch degrades to an empty series (the engine falls back
    /// conservatively rather than erroring).
    pub async fn fetch_feed(&self) -> Result<WeatherFeed> {
        let current: OwmCurrentResponse = self.get_json("weather").await?;
        let forecast = match self.get_json::<OwmForecastResponse>("forecast").await {
            Ok(f) => Some(f),
            Err(e) => {
                tracing::warn!("Forecast fetch failed, continuing with current only: {}", e);
                None
            }
        };
        Ok(build_feed(current, forecast, &self.config))
    }

    /// Test connection to the OpenWeatherMap API.
    pub async fn test_connection(&self) -> Result<bool> {
        let url = self.endpoint_url("weather");
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}?lat={}&lon={}&appid={}&units=imperial",
            API_BASE_URL, endpoint, self.config.latitude, self.config.longitude, self.config.api_key
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.endpoint_url(endpoint);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RoofOpsError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RoofOpsError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            RoofOpsError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })
    }
}

fn build_feed(
    current: OwmCurrentResponse,
    forecast: Option<OwmForecastResponse>,
    config: &OpenWeatherMapConfig,
) -> WeatherFeed {
    let location = match &forecast {
        Some(f) => FeedLocation {
            city: f.city.name.clone(),
            country: f.city.country.clone(),
            latitude: f.city.coord.lat,
            longitude: f.city.coord.lon,
        },
        None => FeedLocation {
            city: String::new(),
            country: String::new(),
            latitude: config.latitude,
            longitude: config.longitude,
        },
    };

    let steps = forecast.map(|f| f.list).unwrap_or_default();
    let hourly = expand_to_hourly(&steps);

    // The current-weather endpoint carries no precipitation probability;
    // borrow the nearest forecast step's.
    let first_pop = steps.first().map(|i| i.pop).unwrap_or(0.0);
    let current = CurrentWeather {
        observed_at: DateTime::from_timestamp(current.dt, 0).unwrap_or_else(Utc::now),
        temp_f: current.main.temp,
        wind_speed_mph: current.wind.speed,
        humidity_percent: current.main.humidity,
        precip_probability: first_pop,
        condition: current
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_default(),
    };

    let daily_summary = aggregate_daily(&hourly);

    WeatherFeed {
        fetched_at: Utc::now(),
        location,
        current,
        hourly,
        daily_summary,
    }
}

/// Expand each 3-hour forecast step into hourly samples so the window
/// scanner can count contiguous hours.
fn expand_to_hourly(items: &[OwmForecastItem]) -> Vec<ForecastPoint> {
    items
        .iter()
        .flat_map(|item| {
            let base = DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now);
            let condition = item
                .weather
                .first()
                .map(|w| w.description.clone())
                .unwrap_or_default();
            (0..HOURS_PER_FORECAST_STEP).map(move |offset| ForecastPoint {
                timestamp: base + Duration::hours(offset),
                temp_f: item.main.temp,
                wind_speed_mph: item.wind.speed,
                humidity_percent: item.main.humidity,
                precip_probability: item.pop,
                condition: condition.clone(),
            })
        })
        .collect()
}

fn aggregate_daily(hourly: &[ForecastPoint]) -> Vec<DailySummary> {
    let mut by_date: HashMap<NaiveDate, Vec<&ForecastPoint>> = HashMap::new();
    for point in hourly {
        by_date.entry(point.timestamp.date_naive()).or_default().push(point);
    }

    let mut days: Vec<DailySummary> = by_date
        .into_iter()
        .map(|(date, points)| aggregate_day(date, &points))
        .collect();
    days.sort_by_key(|d| d.date);
    days
}

fn aggregate_day(date: NaiveDate, points: &[&ForecastPoint]) -> DailySummary {
    let count = points.len().max(1) as f64;

    let high_temp_f = points
        .iter()
        .map(|p| p.temp_f)
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);
    let low_temp_f = points
        .iter()
        .map(|p| p.temp_f)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);
    let avg_temp_f = points.iter().map(|p| p.temp_f).sum::<f64>() / count;
    let max_wind_mph = points
        .iter()
        .map(|p| p.wind_speed_mph)
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);
    let avg_humidity = points.iter().map(|p| p.humidity_percent).sum::<f64>() / count;
    let max_precip_prob = points
        .iter()
        .map(|p| p.precip_probability * 100.0)
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);

    // Most frequent condition description wins the day.
    let mut condition_counts: HashMap<&str, usize> = HashMap::new();
    for point in points {
        *condition_counts.entry(point.condition.as_str()).or_insert(0) += 1;
    }
    let dominant_condition = condition_counts
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(condition, _)| condition.to_string())
        .unwrap_or_default();

    DailySummary {
        date,
        high_temp_f,
        low_temp_f,
        avg_temp_f,
        max_wind_mph,
        avg_humidity,
        max_precip_prob,
        dominant_condition,
        hourly: points.iter().map(|p| (*p).clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(dt: i64, temp: f64, pop: f64, description: &str) -> OwmForecastItem {
        OwmForecastItem {
            dt,
            main: OwmMain {
                temp,
                humidity: 55.0,
            },
            weather: vec![OwmWeather {
                description: description.into(),
            }],
            wind: OwmWind { speed: 8.0 },
            pop,
        }
    }

    #[test]
    fn three_hour_steps_expand_to_hourly() {
        // 2025-03-03 00:00 UTC
        let items = vec![item(1740960000, 50.0, 0.1, "clear sky")];
        let hourly = expand_to_hourly(&items);
        assert_eq!(hourly.len(), 3);
        assert_eq!(hourly[0].timestamp.timestamp(), 1740960000);
        assert_eq!(hourly[1].timestamp.timestamp(), 1740960000 + 3600);
        assert_eq!(hourly[2].timestamp.timestamp(), 1740960000 + 7200);
        assert!(hourly.iter().all(|p| (p.temp_f - 50.0).abs() < 1e-9));
    }

    #[test]
    fn daily_aggregation_summarizes_each_date() {
        // Two steps on one UTC day: temps 40 and 60, pops 0.2 and 0.6.
        let items = vec![
            item(1740960000, 40.0, 0.2, "clear sky"),
            item(1740970800, 60.0, 0.6, "light rain"),
        ];
        let days = aggregate_daily(&expand_to_hourly(&items));
        assert_eq!(days.len(), 1);
        let day = &days[0];
        assert!((day.high_temp_f - 60.0).abs() < 1e-9);
        assert!((day.low_temp_f - 40.0).abs() < 1e-9);
        assert!((day.avg_temp_f - 50.0).abs() < 1e-9);
        assert!((day.max_precip_prob - 60.0).abs() < 1e-9);
        assert_eq!(day.hourly.len(), 6);
    }

    #[test]
    fn dominant_condition_is_most_frequent() {
        let items = vec![
            item(1740960000, 50.0, 0.2, "light rain"),
            item(1740970800, 50.0, 0.2, "light rain"),
            item(1740981600, 50.0, 0.2, "clear sky"),
        ];
        let days = aggregate_daily(&expand_to_hourly(&items));
        assert_eq!(days[0].dominant_condition, "light rain");
    }
}
