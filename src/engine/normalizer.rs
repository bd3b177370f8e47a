use crate::models::{CurrentWeather, DailySummary, ForecastPoint, TempTrend, WeatherConditions};

/// Sample-to-sample trend threshold: the average of the next 1-2 hourly
/// samples must differ from the reference temp by more than this.
const SAMPLE_TREND_THRESHOLD_F: f64 = 2.0;

/// Daily trend threshold for the first-half vs second-half comparison.
/// Deliberately looser than the sample threshold; do not unify them.
const DAILY_TREND_THRESHOLD_F: f64 = 3.0;

/// Condition-text vocabulary that marks a sample as actively precipitating.
/// Exactly this set; widening it changes compliance output.
const PRECIP_TERMS: [&str; 4] = ["rain", "snow", "drizzle", "sleet"];

/// Crude substring classifier over the provider's free-text condition.
pub fn condition_indicates_precip(condition: &str) -> bool {
    let lowered = condition.to_lowercase();
    PRECIP_TERMS.iter().any(|term| lowered.contains(term))
}

fn trend_from_next_samples(reference_temp_f: f64, next: &[ForecastPoint]) -> TempTrend {
    let lookahead = &next[..next.len().min(2)];
    if lookahead.is_empty() {
        return TempTrend::Stable;
    }
    let avg = lookahead.iter().map(|p| p.temp_f).sum::<f64>() / lookahead.len() as f64;
    if avg > reference_temp_f + SAMPLE_TREND_THRESHOLD_F {
        TempTrend::Rising
    } else if avg < reference_temp_f - SAMPLE_TREND_THRESHOLD_F {
        TempTrend::Falling
    } else {
        TempTrend::Stable
    }
}

/// Normalize the observed sample, deriving the trend from the first one or
/// two forecast samples.
pub fn normalize_current(current: &CurrentWeather, hourly: &[ForecastPoint]) -> WeatherConditions {
    WeatherConditions {
        temp_f: current.temp_f,
        temp_trend: trend_from_next_samples(current.temp_f, hourly),
        wind_speed_mph: current.wind_speed_mph,
        humidity_percent: current.humidity_percent,
        is_precipitating: condition_indicates_precip(&current.condition),
        precip_probability: current.precip_probability * 100.0,
    }
}

/// Normalize one sample of the hourly series, deriving the trend from the
/// samples that follow it. Returns `None` past the end of the series.
pub fn normalize_point(hourly: &[ForecastPoint], index: usize) -> Option<WeatherConditions> {
    let point = hourly.get(index)?;
    Some(WeatherConditions {
        temp_f: point.temp_f,
        temp_trend: trend_from_next_samples(point.temp_f, &hourly[index + 1..]),
        wind_speed_mph: point.wind_speed_mph,
        humidity_percent: point.humidity_percent,
        is_precipitating: condition_indicates_precip(&point.condition),
        precip_probability: point.precip_probability * 100.0,
    })
}

/// Normalize a daily summary. The trend compares the day's first-half and
/// second-half hourly averages with the (looser) daily threshold.
pub fn normalize_daily(day: &DailySummary) -> WeatherConditions {
    WeatherConditions {
        temp_f: day.avg_temp_f,
        temp_trend: daily_trend(&day.hourly),
        wind_speed_mph: day.max_wind_mph,
        humidity_percent: day.avg_humidity,
        is_precipitating: condition_indicates_precip(&day.dominant_condition),
        precip_probability: day.max_precip_prob,
    }
}

fn daily_trend(hourly: &[ForecastPoint]) -> TempTrend {
    let mid = hourly.len() / 2;
    let (first, second) = hourly.split_at(mid);
    if first.is_empty() || second.is_empty() {
        return TempTrend::Stable;
    }
    let first_avg = first.iter().map(|p| p.temp_f).sum::<f64>() / first.len() as f64;
    let second_avg = second.iter().map(|p| p.temp_f).sum::<f64>() / second.len() as f64;
    if second_avg > first_avg + DAILY_TREND_THRESHOLD_F {
        TempTrend::Rising
    } else if second_avg < first_avg - DAILY_TREND_THRESHOLD_F {
        TempTrend::Falling
    } else {
        TempTrend::Stable
    }
}
