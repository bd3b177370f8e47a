use serde::{Deserialize, Serialize};

/// Short-horizon temperature direction derived from the forecast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TempTrend {
    Rising,
    Falling,
    #[default]
    Stable,
}

impl TempTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            TempTrend::Rising => "rising",
            TempTrend::Falling => "falling",
            TempTrend::Stable => "stable",
        }
    }
}

impl std::fmt::Display for TempTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical weather sample consumed by every evaluator. All raw provider
/// formats are normalized into this shape first; nothing else reaches the
/// compliance logic. Recomputed per sample, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConditions {
    pub temp_f: f64,
    pub temp_trend: TempTrend,
    pub wind_speed_mph: f64,
    /// Relative humidity, 0-100.
    pub humidity_percent: f64,
    pub is_precipitating: bool,
    /// Probability of precipitation, 0-100.
    pub precip_probability: f64,
}
