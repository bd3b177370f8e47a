use crate::models::{DailyRiskAssessment, DailySummary, ForecastPoint, RiskLevel};

/// Hour qualifies for the best-work-window when at least this warm.
const WORKABLE_MIN_TEMP_F: f64 = 50.0;
/// ...and precipitation probability is under this (provider scale, 0-1).
const WORKABLE_MAX_PRECIP_PROB: f64 = 0.30;

/// Additive 0-100 risk score for one forecast day. Each factor fires at
/// most once; independent thresholds.
pub fn score_daily_risk(day: &DailySummary) -> DailyRiskAssessment {
    let mut score = 0u32;
    let mut factors = Vec::new();

    if day.low_temp_f < 40.0 {
        score += 30;
        factors.push(format!(
            "Freezing risk: overnight low {:.0}F",
            day.low_temp_f
        ));
    } else if day.low_temp_f < 50.0 {
        score += 15;
        factors.push(format!("Cold start: overnight low {:.0}F", day.low_temp_f));
    }

    if day.max_precip_prob > 70.0 {
        score += 35;
        factors.push(format!(
            "High precipitation probability ({:.0}%)",
            day.max_precip_prob
        ));
    } else if day.max_precip_prob > 40.0 {
        score += 20;
        factors.push(format!(
            "Moderate precipitation probability ({:.0}%)",
            day.max_precip_prob
        ));
    } else if day.max_precip_prob > 20.0 {
        score += 10;
        factors.push(format!(
            "Some precipitation possible ({:.0}%)",
            day.max_precip_prob
        ));
    }

    if day.max_wind_mph > 25.0 {
        score += 25;
        factors.push(format!(
            "Wind {:.0} mph exceeds crane limits",
            day.max_wind_mph
        ));
    } else if day.max_wind_mph > 15.0 {
        score += 10;
        factors.push(format!(
            "Wind {:.0} mph restricts sheet and spray work",
            day.max_wind_mph
        ));
    }

    if day.avg_humidity > 85.0 {
        score += 10;
        factors.push(format!(
            "High humidity ({:.0}%) slows cure times",
            day.avg_humidity
        ));
    }

    let score = score.min(100);

    // Never emit an empty factor list; the consuming UI always has a line
    // to display.
    if factors.is_empty() {
        factors.push("Favorable conditions for roofing work".to_string());
    }

    DailyRiskAssessment {
        date: day.date,
        day_name: day.day_name().to_string(),
        risk_score: score,
        overall_risk: RiskLevel::from_score(score),
        factors,
        best_work_window: best_work_window(&day.hourly),
    }
}

/// Score every day of the forecast.
pub fn generate_risk_assessments(days: &[DailySummary]) -> Vec<DailyRiskAssessment> {
    days.iter().map(score_daily_risk).collect()
}

/// Clock-hour range bounded by the first and last workable hours of the
/// day (warm enough, low precipitation probability). The hours in between
/// need not all qualify.
pub fn best_work_window(hourly: &[ForecastPoint]) -> Option<String> {
    let mut qualifying = hourly.iter().filter(|p| {
        p.temp_f >= WORKABLE_MIN_TEMP_F && p.precip_probability < WORKABLE_MAX_PRECIP_PROB
    });
    let first = qualifying.next()?;
    let last = qualifying.last().unwrap_or(first);
    Some(format!(
        "{} - {}",
        first.timestamp.format("%-I %p"),
        last.timestamp.format("%-I %p")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    fn mild_day() -> DailySummary {
        DailySummary {
            date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            high_temp_f: 62.0,
            low_temp_f: 52.0,
            avg_temp_f: 57.0,
            max_wind_mph: 8.0,
            avg_humidity: 55.0,
            max_precip_prob: 10.0,
            dominant_condition: "clear sky".into(),
            hourly: Vec::new(),
        }
    }

    fn hour(offset: i64, temp_f: f64, precip_prob: f64) -> ForecastPoint {
        let base = Utc.with_ymd_and_hms(2025, 3, 5, 0, 0, 0).unwrap();
        ForecastPoint {
            timestamp: base + Duration::hours(offset),
            temp_f,
            wind_speed_mph: 5.0,
            humidity_percent: 50.0,
            precip_probability: precip_prob,
            condition: "clear sky".into(),
        }
    }

    #[test]
    fn favorable_day_scores_zero_with_fallback_factor() {
        let assessment = score_daily_risk(&mild_day());
        assert_eq!(assessment.risk_score, 0);
        assert_eq!(assessment.overall_risk, RiskLevel::Low);
        assert_eq!(assessment.factors.len(), 1);
        assert!(assessment.factors[0].contains("Favorable"));
    }

    #[test]
    fn temperature_bands() {
        let mut day = mild_day();
        day.low_temp_f = 38.0;
        assert_eq!(score_daily_risk(&day).risk_score, 30);

        day.low_temp_f = 45.0;
        assert_eq!(score_daily_risk(&day).risk_score, 15);

        day.low_temp_f = 50.0;
        assert_eq!(score_daily_risk(&day).risk_score, 0);
    }

    #[test]
    fn precipitation_bands() {
        let mut day = mild_day();
        day.max_precip_prob = 75.0;
        assert_eq!(score_daily_risk(&day).risk_score, 35);
        day.max_precip_prob = 55.0;
        assert_eq!(score_daily_risk(&day).risk_score, 20);
        day.max_precip_prob = 30.0;
        assert_eq!(score_daily_risk(&day).risk_score, 10);
        day.max_precip_prob = 20.0;
        assert_eq!(score_daily_risk(&day).risk_score, 0);
    }

    #[test]
    fn wind_and_humidity_bands() {
        let mut day = mild_day();
        day.max_wind_mph = 30.0;
        assert_eq!(score_daily_risk(&day).risk_score, 25);
        day.max_wind_mph = 20.0;
        assert_eq!(score_daily_risk(&day).risk_score, 10);
        day.max_wind_mph = 15.0;
        assert_eq!(score_daily_risk(&day).risk_score, 0);

        day.avg_humidity = 90.0;
        assert_eq!(score_daily_risk(&day).risk_score, 10);
    }

    #[test]
    fn rising_precip_probability_is_monotone_across_levels() {
        // Cold low holds +30; precip climbs 10% -> 45% -> 75%.
        let mut day = mild_day();
        day.low_temp_f = 38.0;

        day.max_precip_prob = 10.0;
        let a = score_daily_risk(&day);
        day.max_precip_prob = 45.0;
        let b = score_daily_risk(&day);
        day.max_precip_prob = 75.0;
        let c = score_daily_risk(&day);

        assert!(a.risk_score <= b.risk_score && b.risk_score <= c.risk_score);
        assert_eq!(a.overall_risk, RiskLevel::Moderate); // 30
        assert_eq!(b.overall_risk, RiskLevel::High); // 50
        assert_eq!(c.overall_risk, RiskLevel::Critical); // 65
    }

    #[test]
    fn worst_case_clamps_to_100() {
        let mut day = mild_day();
        day.low_temp_f = 20.0;
        day.max_precip_prob = 95.0;
        day.max_wind_mph = 40.0;
        day.avg_humidity = 95.0;
        let assessment = score_daily_risk(&day);
        assert_eq!(assessment.risk_score, 100);
        assert_eq!(assessment.overall_risk, RiskLevel::Critical);
        assert_eq!(assessment.factors.len(), 4);
    }

    #[test]
    fn best_window_bounds_first_and_last_workable_hours() {
        // Workable 8 AM through 3 PM with an unworkable gap at noon; the
        // window is bounded, not contiguous.
        let mut hourly: Vec<ForecastPoint> = (6..=17)
            .map(|h| hour(h, if h < 8 { 45.0 } else { 55.0 }, 0.1))
            .collect();
        hourly[6].precip_probability = 0.6; // noon sample
        let last_workable = hourly.len() - 3;
        for p in &mut hourly[last_workable + 1..] {
            p.temp_f = 45.0;
        }

        let window = best_work_window(&hourly).expect("window expected");
        assert_eq!(window, "8 AM - 3 PM");
    }

    #[test]
    fn no_workable_hours_means_no_window() {
        let hourly: Vec<ForecastPoint> = (6..=17).map(|h| hour(h, 40.0, 0.1)).collect();
        assert!(best_work_window(&hourly).is_none());
        assert!(best_work_window(&[]).is_none());
    }

    #[test]
    fn assessments_cover_every_day() {
        let days = vec![mild_day(), mild_day()];
        assert_eq!(generate_risk_assessments(&days).len(), 2);
    }
}
