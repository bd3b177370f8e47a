use super::component::evaluate_component;
use super::normalizer::normalize_daily;
use super::risk::best_work_window;
use crate::models::{Assembly, DailySummary, ScheduleRecommendation};

/// Days of forecast the recommender examines.
const SCHEDULE_HORIZON_DAYS: usize = 5;
/// Every compliant day starts from this score before bonuses and penalties.
const BASE_DAY_SCORE: f64 = 50.0;
/// Confidence is capped here so no recommendation reads as a certainty.
const MAX_CONFIDENCE: f64 = 95.0;

/// Best-day recommendations for every assembly over the forecast horizon,
/// sorted by descending confidence (ties broken by assembly name so the
/// order is deterministic regardless of evaluation order).
pub fn schedule_recommendations(
    assemblies: &[Assembly],
    days: &[DailySummary],
) -> Vec<ScheduleRecommendation> {
    let mut recommendations: Vec<ScheduleRecommendation> = assemblies
        .iter()
        .map(|assembly| recommend_for_assembly(assembly, days))
        .collect();
    recommendations.sort_by(|a, b| {
        b.confidence
            .cmp(&a.confidence)
            .then_with(|| a.assembly_name.cmp(&b.assembly_name))
    });
    recommendations
}

fn recommend_for_assembly(assembly: &Assembly, days: &[DailySummary]) -> ScheduleRecommendation {
    let mut best: Option<(&DailySummary, f64)> = None;
    let mut runner_up: Option<(&DailySummary, f64)> = None;

    for day in days.iter().take(SCHEDULE_HORIZON_DAYS) {
        if !day_is_compliant(assembly, day) {
            continue;
        }
        let score = day_score(day);
        match best {
            Some((_, best_score)) if score <= best_score => {
                if runner_up.map_or(true, |(_, r)| score > r) {
                    runner_up = Some((day, score));
                }
            }
            _ => {
                runner_up = best;
                best = Some((day, score));
            }
        }
    }

    let Some((day, score)) = best else {
        return ScheduleRecommendation::no_suitable_day(assembly.name.clone());
    };

    ScheduleRecommendation {
        assembly_name: assembly.name.clone(),
        recommended_day: day.day_label(),
        confidence: score.round().clamp(0.0, MAX_CONFIDENCE) as u32,
        reason: format!(
            "High {:.0}F, {:.0}% precipitation risk, {:.0} mph max wind",
            day.high_temp_f, day.max_precip_prob, day.max_wind_mph
        ),
        alternate_day: runner_up.map(|(d, _)| d.day_label()),
        work_window: best_work_window(&day.hourly),
    }
}

fn day_is_compliant(assembly: &Assembly, day: &DailySummary) -> bool {
    let conditions = normalize_daily(day);
    assembly
        .components
        .iter()
        .all(|component| evaluate_component(component, &conditions).compliant)
}

/// Additive day quality: warmth bonus (capped), dryness bonus, calm bonus,
/// humidity penalty.
fn day_score(day: &DailySummary) -> f64 {
    let warmth = ((day.high_temp_f - 50.0) * 2.0).min(20.0);
    let dryness = ((100.0 - day.max_precip_prob) / 5.0).max(0.0);
    let calm = (25.0 - day.max_wind_mph).max(0.0);
    let humidity_penalty = ((day.avg_humidity - 60.0) / 2.0).max(0.0);
    BASE_DAY_SCORE + warmth + dryness + calm - humidity_penalty
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Component, ScopeType, WeatherConstraint};
    use chrono::NaiveDate;

    fn assembly() -> Assembly {
        Assembly::new(
            "coating",
            "Test Coating",
            "",
            ScopeType::Coating,
            vec![Component::new(
                "topcoat",
                "Topcoat",
                "",
                WeatherConstraint::none().with_min_temp(50.0).dry_conditions(),
            )],
            1,
            4,
        )
    }

    fn day(date_day: u32, avg_temp: f64, high: f64, precip: f64, wind: f64) -> DailySummary {
        DailySummary {
            date: NaiveDate::from_ymd_opt(2025, 3, date_day).unwrap(),
            high_temp_f: high,
            low_temp_f: avg_temp - 8.0,
            avg_temp_f: avg_temp,
            max_wind_mph: wind,
            avg_humidity: 55.0,
            max_precip_prob: precip,
            dominant_condition: if precip > 50.0 { "rain" } else { "clear sky" }.into(),
            hourly: Vec::new(),
        }
    }

    #[test]
    fn day_score_combines_bonuses_and_penalty() {
        // high 70 -> warmth 20 (capped); precip 10 -> dryness 18;
        // wind 5 -> calm 20; humidity 55 -> no penalty. Total 108.
        let d = day(3, 60.0, 70.0, 10.0, 5.0);
        assert!((day_score(&d) - 108.0).abs() < 1e-9);

        let mut humid = d.clone();
        humid.avg_humidity = 80.0;
        assert!((day_score(&humid) - 98.0).abs() < 1e-9);
    }

    #[test]
    fn only_compliant_day_is_recommended() {
        // Only day 3 (Mar 5) is warm and dry enough.
        let days = vec![
            day(3, 40.0, 48.0, 10.0, 5.0),
            day(4, 42.0, 50.0, 80.0, 10.0),
            day(5, 60.0, 70.0, 10.0, 5.0),
            day(6, 45.0, 52.0, 60.0, 20.0),
            day(7, 40.0, 46.0, 30.0, 25.0),
        ];
        let recs = schedule_recommendations(&[assembly()], &days);
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert!(rec.recommended_day.contains("Mar 05"));
        assert!(rec.confidence > 0);
        assert!(rec.alternate_day.is_none());

        // The chosen day must not read as high-risk to the risk scorer.
        let risk = crate::engine::risk::score_daily_risk(&days[2]);
        assert!(matches!(
            risk.overall_risk,
            crate::models::RiskLevel::Low | crate::models::RiskLevel::Moderate
        ));
    }

    #[test]
    fn best_day_wins_and_runner_up_becomes_alternate() {
        let days = vec![
            day(3, 58.0, 66.0, 20.0, 10.0),
            day(4, 62.0, 74.0, 5.0, 4.0),
            day(5, 56.0, 64.0, 30.0, 12.0),
        ];
        let recs = schedule_recommendations(&[assembly()], &days);
        let rec = &recs[0];
        assert!(rec.recommended_day.contains("Mar 04"));
        let alternate = rec.alternate_day.as_ref().expect("alternate expected");
        assert!(alternate.contains("Mar 03"));
    }

    #[test]
    fn confidence_is_capped_at_95() {
        let days = vec![day(4, 62.0, 74.0, 5.0, 4.0)];
        let recs = schedule_recommendations(&[assembly()], &days);
        assert_eq!(recs[0].confidence, 95);
    }

    #[test]
    fn no_compliant_day_yields_zero_confidence_entry() {
        let days = vec![day(3, 40.0, 45.0, 90.0, 30.0)];
        let recs = schedule_recommendations(&[assembly()], &days);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].confidence, 0);
        assert_eq!(recs[0].recommended_day, "None");
    }

    #[test]
    fn empty_forecast_is_guarded() {
        let recs = schedule_recommendations(&[assembly()], &[]);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].confidence, 0);
    }

    #[test]
    fn recommendations_sort_by_confidence_then_name() {
        let picky = Assembly::new(
            "picky",
            "Aaa Picky System",
            "",
            ScopeType::Membrane,
            vec![Component::new(
                "p",
                "P",
                "",
                WeatherConstraint::none().with_min_temp(90.0),
            )],
            1,
            4,
        );
        let days = vec![day(4, 62.0, 74.0, 5.0, 4.0)];
        let recs = schedule_recommendations(&[picky, assembly()], &days);
        assert_eq!(recs.len(), 2);
        // Compliant assembly first despite later catalog position.
        assert_eq!(recs[0].assembly_name, "Test Coating");
        assert_eq!(recs[1].confidence, 0);
    }

    #[test]
    fn horizon_is_limited_to_five_days() {
        // Day six is perfect but out of horizon.
        let days = vec![
            day(3, 40.0, 45.0, 90.0, 30.0),
            day(4, 40.0, 45.0, 90.0, 30.0),
            day(5, 40.0, 45.0, 90.0, 30.0),
            day(6, 40.0, 45.0, 90.0, 30.0),
            day(7, 40.0, 45.0, 90.0, 30.0),
            day(8, 62.0, 74.0, 5.0, 4.0),
        ];
        let recs = schedule_recommendations(&[assembly()], &days);
        assert_eq!(recs[0].confidence, 0);
    }
}
