use crate::models::{
    Assembly, AssemblyResult, DailyRiskAssessment, Insight, RiskLevel, ScheduleRecommendation,
    Severity, TempTrend, WeatherConditions,
};

/// A violated minimum this close to the current temperature is worth
/// flagging when the trend is rising.
const NEAR_THRESHOLD_MARGIN_F: f64 = 5.0;
/// Recommendations at or above this confidence get surfaced as insights.
const NOTEWORTHY_CONFIDENCE: u32 = 70;

/// Templated advisories over the already-computed engine output. Pure
/// formatting: every number in a message comes from an upstream result,
/// the constraint model, or the normalized conditions.
pub fn generate_insights(
    assemblies: &[Assembly],
    current: &WeatherConditions,
    results: &[AssemblyResult],
    risks: &[DailyRiskAssessment],
    recommendations: &[ScheduleRecommendation],
) -> Vec<Insight> {
    let mut insights = Vec::new();

    for result in results {
        if result.labor_green_light {
            insights.push(Insight::new(
                Severity::Info,
                format!("Green light: {}", result.assembly_name),
                result.status_message.clone(),
            ));
        } else if result.compliant && !result.has_full_work_window {
            insights.push(Insight::new(
                Severity::Advisory,
                format!("Window too short: {}", result.assembly_name),
                result.status_message.clone(),
            ));
        }
    }

    if current.temp_trend == TempTrend::Rising {
        for assembly in assemblies {
            for component in &assembly.components {
                if let Some(min) = component.constraint.min_temp_f {
                    let gap = min - current.temp_f;
                    if gap > 0.0 && gap <= NEAR_THRESHOLD_MARGIN_F {
                        insights.push(Insight::new(
                            Severity::Advisory,
                            "Temperature rising near threshold",
                            format!(
                                "{} needs {:.0}F and it is {:.0}F and rising; re-check shortly",
                                component.name, min, current.temp_f
                            ),
                        ));
                    }
                }
            }
        }
    }

    if current.precip_probability > 50.0 {
        insights.push(Insight::new(
            Severity::Advisory,
            "High precipitation probability",
            format!(
                "{:.0}% chance of precipitation; keep dry-in materials staged",
                current.precip_probability
            ),
        ));
    }

    // Cure-time exposure: a confirmed window shorter than a component's
    // cure time risks an uncured system taking weather.
    for result in results {
        if result.work_window_hours == 0 {
            continue;
        }
        let Some(assembly) = assemblies.iter().find(|a| a.id == result.assembly_id) else {
            continue;
        };
        for component in &assembly.components {
            if let Some(cure) = component.constraint.cure_time_hours {
                if result.work_window_hours < cure {
                    insights.push(Insight::new(
                        Severity::Warning,
                        format!("Cure time at risk: {}", component.name),
                        format!(
                            "{} needs {}h to cure but the best window is {}h",
                            component.name, cure, result.work_window_hours
                        ),
                    ));
                }
            }
        }
    }

    if let Some(day) = risks.iter().find(|r| r.overall_risk >= RiskLevel::High) {
        let severity = if day.overall_risk == RiskLevel::Critical {
            Severity::Critical
        } else {
            Severity::Warning
        };
        insights.push(Insight::new(
            severity,
            format!("{} risk on {}", day.overall_risk, day.day_name),
            day.factors.join("; "),
        ));
    }

    if let Some(top) = recommendations
        .iter()
        .find(|r| r.confidence >= NOTEWORTHY_CONFIDENCE)
    {
        insights.push(Insight::new(
            Severity::Info,
            format!("Best install day: {}", top.recommended_day),
            format!(
                "{} scores {}% confidence. {}",
                top.assembly_name, top.confidence, top.reason
            ),
        ));
    }

    insights.sort_by(|a, b| b.severity.cmp(&a.severity));
    insights
}
