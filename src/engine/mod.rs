pub mod assembly;
pub mod component;
pub mod insight;
pub mod normalizer;
pub mod risk;
pub mod scheduler;

pub use assembly::{evaluate_all, evaluate_assembly, evaluate_by_id};
pub use component::evaluate_component;
pub use insight::generate_insights;
pub use normalizer::{normalize_current, normalize_daily, normalize_point};
pub use risk::{generate_risk_assessments, score_daily_risk};
pub use scheduler::schedule_recommendations;

use crate::models::{
    Assembly, AssemblyResult, DailyRiskAssessment, DailySummary, ForecastPoint, Insight,
    ScheduleRecommendation, WeatherConditions,
};

/// Facade over the pure evaluators, bound to one assembly catalog. The
/// catalog is owned data handed in at construction; the engine holds no
/// other state and every method is safe to call concurrently.
pub struct ComplianceEngine {
    assemblies: Vec<Assembly>,
}

impl ComplianceEngine {
    pub fn new(assemblies: Vec<Assembly>) -> Self {
        Self { assemblies }
    }

    pub fn with_standard_catalog() -> Self {
        Self::new(crate::models::standard_assemblies())
    }

    pub fn assemblies(&self) -> &[Assembly] {
        &self.assemblies
    }

    pub fn evaluate(
        &self,
        assembly_id: &str,
        current: &WeatherConditions,
        hourly: Option<&[ForecastPoint]>,
    ) -> AssemblyResult {
        evaluate_by_id(&self.assemblies, assembly_id, current, hourly)
    }

    pub fn evaluate_all(
        &self,
        current: &WeatherConditions,
        hourly: Option<&[ForecastPoint]>,
    ) -> Vec<AssemblyResult> {
        evaluate_all(&self.assemblies, current, hourly)
    }

    pub fn schedule_recommendations(&self, days: &[DailySummary]) -> Vec<ScheduleRecommendation> {
        schedule_recommendations(&self.assemblies, days)
    }

    pub fn insights(
        &self,
        current: &WeatherConditions,
        results: &[AssemblyResult],
        risks: &[DailyRiskAssessment],
        recommendations: &[ScheduleRecommendation],
    ) -> Vec<Insight> {
        generate_insights(&self.assemblies, current, results, risks, recommendations)
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::with_standard_catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TempTrend;

    #[test]
    fn engine_wraps_catalog_lookup() {
        let engine = ComplianceEngine::with_standard_catalog();
        let conditions = WeatherConditions {
            temp_f: 65.0,
            temp_trend: TempTrend::Stable,
            wind_speed_mph: 5.0,
            humidity_percent: 50.0,
            is_precipitating: false,
            precip_probability: 5.0,
        };
        let results = engine.evaluate_all(&conditions, None);
        assert_eq!(results.len(), engine.assemblies().len());

        let missing = engine.evaluate("not-a-system", &conditions, None);
        assert!(!missing.compliant);
    }
}
