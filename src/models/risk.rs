use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Categorical risk level, threshold-mapped from the additive score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    /// Score thresholds: >=60 critical, >=40 high, >=20 moderate, else low.
    pub fn from_score(score: u32) -> Self {
        if score >= 60 {
            RiskLevel::Critical
        } else if score >= 40 {
            RiskLevel::High
        } else if score >= 20 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weather-driven operational risk for one forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRiskAssessment {
    pub date: NaiveDate,
    pub day_name: String,
    /// Additive score, clamped to 0-100.
    pub risk_score: u32,
    pub overall_risk: RiskLevel,
    /// Contributing factors; never empty (a "favorable" entry stands in
    /// when nothing fired).
    pub factors: Vec<String>,
    /// Clock-hour range of workable hours, when hourly data was available.
    pub best_work_window: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_thresholds() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(19), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(20), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(39), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(40), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(59), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::Critical);
    }

    #[test]
    fn levels_order_by_severity() {
        assert!(RiskLevel::Low < RiskLevel::Moderate);
        assert!(RiskLevel::Moderate < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }
}
