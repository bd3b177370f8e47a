use serde::{Deserialize, Serialize};

/// Best-day recommendation for one assembly over the forecast horizon.
///
/// Every assembly gets a recommendation; when no day qualifies the
/// confidence is zero and the reason says so.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecommendation {
    pub assembly_name: String,
    pub recommended_day: String,
    /// Derived score, 0-100 (capped at 95 so nothing reads as certain).
    pub confidence: u32,
    pub reason: String,
    pub alternate_day: Option<String>,
    /// Intra-day clock-hour range worth working, when hourly data allowed
    /// one to be computed.
    pub work_window: Option<String>,
}

impl ScheduleRecommendation {
    pub fn no_suitable_day(assembly_name: impl Into<String>) -> Self {
        Self {
            assembly_name: assembly_name.into(),
            recommended_day: "None".to_string(),
            confidence: 0,
            reason: "No forecast day meets all component tolerances".to_string(),
            alternate_day: None,
            work_window: None,
        }
    }
}
