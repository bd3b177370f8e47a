use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of checking one component against one weather sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentResult {
    pub component_id: String,
    pub component_name: String,
    pub compliant: bool,
    /// Human-readable failure reasons, in constraint-check order.
    /// Empty iff compliant.
    pub reasons: Vec<String>,
}

/// A contiguous span of forecast hours during which every component of an
/// assembly is simultaneously compliant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkWindow {
    pub starts_at: DateTime<Utc>,
    pub duration_hours: u32,
}

/// Combined go/no-go verdict for one assembly: current compliance, the
/// work-window scan over the hourly forecast, and the lead-time decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyResult {
    pub assembly_id: String,
    pub assembly_name: String,
    /// Current-moment compliance: AND of all component results.
    pub compliant: bool,
    pub component_results: Vec<ComponentResult>,
    pub failing_components: Vec<String>,
    pub has_full_work_window: bool,
    pub has_required_lead_time: bool,
    /// Max contiguous compliant hours found in the supplied forecast.
    pub work_window_hours: u32,
    /// First window long enough to mobilize on, if one exists.
    pub next_work_window: Option<WorkWindow>,
    /// compliant AND has_full_work_window AND has_required_lead_time.
    pub labor_green_light: bool,
    pub status_message: String,
}

impl AssemblyResult {
    /// Conservative result for an id that matched nothing in the catalog.
    /// Lookup failures degrade to a displayable "hold" verdict, not an error.
    pub fn not_found(assembly_id: &str) -> Self {
        Self {
            assembly_id: assembly_id.to_string(),
            assembly_name: "Unknown".to_string(),
            compliant: false,
            component_results: Vec::new(),
            failing_components: Vec::new(),
            has_full_work_window: false,
            has_required_lead_time: false,
            work_window_hours: 0,
            next_work_window: None,
            labor_green_light: false,
            status_message: format!("No assembly found with id '{}'", assembly_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_result_is_conservative() {
        let r = AssemblyResult::not_found("mystery");
        assert!(!r.compliant);
        assert!(!r.labor_green_light);
        assert_eq!(r.work_window_hours, 0);
        assert!(r.status_message.contains("mystery"));
    }
}
