use serde::{Deserialize, Serialize};

/// Domain policy thresholds shared across the standard catalog.
///
/// These are roofing-industry installation limits, not tuning knobs: keep
/// them named here so individual components can override a bound without
/// touching evaluator logic.
pub mod policy {
    /// Minimum application temperature for most adhesives and sealants.
    pub const ADHESIVE_MIN_TEMP_F: f64 = 40.0;
    /// Single-ply membranes wrinkle and outgas above this.
    pub const MEMBRANE_MAX_TEMP_F: f64 = 95.0;
    /// OSHA-driven crane/hoist wind limit for panel and sheet goods.
    pub const CRANE_MAX_WIND_MPH: f64 = 25.0;
    /// General handheld-work wind limit.
    pub const HANDWORK_MAX_WIND_MPH: f64 = 15.0;
    /// Coatings and primers skin poorly above this humidity.
    pub const COATING_MAX_HUMIDITY_PCT: f64 = 85.0;
    /// Forecast precipitation probability above which dry-work is off.
    pub const PRECIP_PROB_CUTOFF_PCT: f64 = 50.0;
}

/// Weather tolerances for a single component. Every field is independently
/// optional; an absent field means no constraint of that kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherConstraint {
    pub min_temp_f: Option<f64>,
    pub max_temp_f: Option<f64>,
    pub requires_rising_temp: bool,
    pub no_precipitation: bool,
    pub max_wind_mph: Option<f64>,
    pub max_humidity_percent: Option<f64>,
    pub cure_time_hours: Option<u32>,
}

impl WeatherConstraint {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_min_temp(mut self, temp_f: f64) -> Self {
        self.min_temp_f = Some(temp_f);
        self
    }

    pub fn with_max_temp(mut self, temp_f: f64) -> Self {
        self.max_temp_f = Some(temp_f);
        self
    }

    pub fn rising_temp(mut self) -> Self {
        self.requires_rising_temp = true;
        self
    }

    pub fn dry_conditions(mut self) -> Self {
        self.no_precipitation = true;
        self
    }

    pub fn with_max_wind(mut self, mph: f64) -> Self {
        self.max_wind_mph = Some(mph);
        self
    }

    pub fn with_max_humidity(mut self, percent: f64) -> Self {
        self.max_humidity_percent = Some(percent);
        self
    }

    pub fn with_cure_time(mut self, hours: u32) -> Self {
        self.cure_time_hours = Some(hours);
        self
    }
}

/// One material or installation step within an assembly, with its own
/// weather tolerance. Owned by exactly one assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
    pub description: String,
    pub constraint: WeatherConstraint,
    pub critical_note: Option<String>,
}

impl Component {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        constraint: WeatherConstraint,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            constraint,
            critical_note: None,
        }
    }

    pub fn with_critical_note(mut self, note: impl Into<String>) -> Self {
        self.critical_note = Some(note.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeType {
    TearOff,
    Membrane,
    Flashing,
    Coating,
}

impl ScopeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeType::TearOff => "Tear-Off",
            ScopeType::Membrane => "Membrane",
            ScopeType::Flashing => "Flashing",
            ScopeType::Coating => "Coating",
        }
    }
}

impl std::fmt::Display for ScopeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A complete material system whose components must all be installable
/// together, plus the scheduling policy that gates crew mobilization.
///
/// Invariants: at least one component; `min_work_window_hours` > 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assembly {
    pub id: String,
    pub name: String,
    pub description: String,
    pub scope_type: ScopeType,
    pub components: Vec<Component>,
    /// Forecast horizon (days) that must show a valid window before labor
    /// is committed.
    pub min_lead_time_days: u32,
    /// Minimum contiguous compliant hours required to justify mobilization.
    pub min_work_window_hours: u32,
}

impl Assembly {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        scope_type: ScopeType,
        components: Vec<Component>,
        min_lead_time_days: u32,
        min_work_window_hours: u32,
    ) -> Self {
        debug_assert!(!components.is_empty(), "assembly requires components");
        debug_assert!(min_work_window_hours > 0);
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            scope_type,
            components,
            min_lead_time_days,
            min_work_window_hours,
        }
    }

    pub fn lead_time_hours(&self) -> usize {
        self.min_lead_time_days as usize * 24
    }
}
