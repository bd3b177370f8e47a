use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkStatus {
    Completed,
    PartialDay,
    RainedOut,
    Standby,
}

impl WorkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkStatus::Completed => "Completed",
            WorkStatus::PartialDay => "Partial Day",
            WorkStatus::RainedOut => "Rained Out",
            WorkStatus::Standby => "Standby",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Completed" => Some(WorkStatus::Completed),
            "PartialDay" => Some(WorkStatus::PartialDay),
            "RainedOut" => Some(WorkStatus::RainedOut),
            "Standby" => Some(WorkStatus::Standby),
            _ => None,
        }
    }
}

impl std::fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Manually entered crew day record, keyed by date in the local store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkLogEntry {
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub assembly_id: String,
    pub crew_size: u32,
    pub hours_worked: f64,
    pub status: WorkStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WorkLogEntry {
    pub fn new(
        date: NaiveDate,
        assembly_id: impl Into<String>,
        crew_size: u32,
        hours_worked: f64,
        status: WorkStatus,
    ) -> Self {
        Self {
            id: None,
            date,
            assembly_id: assembly_id.into(),
            crew_size,
            hours_worked,
            status,
            notes: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_status_round_trip() {
        for status in [
            WorkStatus::Completed,
            WorkStatus::PartialDay,
            WorkStatus::RainedOut,
            WorkStatus::Standby,
        ] {
            let s = format!("{:?}", status);
            assert_eq!(WorkStatus::from_str(&s), Some(status));
        }
        assert_eq!(WorkStatus::from_str("Vacation"), None);
    }
}
