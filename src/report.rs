use crate::error::Result;
use crate::models::{
    AssemblyResult, DailyRiskAssessment, Insight, ScheduleRecommendation, WeatherConditions,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;

/// Everything one engine run produced, bundled for rendering or export.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport {
    pub generated_at: DateTime<Utc>,
    pub project: String,
    pub site: String,
    pub job_number: Option<String>,
    pub location: String,
    pub current: WeatherConditions,
    pub results: Vec<AssemblyResult>,
    pub risks: Vec<DailyRiskAssessment>,
    pub recommendations: Vec<ScheduleRecommendation>,
    pub insights: Vec<Insight>,
}

impl ComplianceReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "ROOFOPS COMPLIANCE REPORT");
        let _ = writeln!(
            out,
            "Project: {}{}  Site: {}",
            self.project,
            self.job_number
                .as_deref()
                .map(|j| format!(" (job {})", j))
                .unwrap_or_default(),
            self.site
        );
        let _ = writeln!(
            out,
            "Location: {}  Generated: {}",
            self.location,
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        );

        let _ = writeln!(out, "\nCURRENT CONDITIONS");
        let c = &self.current;
        let _ = writeln!(
            out,
            "  {:.0}F ({})  wind {:.0} mph  humidity {:.0}%  precip {:.0}%  {}",
            c.temp_f,
            c.temp_trend,
            c.wind_speed_mph,
            c.humidity_percent,
            c.precip_probability,
            if c.is_precipitating {
                "precipitating"
            } else {
                "dry"
            }
        );

        let _ = writeln!(out, "\nASSEMBLY STATUS");
        for result in &self.results {
            let verdict = if result.labor_green_light {
                "GO  "
            } else {
                "HOLD"
            };
            let _ = writeln!(
                out,
                "  [{}] {:<32} window {:>3}h  {}",
                verdict, result.assembly_name, result.work_window_hours, result.status_message
            );
            for component in result.component_results.iter().filter(|r| !r.compliant) {
                for reason in &component.reasons {
                    let _ = writeln!(out, "         - {}: {}", component.component_name, reason);
                }
            }
            if let Some(window) = &result.next_work_window {
                let _ = writeln!(
                    out,
                    "         next window: {} for {}h",
                    window.starts_at.format("%a %b %d %-I %p"),
                    window.duration_hours
                );
            }
        }

        if !self.risks.is_empty() {
            let _ = writeln!(out, "\nDAILY RISK");
            for risk in &self.risks {
                let _ = writeln!(
                    out,
                    "  {:<9} {}  score {:>3}  {:<8}  {}",
                    risk.day_name,
                    risk.date.format("%b %d"),
                    risk.risk_score,
                    risk.overall_risk.as_str(),
                    risk.factors.join("; ")
                );
                if let Some(window) = &risk.best_work_window {
                    let _ = writeln!(out, "            best hours: {}", window);
                }
            }
        }

        if !self.recommendations.is_empty() {
            let _ = writeln!(out, "\nSCHEDULE RECOMMENDATIONS");
            for (i, rec) in self.recommendations.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {}. {:<32} {}  confidence {}%",
                    i + 1,
                    rec.assembly_name,
                    rec.recommended_day,
                    rec.confidence
                );
                let _ = writeln!(out, "     {}", rec.reason);
                if let Some(alternate) = &rec.alternate_day {
                    let _ = writeln!(out, "     alternate: {}", alternate);
                }
                if let Some(window) = &rec.work_window {
                    let _ = writeln!(out, "     work hours: {}", window);
                }
            }
        }

        if !self.insights.is_empty() {
            let _ = writeln!(out, "\nINSIGHTS");
            for insight in &self.insights {
                let _ = writeln!(
                    out,
                    "  [{}] {}: {}",
                    insight.severity.symbol(),
                    insight.title,
                    insight.message
                );
            }
        }

        out
    }
}
