use super::component::evaluate_component;
use super::normalizer::normalize_point;
use crate::models::{
    Assembly, AssemblyResult, ComponentResult, ForecastPoint, WeatherConditions, WorkWindow,
};

/// Evaluate one assembly: current-moment compliance, the contiguous
/// work-window scan over the hourly forecast, and the lead-time decision.
///
/// A missing or empty forecast is not an error; it degrades to the
/// conservative fallback (no confirmed window, no lead time, a window of at
/// most one hour).
pub fn evaluate_assembly(
    assembly: &Assembly,
    current: &WeatherConditions,
    hourly: Option<&[ForecastPoint]>,
) -> AssemblyResult {
    let component_results: Vec<ComponentResult> = assembly
        .components
        .iter()
        .map(|component| evaluate_component(component, current))
        .collect();
    let compliant = component_results.iter().all(|r| r.compliant);
    let failing_components: Vec<String> = component_results
        .iter()
        .filter(|r| !r.compliant)
        .map(|r| r.component_name.clone())
        .collect();

    let scan = match hourly {
        Some(series) if !series.is_empty() => scan_forecast(assembly, series),
        // Without a forecast we cannot confirm duration; only the current
        // hour is known.
        _ => ForecastScan {
            work_window_hours: if compliant { 1 } else { 0 },
            has_full_work_window: false,
            has_required_lead_time: false,
            next_work_window: None,
        },
    };

    let labor_green_light =
        compliant && scan.has_full_work_window && scan.has_required_lead_time;
    let status_message = status_message(assembly, compliant, &failing_components, &scan);

    AssemblyResult {
        assembly_id: assembly.id.clone(),
        assembly_name: assembly.name.clone(),
        compliant,
        component_results,
        failing_components,
        has_full_work_window: scan.has_full_work_window,
        has_required_lead_time: scan.has_required_lead_time,
        work_window_hours: scan.work_window_hours,
        next_work_window: scan.next_work_window,
        labor_green_light,
        status_message,
    }
}

/// Evaluate every assembly in a catalog against the same inputs.
pub fn evaluate_all(
    assemblies: &[Assembly],
    current: &WeatherConditions,
    hourly: Option<&[ForecastPoint]>,
) -> Vec<AssemblyResult> {
    assemblies
        .iter()
        .map(|assembly| evaluate_assembly(assembly, current, hourly))
        .collect()
}

/// Lookup-then-evaluate. An unknown id yields a conservative "not found"
/// result rather than an error; the caller always has something to display.
pub fn evaluate_by_id(
    assemblies: &[Assembly],
    assembly_id: &str,
    current: &WeatherConditions,
    hourly: Option<&[ForecastPoint]>,
) -> AssemblyResult {
    match assemblies.iter().find(|a| a.id == assembly_id) {
        Some(assembly) => evaluate_assembly(assembly, current, hourly),
        None => AssemblyResult::not_found(assembly_id),
    }
}

struct ForecastScan {
    work_window_hours: u32,
    has_full_work_window: bool,
    has_required_lead_time: bool,
    next_work_window: Option<WorkWindow>,
}

fn scan_forecast(assembly: &Assembly, hourly: &[ForecastPoint]) -> ForecastScan {
    let min_window = assembly.min_work_window_hours as usize;

    // Per-hour all-components compliance, computed once and reused by both
    // scans.
    let hour_ok: Vec<bool> = (0..hourly.len())
        .map(|i| match normalize_point(hourly, i) {
            Some(conditions) => assembly
                .components
                .iter()
                .all(|component| evaluate_component(component, &conditions).compliant),
            None => false,
        })
        .collect();

    let work_window_hours = longest_run(&hour_ok);
    let has_full_work_window = work_window_hours as usize >= min_window;
    let next_work_window = first_qualifying_run(&hour_ok, min_window).map(|(start, length)| {
        WorkWindow {
            starts_at: hourly[start].timestamp,
            duration_hours: length,
        }
    });

    // Lead time is satisfied by the existence of any full-length window
    // starting at or after the horizon; its position does not matter.
    let lead_hours = assembly.lead_time_hours();
    let has_required_lead_time = if hour_ok.len() > lead_hours {
        longest_run(&hour_ok[lead_hours..]) as usize >= min_window
    } else {
        false
    };

    ForecastScan {
        work_window_hours,
        has_full_work_window,
        has_required_lead_time,
        next_work_window,
    }
}

fn longest_run(hour_ok: &[bool]) -> u32 {
    let mut best = 0u32;
    let mut run = 0u32;
    for &ok in hour_ok {
        if ok {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}

/// Start index and full length of the first run reaching `min_window`.
fn first_qualifying_run(hour_ok: &[bool], min_window: usize) -> Option<(usize, u32)> {
    let mut i = 0;
    while i < hour_ok.len() {
        if hour_ok[i] {
            let start = i;
            while i < hour_ok.len() && hour_ok[i] {
                i += 1;
            }
            let length = i - start;
            if length >= min_window {
                return Some((start, length as u32));
            }
        } else {
            i += 1;
        }
    }
    None
}

/// Priority-ordered, mutually exclusive status selector: exactly one branch
/// ever fires.
fn status_message(
    assembly: &Assembly,
    compliant: bool,
    failing: &[String],
    scan: &ForecastScan,
) -> String {
    if compliant && scan.has_full_work_window && scan.has_required_lead_time {
        format!(
            "Green light: mobilize for {}. {}h contiguous window confirmed with {}-day lead time.",
            assembly.name, scan.work_window_hours, assembly.min_lead_time_days
        )
    } else if compliant && !scan.has_full_work_window {
        format!(
            "Conditions OK now, but the work window is too short ({}h of {}h needed)",
            scan.work_window_hours, assembly.min_work_window_hours
        )
    } else if compliant {
        format!(
            "Conditions OK now, but no valid window beyond the {}-day lead time",
            assembly.min_lead_time_days
        )
    } else {
        let named: Vec<&str> = failing.iter().take(2).map(String::as_str).collect();
        let suffix = if failing.len() > 2 { ", ..." } else { "" };
        format!("Hold: {}{} out of tolerance", named.join(", "), suffix)
    }
}
