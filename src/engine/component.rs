use crate::models::{policy, Component, ComponentResult, TempTrend, WeatherConditions};

/// Check one component's constraints against one weather sample.
///
/// Every populated constraint is checked; failures are collected rather than
/// short-circuited so the caller sees all violated rules at once. The check
/// order is fixed because it fixes the order of the reason strings.
pub fn evaluate_component(component: &Component, conditions: &WeatherConditions) -> ComponentResult {
    let c = &component.constraint;
    let mut reasons = Vec::new();

    if let Some(min) = c.min_temp_f {
        if conditions.temp_f < min {
            reasons.push(format!(
                "Temperature {:.0}F is below the {:.0}F minimum",
                conditions.temp_f, min
            ));
        }
    }

    if let Some(max) = c.max_temp_f {
        if conditions.temp_f > max {
            reasons.push(format!(
                "Temperature {:.0}F is above the {:.0}F maximum",
                conditions.temp_f, max
            ));
        }
    }

    if c.requires_rising_temp && conditions.temp_trend != TempTrend::Rising {
        reasons.push(format!(
            "Requires rising temperature (currently {})",
            conditions.temp_trend
        ));
    }

    if let Some(max) = c.max_wind_mph {
        if conditions.wind_speed_mph > max {
            reasons.push(format!(
                "Wind {:.0} mph exceeds the {:.0} mph limit",
                conditions.wind_speed_mph, max
            ));
        }
    }

    if let Some(max) = c.max_humidity_percent {
        if conditions.humidity_percent > max {
            reasons.push(format!(
                "Humidity {:.0}% exceeds the {:.0}% limit",
                conditions.humidity_percent, max
            ));
        }
    }

    if c.no_precipitation {
        if conditions.is_precipitating {
            reasons.push("Active precipitation".to_string());
        }
        if conditions.precip_probability > policy::PRECIP_PROB_CUTOFF_PCT {
            reasons.push(format!(
                "Precipitation probability {:.0}% exceeds {:.0}%",
                conditions.precip_probability,
                policy::PRECIP_PROB_CUTOFF_PCT
            ));
        }
    }

    ComponentResult {
        component_id: component.id.clone(),
        component_name: component.name.clone(),
        compliant: reasons.is_empty(),
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherConstraint;

    fn fair_conditions() -> WeatherConditions {
        WeatherConditions {
            temp_f: 60.0,
            temp_trend: TempTrend::Rising,
            wind_speed_mph: 5.0,
            humidity_percent: 50.0,
            is_precipitating: false,
            precip_probability: 10.0,
        }
    }

    fn strict_component() -> Component {
        Component::new(
            "strict",
            "Strict Component",
            "",
            WeatherConstraint::none()
                .with_min_temp(40.0)
                .with_max_temp(95.0)
                .rising_temp()
                .with_max_wind(25.0)
                .with_max_humidity(85.0)
                .dry_conditions(),
        )
    }

    #[test]
    fn fair_conditions_pass_every_constraint() {
        let result = evaluate_component(&strict_component(), &fair_conditions());
        assert!(result.compliant);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn unconstrained_component_always_passes() {
        let component = Component::new("free", "Free", "", WeatherConstraint::none());
        let mut conditions = fair_conditions();
        conditions.temp_f = -20.0;
        conditions.is_precipitating = true;
        conditions.wind_speed_mph = 60.0;
        assert!(evaluate_component(&component, &conditions).compliant);
    }

    #[test]
    fn each_constraint_fails_in_isolation() {
        let component = strict_component();

        let mut c = fair_conditions();
        c.temp_f = 38.0;
        let r = evaluate_component(&component, &c);
        assert!(!r.compliant);
        assert_eq!(r.reasons.len(), 1);
        assert!(r.reasons[0].contains("below the 40F minimum"));

        let mut c = fair_conditions();
        c.temp_f = 97.0;
        let r = evaluate_component(&component, &c);
        assert_eq!(r.reasons.len(), 1);
        assert!(r.reasons[0].contains("above the 95F maximum"));

        let mut c = fair_conditions();
        c.temp_trend = TempTrend::Falling;
        let r = evaluate_component(&component, &c);
        assert_eq!(r.reasons.len(), 1);
        assert!(r.reasons[0].contains("rising temperature"));

        let mut c = fair_conditions();
        c.wind_speed_mph = 30.0;
        let r = evaluate_component(&component, &c);
        assert_eq!(r.reasons.len(), 1);
        assert!(r.reasons[0].contains("25 mph limit"));

        let mut c = fair_conditions();
        c.humidity_percent = 90.0;
        let r = evaluate_component(&component, &c);
        assert_eq!(r.reasons.len(), 1);
        assert!(r.reasons[0].contains("85% limit"));

        let mut c = fair_conditions();
        c.is_precipitating = true;
        let r = evaluate_component(&component, &c);
        assert_eq!(r.reasons.len(), 1);
        assert_eq!(r.reasons[0], "Active precipitation");

        let mut c = fair_conditions();
        c.precip_probability = 60.0;
        let r = evaluate_component(&component, &c);
        assert_eq!(r.reasons.len(), 1);
        assert!(r.reasons[0].contains("60% exceeds 50%"));
    }

    #[test]
    fn failures_are_collected_in_check_order() {
        // Cold, falling, windy, humid, raining: everything fires at once.
        let component = strict_component();
        let conditions = WeatherConditions {
            temp_f: 30.0,
            temp_trend: TempTrend::Falling,
            wind_speed_mph: 40.0,
            humidity_percent: 95.0,
            is_precipitating: true,
            precip_probability: 80.0,
        };
        let r = evaluate_component(&component, &conditions);
        assert!(!r.compliant);
        assert_eq!(r.reasons.len(), 6);
        assert!(r.reasons[0].contains("minimum"));
        assert!(r.reasons[1].contains("rising"));
        assert!(r.reasons[2].contains("mph limit"));
        assert!(r.reasons[3].contains("% limit"));
        assert_eq!(r.reasons[4], "Active precipitation");
        assert!(r.reasons[5].contains("exceeds 50%"));
    }

    #[test]
    fn cold_and_not_rising_fails_both_checks() {
        // 38F, not rising, 10 mph, 50% humidity, dry; component needs
        // min 40F and a rising trend: both fail, nothing else does.
        let component = Component::new(
            "base-ply",
            "Base Ply",
            "",
            WeatherConstraint::none().with_min_temp(40.0).rising_temp(),
        );
        let conditions = WeatherConditions {
            temp_f: 38.0,
            temp_trend: TempTrend::Stable,
            wind_speed_mph: 10.0,
            humidity_percent: 50.0,
            is_precipitating: false,
            precip_probability: 0.0,
        };
        let r = evaluate_component(&component, &conditions);
        assert!(!r.compliant);
        assert_eq!(r.reasons.len(), 2);
        assert!(r.reasons[0].contains("below the 40F minimum"));
        assert!(r.reasons[1].contains("rising temperature"));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let component = strict_component();
        let mut conditions = fair_conditions();
        conditions.temp_f = 30.0;
        let a = evaluate_component(&component, &conditions);
        let b = evaluate_component(&component, &conditions);
        assert_eq!(a, b);
    }
}
