use super::assembly::{policy, Assembly, Component, ScopeType, WeatherConstraint};

/// The standard commercial assembly catalog. Built fresh on every call and
/// passed explicitly into the engine; there is no shared catalog state.
pub fn standard_assemblies() -> Vec<Assembly> {
    vec![
        tpo_system(),
        mod_bit_system(),
        silicone_coating(),
        tear_off_dry_in(),
        metal_flashing(),
    ]
}

fn tpo_system() -> Assembly {
    Assembly::new(
        "tpo-adhered",
        "TPO Fully-Adhered System",
        "60-mil TPO membrane, fully adhered over polyiso insulation",
        ScopeType::Membrane,
        vec![
            Component::new(
                "tpo-insulation",
                "Polyiso Insulation Board",
                "Mechanically attached insulation layer",
                WeatherConstraint::none()
                    .dry_conditions()
                    .with_max_wind(policy::CRANE_MAX_WIND_MPH),
            )
            .with_critical_note("Boards must not be exposed to moisture before cover"),
            Component::new(
                "tpo-bonding-adhesive",
                "Bonding Adhesive",
                "Solvent-based adhesive for membrane attachment",
                WeatherConstraint::none()
                    .with_min_temp(policy::ADHESIVE_MIN_TEMP_F)
                    .rising_temp()
                    .dry_conditions()
                    .with_max_humidity(policy::COATING_MAX_HUMIDITY_PCT)
                    .with_cure_time(24),
            )
            .with_critical_note("Flash-off is unreliable below 40F or with falling temps"),
            Component::new(
                "tpo-membrane",
                "TPO Membrane Sheet",
                "Rolled membrane placement and hot-air seam welding",
                WeatherConstraint::none()
                    .dry_conditions()
                    .with_max_temp(policy::MEMBRANE_MAX_TEMP_F)
                    .with_max_wind(policy::CRANE_MAX_WIND_MPH),
            ),
        ],
        2,
        8,
    )
}

fn mod_bit_system() -> Assembly {
    Assembly::new(
        "mod-bit",
        "Modified Bitumen System",
        "Two-ply SBS modified bitumen, torch-applied cap sheet",
        ScopeType::Membrane,
        vec![
            Component::new(
                "mb-base-sheet",
                "SBS Base Sheet",
                "Self-adhered base ply",
                WeatherConstraint::none()
                    .with_min_temp(50.0)
                    .rising_temp()
                    .dry_conditions()
                    .with_cure_time(48),
            )
            .with_critical_note("Self-adhered plies lose tack below 50F"),
            Component::new(
                "mb-cap-sheet",
                "Torch-Applied Cap Sheet",
                "Granulated cap ply, torch welded",
                WeatherConstraint::none()
                    .with_min_temp(25.0)
                    .dry_conditions()
                    .with_max_wind(policy::HANDWORK_MAX_WIND_MPH),
            )
            .with_critical_note("Open flame: fire watch required for 2 hours after work"),
        ],
        3,
        10,
    )
}

fn silicone_coating() -> Assembly {
    Assembly::new(
        "silicone-coating",
        "Silicone Restoration Coating",
        "Fluid-applied silicone restoration over existing membrane",
        ScopeType::Coating,
        vec![
            Component::new(
                "sil-primer",
                "Epoxy Primer",
                "Adhesion primer over cleaned substrate",
                WeatherConstraint::none()
                    .with_min_temp(policy::ADHESIVE_MIN_TEMP_F)
                    .rising_temp()
                    .dry_conditions()
                    .with_max_humidity(policy::COATING_MAX_HUMIDITY_PCT)
                    .with_cure_time(4),
            ),
            Component::new(
                "sil-topcoat",
                "Silicone Topcoat",
                "High-solids silicone, spray or roller applied",
                WeatherConstraint::none()
                    .with_min_temp(policy::ADHESIVE_MIN_TEMP_F)
                    .with_max_temp(policy::MEMBRANE_MAX_TEMP_F)
                    .dry_conditions()
                    .with_max_wind(policy::HANDWORK_MAX_WIND_MPH)
                    .with_max_humidity(policy::COATING_MAX_HUMIDITY_PCT)
                    .with_cure_time(8),
            )
            .with_critical_note("Overspray carries: never spray above 15 mph wind"),
        ],
        2,
        6,
    )
}

fn tear_off_dry_in() -> Assembly {
    Assembly::new(
        "tear-off",
        "Tear-Off and Dry-In",
        "Remove existing roof to deck and temporary dry-in",
        ScopeType::TearOff,
        vec![
            Component::new(
                "tear-off-removal",
                "Roof Removal",
                "Strip existing system to structural deck",
                WeatherConstraint::none()
                    .dry_conditions()
                    .with_max_wind(policy::CRANE_MAX_WIND_MPH),
            )
            .with_critical_note("Never open more deck than can be dried-in the same day"),
            Component::new(
                "dry-in-felt",
                "Temporary Dry-In",
                "Mechanically fastened temporary waterproofing",
                WeatherConstraint::none()
                    .dry_conditions()
                    .with_max_wind(policy::CRANE_MAX_WIND_MPH),
            ),
        ],
        1,
        4,
    )
}

fn metal_flashing() -> Assembly {
    Assembly::new(
        "metal-flashing",
        "Metal Flashing and Edge",
        "Shop-formed edge metal, copings, and penetration flashings",
        ScopeType::Flashing,
        vec![
            Component::new(
                "flash-metal",
                "Edge Metal Installation",
                "Cleat-fastened edge metal and coping runs",
                WeatherConstraint::none().with_max_wind(policy::HANDWORK_MAX_WIND_MPH),
            )
            .with_critical_note("Sheet goods become sails: hard stop at 15 mph"),
            Component::new(
                "flash-sealant",
                "Termination Sealant",
                "Polyurethane sealant at terminations and joints",
                WeatherConstraint::none()
                    .with_min_temp(policy::ADHESIVE_MIN_TEMP_F)
                    .dry_conditions()
                    .with_max_humidity(policy::COATING_MAX_HUMIDITY_PCT)
                    .with_cure_time(24),
            ),
        ],
        1,
        4,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_invariants_hold() {
        let assemblies = standard_assemblies();
        assert!(!assemblies.is_empty());
        for a in &assemblies {
            assert!(!a.components.is_empty(), "{} has no components", a.id);
            assert!(a.min_work_window_hours > 0, "{} window is zero", a.id);
        }
    }

    #[test]
    fn catalog_ids_are_unique() {
        let assemblies = standard_assemblies();
        let mut ids: Vec<&str> = assemblies.iter().map(|a| a.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), assemblies.len());
    }

    #[test]
    fn rebuilding_the_catalog_yields_equal_data() {
        // The catalog is constructed per call; two builds must agree.
        let a = standard_assemblies();
        let b = standard_assemblies();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.components.len(), y.components.len());
        }
    }
}
