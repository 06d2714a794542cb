//! Axiom predicates and cost values
//!
//! Pure functions over an [`AxiomConfig`]. Each guard clause of the halting
//! gate is one of these predicates; the cost helpers feed the transition.

use crate::config::AxiomConfig;

/// Complexity at or above this draws the high-complexity shock theta_H.
pub const SHOCK_BOUNDARY: f64 = 1.0;

/// Ax. Ex: the response continues only while resource is strictly positive.
pub fn resource_continues(resource: f64) -> bool {
    resource > 0.0
}

/// Ax. SI: permissible states keep complexity at or above C_th.
pub fn homogenization_forbidden(config: &AxiomConfig, complexity: f64) -> bool {
    complexity >= config.c_th
}

/// Ax. GI: low structural complexity incurs the larger shock.
pub fn shock_coefficient(config: &AxiomConfig, complexity: f64) -> f64 {
    if complexity < SHOCK_BOUNDARY {
        config.theta_l
    } else {
        config.theta_h
    }
}

/// Ax. UB + Ax. GI: cost every step pays regardless of the chosen action.
pub fn total_structural_cost(config: &AxiomConfig, complexity: f64) -> f64 {
    config.ub_min + shock_coefficient(config, complexity)
}

/// R_safe = R_initial * R_coeff
pub fn safety_buffer(config: &AxiomConfig, r_initial: f64) -> f64 {
    r_initial * config.r_coeff
}

/// P. RCS: resource must stay at or above the safety buffer.
pub fn safety_buffer_satisfied(config: &AxiomConfig, resource: f64, r_initial: f64) -> bool {
    resource >= safety_buffer(config, r_initial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_continues_is_strict() {
        assert!(resource_continues(0.001));
        assert!(!resource_continues(0.0));
        assert!(!resource_continues(-3.0));
    }

    #[test]
    fn test_homogenization_threshold_inclusive() {
        let config = AxiomConfig::default();
        assert!(homogenization_forbidden(&config, 0.8));
        assert!(homogenization_forbidden(&config, 1.5));
        assert!(!homogenization_forbidden(&config, 0.79));
    }

    #[test]
    fn test_shock_switches_at_one() {
        let config = AxiomConfig::default();
        assert_eq!(shock_coefficient(&config, 0.999), 10.0);
        assert_eq!(shock_coefficient(&config, 1.0), 2.0);
        assert_eq!(total_structural_cost(&config, 0.5), 15.0);
        assert_eq!(total_structural_cost(&config, 1.0), 7.0);
    }

    #[test]
    fn test_configured_theta_h_is_used() {
        let config = AxiomConfig {
            theta_h: 4.0,
            ..Default::default()
        };
        assert_eq!(shock_coefficient(&config, 2.0), 4.0);
    }

    #[test]
    fn test_safety_buffer() {
        let config = AxiomConfig::default();
        assert!(safety_buffer_satisfied(&config, 2.0, 10.0));
        assert!(!safety_buffer_satisfied(&config, 1.99, 10.0));
    }
}
