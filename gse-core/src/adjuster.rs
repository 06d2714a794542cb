// ============================================================================
// RESOURCE-COMPLEXITY ADJUSTER
// ============================================================================
//
// One generation of the protocol:
//
// 1. Cost accounting
//      structural = UB_min + shock(C)
//      total      = action_cost + structural
//      R'         = R - total
// 2. Resource penalty / gain
//      at risk:   R'' = R' - total * severity
//      risk-free: R'' = R' + total * gain_factor
// 3. Damage and forced repair
//      at risk:   C'' = max(C - severity * damage + alpha / (d + eps),
//                           C + min_increase_margin)
//      risk-free: C'' = C + growth_increment
// 4. Halting gate on (R'', C''), clauses in fixed order:
//      SI  : C'' >= C_th
//      RCS : R'' >= R_initial * R_coeff
//      Ex  : R'' > 0
//    Any failure halts: the step reports (0, 0) and the state is terminal.
// ============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::axioms::{
    homogenization_forbidden, resource_continues, safety_buffer_satisfied,
    total_structural_cost,
};
use crate::config::{AxiomConfig, TransitionPolicy};
use crate::errors::ConfigError;
use crate::severity::{distance_of, severity_of, RiskCategory};

/// Guard clause of the halting gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuardClause {
    /// Ax. SI: complexity fell below C_th
    HomogenizationForbidden,
    /// P. RCS: resource fell below the safety buffer
    SafetyBuffer,
    /// Ax. Ex: resource exhausted
    ResourceContinues,
}

impl GuardClause {
    pub fn code(&self) -> &'static str {
        match self {
            GuardClause::HomogenizationForbidden => "SI",
            GuardClause::SafetyBuffer => "RCS",
            GuardClause::ResourceContinues => "Ex",
        }
    }
}

impl fmt::Display for GuardClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Result of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub resource: f64,
    pub complexity: f64,
    pub at_risk: bool,
    pub halted: bool,
    /// First clause that failed, when `halted`
    pub failed_clause: Option<GuardClause>,
}

impl StepOutcome {
    /// Terminal outcome: both quantities reset to the zero sentinel.
    pub fn halt(at_risk: bool, clause: Option<GuardClause>) -> Self {
        Self {
            resource: 0.0,
            complexity: 0.0,
            at_risk,
            halted: true,
            failed_clause: clause,
        }
    }
}

/// Single-step transition function over a fixed configuration.
///
/// Holds no per-simulation state; one instance can drive any number of
/// independent runs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Adjuster {
    axioms: AxiomConfig,
    policy: TransitionPolicy,
}

impl Adjuster {
    /// # Errors
    /// - `InvalidValue` if either configuration fails validation
    pub fn new(axioms: AxiomConfig, policy: TransitionPolicy) -> Result<Self, ConfigError> {
        axioms.validate()?;
        policy.validate()?;
        Ok(Self { axioms, policy })
    }

    pub fn axioms(&self) -> &AxiomConfig {
        &self.axioms
    }

    pub fn policy(&self) -> &TransitionPolicy {
        &self.policy
    }

    /// RHS gate: first failing clause in SI -> RCS -> Ex order, if any.
    pub fn check_gate(&self, resource: f64, complexity: f64, r_initial: f64) -> Option<GuardClause> {
        if !homogenization_forbidden(&self.axioms, complexity) {
            return Some(GuardClause::HomogenizationForbidden);
        }
        if !safety_buffer_satisfied(&self.axioms, resource, r_initial) {
            return Some(GuardClause::SafetyBuffer);
        }
        if !resource_continues(resource) {
            return Some(GuardClause::ResourceContinues);
        }
        None
    }

    /// Advance (R, C) by one generation.
    pub fn step(
        &self,
        resource: f64,
        complexity: f64,
        r_initial: f64,
        action_cost: f64,
        category: &RiskCategory,
    ) -> StepOutcome {
        let policy = &self.policy;

        // Cost accounting
        let structural_cost = total_structural_cost(&self.axioms, complexity);
        let total_cost = action_cost + structural_cost;
        let after_cost = resource - total_cost;

        let severity = severity_of(category);
        let at_risk = severity > 0.0;

        let next_resource = if at_risk {
            after_cost - total_cost * severity
        } else {
            after_cost + total_cost * policy.gain_factor
        };

        // Damage, forced repair, and the non-decreasing floor
        let next_complexity = if at_risk {
            let damaged = complexity - severity * policy.damage_coeff;
            let distance = distance_of(category) as f64;
            let forced_repair = policy.repair_alpha / (distance + policy.repair_epsilon);
            (damaged + forced_repair).max(complexity + policy.min_increase_margin)
        } else {
            complexity + policy.growth_increment
        };

        if let Some(clause) = self.check_gate(next_resource, next_complexity, r_initial) {
            debug!(
                "Halt on {}: R={:.4} C={:.4} (category {})",
                clause, next_resource, next_complexity, category
            );
            return StepOutcome::halt(at_risk, Some(clause));
        }

        debug!(
            "Step: R {:.4} -> {:.4}, C {:.4} -> {:.4}, cost={:.4}, category={}",
            resource, next_resource, complexity, next_complexity, total_cost, category
        );

        StepOutcome {
            resource: next_resource,
            complexity: next_complexity,
            at_risk,
            halted: false,
            failed_clause: None,
        }
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn category(label: &str) -> RiskCategory {
        label.parse().unwrap()
    }

    #[test]
    fn test_risk_free_step() {
        let adjuster = Adjuster::default();
        let out = adjuster.step(10.0, 1.0, 10.0, 0.0, &RiskCategory::None);

        // structural = 5 + 2, R' = 3, gain 0.7
        assert!(approx_eq(out.resource, 3.7));
        assert!(approx_eq(out.complexity, 1.01));
        assert!(!out.at_risk);
        assert!(!out.halted);
        assert_eq!(out.failed_clause, None);
    }

    #[test]
    fn test_w1_exhausts_resource() {
        let adjuster = Adjuster::default();
        let out = adjuster.step(10.0, 0.5, 10.0, 0.0, &category("W1_UNIVERSAL_BASE"));

        // structural = 5 + 10, R' = -5, penalty 15 -> -20.
        // C'' = max(0.5 - 0.05 + 0.03/1e-6, 0.505) passes SI; RCS fails first.
        assert_eq!(out.resource, 0.0);
        assert_eq!(out.complexity, 0.0);
        assert!(out.at_risk);
        assert!(out.halted);
        assert_eq!(out.failed_clause, Some(GuardClause::SafetyBuffer));
    }

    #[test]
    fn test_at_risk_growth_floor() {
        let adjuster = Adjuster::default();
        // W5: damage 0.01, repair 0.03 / 4 = 0.0075 -> net -0.0025, floor wins
        let out = adjuster.step(100.0, 1.2, 100.0, 1.0, &category("W5_MINIMAL_DISRUPTION"));
        assert!(!out.halted);
        assert!(out.at_risk);
        assert!(approx_eq(out.complexity, 1.2 + 0.005));
        // total = 1 + 7 = 8; R = 100 - 8 - 8 * 0.2
        assert!(approx_eq(out.resource, 100.0 - 8.0 - 1.6));
    }

    #[test]
    fn test_at_risk_repair_beats_floor() {
        let adjuster = Adjuster::default();
        // W2: damage 0.035, repair 0.03 / 1 -> ~ -0.005, floor wins
        let w2 = adjuster.step(100.0, 2.0, 100.0, 0.0, &category("W2_COLLECTIVE_SYSTEM"));
        assert!(approx_eq(w2.complexity, 2.005));

        // W1: repair 0.03 / 1e-6 dwarfs damage
        let w1 = adjuster.step(100.0, 2.0, 100.0, 0.0, &category("W1_UNIVERSAL_BASE"));
        assert!(!w1.halted);
        assert!(approx_eq(w1.complexity, 2.0 - 0.05 + 0.03 / 1e-6));
    }

    #[test]
    fn test_unknown_category_is_risk_free() {
        let adjuster = Adjuster::default();
        let known = adjuster.step(50.0, 1.5, 50.0, 2.0, &RiskCategory::None);
        let unknown = adjuster.step(50.0, 1.5, 50.0, 2.0, &category("W7_NOT_A_THING"));
        assert_eq!(known, unknown);
    }

    #[test]
    fn test_homogenization_checked_first() {
        let adjuster = Adjuster::default();
        // C'' = 0.51 < 0.8 and R'' is negative: SI is reported
        let out = adjuster.step(1.0, 0.5, 100.0, 0.0, &RiskCategory::None);
        assert!(out.halted);
        assert_eq!(out.failed_clause, Some(GuardClause::HomogenizationForbidden));
    }

    #[test]
    fn test_resource_exhaustion_clause() {
        // With no safety buffer only Ex can catch a zero resource
        let axioms = AxiomConfig {
            r_coeff: 0.0,
            ..Default::default()
        };
        let adjuster = Adjuster::new(axioms, TransitionPolicy::default()).unwrap();
        assert_eq!(
            adjuster.check_gate(0.0, 1.0, 10.0),
            Some(GuardClause::ResourceContinues)
        );
        assert_eq!(adjuster.check_gate(0.1, 1.0, 10.0), None);
    }

    #[test]
    fn test_halt_is_absorbing() {
        let adjuster = Adjuster::default();
        let halted = adjuster.step(10.0, 0.5, 10.0, 0.0, &category("W1_UNIVERSAL_BASE"));
        assert!(halted.halted);

        for label in ["none", "W1_UNIVERSAL_BASE", "W5_MINIMAL_DISRUPTION"] {
            let again = adjuster.step(
                halted.resource,
                halted.complexity,
                10.0,
                0.0,
                &category(label),
            );
            assert!(again.halted, "resumed from zero state with {}", label);
        }
    }

    #[test]
    fn test_complexity_monotonic_until_halt() {
        let adjuster = Adjuster::default();
        let labels = [
            "none",
            "W3_HISTORICAL_INTEGRITY",
            "W5_MINIMAL_DISRUPTION",
            "none",
            "W4_SPECIALTY_LOSS",
            "W2_COLLECTIVE_SYSTEM",
        ];

        let (mut r, mut c) = (500.0, 1.0);
        for label in labels.iter().cycle().take(60) {
            let cat = category(label);
            let out = adjuster.step(r, c, 500.0, 1.0, &cat);
            if out.halted {
                break;
            }
            if out.at_risk {
                assert!(out.complexity >= c + 0.005 - EPSILON);
            } else {
                assert!(approx_eq(out.complexity, c + 0.01));
            }
            r = out.resource;
            c = out.complexity;
        }
    }

    #[test]
    fn test_configured_policy_is_used() {
        let policy = TransitionPolicy {
            growth_increment: 0.25,
            gain_factor: 0.0,
            ..Default::default()
        };
        let adjuster = Adjuster::new(AxiomConfig::default(), policy).unwrap();
        assert_eq!(adjuster.policy(), &policy);
        assert_eq!(adjuster.axioms(), &AxiomConfig::default());
        let out = adjuster.step(100.0, 1.0, 100.0, 0.0, &RiskCategory::None);
        assert!(approx_eq(out.complexity, 1.25));
        assert!(approx_eq(out.resource, 93.0));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let policy = TransitionPolicy {
            repair_epsilon: -1.0,
            ..Default::default()
        };
        assert!(Adjuster::new(AxiomConfig::default(), policy).is_err());
    }
}
