//! Axiom thresholds and transition policy coefficients
//!
//! Both structs deserialize with per-field defaults, so a config file only
//! needs to name the values it overrides:
//!
//! ```toml
//! [axioms]
//! c_th = 0.8
//! theta_h = 2.0
//!
//! [policy]
//! damage_coeff = 0.05
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// C_th (Ax. SI): complexity below this is homogenization
pub const HOMOGENIZATION_THRESHOLD: f64 = 0.8;
/// UB_min (Ax. UB): unavoidable cost of any step
pub const UB_MIN_COST: f64 = 5.0;
/// Ax. GI shock coefficient when C < 1.0
pub const THETA_L: f64 = 10.0;
/// Ax. GI shock coefficient when C >= 1.0
pub const THETA_H: f64 = 2.0;
/// P. RCS safety buffer as a fraction of R_initial
pub const R_SAFE_COEFF: f64 = 0.20;

/// Hard constraints evaluated by the axiom predicates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxiomConfig {
    pub c_th: f64,
    pub ub_min: f64,
    pub theta_l: f64,
    pub theta_h: f64,
    pub r_coeff: f64,
}

impl Default for AxiomConfig {
    fn default() -> Self {
        Self {
            c_th: HOMOGENIZATION_THRESHOLD,
            ub_min: UB_MIN_COST,
            theta_l: THETA_L,
            theta_h: THETA_H,
            r_coeff: R_SAFE_COEFF,
        }
    }
}

impl AxiomConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("c_th", self.c_th),
            ("ub_min", self.ub_min),
            ("theta_l", self.theta_l),
            ("theta_h", self.theta_h),
            ("r_coeff", self.r_coeff),
        ] {
            require_non_negative(field, value)?;
        }
        Ok(())
    }
}

/// Step-rule coefficients.
///
/// These are policy choices rather than derived invariants; the defaults
/// reproduce the reference behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionPolicy {
    /// Resource gain on a risk-free step, as a fraction of total cost
    pub gain_factor: f64,
    /// Complexity lost per unit of severity
    pub damage_coeff: f64,
    /// Complexity gained on a risk-free step
    pub growth_increment: f64,
    /// Floor on complexity growth for an at-risk step
    pub min_increase_margin: f64,
    /// Forced repair numerator: repair = alpha / (distance + epsilon)
    pub repair_alpha: f64,
    pub repair_epsilon: f64,
}

impl Default for TransitionPolicy {
    fn default() -> Self {
        Self {
            gain_factor: 0.1,
            damage_coeff: 0.05,
            growth_increment: 0.01,
            min_increase_margin: 0.005,
            repair_alpha: 0.03,
            repair_epsilon: 1e-6,
        }
    }
}

impl TransitionPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("gain_factor", self.gain_factor),
            ("damage_coeff", self.damage_coeff),
            ("growth_increment", self.growth_increment),
            ("min_increase_margin", self.min_increase_margin),
            ("repair_alpha", self.repair_alpha),
        ] {
            require_non_negative(field, value)?;
        }
        if !(self.repair_epsilon.is_finite() && self.repair_epsilon > 0.0) {
            return Err(ConfigError::invalid(
                "repair_epsilon",
                self.repair_epsilon,
                "must be a positive finite number",
            ));
        }
        Ok(())
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::invalid(field, value, "must be finite"));
    }
    if value < 0.0 {
        return Err(ConfigError::invalid(field, value, "must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AxiomConfig::default().validate().is_ok());
        assert!(TransitionPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_negative_value_rejected() {
        let config = AxiomConfig {
            ub_min: -1.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "ub_min",
                value: -1.0,
                reason: "must not be negative",
            })
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let config = AxiomConfig {
            theta_l: f64::INFINITY,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_epsilon_rejected() {
        let policy = TransitionPolicy {
            repair_epsilon: 0.0,
            ..Default::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AxiomConfig = toml::from_str("theta_h = 3.5").unwrap();
        assert_eq!(config.theta_h, 3.5);
        assert_eq!(config.c_th, HOMOGENIZATION_THRESHOLD);
        assert_eq!(config.r_coeff, R_SAFE_COEFF);
    }
}
