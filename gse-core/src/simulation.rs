//! Generation-by-generation driver for the adjuster
//!
//! The caller owns a [`SimulationState`] and threads it through
//! [`SimulationState::advance`]; [`Simulation::run`] wraps that loop for a
//! fixed schedule and stops at the first halt.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adjuster::{Adjuster, GuardClause, StepOutcome};
use crate::severity::RiskCategory;

/// Mutable (R, C) pair plus the fixed baseline captured at start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub resource: f64,
    pub complexity: f64,
    r_initial: f64,
    halted: bool,
    generation: u32,
}

impl SimulationState {
    pub fn new(r_initial: f64, complexity: f64) -> Self {
        Self {
            resource: r_initial,
            complexity,
            r_initial,
            halted: false,
            generation: 0,
        }
    }

    pub fn r_initial(&self) -> f64 {
        self.r_initial
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Steps taken so far (a halting step counts).
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Apply one transition.
    ///
    /// Once halted the state is absorbing: the halted outcome is returned
    /// again and nothing changes.
    pub fn advance(
        &mut self,
        adjuster: &Adjuster,
        action_cost: f64,
        category: &RiskCategory,
    ) -> StepOutcome {
        if self.halted {
            debug!("advance() on halted state at generation {}", self.generation);
            return StepOutcome::halt(false, None);
        }

        let outcome = adjuster.step(
            self.resource,
            self.complexity,
            self.r_initial,
            action_cost,
            category,
        );

        self.resource = outcome.resource;
        self.complexity = outcome.complexity;
        self.halted = outcome.halted;
        self.generation += 1;

        outcome
    }
}

/// Per-generation inputs: a constant action cost and a cyclic category list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub action_cost: f64,
    pub categories: Vec<RiskCategory>,
}

impl Schedule {
    pub fn new(action_cost: f64, categories: Vec<RiskCategory>) -> Self {
        Self {
            action_cost,
            categories,
        }
    }

    /// Category for a zero-based generation; "none" if the list is empty.
    pub fn category_at(&self, generation: u32) -> RiskCategory {
        if self.categories.is_empty() {
            return RiskCategory::None;
        }
        self.categories[generation as usize % self.categories.len()].clone()
    }
}

/// One row of a simulation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// 1-based generation number
    pub generation: u32,
    pub category: RiskCategory,
    pub resource: f64,
    pub complexity: f64,
    pub at_risk: bool,
    pub halted: bool,
    pub failed_clause: Option<GuardClause>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub r_initial: f64,
    pub c_initial: f64,
    pub records: Vec<GenerationRecord>,
    /// Generation at which the run halted, if it did
    pub halted_at: Option<u32>,
}

impl SimulationReport {
    pub fn final_state(&self) -> Option<&GenerationRecord> {
        self.records.last()
    }

    pub fn survived(&self) -> bool {
        self.halted_at.is_none()
    }
}

pub struct Simulation;

impl Simulation {
    /// Run up to `generations` steps, stopping at the first halt.
    pub fn run(
        adjuster: &Adjuster,
        r_initial: f64,
        c_initial: f64,
        schedule: &Schedule,
        generations: u32,
    ) -> SimulationReport {
        let mut state = SimulationState::new(r_initial, c_initial);
        let mut records = Vec::with_capacity(generations as usize);
        let mut halted_at = None;

        for index in 0..generations {
            let category = schedule.category_at(index);
            let outcome = state.advance(adjuster, schedule.action_cost, &category);

            records.push(GenerationRecord {
                generation: state.generation(),
                category,
                resource: outcome.resource,
                complexity: outcome.complexity,
                at_risk: outcome.at_risk,
                halted: outcome.halted,
                failed_clause: outcome.failed_clause,
            });

            if outcome.halted {
                let clause = outcome
                    .failed_clause
                    .map_or_else(|| "?".to_string(), |c| c.to_string());
                info!(
                    "Simulation halted at generation {} ({} clause failed)",
                    state.generation(),
                    clause
                );
                halted_at = Some(state.generation());
                break;
            }
        }

        SimulationReport {
            r_initial,
            c_initial,
            records,
            halted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_captures_baseline() {
        let adjuster = Adjuster::default();
        let mut state = SimulationState::new(40.0, 1.2);
        state.advance(&adjuster, 0.0, &RiskCategory::None);
        state.advance(&adjuster, 0.0, &RiskCategory::None);
        assert_eq!(state.r_initial(), 40.0);
        assert_eq!(state.generation(), 2);
        assert!(state.resource < 40.0);
    }

    #[test]
    fn test_halted_state_is_absorbing() {
        let adjuster = Adjuster::default();
        let mut state = SimulationState::new(10.0, 0.5);
        let first = state.advance(&adjuster, 0.0, &RiskCategory::UniversalBase);
        assert!(first.halted);
        assert!(state.is_halted());

        let again = state.advance(&adjuster, 0.0, &RiskCategory::None);
        assert!(again.halted);
        assert_eq!(state.generation(), 1);
        assert_eq!((state.resource, state.complexity), (0.0, 0.0));
    }

    #[test]
    fn test_schedule_cycles() {
        let schedule = Schedule::new(
            0.0,
            vec![RiskCategory::None, RiskCategory::MinimalDisruption],
        );
        assert_eq!(schedule.category_at(0), RiskCategory::None);
        assert_eq!(schedule.category_at(3), RiskCategory::MinimalDisruption);
        assert_eq!(Schedule::default().category_at(7), RiskCategory::None);
    }

    #[test]
    fn test_run_stops_at_first_halt() {
        let adjuster = Adjuster::default();
        // Each risk-free step at C >= 1 nets 7 * 0.9 = 6.3 of resource loss
        let report = Simulation::run(&adjuster, 100.0, 1.0, &Schedule::default(), 50);

        let halted_at = report.halted_at.expect("resource must run out");
        assert_eq!(report.records.len(), halted_at as usize);
        let last = report.final_state().unwrap();
        assert!(last.halted);
        assert_eq!(last.failed_clause, Some(GuardClause::SafetyBuffer));
        assert!(report.records[..report.records.len() - 1]
            .iter()
            .all(|r| !r.halted && r.resource >= 20.0));
    }

    #[test]
    fn test_run_survives_short_horizon() {
        let adjuster = Adjuster::default();
        let report = Simulation::run(&adjuster, 1000.0, 1.0, &Schedule::default(), 5);
        assert!(report.survived());
        assert_eq!(report.records.len(), 5);
        assert_eq!(report.records[4].generation, 5);
    }

    #[test]
    fn test_run_is_deterministic() {
        let adjuster = Adjuster::default();
        let schedule = Schedule::new(
            1.0,
            vec![
                RiskCategory::None,
                RiskCategory::HistoricalIntegrity,
                RiskCategory::MinimalDisruption,
            ],
        );
        let a = Simulation::run(&adjuster, 300.0, 1.1, &schedule, 40);
        let b = Simulation::run(&adjuster, 300.0, 1.1, &schedule, 40);
        assert_eq!(a, b);
    }
}
