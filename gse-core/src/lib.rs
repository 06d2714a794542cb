//! gse-core - structural complexity and the resource-complexity protocol
//!
//! Two loosely coupled pieces:
//! - [`complexity::estimate`] turns an undirected [`Graph`] into a
//!   [`ComplexityRecord`] (`C = H * R * D`, optionally normalized).
//! - [`Adjuster::step`] evolves a (resource, complexity) pair by one
//!   generation under cost accounting, risk penalties, forced repair and the
//!   three-clause halting gate.
//!
//! The only coupling is the scalar C: a simulation is seeded with a measured
//! complexity and from then on evolves purely by the transition formulas.

pub mod adjuster;
pub mod axioms;
pub mod community;
pub mod complexity;
pub mod config;
mod errors;
pub mod generators;
pub mod graph;
pub mod severity;
pub mod simulation;

pub use adjuster::{Adjuster, GuardClause, StepOutcome};
pub use complexity::{estimate, ComplexityRecord, NormalizedComplexity};
pub use config::{AxiomConfig, TransitionPolicy};
pub use errors::{ConfigError, GraphError};
pub use graph::Graph;
pub use severity::RiskCategory;
pub use simulation::{GenerationRecord, Schedule, Simulation, SimulationReport, SimulationState};
