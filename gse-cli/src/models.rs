//! Output models shared by the commands and the reporters

use gse_core::{ComplexityRecord, SimulationReport};
use serde::Serialize;

/// One measured graph: how it was built and what the estimator returned.
#[derive(Debug, Clone, Serialize)]
pub struct MeasurementRow {
    /// Generator label, e.g. `er(n=100,p=0.05,seed=42)`
    pub model: String,
    pub edges: usize,
    #[serde(flatten)]
    pub record: ComplexityRecord,
}

/// A simulation run together with where its starting complexity came from.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutput {
    /// `flag`, `config`, `c_raw` or `c_norm`
    pub complexity_source: String,
    /// Measurement used to seed C, when a graph was measured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement: Option<MeasurementRow>,
    #[serde(flatten)]
    pub report: SimulationReport,
}
