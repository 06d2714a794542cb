//! Simulate command - drive the adjuster over a schedule of risk categories

use anyhow::Result;
use gse_core::{estimate, RiskCategory, Schedule, Simulation};
use tracing::debug;

use super::{build_graph, GraphArgs};
use crate::config::ProjectConfig;
use crate::models::{MeasurementRow, SimulationOutput};
use crate::reporters::{report_simulation, OutputFormat};

/// Flags of `gse simulate`; `None` falls back to the `[simulation]` config.
#[derive(Debug, Clone)]
pub struct SimulateOptions {
    pub r_initial: Option<f64>,
    pub complexity: Option<f64>,
    pub model: Option<String>,
    pub graph: GraphArgs,
    pub action_cost: Option<f64>,
    pub generations: Option<u32>,
    pub risk: Vec<RiskCategory>,
    pub use_normalized: bool,
}

/// Run the simulate command. A halted run is a result, not an error.
pub fn run(config: &ProjectConfig, options: SimulateOptions, format: OutputFormat) -> Result<()> {
    let output = simulate(config, options)?;
    print!("{}", report_simulation(&output, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

pub(crate) fn simulate(config: &ProjectConfig, options: SimulateOptions) -> Result<SimulationOutput> {
    let defaults = &config.simulation;
    let adjuster = config.adjuster()?;

    let r_initial = options.r_initial.unwrap_or(defaults.r_initial);
    let action_cost = options.action_cost.unwrap_or(defaults.action_cost);
    let generations = options.generations.unwrap_or(defaults.generations);
    let use_normalized = options.use_normalized || defaults.use_normalized;
    let categories = if options.risk.is_empty() {
        defaults.schedule.clone()
    } else {
        options.risk
    };

    let (c_initial, source, measurement) = match (options.complexity, options.model) {
        (Some(c), _) => (c, "flag", None),
        (None, Some(model)) => {
            let (label, graph) = build_graph(&model, &options.graph)?;
            let record = estimate(&graph, use_normalized);
            let (c, source) = match record.c_norm() {
                Some(c_norm) => (c_norm, "c_norm"),
                None => (record.c_raw, "c_raw"),
            };
            let row = MeasurementRow {
                model: label,
                edges: graph.num_edges(),
                record,
            };
            (c, source, Some(row))
        }
        (None, None) => (defaults.initial_complexity, "config", None),
    };

    debug!(
        "Simulating {} generations from R={} C={} ({} schedule entries)",
        generations,
        r_initial,
        c_initial,
        categories.len()
    );

    let schedule = Schedule::new(action_cost, categories);
    let report = Simulation::run(&adjuster, r_initial, c_initial, &schedule, generations);

    Ok(SimulationOutput {
        complexity_source: source.to_string(),
        measurement,
        report,
    })
}
