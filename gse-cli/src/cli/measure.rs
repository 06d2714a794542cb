//! Measure command - composite complexity of generated graphs

use anyhow::Result;
use gse_core::estimate;
use tracing::debug;

use super::{build_graph, GraphArgs};
use crate::models::MeasurementRow;
use crate::reporters::{report_measurements, OutputFormat};

/// Run the measure command
pub fn run(models: &[String], args: &GraphArgs, normalize: bool, format: OutputFormat) -> Result<()> {
    let rows = measure_models(models, args, normalize)?;
    print!("{}", report_measurements(&rows, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

/// One row per model, in the order given.
pub(crate) fn measure_models(
    models: &[String],
    args: &GraphArgs,
    normalize: bool,
) -> Result<Vec<MeasurementRow>> {
    models
        .iter()
        .map(|model| {
            let (label, graph) = build_graph(model, args)?;
            debug!(
                "Measuring {} ({} nodes, {} edges)",
                label,
                graph.num_nodes(),
                graph.num_edges()
            );
            Ok(MeasurementRow {
                edges: graph.num_edges(),
                record: estimate(&graph, normalize),
                model: label,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(nodes: usize) -> GraphArgs {
        GraphArgs {
            nodes,
            prob: 0.1,
            attach: 2,
            rows: 4,
            cols: 5,
            seed: 3,
        }
    }

    #[test]
    fn test_rows_follow_model_order() {
        let models = vec!["star".to_string(), "lattice".to_string()];
        let rows = measure_models(&models, &args(9), true).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].model, "star(n=9)");
        assert_eq!(rows[0].edges, 8);
        assert_eq!(rows[1].record.n, 20);
        assert!(rows[1].record.c_norm().is_some());
    }

    #[test]
    fn test_raw_rows_skip_normalization() {
        let rows = measure_models(&["path".to_string()], &args(6), false).unwrap();
        assert!(rows[0].record.normalized.is_none());
    }

    #[test]
    fn test_bad_parameters_fail() {
        let mut bad = args(10);
        bad.prob = 2.0;
        assert!(measure_models(&["er".to_string()], &bad, true).is_err());
    }
}
