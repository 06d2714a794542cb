//! Text (terminal) reporter with colors and formatting

use crate::models::{MeasurementRow, SimulationOutput};
use gse_core::GenerationRecord;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

const RULE: &str = "──────────────────────────────────────────────────────────────────";

/// Render complexity measurements as a table
pub fn render_measurements(rows: &[MeasurementRow]) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Structural Complexity{RESET}\n"));
    out.push_str(&format!("{DIM}{RULE}{RESET}\n"));

    for row in rows {
        let rec = &row.record;
        out.push_str(&format!("{BOLD}{}{RESET}\n", row.model));
        out.push_str(&format!(
            "  N: {}  Edges: {}  Communities: {}  Q: {:.4}\n",
            rec.n, row.edges, rec.m, rec.q
        ));
        out.push_str(&format!(
            "  H: {:.4}  R: {:.4}  D: {:.4}\n",
            rec.h, rec.r, rec.d
        ));
        out.push_str(&format!("  C_raw: {BOLD}{:.4}{RESET}", rec.c_raw));
        if let Some(norm) = &rec.normalized {
            out.push_str(&format!(
                "  C_norm: {BOLD}{:.4}{RESET}  {DIM}(H_norm {:.4}, D_norm {:.4}){RESET}",
                norm.c_norm, norm.h_norm, norm.d_norm
            ));
        }
        out.push_str("\n\n");
    }

    out
}

/// Render a simulation run as a per-generation table
pub fn render_simulation(output: &SimulationOutput) -> String {
    let report = &output.report;
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Resource-Complexity Simulation{RESET}\n"));
    out.push_str(&format!("{DIM}{RULE}{RESET}\n"));
    out.push_str(&format!(
        "R_initial: {:.2}  C_initial: {:.4}  {DIM}(complexity from {}){RESET}\n",
        report.r_initial, report.c_initial, output.complexity_source
    ));
    if let Some(m) = &output.measurement {
        out.push_str(&format!(
            "{DIM}Graph {}: N={} M={} Q={:.4}{RESET}\n",
            m.model, m.record.n, m.record.m, m.record.q
        ));
    }
    out.push('\n');

    out.push_str(&format!(
        "{BOLD}{:>5}  {:<26} {:>12} {:>12}  {}{RESET}\n",
        "GEN", "CATEGORY", "R", "C", "STATE"
    ));
    for record in &report.records {
        out.push_str(&format_record(record));
    }

    out.push('\n');
    match report.halted_at {
        Some(generation) => {
            let clause = report
                .final_state()
                .and_then(|r| r.failed_clause)
                .map_or_else(|| "?".to_string(), |c| c.to_string());
            out.push_str(&format!(
                "{RED}{BOLD}Halted{RESET} at generation {} ({} clause failed)\n",
                generation, clause
            ));
        }
        None => {
            let (r, c) = report
                .final_state()
                .map_or((report.r_initial, report.c_initial), |s| {
                    (s.resource, s.complexity)
                });
            out.push_str(&format!(
                "{GREEN}{BOLD}Survived{RESET} {} generations  R: {:.2}  C: {:.4}\n",
                report.records.len(),
                r,
                c
            ));
        }
    }

    out
}

fn format_record(record: &GenerationRecord) -> String {
    let (color, state) = if record.halted {
        let clause = record
            .failed_clause
            .map_or_else(|| "?".to_string(), |c| c.to_string());
        (RED, format!("HALT {}", clause))
    } else if record.at_risk {
        (YELLOW, "at risk".to_string())
    } else {
        ("", "ok".to_string())
    };

    format!(
        "{color}{:>5}  {:<26} {:>12.4} {:>12.4}  {}{RESET}\n",
        record.generation,
        record.category.label(),
        record.resource,
        record.complexity,
        state
    )
}
