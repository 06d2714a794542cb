//! Output reporters for gse results
//!
//! Supports two output formats:
//! - `text` - Terminal tables with styling
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::models::{MeasurementRow, SimulationOutput};
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render complexity measurements
pub fn report_measurements(rows: &[MeasurementRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_measurements(rows)),
        OutputFormat::Json => json::render(&rows),
    }
}

/// Render a simulation run
pub fn report_simulation(output: &SimulationOutput, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_simulation(output)),
        OutputFormat::Json => json::render(output),
    }
}
