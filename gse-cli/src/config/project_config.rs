//! Project-level configuration support
//!
//! Loads configuration from `gse.toml` or `.gserc.json` in the working
//! directory, or from an explicit `--config` path.
//!
//! # Configuration Format
//!
//! ```toml
//! # gse.toml
//!
//! [axioms]
//! c_th = 0.8
//! ub_min = 5.0
//! theta_l = 10.0
//! theta_h = 2.0
//! r_coeff = 0.20
//!
//! [policy]
//! gain_factor = 0.1
//! damage_coeff = 0.05
//!
//! [simulation]
//! r_initial = 100.0
//! action_cost = 1.0
//! generations = 50
//! schedule = ["none", "W5_MINIMAL_DISRUPTION"]
//!
//! [defaults]
//! format = "text"
//! ```

use anyhow::{bail, Context};
use gse_core::{Adjuster, AxiomConfig, RiskCategory, TransitionPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// File names probed in the working directory, in priority order.
pub const TOML_CONFIG: &str = "gse.toml";
pub const JSON_CONFIG: &str = ".gserc.json";

/// Complete project configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Hard constraints of the halting gate
    pub axioms: AxiomConfig,

    /// Step-rule coefficients
    pub policy: TransitionPolicy,

    /// Simulation defaults (CLI flags take precedence)
    pub simulation: SimulationDefaults,

    /// Default CLI flags
    pub defaults: CliDefaults,
}

impl ProjectConfig {
    /// Build the adjuster, validating axioms and policy.
    pub fn adjuster(&self) -> anyhow::Result<Adjuster> {
        Adjuster::new(self.axioms, self.policy).context("Invalid [axioms] or [policy] section")
    }
}

/// Defaults for `gse simulate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationDefaults {
    /// Starting (and baseline) resource
    pub r_initial: f64,
    /// Starting complexity when no graph is measured
    pub initial_complexity: f64,
    /// Externally supplied cost of each step's action
    pub action_cost: f64,
    /// Maximum number of generations
    pub generations: u32,
    /// Risk categories applied cyclically, one per generation
    pub schedule: Vec<RiskCategory>,
    /// Seed the run with C_norm instead of C_raw when measuring a graph
    pub use_normalized: bool,
}

impl Default for SimulationDefaults {
    fn default() -> Self {
        Self {
            r_initial: 100.0,
            initial_complexity: 1.0,
            action_cost: 1.0,
            generations: 50,
            schedule: Vec::new(),
            use_normalized: false,
        }
    }
}

/// Default CLI flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliDefaults {
    /// Output format (text, json)
    pub format: Option<String>,
}

/// Load project configuration from the working directory.
///
/// Tries `gse.toml`, then `.gserc.json`. A file that fails to parse is
/// logged and skipped; with nothing usable the defaults are returned.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let toml_path = dir.join(TOML_CONFIG);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", toml_path.display(), e);
            }
        }
    }

    let json_path = dir.join(JSON_CONFIG);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load an explicitly requested config file; any failure is an error.
pub fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    if !path.exists() {
        bail!("Config file not found: {}", path.display());
    }
    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json_config(path)?,
        _ => load_toml_config(path)?,
    };
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load configuration from a JSON file
fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Commented example written by `gse init`
pub const EXAMPLE_CONFIG: &str = r#"# gse configuration
#
# Every key is optional; omitted keys keep the defaults shown here.

[axioms]
c_th = 0.8        # Ax. SI: complexity floor (homogenization threshold)
ub_min = 5.0      # Ax. UB: unavoidable cost of every step
theta_l = 10.0    # Ax. GI: shock when complexity < 1.0
theta_h = 2.0     # Ax. GI: shock when complexity >= 1.0
r_coeff = 0.20    # P. RCS: safety buffer as a fraction of r_initial

[policy]
gain_factor = 0.1           # resource gain on a risk-free step (x total cost)
damage_coeff = 0.05         # complexity damage per unit severity
growth_increment = 0.01     # complexity growth on a risk-free step
min_increase_margin = 0.005 # minimum complexity growth on an at-risk step
repair_alpha = 0.03         # forced repair = alpha / (distance + epsilon)
repair_epsilon = 1e-6

[simulation]
r_initial = 100.0
initial_complexity = 1.0
action_cost = 1.0
generations = 50
# Cycled one entry per generation: none, W1_UNIVERSAL_BASE, W2_COLLECTIVE_SYSTEM,
# W3_HISTORICAL_INTEGRITY, W4_SPECIALTY_LOSS, W5_MINIMAL_DISRUPTION
schedule = ["none"]
use_normalized = false

[defaults]
format = "text"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProjectConfig::default();
        assert_eq!(config.axioms, AxiomConfig::default());
        assert_eq!(config.policy, TransitionPolicy::default());
        assert_eq!(config.simulation.generations, 50);
        assert!(config.simulation.schedule.is_empty());
        assert!(config.defaults.format.is_none());
        assert!(config.adjuster().is_ok());
    }

    #[test]
    fn test_example_config_parses() {
        let config: ProjectConfig = toml::from_str(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config.axioms, AxiomConfig::default());
        assert_eq!(config.policy, TransitionPolicy::default());
        assert_eq!(config.simulation.schedule, vec![RiskCategory::None]);
        assert_eq!(config.defaults.format.as_deref(), Some("text"));
    }

    #[test]
    fn test_parse_toml_config() {
        let toml_content = r#"
[axioms]
theta_h = 3.0

[policy]
damage_coeff = 0.1

[simulation]
r_initial = 250.0
generations = 10
schedule = ["W2_COLLECTIVE_SYSTEM", "none", "W9_UNHEARD_OF"]

[defaults]
format = "json"
"#;

        let config: ProjectConfig = toml::from_str(toml_content).unwrap();

        assert!((config.axioms.theta_h - 3.0).abs() < 0.001);
        assert!((config.axioms.c_th - 0.8).abs() < 0.001);
        assert!((config.policy.damage_coeff - 0.1).abs() < 0.001);
        assert!((config.policy.growth_increment - 0.01).abs() < 0.001);

        assert!((config.simulation.r_initial - 250.0).abs() < 0.001);
        assert_eq!(config.simulation.generations, 10);
        assert_eq!(
            config.simulation.schedule,
            vec![
                RiskCategory::CollectiveSystem,
                RiskCategory::None,
                RiskCategory::Unknown("W9_UNHEARD_OF".into()),
            ]
        );
        assert_eq!(config.defaults.format, Some("json".to_string()));

        let adjuster = config.adjuster().unwrap();
        assert!((adjuster.axioms().theta_h - 3.0).abs() < 0.001);
        assert!((adjuster.policy().damage_coeff - 0.1).abs() < 0.001);
    }

    #[test]
    fn test_invalid_axioms_fail_adjuster() {
        let config: ProjectConfig = toml::from_str("[axioms]\nub_min = -2.0\n").unwrap();
        assert!(config.adjuster().is_err());
    }

    #[test]
    fn test_load_prefers_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TOML_CONFIG), "[simulation]\ngenerations = 7\n").unwrap();
        std::fs::write(
            dir.path().join(JSON_CONFIG),
            r#"{"simulation": {"generations": 9}}"#,
        )
        .unwrap();

        let config = load_project_config(dir.path());
        assert_eq!(config.simulation.generations, 7);
    }

    #[test]
    fn test_broken_toml_falls_back_to_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TOML_CONFIG), "[simulation\n").unwrap();
        std::fs::write(
            dir.path().join(JSON_CONFIG),
            r#"{"simulation": {"generations": 9}}"#,
        )
        .unwrap();

        let config = load_project_config(dir.path());
        assert_eq!(config.simulation.generations, 9);
    }

    #[test]
    fn test_missing_files_give_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_project_config(dir.path()), ProjectConfig::default());
    }

    #[test]
    fn test_explicit_file_errors_propagate() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config_file(&dir.path().join("absent.toml")).is_err());

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "axioms = 3").unwrap();
        assert!(load_config_file(&broken).is_err());
    }
}
