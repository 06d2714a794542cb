//! Configuration module for gse
//!
//! This module handles:
//! - Project-level configuration (gse.toml / .gserc.json)
//! - Axiom and policy overrides
//! - Simulation and CLI defaults

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, ProjectConfig, EXAMPLE_CONFIG, TOML_CONFIG,
};
