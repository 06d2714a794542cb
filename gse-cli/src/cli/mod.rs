//! CLI command definitions and handlers

mod init;
mod measure;
mod simulate;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gse_core::{generators, Graph, RiskCategory};
use std::path::PathBuf;

use crate::config::{load_config_file, load_project_config, ProjectConfig};
use crate::reporters::OutputFormat;

/// Graph models accepted by `--model`
const MODELS: [&str; 7] = ["empty", "er", "ba", "lattice", "complete", "path", "star"];

/// gse - Structural complexity and resource adjustment
#[derive(Parser, Debug)]
#[command(name = "gse")]
#[command(
    version,
    about = "Measure graph structural complexity and simulate resource-complexity adjustment",
    after_help = "\
Examples:
  gse measure --model er --nodes 200 --prob 0.05     Complexity of a random graph
  gse measure --model lattice --rows 20 --cols 20    Complexity of a grid
  gse simulate --complexity 1.2 --risk none --risk W5_MINIMAL_DISRUPTION
  gse simulate --model ba --nodes 300 --attach 3     Seed C from a measured graph
  gse init                                           Write an example gse.toml"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: gse.toml or .gserc.json in the current directory)
    #[arg(long, short = 'c', global = true, env = "GSE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Parameters shared by every graph model
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Node count (er, ba, complete, path, star, empty)
    #[arg(long, short = 'n', default_value = "100")]
    pub nodes: usize,

    /// Edge probability for er
    #[arg(long, default_value = "0.05")]
    pub prob: f64,

    /// Edges attached per new node for ba
    #[arg(long, default_value = "2")]
    pub attach: usize,

    /// Lattice rows
    #[arg(long, default_value = "10")]
    pub rows: usize,

    /// Lattice columns
    #[arg(long, default_value = "10")]
    pub cols: usize,

    /// Seed for the random models
    #[arg(long, default_value = "42")]
    pub seed: u64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Measure the composite complexity of one or more generated graphs
    #[command(after_help = "\
Examples:
  gse measure --model er --model ba --nodes 500      Compare two models
  gse measure --model star --nodes 50 --raw          Skip normalization
  gse measure --model path --format json             JSON output for scripting")]
    Measure {
        /// Graph model (repeatable)
        #[arg(long, default_value = "er", value_parser = MODELS)]
        model: Vec<String>,

        #[command(flatten)]
        graph: GraphArgs,

        /// Report raw values only (no H_norm, D_norm, C_norm)
        #[arg(long)]
        raw: bool,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,
    },

    /// Run the resource-complexity adjuster for a number of generations
    #[command(after_help = "\
Examples:
  gse simulate --r-initial 500 --generations 100
  gse simulate --complexity 0.9 --risk W3_HISTORICAL_INTEGRITY
  gse simulate --model lattice --use-normalized --format json")]
    Simulate {
        /// Starting resource (also the safety-buffer baseline)
        #[arg(long)]
        r_initial: Option<f64>,

        /// Starting complexity
        #[arg(long, conflicts_with = "model")]
        complexity: Option<f64>,

        /// Measure this graph model and start from its complexity
        #[arg(long, value_parser = MODELS)]
        model: Option<String>,

        #[command(flatten)]
        graph: GraphArgs,

        /// Cost of each step's action
        #[arg(long)]
        action_cost: Option<f64>,

        /// Maximum number of generations
        #[arg(long, short = 'g')]
        generations: Option<u32>,

        /// Risk category per generation (repeatable, applied cyclically)
        #[arg(long = "risk")]
        risk: Vec<RiskCategory>,

        /// Start from C_norm instead of C_raw when measuring a graph
        #[arg(long)]
        use_normalized: bool,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,
    },

    /// Write an example gse.toml
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path } => init::run(&path),

        Commands::Measure {
            model,
            graph,
            raw,
            format,
        } => {
            let config = resolve_config(cli.config)?;
            let format = resolve_format(format, &config)?;
            measure::run(&model, &graph, !raw, format)
        }

        Commands::Simulate {
            r_initial,
            complexity,
            model,
            graph,
            action_cost,
            generations,
            risk,
            use_normalized,
            format,
        } => {
            let config = resolve_config(cli.config)?;
            let format = resolve_format(format, &config)?;
            let options = simulate::SimulateOptions {
                r_initial,
                complexity,
                model,
                graph,
                action_cost,
                generations,
                risk,
                use_normalized,
            };
            simulate::run(&config, options, format)
        }
    }
}

/// Explicit `--config` must load; otherwise probe the working directory.
fn resolve_config(path: Option<PathBuf>) -> Result<ProjectConfig> {
    match path {
        Some(path) => load_config_file(&path),
        None => {
            let cwd = std::env::current_dir().context("Cannot read working directory")?;
            Ok(load_project_config(&cwd))
        }
    }
}

/// `--format`, then `[defaults] format`, then text
fn resolve_format(flag: Option<String>, config: &ProjectConfig) -> Result<OutputFormat> {
    flag.or_else(|| config.defaults.format.clone())
        .as_deref()
        .unwrap_or("text")
        .parse()
}

/// Generate the graph for a model name, with a label describing its parameters.
pub(crate) fn build_graph(model: &str, args: &GraphArgs) -> Result<(String, Graph)> {
    let n = args.nodes;
    let built = match model {
        "empty" => (format!("empty(n={})", n), Graph::empty(n)),
        "er" => (
            format!("er(n={},p={},seed={})", n, args.prob, args.seed),
            generators::erdos_renyi(n, args.prob, args.seed)?,
        ),
        "ba" => (
            format!("ba(n={},m={},seed={})", n, args.attach, args.seed),
            generators::barabasi_albert(n, args.attach, args.seed)?,
        ),
        "lattice" => (
            format!("lattice({}x{})", args.rows, args.cols),
            generators::lattice_2d(args.rows, args.cols)?,
        ),
        "complete" => (format!("complete(n={})", n), generators::complete(n)),
        "path" => (format!("path(n={})", n), generators::path(n)),
        "star" => (format!("star(n={})", n), generators::star(n)),
        other => anyhow::bail!(
            "Unknown model '{}'. Valid models: {}",
            other,
            MODELS.join(", ")
        ),
    };
    Ok(built)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_args() -> GraphArgs {
        GraphArgs {
            nodes: 12,
            prob: 0.3,
            attach: 2,
            rows: 3,
            cols: 4,
            seed: 7,
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_every_model() {
        for model in MODELS {
            let (label, graph) = build_graph(model, &graph_args()).unwrap();
            assert!(label.starts_with(model));
            assert_eq!(graph.num_nodes(), 12);
        }
        assert!(build_graph("smallworld", &graph_args()).is_err());
    }

    #[test]
    fn test_build_graph_propagates_parameter_errors() {
        let mut args = graph_args();
        args.attach = 20;
        assert!(build_graph("ba", &args).is_err());
    }

    #[test]
    fn test_format_precedence() {
        let mut config = ProjectConfig::default();
        assert_eq!(resolve_format(None, &config).unwrap(), OutputFormat::Text);

        config.defaults.format = Some("json".into());
        assert_eq!(resolve_format(None, &config).unwrap(), OutputFormat::Json);
        assert_eq!(
            resolve_format(Some("text".into()), &config).unwrap(),
            OutputFormat::Text
        );

        config.defaults.format = Some("yaml".into());
        assert!(resolve_format(None, &config).is_err());
    }

    #[test]
    fn test_simulate_parses_risk_labels() {
        let cli = Cli::try_parse_from([
            "gse",
            "simulate",
            "--risk",
            "none",
            "--risk",
            "W2_COLLECTIVE_SYSTEM",
            "--risk",
            "W8_MADE_UP",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate { risk, .. } => assert_eq!(
                risk,
                vec![
                    RiskCategory::None,
                    RiskCategory::CollectiveSystem,
                    RiskCategory::Unknown("W8_MADE_UP".into()),
                ]
            ),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_complexity_conflicts_with_model() {
        let parsed = Cli::try_parse_from(["gse", "simulate", "--complexity", "1.0", "--model", "er"]);
        assert!(parsed.is_err());
    }
}
