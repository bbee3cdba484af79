//! QAOA max-cut command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use qlayer_algo::{MaxCutGraph, QaoaConfig, QaoaResult, optimize_qaoa};

use super::common::{
    MAX_OUTCOMES, Outcome, OutputFormat, emulator, parse_edges, parse_format, print_json,
    print_outcomes, spinner, top_outcomes,
};

/// Largest graph whose exact max cut is computed for comparison.
const MAX_EXACT_VERTICES: usize = 20;

/// Arguments of the `qaoa` command.
#[derive(Debug, Clone, Default)]
pub struct QaoaArgs {
    pub config: Option<String>,
    pub qubits: Option<usize>,
    pub edges: Option<String>,
    pub layers: Option<usize>,
    pub max_iterations: Option<usize>,
    pub max_qubits: usize,
}

#[derive(Debug, Serialize)]
struct QaoaReport {
    num_qubits: usize,
    edges: Vec<(usize, usize)>,
    layers: usize,
    expectation: f64,
    expected_cut: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_cut: Option<usize>,
    gammas: Vec<f64>,
    betas: Vec<f64>,
    iterations: usize,
    evaluations: usize,
    converged: bool,
    outcomes: Vec<CutOutcome>,
}

#[derive(Debug, Serialize)]
struct CutOutcome {
    #[serde(flatten)]
    outcome: Outcome,
    cut: usize,
}

/// Execute the qaoa command.
pub fn execute(args: &QaoaArgs, format: &str) -> Result<()> {
    let format = parse_format(format)?;
    let config = build_config(args)?;
    debug!(?config, "resolved QAOA configuration");

    if format == OutputFormat::Table {
        println!(
            "{} Optimizing QAOA max-cut ({} vertices, {} edges, p = {})",
            style("→").cyan().bold(),
            style(config.num_qubits).yellow(),
            config.edges.len(),
            config.layers
        );
    }

    let progress = (format == OutputFormat::Table).then(|| spinner("Optimizing..."));
    let result = optimize_qaoa(&config, &emulator(args.max_qubits));
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }
    let result = result.map_err(|e| anyhow::anyhow!("QAOA optimization failed: {e}"))?;

    info!(
        value = result.optimization.value,
        iterations = result.optimization.iterations,
        "QAOA finished"
    );

    let graph = result.circuit.graph();
    let max_cut = (graph.num_vertices() <= MAX_EXACT_VERTICES)
        .then(|| graph.max_cut())
        .flatten()
        .map(|(_, cut)| cut);

    match format {
        OutputFormat::Json => print_json(&report(&config, &result, max_cut)),
        OutputFormat::Table => {
            print_result(&result, max_cut);
            Ok(())
        }
    }
}

/// Merge the YAML file (if any) with command-line overrides.
fn build_config(args: &QaoaArgs) -> Result<QaoaConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(Path::new(path))?,
        None => QaoaConfig::default(),
    };

    match (&args.edges, args.qubits) {
        (Some(edges), qubits) => {
            let edges = parse_edges(edges)?;
            config.num_qubits = match qubits {
                Some(qubits) => qubits,
                None => edges
                    .iter()
                    .map(|&(a, b)| a.max(b) + 1)
                    .max()
                    .context("--edges needs at least one edge")?,
            };
            config.edges = edges;
        }
        (None, Some(qubits)) => {
            let ring = MaxCutGraph::ring(qubits)?;
            config.num_qubits = qubits;
            config.edges = ring.edges().to_vec();
        }
        (None, None) => {}
    }

    if let Some(layers) = args.layers {
        config.layers = layers;
    }
    if let Some(max_iterations) = args.max_iterations {
        config.optimizer.max_iterations = max_iterations;
    }

    Ok(config)
}

fn load_config(path: &Path) -> Result<QaoaConfig> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file {}: {e}", path.display()))?;
    serde_yaml_ng::from_str(&text)
        .map_err(|e| anyhow::anyhow!("Failed to parse config file {}: {e}", path.display()))
}

fn cut_outcomes(result: &QaoaResult, count: usize) -> Vec<CutOutcome> {
    top_outcomes(&result.state, count)
        .into_iter()
        .map(|outcome| CutOutcome {
            cut: result.circuit.graph().cut_value(outcome.index),
            outcome,
        })
        .collect()
}

fn report(config: &QaoaConfig, result: &QaoaResult, max_cut: Option<usize>) -> QaoaReport {
    QaoaReport {
        num_qubits: config.num_qubits,
        edges: config.edges.clone(),
        layers: config.layers,
        expectation: result.optimization.value,
        expected_cut: result.expected_cut(),
        max_cut,
        gammas: result.gammas(),
        betas: result.betas(),
        iterations: result.optimization.iterations,
        evaluations: result.optimization.evaluations,
        converged: result.optimization.converged,
        outcomes: cut_outcomes(result, MAX_OUTCOMES),
    }
}

fn print_result(result: &QaoaResult, max_cut: Option<usize>) {
    let optimization = &result.optimization;
    let converged = if optimization.converged {
        style("converged").green()
    } else {
        style("iteration limit").yellow()
    };

    println!(
        "  ⟨C⟩ = {:.6}, expected cut = {:.4}",
        style(optimization.value).yellow(),
        result.expected_cut()
    );
    if let Some(max_cut) = max_cut {
        println!("  Maximum cut: {max_cut}");
    }
    println!("  γ = {}", format_angles(&result.gammas()));
    println!("  β = {}", format_angles(&result.betas()));
    println!(
        "  {} iterations, {} evaluations ({})",
        optimization.iterations, optimization.evaluations, converged
    );

    println!(
        "\n{} Most probable partitions (vertex 0 first):",
        style("✓").green().bold()
    );
    let graph = result.circuit.graph();
    let outcomes: Vec<Outcome> = top_outcomes(&result.state, MAX_OUTCOMES);
    print_outcomes(&outcomes, |outcome| {
        format!("cut {:>2}", graph.cut_value(outcome.index))
    });
}

fn format_angles(angles: &[f64]) -> String {
    let angles: Vec<String> = angles.iter().map(|a| format!("{a:.6}")).collect();
    format!("[{}]", angles.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args() -> QaoaArgs {
        QaoaArgs {
            max_qubits: 24,
            ..QaoaArgs::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = build_config(&args()).unwrap();
        assert_eq!(config, QaoaConfig::default());
    }

    #[test]
    fn test_edges_infer_vertex_count() {
        let config = build_config(&QaoaArgs {
            edges: Some("0-1,1-4".into()),
            ..args()
        })
        .unwrap();
        assert_eq!(config.num_qubits, 5);
        assert_eq!(config.edges, vec![(0, 1), (1, 4)]);
    }

    #[test]
    fn test_qubits_alone_build_a_ring() {
        let config = build_config(&QaoaArgs {
            qubits: Some(3),
            layers: Some(2),
            max_iterations: Some(50),
            ..args()
        })
        .unwrap();
        assert_eq!(config.num_qubits, 3);
        assert_eq!(config.edges, vec![(0, 1), (1, 2), (2, 0)]);
        assert_eq!(config.layers, 2);
        assert_eq!(config.optimizer.max_iterations, 50);
    }

    #[test]
    fn test_empty_edges_rejected() {
        let err = build_config(&QaoaArgs {
            edges: Some(" , ".into()),
            ..args()
        })
        .unwrap_err();
        assert!(err.to_string().contains("at least one edge"));
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "num_qubits: 3\nedges: [[0, 1], [1, 2]]\nlayers: 2\noptimizer:\n  tolerance: 1.0e-6"
        )
        .unwrap();

        let config = build_config(&QaoaArgs {
            config: Some(file.path().display().to_string()),
            layers: Some(1),
            ..args()
        })
        .unwrap();
        assert_eq!(config.num_qubits, 3);
        assert_eq!(config.edges, vec![(0, 1), (1, 2)]);
        assert_eq!(config.layers, 1);
        assert!((config.optimizer.tolerance - 1e-6).abs() < 1e-18);
    }

    #[test]
    fn test_missing_config_file() {
        let err = build_config(&QaoaArgs {
            config: Some("/nonexistent/qaoa.yaml".into()),
            ..args()
        })
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_format_angles() {
        assert_eq!(format_angles(&[0.5, -1.25]), "[0.500000, -1.250000]");
        assert_eq!(format_angles(&[]), "[]");
    }
}
