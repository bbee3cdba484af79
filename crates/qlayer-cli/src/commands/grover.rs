//! Grover search command implementation.

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use tracing::info;

use qlayer_algo::{GroverCircuit, SearchProblem};
use qlayer_sim::Emulator;

use super::common::{
    MAX_OUTCOMES, Outcome, OutputFormat, emulator, parse_format, print_json, print_outcomes,
    spinner, top_outcomes,
};

/// Arguments of the `grover` command.
#[derive(Debug, Clone)]
pub struct GroverArgs {
    pub size: usize,
    pub marked: String,
    pub iterations: Option<usize>,
    pub max_qubits: usize,
}

#[derive(Debug, Serialize)]
struct GroverReport {
    size: usize,
    marked: Vec<usize>,
    num_qubits: usize,
    iterations: usize,
    num_gates: usize,
    depth: usize,
    success_probability: f64,
    predicted_probability: f64,
    outcomes: Vec<Outcome>,
}

/// Execute the grover command.
pub fn execute(args: &GroverArgs, format: &str) -> Result<()> {
    let format = parse_format(format)?;
    let problem = SearchProblem::new(args.size, parse_marked(&args.marked)?)?;
    let emulator = emulator(args.max_qubits);
    emulator.check_register(problem.num_qubits_required())?;

    let iterations = args
        .iterations
        .unwrap_or_else(|| problem.optimal_iterations());

    if format == OutputFormat::Table {
        println!(
            "{} Grover search over {} items ({} marked, {} iterations)",
            style("→").cyan().bold(),
            style(problem.size()).yellow(),
            problem.marked().len(),
            iterations
        );
    }

    let progress = (format == OutputFormat::Table).then(|| spinner("Simulating..."));
    let run = GroverCircuit::with_iterations(problem.clone(), iterations)
        .and_then(|grover| grover.final_state(&emulator).map(|state| (grover, state)));
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }
    let (grover, state) = run?;

    let success = grover.success_probability(&state);
    let predicted = problem.success_probability_after(iterations);
    info!(success, predicted, "Grover search finished");

    let outcomes = top_outcomes(&state, MAX_OUTCOMES);
    match format {
        OutputFormat::Json => print_json(&GroverReport {
            size: problem.size(),
            marked: problem.marked().to_vec(),
            num_qubits: problem.num_qubits_required(),
            iterations,
            num_gates: grover.circuit().len(),
            depth: grover.circuit().depth(),
            success_probability: success,
            predicted_probability: predicted,
            outcomes,
        }),
        OutputFormat::Table => {
            println!(
                "  Register: {} qubits, {} gates, depth {}",
                problem.num_qubits_required(),
                grover.circuit().len(),
                grover.circuit().depth()
            );
            println!(
                "  Success probability: {:.6} (predicted {:.6})",
                style(success).yellow(),
                predicted
            );
            println!(
                "\n{} Most probable outcomes (qubit 0 first):",
                style("✓").green().bold()
            );
            print_outcomes(&outcomes, |outcome| {
                if problem.is_marked(outcome.index) {
                    format!("{:>6}", style("marked").green())
                } else {
                    format!("{:>6}", "")
                }
            });
            Ok(())
        }
    }
}

/// Parse `"3,5"` into item indices.
fn parse_marked(input: &str) -> Result<Vec<usize>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .with_context(|| format!("Invalid marked item '{part}'"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_marked() {
        assert_eq!(parse_marked("3, 5,").unwrap(), vec![3, 5]);
        assert_eq!(parse_marked("").unwrap(), Vec::<usize>::new());
        assert!(parse_marked("3,x").is_err());
        assert!(parse_marked("-1").is_err());
    }

    #[test]
    fn test_register_limit_checked_first() {
        let args = GroverArgs {
            size: 1 << 20,
            marked: "7".into(),
            iterations: None,
            max_qubits: 4,
        };
        let err = execute(&args, "json").unwrap_err();
        assert!(err.to_string().contains("emulator limit is 4"));
    }
}
