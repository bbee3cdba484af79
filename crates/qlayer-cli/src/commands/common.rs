//! Shared helpers for CLI commands.

use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use qlayer_sim::{EmulatorConfig, StateVector, StatevectorEmulator};

/// Outcomes shown in table output.
pub const MAX_OUTCOMES: usize = 16;

/// Output format of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Parse a `--format` value.
pub fn parse_format(format: &str) -> Result<OutputFormat> {
    match format.to_lowercase().as_str() {
        "table" => Ok(OutputFormat::Table),
        "json" => Ok(OutputFormat::Json),
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }
}

/// Build the statevector emulator with a register limit.
pub fn emulator(max_qubits: usize) -> StatevectorEmulator {
    StatevectorEmulator::with_config(EmulatorConfig { max_qubits })
}

/// Parse `"0-1,1-2"` into edge pairs.
pub fn parse_edges(input: &str) -> Result<Vec<(usize, usize)>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| -> Result<(usize, usize)> {
            let (a, b) = part
                .split_once('-')
                .with_context(|| format!("Edge '{part}' must look like 'a-b'"))?;
            let a = a
                .trim()
                .parse()
                .with_context(|| format!("Invalid vertex in edge '{part}'"))?;
            let b = b
                .trim()
                .parse()
                .with_context(|| format!("Invalid vertex in edge '{part}'"))?;
            Ok((a, b))
        })
        .collect()
}

/// A spinner on stderr for long-running work.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// One basis outcome of a simulated state.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    /// Basis index.
    pub index: usize,
    /// Bitstring, qubit 0 first.
    pub bitstring: String,
    /// Probability.
    pub probability: f64,
}

/// The `count` most probable outcomes of `state`.
pub fn top_outcomes(state: &StateVector, count: usize) -> Vec<Outcome> {
    state
        .most_probable(count)
        .into_iter()
        .map(|(index, probability)| Outcome {
            index,
            bitstring: state.basis_label(index),
            probability,
        })
        .collect()
}

/// Print outcomes as a bar table with a per-outcome annotation column.
pub fn print_outcomes(outcomes: &[Outcome], annotate: impl Fn(&Outcome) -> String) {
    for outcome in outcomes {
        let percent = outcome.probability * 100.0;
        let bar_len = (percent / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6.2}% {} {}",
            style(&outcome.bitstring).cyan(),
            percent,
            annotate(outcome),
            style(bar).green()
        );
    }
}

/// Serialize `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize report")?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("table").unwrap(), OutputFormat::Table);
        assert_eq!(parse_format("JSON").unwrap(), OutputFormat::Json);
        assert!(parse_format("csv").is_err());
    }

    #[test]
    fn test_parse_edges() {
        assert_eq!(
            parse_edges("0-1, 1-2 ,2-0").unwrap(),
            vec![(0, 1), (1, 2), (2, 0)]
        );
        assert_eq!(parse_edges("").unwrap(), vec![]);
        assert_eq!(parse_edges("3-4,").unwrap(), vec![(3, 4)]);
    }

    #[test]
    fn test_parse_edges_errors() {
        assert!(parse_edges("0_1").is_err());
        assert!(parse_edges("a-1").is_err());
        assert!(parse_edges("1--2").is_err());
    }

    #[test]
    fn test_top_outcomes() {
        let state = StateVector::from_real(&[0.0, 0.6, 0.0, 0.8]).unwrap();
        let top = top_outcomes(&state, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].bitstring, "11");
        assert_eq!(top[1].bitstring, "10");
        assert!((top[0].probability - 0.64).abs() < 1e-12);
    }
}
