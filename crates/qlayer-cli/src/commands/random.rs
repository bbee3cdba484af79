//! Random circuit command implementation.

use anyhow::Result;
use console::style;
use serde::Serialize;
use tracing::info;

use qlayer_algo::{GeneratorConfig, RandomCircuitGenerator};
use qlayer_ir::Circuit;
use qlayer_sim::{Emulator, StateVector};

use super::common::{
    MAX_OUTCOMES, Outcome, OutputFormat, emulator, parse_format, print_json, print_outcomes,
    spinner, top_outcomes,
};

/// Layers listed in table output.
const MAX_LAYERS_SHOWN: usize = 20;

/// Arguments of the `random` command.
#[derive(Debug, Clone)]
pub struct RandomArgs {
    pub width: usize,
    pub depth: usize,
    pub weight_2q: f64,
    pub seed: u64,
    pub scale: f64,
    pub simulate: bool,
    pub max_qubits: usize,
}

#[derive(Debug, Serialize)]
struct GateEntry {
    name: String,
    targets: Vec<usize>,
}

#[derive(Debug, Serialize)]
struct RandomReport {
    config: GeneratorConfig,
    num_gates: usize,
    num_qubits: usize,
    num_non_idle_qubits: usize,
    depth: usize,
    gates: Vec<GateEntry>,
    layers: Vec<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcomes: Option<Vec<Outcome>>,
}

/// Execute the random command.
pub fn execute(args: &RandomArgs, format: &str) -> Result<()> {
    let format = parse_format(format)?;
    let config = GeneratorConfig {
        width: args.width,
        depth: args.depth,
        weight_2q: args.weight_2q,
        seed: args.seed,
        scale: args.scale,
    };
    let generator = RandomCircuitGenerator::new(config.clone())?;

    if format == OutputFormat::Table {
        println!(
            "{} Generating random circuit (width {}, {} gates, 2q weight {:.2}, seed {})",
            style("→").cyan().bold(),
            style(args.width).yellow(),
            args.depth,
            args.weight_2q,
            args.seed
        );
    }

    let circuit = generator.generate()?;
    info!(
        gates = circuit.len(),
        depth = circuit.depth(),
        "random circuit ready"
    );

    let outcomes = if args.simulate {
        Some(simulate(&circuit, args.max_qubits, format)?)
    } else {
        None
    };

    match format {
        OutputFormat::Json => print_json(&RandomReport {
            config,
            num_gates: circuit.len(),
            num_qubits: circuit.num_qubits(),
            num_non_idle_qubits: circuit.num_non_idle_qubits(),
            depth: circuit.depth(),
            gates: circuit
                .gates()
                .iter()
                .map(|g| GateEntry {
                    name: g.name().to_string(),
                    targets: g.targets().to_vec(),
                })
                .collect(),
            layers: circuit.layers().to_vec(),
            outcomes,
        }),
        OutputFormat::Table => {
            print_summary(&circuit);
            if let Some(outcomes) = outcomes {
                println!(
                    "\n{} Most probable outcomes (qubit 0 first):",
                    style("✓").green().bold()
                );
                print_outcomes(&outcomes, |_| String::new());
            }
            Ok(())
        }
    }
}

/// Run the circuit from |0…0⟩ on its own width.
fn simulate(circuit: &Circuit, max_qubits: usize, format: OutputFormat) -> Result<Vec<Outcome>> {
    if circuit.is_empty() {
        anyhow::bail!("Cannot simulate an empty circuit; use --depth of at least 1");
    }

    let emulator = emulator(max_qubits);
    emulator.check_register(circuit.num_qubits())?;

    let progress = (format == OutputFormat::Table).then(|| spinner("Simulating..."));
    let initial = StateVector::from_qubit_count(circuit.num_qubits())?;
    let state = emulator.apply_circuit(circuit, &initial);
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }

    Ok(top_outcomes(&state?, MAX_OUTCOMES))
}

fn print_summary(circuit: &Circuit) {
    println!(
        "  Gates: {}, qubits: {} ({} non-idle), depth: {}",
        circuit.len(),
        circuit.num_qubits(),
        circuit.num_non_idle_qubits(),
        style(circuit.depth()).yellow()
    );

    if circuit.is_empty() {
        return;
    }

    println!("\n{} Layers:", style("✓").green().bold());
    for (index, layer) in circuit.layers().iter().enumerate().take(MAX_LAYERS_SHOWN) {
        let gates: Vec<String> = layer
            .iter()
            .map(|&g| {
                let targets = circuit.gates()[g]
                    .targets()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                format!("#{g}[{targets}]")
            })
            .collect();
        println!("  {:>4}: {}", style(index).cyan(), gates.join(" "));
    }

    if circuit.depth() > MAX_LAYERS_SHOWN {
        println!("  ... and {} more layers", circuit.depth() - MAX_LAYERS_SHOWN);
    }
}
