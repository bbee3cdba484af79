//! qlayer Command-Line Interface
//!
//! The main entry point for the qlayer CLI tool.
//!
//! ```text
//! qlayer random --width 5 --depth 40 --weight-2q 0.3 --simulate
//! qlayer qaoa --edges 0-1,1-2,2-3,3-0 --layers 2
//! qlayer qaoa --config qaoa.yaml -vv
//! qlayer grover --size 8 --marked 6
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{grover, qaoa, random, version};

/// qlayer - statevector emulation and circuit layering
#[derive(Parser, Debug)]
#[command(name = "qlayer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a seeded random circuit and show its layers
    Random {
        /// Number of qubits gates are drawn over
        #[arg(short, long)]
        width: usize,

        /// Number of gates
        #[arg(short, long)]
        depth: usize,

        /// Probability of a two-qubit gate at each step
        #[arg(long = "weight-2q", default_value = "0.5")]
        weight_2q: f64,

        /// RNG seed
        #[arg(short, long, env = "QLAYER_SEED", default_value = "27")]
        seed: u64,

        /// Entry bound of the random Hermitian generators
        #[arg(long, default_value = "100")]
        scale: f64,

        /// Simulate the circuit from |0…0⟩ and show the outcome distribution
        #[arg(long)]
        simulate: bool,

        /// Largest register the emulator accepts
        #[arg(long, env = "QLAYER_MAX_QUBITS", default_value = "24")]
        max_qubits: usize,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Optimize a QAOA max-cut ansatz
    Qaoa {
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Number of vertices; defaults to the largest edge endpoint plus one
        #[arg(short, long)]
        qubits: Option<usize>,

        /// Edges as `a-b` pairs, comma separated (default: ring)
        #[arg(short, long)]
        edges: Option<String>,

        /// Number of (γ, β) layers
        #[arg(short, long)]
        layers: Option<usize>,

        /// Optimizer iteration limit
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Largest register the emulator accepts
        #[arg(long, env = "QLAYER_MAX_QUBITS", default_value = "24")]
        max_qubits: usize,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Run Grover search for marked items in 0..N
    Grover {
        /// Number of items N
        #[arg(short = 'n', long)]
        size: usize,

        /// Marked items, comma separated
        #[arg(short, long)]
        marked: String,

        /// Oracle + diffuser rounds (default: optimal for the problem)
        #[arg(short = 'k', long)]
        iterations: Option<usize>,

        /// Largest register the emulator accepts
        #[arg(long, env = "QLAYER_MAX_QUBITS", default_value = "24")]
        max_qubits: usize,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Random {
            width,
            depth,
            weight_2q,
            seed,
            scale,
            simulate,
            max_qubits,
            format,
        } => random::execute(
            &random::RandomArgs {
                width,
                depth,
                weight_2q,
                seed,
                scale,
                simulate,
                max_qubits,
            },
            &format,
        ),

        Commands::Qaoa {
            config,
            qubits,
            edges,
            layers,
            max_iterations,
            max_qubits,
            format,
        } => qaoa::execute(
            &qaoa::QaoaArgs {
                config,
                qubits,
                edges,
                layers,
                max_iterations,
                max_qubits,
            },
            &format,
        ),

        Commands::Grover {
            size,
            marked,
            iterations,
            max_qubits,
            format,
        } => grover::execute(
            &grover::GroverArgs {
                size,
                marked,
                iterations,
                max_qubits,
            },
            &format,
        ),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_random_minimal() {
        let cli = Cli::try_parse_from(["qlayer", "random", "-w", "4", "-d", "10"]).unwrap();
        match cli.command {
            Commands::Random {
                width,
                depth,
                weight_2q,
                simulate,
                format,
                ..
            } => {
                assert_eq!(width, 4);
                assert_eq!(depth, 10);
                assert!((weight_2q - 0.5).abs() < f64::EPSILON);
                assert!(!simulate);
                assert_eq!(format, "table");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_random_full() {
        let cli = Cli::try_parse_from([
            "qlayer",
            "random",
            "--width",
            "6",
            "--depth",
            "50",
            "--weight-2q",
            "0.2",
            "--seed",
            "7",
            "--scale",
            "3.5",
            "--simulate",
            "--max-qubits",
            "12",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Random {
                seed,
                scale,
                simulate,
                max_qubits,
                format,
                ..
            } => {
                assert_eq!(seed, 7);
                assert!((scale - 3.5).abs() < f64::EPSILON);
                assert!(simulate);
                assert_eq!(max_qubits, 12);
                assert_eq!(format, "json");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_random_requires_width_and_depth() {
        assert!(Cli::try_parse_from(["qlayer", "random", "--width", "3"]).is_err());
        assert!(Cli::try_parse_from(["qlayer", "random", "--depth", "3"]).is_err());
    }

    #[test]
    fn test_parse_qaoa_defaults() {
        let cli = Cli::try_parse_from(["qlayer", "qaoa"]).unwrap();
        match cli.command {
            Commands::Qaoa {
                config,
                qubits,
                edges,
                layers,
                max_iterations,
                ..
            } => {
                assert!(config.is_none());
                assert!(qubits.is_none());
                assert!(edges.is_none());
                assert!(layers.is_none());
                assert!(max_iterations.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_qaoa_overrides() {
        let cli = Cli::try_parse_from([
            "qlayer",
            "qaoa",
            "-c",
            "run.yaml",
            "-e",
            "0-1,1-2",
            "-l",
            "3",
            "--max-iterations",
            "100",
        ])
        .unwrap();
        match cli.command {
            Commands::Qaoa {
                config,
                edges,
                layers,
                max_iterations,
                ..
            } => {
                assert_eq!(config.as_deref(), Some("run.yaml"));
                assert_eq!(edges.as_deref(), Some("0-1,1-2"));
                assert_eq!(layers, Some(3));
                assert_eq!(max_iterations, Some(100));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_grover() {
        let cli = Cli::try_parse_from(["qlayer", "grover", "-n", "8", "-m", "3,5", "-k", "2"])
            .unwrap();
        match cli.command {
            Commands::Grover {
                size,
                marked,
                iterations,
                format,
                ..
            } => {
                assert_eq!(size, 8);
                assert_eq!(marked, "3,5");
                assert_eq!(iterations, Some(2));
                assert_eq!(format, "table");
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["qlayer", "grover", "--size", "8"]).is_err());
    }

    #[test]
    fn test_parse_verbosity() {
        let cli = Cli::try_parse_from(["qlayer", "-vv", "version"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let cli = Cli::try_parse_from(["qlayer", "version", "-vvv"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_parse_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["qlayer"]).is_err());
        assert!(Cli::try_parse_from(["qlayer", "shor"]).is_err());
    }
}
