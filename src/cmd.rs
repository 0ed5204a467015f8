//! Command line interface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use kdam::{tqdm, BarExt};
use tracing::{info, warn};

use trilogic::io::{
    read_circuit_file, read_pattern_file, write_circuit_file, write_pattern_file, write_patterns,
};
use trilogic::sim::{generate_exhaustive_patterns, generate_random_patterns, simulate, Convergence};
use trilogic::Result;

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Command line arguments
#[derive(Subcommand)]
pub enum Commands {
    /// Show statistics about a circuit
    ///
    /// Will print the number of inputs, outputs and gates of each kind, and whether
    /// the circuit has combinational loops.
    #[clap()]
    Show(ShowArgs),

    /// Simulate a circuit
    ///
    /// Patterns have one character per input, 0, 1 or X for undefined:
    ///    1: 0X011
    ///    2: 11000
    /// Output patterns use the same format. Patterns whose simulation did not
    /// converge are marked with a comment.
    #[clap(alias = "sim")]
    Simulate(SimulateArgs),

    /// Check that two files describe the same circuit
    ///
    /// Dimensions, gates and connections must be identical.
    #[clap()]
    Check(CheckArgs),

    /// Read a circuit and write it back in canonical form
    #[clap(alias = "fmt")]
    Rewrite(RewriteArgs),
}

impl Commands {
    pub fn run(&self) -> Result<()> {
        match self {
            Commands::Show(a) => a.run(),
            Commands::Simulate(a) => a.run(),
            Commands::Check(a) => a.run(),
            Commands::Rewrite(a) => a.run(),
        }
    }
}

/// Command arguments for circuit informations
#[derive(Args)]
pub struct ShowArgs {
    /// Circuit to show
    file: PathBuf,
}

impl ShowArgs {
    pub fn run(&self) -> Result<()> {
        use trilogic::stats::stats;
        let circuit = read_circuit_file(&self.file)?;
        println!("Circuit stats:\n{}", stats(&circuit));
        Ok(())
    }
}

/// Command arguments for simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Circuit to simulate
    circuit: PathBuf,

    /// Input patterns file
    #[arg(short = 'i', long, conflicts_with_all = ["random", "exhaustive"])]
    input: Option<PathBuf>,

    /// Output file for output patterns; printed if not given
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Number of random patterns to simulate
    #[arg(short = 'r', long, conflicts_with = "exhaustive")]
    random: Option<usize>,

    /// Simulate all possible input patterns
    #[arg(long)]
    exhaustive: bool,

    /// Include undefined values in random or exhaustive patterns
    #[arg(long)]
    undef: bool,

    /// Seed for random pattern generation
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

impl SimulateArgs {
    pub fn run(&self) -> Result<()> {
        let mut circuit = read_circuit_file(&self.circuit)?;
        let input_values = if let Some(path) = &self.input {
            read_pattern_file(path)?
        } else if let Some(nb) = self.random {
            generate_random_patterns(circuit.nb_inputs(), nb, self.undef, self.seed)
        } else if self.exhaustive {
            if circuit.nb_inputs() > 16 {
                warn!(
                    "Exhaustive simulation of {} inputs will be very long",
                    circuit.nb_inputs()
                );
            }
            generate_exhaustive_patterns(circuit.nb_inputs(), self.undef)
        } else {
            let nb_patterns = 4 * (circuit.nb_inputs() + 1);
            generate_random_patterns(circuit.nb_inputs(), nb_patterns, self.undef, self.seed)
        };

        let mut output_values = Vec::new();
        let mut comments = Vec::new();
        let mut nb_stalled = 0;
        let mut progress = tqdm!(total = input_values.len());
        progress.set_description("Patterns simulated");
        for pattern in &input_values {
            let conv = simulate(&mut circuit, pattern)?;
            if conv == Convergence::Stalled {
                nb_stalled += 1;
                comments.push(Some("stalled".to_string()));
            } else {
                comments.push(None);
            }
            output_values.push(circuit.output_values().to_vec());
            progress.update(1).ok();
        }
        eprintln!();
        info!(
            "Simulated {} patterns, {} did not converge",
            input_values.len(),
            nb_stalled
        );

        match &self.output {
            Some(path) => write_pattern_file(path, &output_values, &comments)?,
            None => write_patterns(&mut std::io::stdout(), &output_values, &comments)?,
        }
        Ok(())
    }
}

/// Command arguments for structural comparison
#[derive(Args)]
pub struct CheckArgs {
    /// First circuit to compare
    file1: PathBuf,
    /// Second circuit to compare
    file2: PathBuf,
}

impl CheckArgs {
    pub fn run(&self) -> Result<()> {
        let c1 = read_circuit_file(&self.file1)?;
        let c2 = read_circuit_file(&self.file2)?;
        if c1 == c2 {
            println!("Circuits are identical");
            std::process::exit(0);
        }
        if c1.nb_inputs() != c2.nb_inputs()
            || c1.nb_outputs() != c2.nb_outputs()
            || c1.nb_gates() != c2.nb_gates()
        {
            println!(
                "Different dimensions: {}/{}/{} vs {}/{}/{}. Circuits are not identical",
                c1.nb_inputs(),
                c1.nb_outputs(),
                c1.nb_gates(),
                c2.nb_inputs(),
                c2.nb_outputs(),
                c2.nb_gates()
            );
        } else {
            println!("Circuits are not identical");
            for id in 1..=c1.nb_gates() {
                if c1.gate(id).map(|g| (g.kind(), g.sources()))
                    != c2.gate(id).map(|g| (g.kind(), g.sources()))
                {
                    println!("  gate {id} differs");
                }
            }
            for id in 1..=c1.nb_outputs() {
                if c1.output(id) != c2.output(id) {
                    println!("  output {id} differs");
                }
            }
        }
        std::process::exit(1);
    }
}

/// Command arguments for rewriting
#[derive(Args)]
pub struct RewriteArgs {
    /// Circuit to read
    file: PathBuf,

    /// Output file
    #[arg(short = 'o', long)]
    output: PathBuf,
}

impl RewriteArgs {
    pub fn run(&self) -> Result<()> {
        let circuit = read_circuit_file(&self.file)?;
        write_circuit_file(&self.output, &circuit)
    }
}
