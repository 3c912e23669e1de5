//! Command-line front end for the reversible-logic simulator
//!
//! Compiles a JSON gate list, accretes one qubit per input bit, executes the
//! compiled program and prints the measured output bitstring on stdout.
//! Failures go to stderr with a non-zero exit.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use revflow::compiler::{compile_records, load_gate_list};
use revflow::engine::{CircuitEngine, SingleQubit};

/// Reversible-logic circuit simulator
#[derive(Parser)]
#[command(name = "revflow", version, about)]
struct Cli {
    /// Path to a JSON gate list
    program: PathBuf,

    /// Bitstring input, e.g. 1010
    #[arg(value_parser = parse_bitstring)]
    input: String,

    /// Execute the program N times (for benchmarking)
    #[arg(long, default_value_t = 1)]
    steps: u32,
}

fn parse_bitstring(raw: &str) -> Result<String, String> {
    let bits = raw.trim();
    if bits.is_empty() || !bits.chars().all(|c| c == '0' || c == '1') {
        return Err("input must be a bitstring of 0s and 1s".to_string());
    }
    Ok(bits.to_string())
}

fn run(cli: &Cli) -> Result<String> {
    let gate_list = load_gate_list(&cli.program)?;
    let program = compile_records(&gate_list)?;

    let mut engine = CircuitEngine::new();
    for bit in cli.input.chars() {
        engine.accrete(SingleQubit::from_bit(bit == '1'));
    }

    for _ in 0..cli.steps {
        engine.execute(&program)?;
    }

    Ok(engine.read_bits()?)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(bits) => {
            println!("{}", bits);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
