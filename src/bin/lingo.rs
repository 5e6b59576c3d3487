//! Program to run Lingo experiments in a command-line interface (CLI), uses the [lingors::cli] module.

use clap::Parser;

use lingors::cli;

/// Entrypoint for the Lingo CLI program, which just parses and runs the CLI from the provided arguments.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    cli::Args::parse().run()
}
