//! CLI entry point for the wave function collapse tile solver

use clap::Parser;
use tilecollapse::io::cli::{Cli, Runner};
use tilecollapse::io::logging::init_logging;

fn main() -> tilecollapse::Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    Runner::new(cli).run().map(|_| ())
}
