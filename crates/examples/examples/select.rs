//! Launch the select demo.

use clap::Parser;
use trellis_examples::{Args, run, selects};

/// Run the select demo.
pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run(&args, selects::setup)
}
