//! Launch the input field demo.

use clap::Parser;
use trellis_examples::{Args, inputs, run};

/// Run the input field demo.
pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run(&args, inputs::setup)
}
