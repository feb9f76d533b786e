//! Launch the button demo.

use clap::Parser;
use trellis_examples::{Args, buttons, run};

/// Run the button demo.
pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run(&args, buttons::setup)
}
