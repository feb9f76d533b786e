//! Launch the radio demo.

use clap::Parser;
use trellis_examples::{Args, radios, run};

/// Run the radio demo.
pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run(&args, radios::setup)
}
