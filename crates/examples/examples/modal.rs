//! Launch the modal demo.

use clap::Parser;
use trellis_examples::{Args, modal, run};

/// Run the modal demo.
pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run(&args, modal::setup)
}
