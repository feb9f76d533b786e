//! Launch the check box demo.

use clap::Parser;
use trellis_examples::{Args, checkboxes, run};

/// Run the check box demo.
pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run(&args, checkboxes::setup)
}
