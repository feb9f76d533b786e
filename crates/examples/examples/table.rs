//! Launch the table demo.

use clap::Parser;
use trellis_examples::{Args, run, table};

/// Run the table demo.
pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run(&args, table::setup)
}
