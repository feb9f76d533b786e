//! Launch the sign-up form demo.

use clap::Parser;
use trellis_examples::{Args, run, signup};

/// Run the sign-up form demo.
pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run(&args, signup::setup)
}
