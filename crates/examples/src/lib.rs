//! Demo screens for trellis widgets, and the command line shared by the demo
//! binaries.

use std::{fs::File, path::PathBuf, sync::Mutex};

use clap::Parser;
use trellis::{
    Error, Handler, Screen,
    backend::{
        Backend,
        crossterm::{CrosstermBackend, runloop_with_options},
    },
    event::key::Ctrl,
    handler,
    runloop::RunloopOptions,
};

/// Button demo.
pub mod buttons;
/// Check box demo.
pub mod checkboxes;
/// Input field demo.
pub mod inputs;
/// Modal demo.
pub mod modal;
/// Radio demo.
pub mod radios;
/// Select demo.
pub mod selects;
/// Sign-up form demo.
pub mod signup;
/// Table demo.
pub mod table;

#[cfg(test)]
mod tests;

/// Flags shared by every demo.
#[derive(Parser, Debug, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Write trace logs to this file
    #[clap(short, long)]
    pub log: Option<PathBuf>,

    /// Restore the terminal before printing a panic backtrace
    #[clap(long)]
    pub panic_hook: bool,

    /// Print the region list when Ctrl-C exits
    #[clap(long)]
    pub dump_on_ctrl_c: bool,
}

impl Args {
    /// Main loop options for these flags.
    pub fn options(&self) -> RunloopOptions {
        let mut opts = if self.dump_on_ctrl_c {
            RunloopOptions::ctrlc_dump()
        } else {
            RunloopOptions::default()
        };
        opts.install_panic_hook = self.panic_hook;
        opts
    }
}

/// A handler that ends the main loop.
pub fn quit() -> Handler {
    handler(|_, _| Err(Error::Quit))
}

/// Send trace logs to the file named by `--log`. The terminal itself is
/// never logged to.
pub fn init_logging(args: &Args) -> anyhow::Result<()> {
    if let Some(path) = &args.log {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .init();
    }
    Ok(())
}

/// Build a demo with `setup` on a screen the size of the terminal, then run
/// it until a handler quits. Whatever `setup` returns is kept alive for the
/// whole run, since widget handlers only hold weak references to their
/// widgets.
pub fn run<T>(
    args: &Args,
    setup: impl FnOnce(&mut Screen) -> trellis::Result<T>,
) -> anyhow::Result<()> {
    init_logging(args)?;
    let size = CrosstermBackend::default().size()?;
    let mut screen = Screen::new(size);
    screen.set_keybinding("", Ctrl + 'q', quit())?;
    let _widgets = setup(&mut screen)?;
    tracing::info!(regions = screen.regions().count(), "start");
    runloop_with_options(&mut screen, args.options())?;
    Ok(())
}
