//! Rendering back-ends.

/// Crossterm backend implementation.
pub mod crossterm;
/// In-memory backend for tests.
#[cfg(any(test, feature = "testing"))]
pub mod test;

use std::fmt::Debug;

use crate::{canvas::Canvas, error::Result, event::Event, geom::Expanse};

/// A terminal the main loop draws into and reads events from.
pub trait Backend: Debug {
    /// Take control of the terminal.
    fn start(&mut self) -> Result<()>;

    /// Release control of the terminal.
    fn stop(&mut self) -> Result<()>;

    /// Current terminal size.
    fn size(&self) -> Result<Expanse>;

    /// Draw a complete frame.
    fn draw(&mut self, canvas: &Canvas) -> Result<()>;

    /// Block until the next event arrives.
    fn next_event(&mut self) -> Result<Event>;
}

/// Guard that ensures backend start/stop are paired for a terminal session.
pub(crate) struct TerminalSession<'a> {
    /// Backend under control.
    backend: &'a mut dyn Backend,
    /// Whether the session has an active backend start.
    active: bool,
}

impl<'a> TerminalSession<'a> {
    /// Start the backend and create a new session guard.
    pub(crate) fn new(backend: &'a mut dyn Backend) -> Result<Self> {
        backend.start()?;
        Ok(Self {
            backend,
            active: true,
        })
    }

    /// The backend under control.
    pub(crate) fn backend(&mut self) -> &mut dyn Backend {
        &mut *self.backend
    }

    /// Stop the backend if the session is active.
    pub(crate) fn stop(&mut self) -> Result<()> {
        if self.active {
            self.active = false;
            self.backend.stop()?;
        }
        Ok(())
    }
}

impl Drop for TerminalSession<'_> {
    fn drop(&mut self) {
        if self.active {
            drop(self.backend.stop());
            self.active = false;
        }
    }
}
