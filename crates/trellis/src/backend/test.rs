use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{
    backend::Backend,
    canvas::Canvas,
    error::{Error, Result},
    event::{Event, key::Key},
    geom::Expanse,
};

/// What a `TestBackend` observed.
#[derive(Debug, Default)]
pub struct TestOutput {
    /// The last frame drawn.
    pub canvas: Option<Canvas>,
    /// Number of frames drawn.
    pub frames: usize,
    /// Number of start calls.
    pub starts: usize,
    /// Number of stop calls.
    pub stops: usize,
}

/// A backend that replays a script of keys and captures frames. When the
/// script runs out, it reports `Error::Quit`, which ends the main loop.
#[derive(Debug)]
pub struct TestBackend {
    /// Terminal size reported to the main loop.
    size: Expanse,
    /// Keys still to deliver.
    keys: VecDeque<Key>,
    /// Shared record of what was drawn.
    output: Arc<Mutex<TestOutput>>,
}

impl TestBackend {
    /// Create returns the shared `TestOutput` and the backend that writes to
    /// it.
    pub fn create(
        size: Expanse,
        keys: impl IntoIterator<Item = Key>,
    ) -> (Arc<Mutex<TestOutput>>, Self) {
        let output = Arc::new(Mutex::new(TestOutput::default()));
        (
            output.clone(),
            Self {
                size,
                keys: keys.into_iter().collect(),
                output,
            },
        )
    }

    /// Lock the shared output.
    fn output(&self) -> Result<MutexGuard<'_, TestOutput>> {
        self.output
            .lock()
            .map_err(|e| Error::Render(e.to_string()))
    }
}

impl Backend for TestBackend {
    fn start(&mut self) -> Result<()> {
        self.output()?.starts += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.output()?.stops += 1;
        Ok(())
    }

    fn size(&self) -> Result<Expanse> {
        Ok(self.size)
    }

    fn draw(&mut self, canvas: &Canvas) -> Result<()> {
        let mut out = self.output()?;
        out.canvas = Some(canvas.clone());
        out.frames += 1;
        Ok(())
    }

    fn next_event(&mut self) -> Result<Event> {
        self.keys.pop_front().map(Event::Key).ok_or(Error::Quit)
    }
}
