//! The single-threaded event loop.

use crate::{
    Screen,
    backend::{Backend, TerminalSession},
    canvas::Canvas,
    dump::dump,
    error::{Error, Result},
    event::{Event, key},
};

/// Ctrl+C handling policy for the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtrlCBehavior {
    /// Stop the main loop.
    Exit,
    /// Print the region list and stop the main loop.
    DumpAndExit,
    /// Deliver Ctrl+C to handlers like any other key.
    Deliver,
}

/// Options for configuring the main loop.
#[derive(Debug, Clone, Copy)]
pub struct RunloopOptions {
    /// Install a panic hook that restores the terminal before printing a
    /// backtrace. Only the crossterm runloop honours this.
    pub install_panic_hook: bool,
    /// Configure how Ctrl+C is handled.
    pub ctrl_c: CtrlCBehavior,
}

impl RunloopOptions {
    /// Construct options that dump the region list before exiting on Ctrl+C.
    pub fn ctrlc_dump() -> Self {
        Self {
            ctrl_c: CtrlCBehavior::DumpAndExit,
            ..Self::default()
        }
    }
}

impl Default for RunloopOptions {
    fn default() -> Self {
        Self {
            install_panic_hook: false,
            ctrl_c: CtrlCBehavior::Exit,
        }
    }
}

/// Stop the session and print the error with the region list.
fn handle_error(error: Error, screen: &Screen, session: &mut TerminalSession<'_>) -> Error {
    drop(session.stop());
    eprintln!("Error: {error}");
    eprintln!("\nRegions:");
    match dump(screen) {
        Ok(s) => eprintln!("{s}"),
        Err(e) => eprintln!("Failed to dump regions: {e}"),
    }
    error
}

/// Run the main loop with default options.
pub fn main_loop(screen: &mut Screen, backend: &mut dyn Backend) -> Result<()> {
    main_loop_with_options(screen, backend, RunloopOptions::default())
}

/// Draw, wait for one event, dispatch it, repeat. A handler returning
/// `Error::Quit` ends the loop cleanly; any other error stops the terminal and
/// is returned.
pub fn main_loop_with_options(
    screen: &mut Screen,
    backend: &mut dyn Backend,
    options: RunloopOptions,
) -> Result<()> {
    let mut session = TerminalSession::new(backend)?;
    let size = session.backend().size()?;
    screen.set_size(size);

    loop {
        let canvas = Canvas::render(screen);
        if let Err(e) = session.backend().draw(&canvas) {
            return Err(handle_error(e, screen, &mut session));
        }

        let event = match session.backend().next_event() {
            Ok(e) => e,
            Err(Error::Quit) => break,
            Err(e) => return Err(handle_error(e, screen, &mut session)),
        };

        if options.ctrl_c != CtrlCBehavior::Deliver
            && matches!(
                &event,
                Event::Key(key::Key {
                    key: key::KeyCode::Char('c'),
                    mods: key::Mods { ctrl: true, .. },
                })
            )
        {
            session.stop()?;
            if options.ctrl_c == CtrlCBehavior::DumpAndExit {
                eprintln!("\nCtrl+C pressed - regions:");
                match dump(screen) {
                    Ok(s) => eprintln!("{s}"),
                    Err(e) => eprintln!("Failed to dump regions: {e}"),
                }
            }
            return Ok(());
        }

        match screen.handle_event(event) {
            Ok(()) => {}
            Err(Error::Quit) => break,
            Err(e) => return Err(handle_error(e, screen, &mut session)),
        }
    }
    session.stop()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::test::TestBackend,
        event::key::{Ctrl, Key, KeyCode},
        geom::{Expanse, Geometry},
        handler::handler,
    };

    fn screen() -> Result<Screen> {
        let mut s = Screen::new(Expanse::new(1, 1));
        let r = s.set_region("a", Geometry::new(0, 0, 10, 2))?.region();
        r.frame = false;
        s.set_current("a")?;
        s.set_keybinding(
            "a",
            'x',
            handler(|s, region| {
                s.region_mut(region)?.write("x");
                Ok(())
            }),
        )?;
        s.set_keybinding("a", KeyCode::Esc, handler(|_, _| Err(Error::Quit)))?;
        s.set_keybinding(
            "a",
            'e',
            handler(|_, _| Err(Error::Handler("boom".into()))),
        )?;
        Ok(s)
    }

    #[test]
    fn runs_until_script_ends() -> Result<()> {
        let mut s = screen()?;
        let (out, mut be) = TestBackend::create(Expanse::new(20, 3), vec![Key::from('x'); 2]);
        main_loop(&mut s, &mut be)?;
        let out = out.lock().map_err(|e| Error::Render(e.to_string()))?;
        assert_eq!(out.frames, 3);
        assert_eq!((out.starts, out.stops), (1, 1));
        assert!(out.canvas.as_ref().is_some_and(|c| c.contains("xx")));
        assert_eq!(s.size(), Expanse::new(20, 3));
        Ok(())
    }

    #[test]
    fn quit_and_ctrl_c() -> Result<()> {
        let mut s = screen()?;
        let (_, mut be) = TestBackend::create(
            Expanse::new(20, 3),
            vec![KeyCode::Esc.into(), Key::from('x')],
        );
        main_loop(&mut s, &mut be)?;
        assert_eq!(s.region("a")?.buffer(), "");

        let (out, mut be) =
            TestBackend::create(Expanse::new(20, 3), vec![Ctrl + 'c', Key::from('x')]);
        main_loop(&mut s, &mut be)?;
        assert_eq!(s.region("a")?.buffer(), "");
        let out = out.lock().map_err(|e| Error::Render(e.to_string()))?;
        assert_eq!(out.stops, 1);
        Ok(())
    }

    #[test]
    fn handler_error_stops() -> Result<()> {
        let mut s = screen()?;
        let (out, mut be) = TestBackend::create(
            Expanse::new(20, 3),
            vec![Key::from('e'), Key::from('x')],
        );
        assert_eq!(
            main_loop(&mut s, &mut be),
            Err(Error::Handler("boom".into()))
        );
        assert_eq!(s.region("a")?.buffer(), "");
        let out = out.lock().map_err(|e| Error::Render(e.to_string()))?;
        assert_eq!(out.stops, 1);
        Ok(())
    }
}
