use std::{
    io::{self, Stderr, Write},
    panic,
};

use color_backtrace::{BacktracePrinter, default_output_stream};
use crossterm::{
    self, ExecutableCommand, QueueableCommand, cursor as ccursor, event as cevent, style, terminal,
};
use scopeguard::guard;

use crate::{
    Screen,
    backend::Backend,
    canvas::{CONTINUATION, Canvas},
    error::{self, Result},
    event::{Event, key},
    geom::Expanse,
    runloop::{RunloopOptions, main_loop_with_options},
    style::{Attr, Color, Style},
};

/// Translate a trellis color into a crossterm color.
fn translate_color(c: Color) -> style::Color {
    match c {
        Color::Default => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::AnsiValue(a) => style::Color::AnsiValue(a),
    }
}

/// Map IO results into trellis errors.
fn translate_result<T>(e: io::Result<T>) -> Result<T> {
    match e {
        Ok(t) => Ok(t),
        Err(e) => Err(error::Error::Render(e.to_string())),
    }
}

/// Crossterm-backed terminal.
#[derive(Debug)]
pub struct CrosstermBackend {
    /// Stderr handle used for rendering output.
    fp: Stderr,
    /// Style of the last cell written.
    last: Option<Style>,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self {
            fp: io::stderr(),
            last: None,
        }
    }
}

impl CrosstermBackend {
    /// Enter alternate screen and raw mode.
    fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.fp.execute(terminal::EnterAlternateScreen)?;
        self.fp.execute(ccursor::Hide)?;
        Ok(())
    }

    /// Leave alternate screen and restore terminal state.
    fn exit(&mut self) -> io::Result<()> {
        self.fp.execute(terminal::LeaveAlternateScreen)?;
        self.fp.execute(ccursor::Show)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Apply a style to subsequent output.
    fn apply_style(&mut self, s: &Style) -> io::Result<()> {
        // Reset clears everything, so colors are set after it.
        self.fp
            .queue(style::SetAttribute(style::Attribute::Reset))?;
        self.fp
            .queue(style::SetForegroundColor(fg_color(s.fg)))?;
        self.fp
            .queue(style::SetBackgroundColor(translate_color(s.bg.color)))?;
        if s.fg.bold {
            self.fp.queue(style::SetAttribute(style::Attribute::Bold))?;
        }
        Ok(())
    }

    /// Queue a whole canvas and flush it.
    fn paint(&mut self, canvas: &Canvas) -> io::Result<()> {
        self.last = None;
        let size = canvas.size();
        for y in 0..size.h {
            self.fp.queue(ccursor::MoveTo(0, y as u16))?;
            for x in 0..size.w {
                let Some(cell) = canvas.get((x as i32, y as i32).into()) else {
                    continue;
                };
                if cell.ch == CONTINUATION {
                    continue;
                }
                if self.last != Some(cell.style) {
                    self.apply_style(&cell.style)?;
                    self.last = Some(cell.style);
                }
                self.fp.queue(style::Print(cell.ch))?;
            }
        }
        match canvas.cursor() {
            Some(p) => {
                self.fp.queue(ccursor::MoveTo(p.x as u16, p.y as u16))?;
                self.fp.queue(ccursor::Show)?;
            }
            None => {
                self.fp.queue(ccursor::Hide)?;
            }
        }
        self.fp.flush()
    }
}

/// Bright variants for bold text, matching how most terminals render bold.
fn fg_color(a: Attr) -> style::Color {
    match (a.color, a.bold) {
        (Color::White, true) => style::Color::White,
        (c, _) => translate_color(c),
    }
}

impl Backend for CrosstermBackend {
    fn start(&mut self) -> Result<()> {
        translate_result(self.enter())
    }

    fn stop(&mut self) -> Result<()> {
        translate_result(self.exit())
    }

    fn size(&self) -> Result<Expanse> {
        translate_result(terminal::size()).map(Expanse::from)
    }

    fn draw(&mut self, canvas: &Canvas) -> Result<()> {
        translate_result(self.paint(canvas))
    }

    fn next_event(&mut self) -> Result<Event> {
        loop {
            let e = translate_result(cevent::read())?;
            if let Some(e) = translate_event(e) {
                return Ok(e);
            }
        }
    }
}

/// Translate crossterm key modifiers into trellis modifiers.
fn translate_key_modifiers(mods: cevent::KeyModifiers) -> key::Mods {
    key::Mods {
        shift: mods.contains(cevent::KeyModifiers::SHIFT),
        ctrl: mods.contains(cevent::KeyModifiers::CONTROL),
        alt: mods.contains(cevent::KeyModifiers::ALT),
    }
}

/// Translate a crossterm key code. Keys trellis has no use for are dropped.
fn translate_key_code(c: cevent::KeyCode) -> Option<key::KeyCode> {
    Some(match c {
        cevent::KeyCode::Backspace => key::KeyCode::Backspace,
        cevent::KeyCode::Enter => key::KeyCode::Enter,
        cevent::KeyCode::Left => key::KeyCode::Left,
        cevent::KeyCode::Right => key::KeyCode::Right,
        cevent::KeyCode::Up => key::KeyCode::Up,
        cevent::KeyCode::Down => key::KeyCode::Down,
        cevent::KeyCode::Home => key::KeyCode::Home,
        cevent::KeyCode::End => key::KeyCode::End,
        cevent::KeyCode::PageUp => key::KeyCode::PageUp,
        cevent::KeyCode::PageDown => key::KeyCode::PageDown,
        cevent::KeyCode::Tab => key::KeyCode::Tab,
        cevent::KeyCode::BackTab => key::KeyCode::BackTab,
        cevent::KeyCode::Delete => key::KeyCode::Delete,
        cevent::KeyCode::Insert => key::KeyCode::Insert,
        cevent::KeyCode::F(x) => key::KeyCode::F(x),
        cevent::KeyCode::Char(c) => key::KeyCode::Char(c),
        cevent::KeyCode::Null => key::KeyCode::Null,
        cevent::KeyCode::Esc => key::KeyCode::Esc,
        _ => return None,
    })
}

/// Translate a crossterm event into a trellis event.
fn translate_event(e: cevent::Event) -> Option<Event> {
    match e {
        cevent::Event::Key(k) if k.kind != cevent::KeyEventKind::Release => {
            Some(Event::Key(key::Key {
                mods: translate_key_modifiers(k.modifiers),
                key: translate_key_code(k.code)?,
            }))
        }
        cevent::Event::Resize(x, y) => Some(Event::Resize(Expanse::new(x.into(), y.into()))),
        _ => None,
    }
}

/// Run the main loop on the terminal.
pub fn runloop(screen: &mut Screen) -> Result<()> {
    runloop_with_options(screen, RunloopOptions::default())
}

/// Run the main loop on the terminal with custom options.
pub fn runloop_with_options(screen: &mut Screen, options: RunloopOptions) -> Result<()> {
    let _panic_hook = if options.install_panic_hook {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|pi| {
            let mut stderr = io::stderr();
            #[allow(unused_must_use)]
            {
                crossterm::execute!(stderr, terminal::LeaveAlternateScreen, ccursor::Show);
                terminal::disable_raw_mode();
                BacktracePrinter::new().print_panic_info(pi, &mut default_output_stream());
            }
        }));
        Some(guard(previous, |hook| {
            panic::set_hook(hook);
        }))
    } else {
        None
    };

    let mut be = CrosstermBackend::default();
    main_loop_with_options(screen, &mut be, options)
}
