use std::io::{self, Write};

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{
    Screen,
    error::{Error, Result},
};

/// Map buffer write failures into trellis errors.
fn write_err(e: io::Error) -> Error {
    Error::Render(e.to_string())
}

/// Lists every region in draw order with its geometry, flags and bindings.
/// This is a debug function, used when the main loop stops on an error.
pub fn dump(screen: &Screen) -> Result<String> {
    let mut buffer = Buffer::ansi();
    for r in screen.regions() {
        let focused = screen.current() == Some(r.name());
        buffer
            .set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))
            .map_err(write_err)?;
        write!(buffer, "{}", r.name()).map_err(write_err)?;
        buffer.reset().map_err(write_err)?;

        let g = r.geometry();
        write!(buffer, " ({}, {}) - ({}, {})", g.x, g.y, g.w, g.h).map_err(write_err)?;

        let mut indicators = vec![];
        if focused {
            indicators.push("FOCUSED");
        }
        if r.editable {
            indicators.push("editable");
        }
        if r.highlight {
            indicators.push("highlight");
        }
        if !indicators.is_empty() {
            buffer
                .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))
                .map_err(write_err)?;
            write!(buffer, " [{}]", indicators.join(", ")).map_err(write_err)?;
            buffer.reset().map_err(write_err)?;
        }
        writeln!(buffer).map_err(write_err)?;
    }
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Expanse, Geometry};

    #[test]
    fn lists_regions() -> Result<()> {
        let mut s = Screen::new(Expanse::new(20, 5));
        s.set_region("one", Geometry::new(0, 0, 5, 2))?;
        s.set_region("two", Geometry::new(0, 2, 5, 4))?;
        s.set_current("two")?;
        let out = dump(&s)?;
        assert!(out.contains("one"));
        assert!(out.contains("(0, 2) - (5, 4)"));
        assert!(out.contains("FOCUSED"));
        Ok(())
    }
}
