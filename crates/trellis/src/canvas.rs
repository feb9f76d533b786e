//! Rasterise the screen's regions into a grid of styled cells.

use unicode_width::UnicodeWidthChar;

use crate::{
    Screen,
    geom::{Expanse, Frame, Point},
    region::Region,
    style::Style,
};

/// Marks the trailing cells of a wide glyph.
pub const CONTINUATION: char = '\0';

/// A terminal cell with glyph and style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Cell {
    /// Glyph.
    pub ch: char,
    /// Style applied to the cell.
    pub style: Style,
}

/// A full frame of output, ready for a backend to draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    /// Canvas size.
    size: Expanse,
    /// Cells in row-major order.
    cells: Vec<Cell>,
    /// Cursor location, if it should be shown.
    cursor: Option<Point>,
}

impl Canvas {
    /// A blank canvas.
    pub fn new(size: Expanse) -> Self {
        Self {
            size,
            cells: vec![
                Cell {
                    ch: ' ',
                    style: Style::default(),
                };
                size.area() as usize
            ],
            cursor: None,
        }
    }

    /// Draw every region of the screen, in creation order.
    pub fn render(screen: &Screen) -> Self {
        let mut c = Self::new(screen.size());
        for r in screen.regions() {
            c.region(r);
        }
        c.cursor = screen.cursor_position().filter(|p| c.size.contains(*p));
        c
    }

    /// Canvas size.
    pub fn size(&self) -> Expanse {
        self.size
    }

    /// Cursor location.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// The cell at a location.
    pub fn get(&self, p: Point) -> Option<&Cell> {
        if self.size.contains(p) {
            self.cells
                .get(p.y as usize * self.size.w as usize + p.x as usize)
        } else {
            None
        }
    }

    /// Set a cell, clipping at the canvas edges.
    fn put(&mut self, p: Point, ch: char, style: Style) {
        if self.size.contains(p) {
            let i = p.y as usize * self.size.w as usize + p.x as usize;
            self.cells[i] = Cell { ch, style };
        }
    }

    /// The text of one row, with trailing whitespace removed.
    pub fn row(&self, y: u32) -> String {
        let w = self.size.w as usize;
        let start = y as usize * w;
        self.cells
            .get(start..start + w)
            .map(|cells| {
                cells
                    .iter()
                    .filter(|c| c.ch != CONTINUATION)
                    .map(|c| c.ch)
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .unwrap_or_default()
    }

    /// Every row of text.
    pub fn lines(&self) -> Vec<String> {
        (0..self.size.h).map(|y| self.row(y)).collect()
    }

    /// Does any row contain the text?
    pub fn contains(&self, s: &str) -> bool {
        self.lines().iter().any(|l| l.contains(s))
    }

    /// Draw one region.
    fn region(&mut self, r: &Region) {
        let g = r.geometry();
        let normal = Style { fg: r.fg, bg: r.bg };
        let selected = Style {
            fg: r.sel_fg,
            bg: r.sel_bg,
        };
        let width = g.inner_width() as usize;
        let origin = g.content_origin();

        let mut rows: Vec<String> = vec![];
        for line in r.display_lines() {
            if r.wrap && width > 0 {
                rows.extend(textwrap::wrap(&line, width).into_iter().map(|l| l.into_owned()));
            } else {
                rows.push(line);
            }
        }

        for dy in 0..g.inner_height() as i32 {
            let style = if r.highlight && dy == r.cursor().y {
                selected
            } else {
                normal
            };
            let y = origin.y + dy;
            for dx in 0..width as i32 {
                self.put(Point { x: origin.x + dx, y }, ' ', style);
            }
            if let Some(text) = rows.get(dy as usize) {
                self.text(Point { x: origin.x, y }, text, width, style);
            }
        }

        if r.frame {
            self.frame(r, normal);
        }
    }

    /// Write text into a row, clipped to `width` columns.
    fn text(&mut self, at: Point, text: &str, width: usize, style: Style) {
        let mut col = 0;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0).max(1);
            if col + w > width {
                break;
            }
            self.put(at.shift(col as i32, 0), ch, style);
            for extra in 1..w {
                self.put(at.shift((col + extra) as i32, 0), CONTINUATION, style);
            }
            col += w;
        }
    }

    /// Draw a region's border and title.
    fn frame(&mut self, r: &Region, style: Style) {
        let f = Frame::new(r.geometry());
        for p in f.top().chain(f.bottom()) {
            self.put(p, '─', style);
        }
        for p in f.left().chain(f.right()) {
            self.put(p, '│', style);
        }
        self.put(f.topleft(), '┌', style);
        self.put(f.topright(), '┐', style);
        self.put(f.bottomleft(), '└', style);
        self.put(f.bottomright(), '┘', style);
        if !r.title.is_empty() {
            let room = r.geometry().width().saturating_sub(3).max(0) as usize;
            self.text(f.topleft().shift(2, 0), &r.title, room, style);
        }
    }
}
