//! Named rectangular areas of the screen.

use std::{fmt, rc::Rc};

use crate::{
    geom::{Geometry, Point},
    handler::Editor,
    style::{Attr, Color},
};

/// A named, independently addressable area of the display. Regions own a
/// line buffer with an edit cursor and the attributes used to draw it.
pub struct Region {
    /// Unique name.
    name: String,
    /// Corner geometry.
    geometry: Geometry,
    /// Title drawn into the top edge when framed.
    pub title: String,
    /// Draw a border on the edges.
    pub frame: bool,
    /// Wrap long lines instead of clipping them.
    pub wrap: bool,
    /// Deliver unbound keys to the editor.
    pub editable: bool,
    /// Draw the cursor row with the selection colors.
    pub highlight: bool,
    /// Text color.
    pub fg: Attr,
    /// Fill color.
    pub bg: Attr,
    /// Text color of the highlighted row.
    pub sel_fg: Attr,
    /// Fill color of the highlighted row.
    pub sel_bg: Attr,
    /// Glyph displayed in place of every character.
    pub mask: Option<char>,
    /// Receives unbound keys when editable.
    editor: Option<Rc<dyn Editor>>,
    /// Buffer contents, one entry per line.
    lines: Vec<Vec<char>>,
    /// Edit cursor: column and line within the buffer.
    cursor: Point,
}

impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("name", &self.name)
            .field("geometry", &self.geometry)
            .field("editable", &self.editable)
            .field("highlight", &self.highlight)
            .field("mask", &self.mask)
            .field("buffer", &self.buffer())
            .finish()
    }
}

impl Region {
    /// Construct an empty region.
    pub(crate) fn new(name: &str, geometry: Geometry) -> Self {
        Self {
            name: name.to_string(),
            geometry,
            title: String::new(),
            frame: true,
            wrap: false,
            editable: false,
            highlight: false,
            fg: Attr::default(),
            bg: Attr::default(),
            sel_fg: Color::Black.into(),
            sel_bg: Color::Green.into(),
            mask: None,
            editor: None,
            lines: vec![],
            cursor: Point::zero(),
        }
    }

    /// The region's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The region's geometry.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Move or resize the region.
    pub(crate) fn set_geometry(&mut self, g: Geometry) {
        self.geometry = g;
    }

    /// Install the editor that receives unbound keys.
    pub fn set_editor(&mut self, editor: Rc<dyn Editor>) {
        self.editor = Some(editor);
    }

    /// The installed editor, if the region is editable.
    pub(crate) fn active_editor(&self) -> Option<Rc<dyn Editor>> {
        if self.editable {
            self.editor.clone()
        } else {
            None
        }
    }

    /// Append text at the end of the buffer. A newline starts a new line.
    pub fn write(&mut self, s: &str) {
        if self.lines.is_empty() {
            self.lines.push(vec![]);
        }
        for ch in s.chars() {
            if ch == '\n' {
                self.lines.push(vec![]);
            } else if let Some(l) = self.lines.last_mut() {
                l.push(ch);
            }
        }
    }

    /// Empty the buffer and reset the cursor.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.cursor = Point::zero();
    }

    /// The buffer contents. Every line is terminated by a newline.
    pub fn buffer(&self) -> String {
        let mut s = String::new();
        for l in &self.lines {
            s.extend(l.iter());
            s.push('\n');
        }
        s
    }

    /// The buffer as displayed: one string per line, with the mask applied.
    pub fn display_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|l| match self.mask {
                Some(m) => l.iter().map(|_| m).collect(),
                None => l.iter().collect(),
            })
            .collect()
    }

    /// The edit cursor.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Index of the cursor line, creating it if the buffer is empty.
    fn cursor_line(&mut self) -> usize {
        if self.lines.is_empty() {
            self.lines.push(vec![]);
        }
        let cy = (self.cursor.y.max(0) as usize).min(self.lines.len() - 1);
        self.cursor.y = cy as i32;
        cy
    }

    /// Insert a character at the cursor and advance it.
    pub fn edit_write(&mut self, ch: char) {
        let cy = self.cursor_line();
        let line = &mut self.lines[cy];
        let cx = (self.cursor.x.max(0) as usize).min(line.len());
        if ch == '\n' {
            let rest = line.split_off(cx);
            self.lines.insert(cy + 1, rest);
            self.cursor = Point {
                x: 0,
                y: cy as i32 + 1,
            };
        } else {
            line.insert(cx, ch);
            self.cursor.x = cx as i32 + 1;
        }
    }

    /// Delete the character before the cursor when `back` is set, otherwise
    /// the character under it. Deleting across a line boundary joins lines.
    pub fn edit_delete(&mut self, back: bool) {
        let cy = self.cursor_line();
        let cx = (self.cursor.x.max(0) as usize).min(self.lines[cy].len());
        if back {
            if cx > 0 {
                self.lines[cy].remove(cx - 1);
                self.cursor.x = cx as i32 - 1;
            } else if cy > 0 {
                let line = self.lines.remove(cy);
                let prev = &mut self.lines[cy - 1];
                self.cursor = Point {
                    x: prev.len() as i32,
                    y: cy as i32 - 1,
                };
                prev.extend(line);
            }
        } else if cx < self.lines[cy].len() {
            self.lines[cy].remove(cx);
        } else if cy + 1 < self.lines.len() {
            let next = self.lines.remove(cy + 1);
            self.lines[cy].extend(next);
        }
    }

    /// Put the cursor after the last character of the last line.
    pub fn cursor_to_end(&mut self) {
        let y = self.lines.len().saturating_sub(1);
        let x = self.lines.get(y).map_or(0, Vec::len);
        self.cursor = Point {
            x: x as i32,
            y: y as i32,
        };
    }

    /// Move the cursor horizontally within the current line.
    pub fn move_cursor(&mut self, dx: i32) {
        let cy = self.cursor_line();
        let len = self.lines[cy].len() as i32;
        self.cursor.x = (self.cursor.x + dx).clamp(0, len);
    }

    /// Switch masking with `ch` on or off.
    pub fn toggle_mask(&mut self, ch: char) {
        self.mask = match self.mask {
            Some(_) => None,
            None => Some(ch),
        };
    }
}
