//! Header/row grid.

use std::{cell::RefCell, rc::Rc};

use trellis::{
    Handler, Handlers, Screen,
    error::Result,
    event::key::Key,
    geom::Geometry,
    style::{Attr, Color},
};

use crate::widget::{Attributes, Widget, WidgetKind, bind_all, part, remove_region};

/// A column heading and its width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHeader {
    /// Heading text.
    pub value: String,
    /// Column width.
    pub width: i32,
}

impl TableHeader {
    /// Construct a header.
    pub fn new(value: &str, width: i32) -> Self {
        Self {
            value: value.to_string(),
            width,
        }
    }
}

/// One cell of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    /// Cell text.
    pub value: String,
    /// Cell width.
    pub width: i32,
}

/// A row of cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    /// Cells, left to right.
    pub cells: Vec<TableCell>,
}

/// Shared table state.
struct TableState {
    /// Table name, also the frame region name and title.
    name: String,
    /// Frame geometry.
    position: Geometry,
    /// Column headers.
    headers: Vec<TableHeader>,
    /// Rows.
    rows: Vec<TableRow>,
    /// Header colors.
    header_attrs: Attributes,
    /// Row colors.
    row_attrs: Attributes,
    /// Key handlers bound on the frame region.
    handlers: Handlers,
}

impl TableState {
    /// Header columns that fit inside the frame, with their geometry. Columns
    /// are laid out left to right and the first one that would cross the
    /// frame's right edge ends the row.
    fn columns(&self) -> Vec<(usize, Geometry)> {
        let mut cols = vec![];
        let mut x = self.position.x;
        for (i, h) in self.headers.iter().enumerate() {
            if i > 0 {
                x += self.headers[i - 1].width;
            }
            let w = x + h.width;
            if w > self.position.w {
                break;
            }
            cols.push((i, Geometry::new(x, self.position.y, w, self.position.y + 2)));
        }
        cols
    }

    /// Region name of header `i`.
    fn header_region(&self, i: usize) -> String {
        part(&self.name, &format!("h{i}"))
    }
}

/// A framed, titled table. Only the header row is drawn; rows are collected
/// but have no display or focus of their own.
#[derive(Clone)]
pub struct Table {
    /// Shared state.
    inner: Rc<RefCell<TableState>>,
}

impl Table {
    /// Construct a table at `(x, y)` spanning `w` columns and `h` rows.
    pub fn new(name: &str, x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(TableState {
                name: name.to_string(),
                position: Geometry::new(x, y, x + w, y + h),
                headers: vec![],
                rows: vec![],
                header_attrs: Attributes::text(Color::Yellow.bold(), Color::Default),
                row_attrs: Attributes::text(Color::Cyan, Color::Default),
                handlers: Handlers::new(),
            })),
        }
    }

    /// Append a header.
    pub fn with_header(self, header: TableHeader) -> Self {
        self.inner.borrow_mut().headers.push(header);
        self
    }

    /// Append several headers.
    pub fn with_headers(self, headers: impl IntoIterator<Item = TableHeader>) -> Self {
        self.inner.borrow_mut().headers.extend(headers);
        self
    }

    /// Append a row.
    pub fn with_row(self, row: TableRow) -> Self {
        self.inner.borrow_mut().rows.push(row);
        self
    }

    /// Append several rows.
    pub fn with_rows(self, rows: impl IntoIterator<Item = TableRow>) -> Self {
        self.inner.borrow_mut().rows.extend(rows);
        self
    }

    /// Set the header colors.
    pub fn with_header_color(self, fg: impl Into<Attr>, bg: impl Into<Attr>) -> Self {
        self.inner.borrow_mut().header_attrs = Attributes::text(fg, bg);
        self
    }

    /// Set the row colors.
    pub fn with_row_color(self, fg: impl Into<Attr>, bg: impl Into<Attr>) -> Self {
        self.inner.borrow_mut().row_attrs = Attributes::text(fg, bg);
        self
    }

    /// Bind a handler on the table frame.
    pub fn with_handler(self, key: impl Into<Key>, handler: Handler) -> Self {
        self.add_handler_only(key.into(), handler);
        self
    }

    /// The headers.
    pub fn headers(&self) -> Vec<TableHeader> {
        self.inner.borrow().headers.clone()
    }

    /// The rows.
    pub fn rows(&self) -> Vec<TableRow> {
        self.inner.borrow().rows.clone()
    }

    /// Row colors.
    pub fn row_color(&self) -> (Attr, Attr) {
        let st = self.inner.borrow();
        (st.row_attrs.text_color, st.row_attrs.text_bg)
    }

    /// Rows have no selection, so this does nothing.
    pub fn next_row(&self, _screen: &mut Screen) -> Result<()> {
        Ok(())
    }

    /// Rows have no selection, so this does nothing.
    pub fn pre_row(&self, _screen: &mut Screen) -> Result<()> {
        Ok(())
    }
}

impl Widget for Table {
    fn label(&self) -> String {
        self.inner.borrow().name.clone()
    }

    fn position(&self) -> Geometry {
        self.inner.borrow().position
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Table
    }

    fn focus(&self, _screen: &mut Screen) -> Result<()> {
        Ok(())
    }

    fn unfocus(&self, _screen: &mut Screen) -> Result<()> {
        Ok(())
    }

    fn draw(&self, screen: &mut Screen) -> Result<()> {
        let st = self.inner.borrow();
        let placement = screen.set_region(&st.name, st.position)?;
        if placement.is_created() {
            placement.region().title = st.name.clone();
        }
        for (i, g) in st.columns() {
            let placement = screen.set_region(&st.header_region(i), g)?;
            if placement.is_created() {
                let r = placement.region();
                let h = &st.headers[i];
                r.frame = false;
                r.fg = st.header_attrs.text_color;
                r.bg = st.header_attrs.text_bg;
                r.write(&format!("{:<width$}", h.value, width = h.width.max(0) as usize));
            }
        }
        bind_all(screen, &st.name, &st.handlers)
    }

    fn close(&self, screen: &mut Screen) -> Result<()> {
        let st = self.inner.borrow();
        screen.delete_keybindings(&st.name);
        remove_region(screen, &st.name)?;
        for i in 0..st.headers.len() {
            remove_region(screen, &st.header_region(i))?;
        }
        Ok(())
    }

    fn add_handler_only(&self, key: Key, handler: Handler) {
        self.inner.borrow_mut().handlers.insert(key, handler);
    }

    fn has_focus(&self, screen: &Screen) -> bool {
        screen.current() == Some(self.inner.borrow().name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use trellis::geom::Expanse;

    use super::*;

    #[test]
    fn truncates_headers() -> Result<()> {
        let mut s = Screen::new(Expanse::new(80, 24));
        let t = Table::new("users", 0, 0, 30, 10)
            .with_headers([
                TableHeader::new("ID", 5),
                TableHeader::new("Name", 15),
                TableHeader::new("Email", 20),
            ])
            .with_row(TableRow {
                cells: vec![TableCell {
                    value: "1".into(),
                    width: 5,
                }],
            });
        t.draw(&mut s)?;
        assert_eq!(s.region("users")?.title, "users");
        assert_eq!(s.region("users:h0")?.geometry(), Geometry::new(0, 0, 5, 2));
        assert_eq!(s.region("users:h1")?.geometry(), Geometry::new(5, 0, 20, 2));
        assert!(!s.has_region("users:h2"));
        assert_eq!(t.rows().len(), 1);
        assert_eq!(s.current(), None);

        t.next_row(&mut s)?;
        t.close(&mut s)?;
        t.close(&mut s)?;
        assert_eq!(s.regions().count(), 0);
        Ok(())
    }
}
