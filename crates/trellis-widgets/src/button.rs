//! Push button.

use std::{cell::RefCell, rc::Rc};

use trellis::{
    Handler, Handlers, Screen,
    error::Result,
    event::key::Key,
    geom::Geometry,
    style::{Attr, Color},
};

use crate::widget::{Attributes, Widget, WidgetKind, bind_all, remove_region, text_width};

/// Shared button state.
struct ButtonState {
    /// Label, also the region name.
    label: String,
    /// Region geometry.
    position: Geometry,
    /// Text and highlight colors.
    attrs: Attributes,
    /// Key handlers bound on the button region.
    handlers: Handlers,
}

/// A single-line button. The caller decides what a press means by binding
/// handlers, usually on Enter.
#[derive(Clone)]
pub struct Button {
    /// Shared state.
    inner: Rc<RefCell<ButtonState>>,
}

impl Button {
    /// Construct a button at `(x, y)`. The width grows to fit the label.
    pub fn new(label: &str, x: i32, y: i32, width: i32) -> Self {
        let width = width.max(text_width(label) + 1);
        Self {
            inner: Rc::new(RefCell::new(ButtonState {
                label: label.to_string(),
                position: Geometry::new(x, y, x + width + 2, y + 2),
                attrs: Attributes {
                    text_color: Color::White.bold(),
                    text_bg: Color::Blue.into(),
                    highlight: Color::Blue.bold(),
                    highlight_bg: Color::White.into(),
                    ..Default::default()
                },
                handlers: Handlers::new(),
            })),
        }
    }

    /// Bind a handler on the button.
    pub fn with_handler(self, key: impl Into<Key>, handler: Handler) -> Self {
        self.add_handler_only(key.into(), handler);
        self
    }

    /// Set the label colors.
    pub fn with_text_color(self, fg: impl Into<Attr>, bg: impl Into<Attr>) -> Self {
        {
            let mut st = self.inner.borrow_mut();
            st.attrs.text_color = fg.into();
            st.attrs.text_bg = bg.into();
        }
        self
    }

    /// Set the colors used while the button has focus.
    pub fn with_highlight_color(self, fg: impl Into<Attr>, bg: impl Into<Attr>) -> Self {
        {
            let mut st = self.inner.borrow_mut();
            st.attrs.highlight = fg.into();
            st.attrs.highlight_bg = bg.into();
        }
        self
    }
}

impl Widget for Button {
    fn label(&self) -> String {
        self.inner.borrow().label.clone()
    }

    fn position(&self) -> Geometry {
        self.inner.borrow().position
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Button
    }

    fn focus(&self, screen: &mut Screen) -> Result<()> {
        screen.set_cursor(false);
        let st = self.inner.borrow();
        screen.set_current(&st.label)?.highlight = true;
        Ok(())
    }

    fn unfocus(&self, screen: &mut Screen) -> Result<()> {
        let st = self.inner.borrow();
        screen.region_mut(&st.label)?.highlight = false;
        Ok(())
    }

    fn draw(&self, screen: &mut Screen) -> Result<()> {
        {
            let st = self.inner.borrow();
            let placement = screen.set_region(&st.label, st.position)?;
            if placement.is_created() {
                let r = placement.region();
                r.frame = false;
                r.fg = st.attrs.text_color;
                r.bg = st.attrs.text_bg;
                r.sel_fg = st.attrs.highlight;
                r.sel_bg = st.attrs.highlight_bg;
                r.write(&format!(" {} ", st.label));
            }
            bind_all(screen, &st.label, &st.handlers)?;
        }
        if screen.current().is_none() {
            self.focus(screen)?;
        }
        Ok(())
    }

    fn close(&self, screen: &mut Screen) -> Result<()> {
        let st = self.inner.borrow();
        screen.delete_keybindings(&st.label);
        remove_region(screen, &st.label)
    }

    fn add_handler_only(&self, key: Key, handler: Handler) {
        self.inner.borrow_mut().handlers.insert(key, handler);
    }

    fn has_focus(&self, screen: &Screen) -> bool {
        screen.current() == Some(self.inner.borrow().label.as_str())
    }
}
