//! Toggle box with a label.

use std::{cell::RefCell, rc::Rc};

use trellis::{
    Handler, Handlers, Screen,
    error::Result,
    event::key::{Key, KeyCode},
    geom::Geometry,
    style::{Attr, Color},
};

use crate::widget::{Attributes, Widget, WidgetKind, bind_all, part, remove_region, weak_handler};

/// Glyph shown in a checked box.
const CHECKED: &str = "X";

/// Shared check box state.
struct CheckBoxState {
    /// Label text, also the name of the box region.
    label: String,
    /// Geometry of the label region.
    label_position: Geometry,
    /// Geometry of the box region.
    position: Geometry,
    /// Is the box checked?
    checked: bool,
    /// Label colors.
    label_attrs: Attributes,
    /// Box colors.
    box_attrs: Attributes,
    /// Key handlers bound on the box region.
    handlers: Handlers,
}

/// A label followed by a one-cell box that toggles on Enter or Space.
#[derive(Clone)]
pub struct CheckBox {
    /// Shared state.
    inner: Rc<RefCell<CheckBoxState>>,
}

impl CheckBox {
    /// Construct a check box at `(x, y)` with a label column `label_width`
    /// wide.
    pub fn new(label: &str, x: i32, y: i32, label_width: i32) -> Self {
        let label_position = Geometry::new(x, y, x + label_width + 1, y + 2);
        let position = Geometry::new(
            label_position.w,
            label_position.y,
            label_position.w + 2,
            label_position.h,
        );
        let inner = Rc::new(RefCell::new(CheckBoxState {
            label: label.to_string(),
            label_position,
            position,
            checked: false,
            label_attrs: Attributes::text(Color::Default, Color::Default),
            box_attrs: Attributes {
                text_color: Color::Black.into(),
                text_bg: Color::White.into(),
                highlight: Color::Black.into(),
                highlight_bg: Color::Green.into(),
                ..Default::default()
            },
            handlers: Handlers::new(),
        }));
        let toggle = weak_handler(&inner, |inner, screen, region| {
            let mut st = inner.borrow_mut();
            st.checked = !st.checked;
            tracing::debug!(label = %st.label, checked = st.checked, "toggle");
            let r = screen.region_mut(region)?;
            r.clear();
            if st.checked {
                r.write(CHECKED);
            }
            Ok(())
        });
        {
            let mut st = inner.borrow_mut();
            st.handlers.insert(KeyCode::Enter.into(), toggle.clone());
            st.handlers.insert(Key::SPACE, toggle);
        }
        Self { inner }
    }

    /// Bind a handler on the box.
    pub fn with_handler(self, key: impl Into<Key>, handler: Handler) -> Self {
        self.add_handler_only(key.into(), handler);
        self
    }

    /// Set the label colors.
    pub fn with_label_color(self, fg: impl Into<Attr>, bg: impl Into<Attr>) -> Self {
        self.inner.borrow_mut().label_attrs = Attributes::text(fg, bg);
        self
    }

    /// Set the box colors.
    pub fn with_box_color(self, fg: impl Into<Attr>, bg: impl Into<Attr>) -> Self {
        {
            let mut st = self.inner.borrow_mut();
            st.box_attrs.text_color = fg.into();
            st.box_attrs.text_bg = bg.into();
        }
        self
    }

    /// Is the box checked?
    pub fn is_checked(&self) -> bool {
        self.inner.borrow().checked
    }
}

impl Widget for CheckBox {
    fn label(&self) -> String {
        self.inner.borrow().label.clone()
    }

    fn position(&self) -> Geometry {
        self.inner.borrow().position
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::CheckBox
    }

    fn focus(&self, screen: &mut Screen) -> Result<()> {
        screen.set_cursor(false);
        screen.set_current(&self.inner.borrow().label)?.highlight = true;
        Ok(())
    }

    fn unfocus(&self, screen: &mut Screen) -> Result<()> {
        screen.region_mut(&self.inner.borrow().label)?.highlight = false;
        Ok(())
    }

    fn draw(&self, screen: &mut Screen) -> Result<()> {
        {
            let st = self.inner.borrow();
            let placement = screen.set_region(&part(&st.label, "label"), st.label_position)?;
            if placement.is_created() {
                let r = placement.region();
                r.frame = false;
                r.fg = st.label_attrs.text_color;
                r.bg = st.label_attrs.text_bg;
                r.write(&st.label);
            }
            let placement = screen.set_region(&st.label, st.position)?;
            if placement.is_created() {
                let r = placement.region();
                r.frame = false;
                r.fg = st.box_attrs.text_color;
                r.bg = st.box_attrs.text_bg;
                r.sel_fg = st.box_attrs.highlight;
                r.sel_bg = st.box_attrs.highlight_bg;
                if st.checked {
                    r.write(CHECKED);
                }
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
        remove_region(screen, &st.label)?;
        remove_region(screen, &part(&st.label, "label"))
    }

    fn add_handler_only(&self, key: Key, handler: Handler) {
        self.inner.borrow_mut().handlers.insert(key, handler);
    }

    fn has_focus(&self, screen: &Screen) -> bool {
        screen.current() == Some(self.inner.borrow().label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use trellis::geom::Expanse;

    use super::*;

    #[test]
    fn toggle() -> Result<()> {
        let mut s = Screen::new(Expanse::new(80, 24));
        let c = CheckBox::new("Agree", 1, 1, 8);
        assert_eq!(c.position(), Geometry::new(10, 1, 12, 3));
        c.draw(&mut s)?;
        assert!(c.has_focus(&s));
        assert_eq!(s.region("Agree:label")?.buffer(), "Agree\n");

        s.handle_key(KeyCode::Enter.into())?;
        assert!(c.is_checked());
        assert_eq!(s.region("Agree")?.buffer(), "X\n");
        s.handle_key(Key::SPACE)?;
        assert!(!c.is_checked());
        assert_eq!(s.region("Agree")?.buffer(), "");

        c.close(&mut s)?;
        c.close(&mut s)?;
        assert_eq!(s.regions().count(), 0);
        Ok(())
    }
}
