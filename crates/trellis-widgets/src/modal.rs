//! Floating dialog with a text area and a row of buttons.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use trellis::{
    Handler, Screen,
    error::Result,
    event::key::{Key, KeyCode, Shift},
    geom::Geometry,
    style::{Attr, Color},
};

use crate::{
    button::Button,
    widget::{Attributes, Widget, part, remove_region, text_width, weak_handler},
};

/// Columns between neighbouring buttons.
const BUTTON_GAP: i32 = 2;

/// Shared modal state.
struct ModalState {
    /// Name of the backdrop region.
    name: String,
    /// Backdrop geometry.
    position: Geometry,
    /// Text area contents. The text area is only drawn when non-empty.
    text: String,
    /// Backdrop and text colors.
    attrs: Attributes,
    /// Buttons, right to left.
    buttons: Vec<Button>,
    /// Index of the focused button.
    current: usize,
}

impl ModalState {
    /// Name of the text area region.
    fn text_region(&self) -> String {
        part(&self.name, "text")
    }

    /// Move focus by `delta` among the modal's own buttons, wrapping.
    fn step(&mut self, screen: &mut Screen, delta: isize) -> Result<()> {
        let n = self.buttons.len();
        if n == 0 {
            return Ok(());
        }
        self.buttons[self.current].unfocus(screen)?;
        self.current = (self.current as isize + delta).rem_euclid(n as isize) as usize;
        self.buttons[self.current].focus(screen)
    }
}

/// An overlay with optional text and a row of buttons packed from the right
/// edge leftwards. Tab and Shift-Tab cycle through the modal's buttons only.
#[derive(Clone)]
pub struct Modal {
    /// Shared state.
    inner: Rc<RefCell<ModalState>>,
}

/// A non-owning reference to a modal, for handlers on its own buttons.
#[derive(Clone)]
pub struct WeakModal {
    /// The modal state.
    inner: Weak<RefCell<ModalState>>,
}

impl WeakModal {
    /// The modal, if it is still alive.
    pub fn upgrade(&self) -> Option<Modal> {
        self.inner.upgrade().map(|inner| Modal { inner })
    }
}

impl Modal {
    /// A reference that does not keep the modal alive.
    pub fn downgrade(&self) -> WeakModal {
        WeakModal {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Construct a modal covering `position`.
    pub fn new(name: &str, position: Geometry) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ModalState {
                name: name.to_string(),
                position,
                text: String::new(),
                attrs: Attributes::text(Color::White, Color::Blue),
                buttons: vec![],
                current: 0,
            })),
        }
    }

    /// Set the text area contents. Long lines wrap.
    pub fn with_text(self, text: &str) -> Self {
        self.inner.borrow_mut().text = text.to_string();
        self
    }

    /// Set the backdrop and text colors.
    pub fn with_text_color(self, fg: impl Into<Attr>, bg: impl Into<Attr>) -> Self {
        self.inner.borrow_mut().attrs = Attributes::text(fg, bg);
        self
    }

    /// Add a button left of the previous one, bound to `handler` on `key`.
    /// The button is returned for further configuration.
    pub fn add_button(&self, label: &str, key: impl Into<Key>, handler: Handler) -> Button {
        let mut st = self.inner.borrow_mut();
        let (right, y) = match st.buttons.last() {
            None => (st.position.w - 2, st.position.h - 3),
            Some(prev) => {
                let p = prev.position();
                (p.x - BUTTON_GAP, p.y)
            }
        };
        let len = text_width(label);
        // A button spans its label plus padding and both edges.
        let x = right - (len + 3);
        let next = weak_handler(&self.inner, |inner, screen, _| {
            let mut st = inner.borrow_mut();
            st.step(screen, 1)
        });
        let pre = weak_handler(&self.inner, |inner, screen, _| {
            let mut st = inner.borrow_mut();
            st.step(screen, -1)
        });
        let button = Button::new(label, x, y, len)
            .with_handler(KeyCode::Tab, next)
            .with_handler(KeyCode::BackTab, pre.clone())
            .with_handler(Shift + KeyCode::Tab, pre)
            .with_handler(key, handler)
            .with_text_color(Color::White, Color::Black)
            .with_highlight_color(Color::Black, Color::White);
        st.buttons.push(button.clone());
        button
    }

    /// The modal's buttons, in the order they were added.
    pub fn buttons(&self) -> Vec<Button> {
        self.inner.borrow().buttons.clone()
    }

    /// Backdrop geometry.
    pub fn position(&self) -> Geometry {
        self.inner.borrow().position
    }

    /// Draw the backdrop, text area and buttons, and focus the first button.
    pub fn draw(&self, screen: &mut Screen) -> Result<()> {
        let mut st = self.inner.borrow_mut();
        let placement = screen.set_region(&st.name, st.position)?;
        if placement.is_created() {
            let r = placement.region();
            r.frame = false;
            r.fg = st.attrs.text_color;
            r.bg = st.attrs.text_bg;
        }
        if !st.text.is_empty() {
            let p = st.position;
            let area = Geometry::new(p.x + 1, p.y + 1, p.w - 1, p.h - 3);
            let placement = screen.set_region(&st.text_region(), area)?;
            if placement.is_created() {
                let r = placement.region();
                r.frame = false;
                r.wrap = true;
                r.fg = st.attrs.text_color;
                r.bg = st.attrs.text_bg;
                r.write(&st.text);
            }
        }
        for b in &st.buttons {
            b.draw(screen)?;
        }
        st.current = 0;
        if let Some(first) = st.buttons.first() {
            first.focus(screen)?;
        }
        tracing::debug!(modal = %st.name, buttons = st.buttons.len(), "draw");
        Ok(())
    }

    /// Remove the backdrop, the text area and every button.
    pub fn close(&self, screen: &mut Screen) -> Result<()> {
        let st = self.inner.borrow();
        remove_region(screen, &st.name)?;
        remove_region(screen, &st.text_region())?;
        for b in &st.buttons {
            b.close(screen)?;
        }
        Ok(())
    }

    /// Does one of the modal's buttons hold focus?
    pub fn has_focus(&self, screen: &Screen) -> bool {
        self.inner.borrow().buttons.iter().any(|b| b.has_focus(screen))
    }
}
