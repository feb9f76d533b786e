//! Labelled text entry with inline validation.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use trellis::{
    Editor, Handler, Handlers, Screen,
    error::Result,
    event::key::{Key, KeyCode},
    geom::Geometry,
    style::{Attr, Color},
};

use crate::{
    validator::Validator,
    widget::{
        Attributes, ERROR_COLOR, Widget, WidgetKind, bind_all, part, remove_region, text_width,
        weak_handler,
    },
};

/// Glyph shown in place of each character of a masked field.
pub const MASK: char = '*';

/// Shared input field state.
struct InputState {
    /// Label text, also the name of the field region.
    label: String,
    /// Geometry of the label region.
    label_position: Geometry,
    /// Geometry of the field region.
    position: Geometry,
    /// Label colors.
    label_attrs: Attributes,
    /// Field colors.
    field_attrs: Attributes,
    /// Draw a frame around the label.
    label_frame: bool,
    /// Draw a frame around the field.
    field_frame: bool,
    /// Committed text, newlines stripped.
    text: String,
    /// Mask the field when it is first drawn.
    masked: bool,
    /// Does the field accept typing?
    editable: bool,
    /// Predicate over the text.
    validator: Validator,
    /// Has the text been edited or explicitly validated?
    touched: bool,
    /// Key handlers bound on the field region.
    handlers: Handlers,
}

impl InputState {
    /// Name of the error message region.
    fn error_region(&self) -> String {
        part(&self.label, "error")
    }

    /// Show the error message while the field is touched and invalid, remove
    /// it otherwise.
    fn refresh_error(&self, screen: &mut Screen) -> Result<()> {
        let name = self.error_region();
        if self.touched && !self.validator.is_valid() {
            let msg = self.validator.message();
            let g = Geometry::new(
                self.position.w,
                self.position.y,
                self.position.w + text_width(msg) + 1,
                self.position.h,
            );
            let placement = screen.set_region(&name, g)?;
            if placement.is_created() {
                let r = placement.region();
                r.frame = false;
                r.fg = ERROR_COLOR.into();
                r.write(msg);
            }
            Ok(())
        } else {
            remove_region(screen, &name)
        }
    }
}

/// Applies typed keys to the field buffer, then revalidates.
struct FieldEditor {
    /// The owning field.
    inner: Weak<RefCell<InputState>>,
}

impl Editor for FieldEditor {
    fn edit(&self, screen: &mut Screen, region: &str, key: Key) -> Result<()> {
        let Some(inner) = self.inner.upgrade() else {
            return Ok(());
        };
        let r = screen.region_mut(region)?;
        match key.key {
            KeyCode::Backspace => r.edit_delete(true),
            KeyCode::Delete => r.edit_delete(false),
            KeyCode::Left => r.move_cursor(-1),
            KeyCode::Right => r.move_cursor(1),
            _ => match key.text() {
                Some(c) => r.edit_write(c),
                None => return Ok(()),
            },
        }
        let text = r.buffer().replace('\n', "");
        let mut st = inner.borrow_mut();
        st.touched = true;
        let valid = st.validator.check(&text);
        st.text = text;
        tracing::trace!(field = %st.label, valid, "edit");
        st.refresh_error(screen)
    }
}

/// A label followed by an editable text field. An attached validator runs on
/// every edit and shows its message to the right of the field while it fails.
#[derive(Clone)]
pub struct InputField {
    /// Shared state.
    inner: Rc<RefCell<InputState>>,
}

impl InputField {
    /// Construct a field at `(x, y)`: a label column `label_width` wide, then
    /// a text column `field_width` wide.
    pub fn new(label: &str, x: i32, y: i32, label_width: i32, field_width: i32) -> Self {
        let label_position = Geometry::new(x, y, x + label_width + 1, y + 2);
        let position = Geometry::new(
            label_position.w,
            label_position.y,
            label_position.w + field_width,
            label_position.h,
        );
        Self {
            inner: Rc::new(RefCell::new(InputState {
                label: label.to_string(),
                label_position,
                position,
                label_attrs: Attributes::text(Color::Yellow.bold(), Color::Default),
                field_attrs: Attributes {
                    text_color: Color::Black.into(),
                    text_bg: Color::Cyan.into(),
                    fg: Color::Black.into(),
                    bg: Color::Cyan.into(),
                    ..Default::default()
                },
                label_frame: false,
                field_frame: false,
                text: String::new(),
                masked: false,
                editable: true,
                validator: Validator::default(),
                touched: false,
                handlers: Handlers::new(),
            })),
        }
    }

    /// Bind a handler on the field.
    pub fn with_handler(self, key: impl Into<Key>, handler: Handler) -> Self {
        self.add_handler_only(key.into(), handler);
        self
    }

    /// Attach a validator. The predicate is checked against the current text
    /// straight away, without showing a message.
    pub fn with_validator(self, message: &str, predicate: impl Fn(&str) -> bool + 'static) -> Self {
        {
            let mut st = self.inner.borrow_mut();
            let mut v = Validator::new(message, predicate);
            v.check(&st.text);
            st.validator = v;
        }
        self
    }

    /// Set the label colors.
    pub fn with_label_color(self, fg: impl Into<Attr>, bg: impl Into<Attr>) -> Self {
        self.inner.borrow_mut().label_attrs = Attributes::text(fg, bg);
        self
    }

    /// Set the field colors: text and text background for the highlighted
    /// line, then foreground and background for the rest of the field.
    pub fn with_field_color(
        self,
        text: impl Into<Attr>,
        text_bg: impl Into<Attr>,
        fg: impl Into<Attr>,
        bg: impl Into<Attr>,
    ) -> Self {
        self.inner.borrow_mut().field_attrs = Attributes {
            text_color: text.into(),
            text_bg: text_bg.into(),
            fg: fg.into(),
            bg: bg.into(),
            ..Default::default()
        };
        self
    }

    /// Push the label and the field down by `top` rows. Margins accumulate.
    /// Inside a form, set margins before adding the next child.
    pub fn with_margin_top(self, top: i32) -> Self {
        self.shift(0, top);
        self
    }

    /// Push the label and the field right by `left` columns. Margins
    /// accumulate.
    pub fn with_margin_left(self, left: i32) -> Self {
        self.shift(left, 0);
        self
    }

    /// Move both regions. The error message follows the field.
    fn shift(&self, dx: i32, dy: i32) {
        let mut st = self.inner.borrow_mut();
        st.label_position = st.label_position.shift(dx, dy);
        st.position = st.position.shift(dx, dy);
    }

    /// Draw a frame around the label.
    pub fn with_label_border(self) -> Self {
        self.inner.borrow_mut().label_frame = true;
        self
    }

    /// Draw a frame around the field.
    pub fn with_field_border(self) -> Self {
        self.inner.borrow_mut().field_frame = true;
        self
    }

    /// Display every character as `*`.
    pub fn with_mask(self) -> Self {
        self.inner.borrow_mut().masked = true;
        self
    }

    /// Bind a key on the field that switches masking on and off.
    pub fn with_mask_keybinding(self, key: impl Into<Key>) -> Self {
        let toggle = weak_handler(&self.inner, |_, screen, region| {
            screen.region_mut(region)?.toggle_mask(MASK);
            Ok(())
        });
        self.with_handler(key, toggle)
    }

    /// Should the field accept typing? A read-only field still takes focus
    /// and still runs its handlers.
    pub fn with_editable(self, editable: bool) -> Self {
        self.inner.borrow_mut().editable = editable;
        self
    }

    /// The committed text.
    pub fn text(&self) -> String {
        self.inner.borrow().text.clone()
    }

    /// Replace the text, updating the field region if it is drawn. The edit
    /// cursor moves to the end of the new text, and the validator runs again.
    pub fn set_text(&self, screen: &mut Screen, text: &str) -> Result<()> {
        let mut st = self.inner.borrow_mut();
        st.text = text.replace('\n', "");
        if let Ok(r) = screen.region_mut(&st.label) {
            r.clear();
            r.write(&st.text);
            r.cursor_to_end();
        }
        let text = st.text.clone();
        st.validator.check(&text);
        st.refresh_error(screen)
    }

    /// Outcome of the last validation.
    pub fn is_valid(&self) -> bool {
        self.inner.borrow().validator.is_valid()
    }

    /// Check the current text and refresh the error message. The field counts
    /// as touched from here on.
    pub fn validate(&self, screen: &mut Screen) -> Result<bool> {
        let mut st = self.inner.borrow_mut();
        st.touched = true;
        let text = st.text.clone();
        let valid = st.validator.check(&text);
        tracing::debug!(field = %st.label, valid, "validate");
        st.refresh_error(screen)?;
        Ok(valid)
    }

    /// Geometry of the label region.
    pub fn label_position(&self) -> Geometry {
        self.inner.borrow().label_position
    }
}

impl Widget for InputField {
    fn label(&self) -> String {
        self.inner.borrow().label.clone()
    }

    fn position(&self) -> Geometry {
        self.inner.borrow().position
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::InputField
    }

    fn focus(&self, screen: &mut Screen) -> Result<()> {
        let st = self.inner.borrow();
        screen.set_cursor(st.editable);
        screen.set_current(&st.label)?;
        Ok(())
    }

    fn unfocus(&self, screen: &mut Screen) -> Result<()> {
        screen.set_cursor(false);
        Ok(())
    }

    fn draw(&self, screen: &mut Screen) -> Result<()> {
        {
            let st = self.inner.borrow();
            let placement = screen.set_region(&part(&st.label, "label"), st.label_position)?;
            if placement.is_created() {
                let r = placement.region();
                r.frame = st.label_frame;
                r.fg = st.label_attrs.text_color;
                r.bg = st.label_attrs.text_bg;
                r.write(&format!("{}: ", st.label));
            }
            let placement = screen.set_region(&st.label, st.position)?;
            let created = placement.is_created();
            let r = placement.region();
            if created {
                r.frame = st.field_frame;
                r.highlight = true;
                r.fg = st.field_attrs.fg;
                r.bg = st.field_attrs.bg;
                r.sel_fg = st.field_attrs.text_color;
                r.sel_bg = st.field_attrs.text_bg;
                r.set_editor(Rc::new(FieldEditor {
                    inner: Rc::downgrade(&self.inner),
                }));
                if st.masked {
                    r.mask = Some(MASK);
                }
                r.write(&st.text);
                r.cursor_to_end();
            }
            r.editable = st.editable;
            bind_all(screen, &st.label, &st.handlers)?;
            st.refresh_error(screen)?;
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
        remove_region(screen, &part(&st.label, "label"))?;
        remove_region(screen, &st.error_region())
    }

    fn add_handler_only(&self, key: Key, handler: Handler) {
        self.inner.borrow_mut().handlers.insert(key, handler);
    }

    fn has_focus(&self, screen: &Screen) -> bool {
        screen.current() == Some(self.inner.borrow().label.as_str())
    }
}
