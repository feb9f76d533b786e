//! A read-only field that expands into a list of options.

use std::{cell::RefCell, rc::Rc};

use trellis::{
    Handler, Handlers, Screen,
    error::Result,
    event::key::{Key, KeyCode},
    geom::Geometry,
    style::{Attr, Color},
};

use crate::{
    input::InputField,
    widget::{Attributes, Widget, WidgetKind, bind_all, part, remove_region, weak_handler},
};

/// Shared select state.
struct SelectState {
    /// The field showing the chosen option.
    field: InputField,
    /// Options, in display order.
    options: Vec<String>,
    /// Index of the highlighted option.
    current: usize,
    /// Is the option list open?
    expanded: bool,
    /// Option list colors.
    list_attrs: Attributes,
    /// Handlers bound on every option region.
    list_handlers: Handlers,
}

impl SelectState {
    /// Name of the region for option `i`.
    fn option_region(&self, i: usize) -> String {
        part(&self.field.label(), &format!("opt{i}"))
    }

    /// Open the option list below the field and focus its first entry.
    fn expand(&mut self, screen: &mut Screen) -> Result<()> {
        if self.options.is_empty() || self.expanded {
            return Ok(());
        }
        self.current = 0;
        self.expanded = true;
        screen.set_cursor(false);
        let field = self.field.position();
        for (i, opt) in self.options.iter().enumerate() {
            let name = self.option_region(i);
            let y = field.y + 1 + i as i32;
            let placement = screen.set_region(&name, Geometry::new(field.x, y, field.w, y + 2))?;
            if placement.is_created() {
                let r = placement.region();
                r.frame = false;
                r.fg = self.list_attrs.text_color;
                r.bg = self.list_attrs.text_bg;
                r.sel_fg = self.list_attrs.highlight;
                r.sel_bg = self.list_attrs.highlight_bg;
                r.write(opt);
            }
            bind_all(screen, &name, &self.list_handlers)?;
        }
        tracing::debug!(select = %self.field.label(), options = self.options.len(), "expand");
        screen.set_current(&self.option_region(0))?.highlight = true;
        Ok(())
    }

    /// Move the highlight to option `to`.
    fn move_to(&mut self, screen: &mut Screen, to: usize) -> Result<()> {
        if !self.expanded || to == self.current {
            return Ok(());
        }
        screen.region_mut(&self.option_region(self.current))?.highlight = false;
        self.current = to;
        screen.set_current(&self.option_region(to))?.highlight = true;
        Ok(())
    }

    /// Destroy every option region and its bindings.
    fn remove_options(&self, screen: &mut Screen) -> Result<()> {
        for i in 0..self.options.len() {
            let name = self.option_region(i);
            screen.delete_keybindings(&name);
            remove_region(screen, &name)?;
        }
        Ok(())
    }

    /// Close the list, show the highlighted option in the field and focus the
    /// field again.
    fn collapse(&mut self, screen: &mut Screen) -> Result<()> {
        if !self.expanded {
            return Ok(());
        }
        self.remove_options(screen)?;
        self.expanded = false;
        let chosen = self.options[self.current].clone();
        tracing::debug!(select = %self.field.label(), %chosen, "collapse");
        self.field.set_text(screen, &chosen)?;
        self.field.focus(screen)
    }
}

/// A field whose value is picked from a list. Enter opens the list below the
/// field; j/Down and k/Up move through it, stopping at either end, and Enter
/// picks the highlighted option.
#[derive(Clone)]
pub struct Select {
    /// Shared state.
    inner: Rc<RefCell<SelectState>>,
}

impl Select {
    /// Construct a select at `(x, y)` with a label column `label_width` wide
    /// and a field and list `list_width` wide.
    pub fn new(label: &str, x: i32, y: i32, label_width: i32, list_width: i32) -> Self {
        let field = InputField::new(label, x, y, label_width, list_width).with_editable(false);
        let inner = Rc::new(RefCell::new(SelectState {
            field: field.clone(),
            options: vec![],
            current: 0,
            expanded: false,
            list_attrs: Attributes {
                text_color: Color::White.into(),
                text_bg: Color::Default.into(),
                highlight: Color::Black.into(),
                highlight_bg: Color::Green.into(),
                ..Default::default()
            },
            list_handlers: Handlers::new(),
        }));
        let next = weak_handler(&inner, |inner, screen, _| {
            let mut st = inner.borrow_mut();
            let to = (st.current + 1).min(st.options.len().saturating_sub(1));
            st.move_to(screen, to)
        });
        let pre = weak_handler(&inner, |inner, screen, _| {
            let mut st = inner.borrow_mut();
            let to = st.current.saturating_sub(1);
            st.move_to(screen, to)
        });
        let pick = weak_handler(&inner, |inner, screen, _| {
            let mut st = inner.borrow_mut();
            st.collapse(screen)
        });
        let expand = weak_handler(&inner, |inner, screen, _| {
            let mut st = inner.borrow_mut();
            st.expand(screen)
        });
        {
            let mut st = inner.borrow_mut();
            st.list_handlers.insert('j'.into(), next.clone());
            st.list_handlers.insert(KeyCode::Down.into(), next);
            st.list_handlers.insert('k'.into(), pre.clone());
            st.list_handlers.insert(KeyCode::Up.into(), pre);
            st.list_handlers.insert(KeyCode::Enter.into(), pick);
        }
        field.add_handler_only(KeyCode::Enter.into(), expand);
        Self { inner }
    }

    /// Append options.
    pub fn with_options(self, options: &[&str]) -> Self {
        self.inner
            .borrow_mut()
            .options
            .extend(options.iter().map(|o| o.to_string()));
        self
    }

    /// Replace the options. Has no effect while the list is open.
    pub fn set_options(&self, options: &[&str]) {
        let mut st = self.inner.borrow_mut();
        if !st.expanded {
            st.options = options.iter().map(|o| o.to_string()).collect();
            st.current = 0;
        }
    }

    /// Bind a handler on the field.
    pub fn with_handler(self, key: impl Into<Key>, handler: Handler) -> Self {
        self.add_handler_only(key.into(), handler);
        self
    }

    /// Bind a handler on every option in the open list.
    pub fn with_list_handler(self, key: impl Into<Key>, handler: Handler) -> Self {
        self.inner
            .borrow_mut()
            .list_handlers
            .insert(key.into(), handler);
        self
    }

    /// Set the option colors: normal text, then highlighted text.
    pub fn with_list_color(
        self,
        fg: impl Into<Attr>,
        bg: impl Into<Attr>,
        highlight: impl Into<Attr>,
        highlight_bg: impl Into<Attr>,
    ) -> Self {
        self.inner.borrow_mut().list_attrs = Attributes {
            text_color: fg.into(),
            text_bg: bg.into(),
            highlight: highlight.into(),
            highlight_bg: highlight_bg.into(),
            ..Default::default()
        };
        self
    }

    /// The highlighted option, or None if there are no options.
    pub fn selected(&self) -> Option<String> {
        let st = self.inner.borrow();
        st.options.get(st.current).cloned()
    }

    /// Is the option list open?
    pub fn is_expanded(&self) -> bool {
        self.inner.borrow().expanded
    }

    /// The options.
    pub fn options(&self) -> Vec<String> {
        self.inner.borrow().options.clone()
    }

    /// The underlying field.
    pub fn field(&self) -> InputField {
        self.inner.borrow().field.clone()
    }
}

impl Widget for Select {
    fn label(&self) -> String {
        self.field().label()
    }

    fn position(&self) -> Geometry {
        self.field().position()
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Select
    }

    fn focus(&self, screen: &mut Screen) -> Result<()> {
        self.field().focus(screen)
    }

    fn unfocus(&self, screen: &mut Screen) -> Result<()> {
        self.field().unfocus(screen)
    }

    fn draw(&self, screen: &mut Screen) -> Result<()> {
        self.field().draw(screen)
    }

    fn close(&self, screen: &mut Screen) -> Result<()> {
        let mut st = self.inner.borrow_mut();
        st.remove_options(screen)?;
        st.expanded = false;
        st.field.close(screen)
    }

    fn add_handler_only(&self, key: Key, handler: Handler) {
        self.field().add_handler_only(key, handler);
    }

    fn has_focus(&self, screen: &Screen) -> bool {
        let st = self.inner.borrow();
        st.field.has_focus(screen)
            || (st.expanded
                && (0..st.options.len())
                    .any(|i| screen.current() == Some(st.option_region(i).as_str())))
    }
}

#[cfg(test)]
mod tests {
    use trellis::geom::Expanse;

    use super::*;

    fn option_regions(s: &Screen) -> usize {
        s.regions()
            .filter(|r| r.name().starts_with("Language:opt"))
            .count()
    }

    #[test]
    fn pick() -> Result<()> {
        let mut s = Screen::new(Expanse::new(80, 24));
        let sel = Select::new("Language", 0, 0, 10, 12).with_options(&["Go", "Java", "PHP"]);
        sel.draw(&mut s)?;
        assert!(sel.has_focus(&s));
        assert!(!s.cursor());

        s.handle_key(KeyCode::Enter.into())?;
        assert!(sel.is_expanded());
        assert_eq!(option_regions(&s), 3);
        assert_eq!(s.current(), Some("Language:opt0"));
        assert_eq!(
            s.region("Language:opt1")?.geometry(),
            Geometry::new(11, 2, 23, 4)
        );

        s.handle_key(KeyCode::Down.into())?;
        s.handle_key(KeyCode::Down.into())?;
        // Saturates at the last option.
        s.handle_key('j'.into())?;
        assert_eq!(s.current(), Some("Language:opt2"));
        s.handle_key(KeyCode::Enter.into())?;

        assert!(!sel.is_expanded());
        assert_eq!(sel.selected().as_deref(), Some("PHP"));
        assert_eq!(option_regions(&s), 0);
        assert_eq!(s.bound_regions(), 1);
        assert_eq!(s.current(), Some("Language"));
        assert_eq!(s.region("Language")?.buffer(), "PHP\n");
        assert_eq!(sel.field().text(), "PHP");

        // Reopening starts from the top, and k stops there.
        s.handle_key(KeyCode::Enter.into())?;
        s.handle_key('k'.into())?;
        assert_eq!(s.current(), Some("Language:opt0"));
        sel.close(&mut s)?;
        sel.close(&mut s)?;
        assert_eq!(s.regions().count(), 0);
        assert_eq!(s.bound_regions(), 0);
        Ok(())
    }

    #[test]
    fn empty() -> Result<()> {
        let mut s = Screen::new(Expanse::new(80, 24));
        let sel = Select::new("Language", 0, 0, 10, 12);
        sel.draw(&mut s)?;
        s.handle_key(KeyCode::Enter.into())?;
        assert!(!sel.is_expanded());
        assert_eq!(sel.selected(), None);
        sel.set_options(&["Rust"]);
        assert_eq!(sel.selected().as_deref(), Some("Rust"));
        Ok(())
    }
}
