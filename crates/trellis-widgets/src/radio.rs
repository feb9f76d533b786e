//! Option groups.

use std::{cell::RefCell, rc::Rc};

use trellis::{
    Handler, Handlers, Screen,
    error::Result,
    event::key::{Key, KeyCode},
    geom::Geometry,
    style::{Attr, Color},
};

use crate::widget::{Attributes, Widget, WidgetKind, bind_all, part, remove_region, text_width, weak_handler};

/// Glyph for an unchecked option.
const UNCHECKED: char = '\u{25ef}';
/// Glyph for a checked option.
const CHECKED: char = '\u{25c9}';

/// How options after the first are placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RadioMode {
    /// Each option below the previous one.
    #[default]
    Vertical,
    /// Each option to the right of the previous one.
    Horizontal,
}

/// One choice in a group.
#[derive(Debug, Clone)]
struct RadioOption {
    /// Option name.
    name: String,
    /// Region geometry.
    position: Geometry,
    /// Is this the checked option?
    checked: bool,
}

impl RadioOption {
    /// The option as displayed.
    fn text(&self) -> String {
        let glyph = if self.checked { CHECKED } else { UNCHECKED };
        format!("{glyph} {}", self.name)
    }
}

/// Shared radio state.
struct RadioState {
    /// Group label, also the name of the label region.
    label: String,
    /// Bounding geometry, grown as options are added.
    position: Geometry,
    /// Geometry of the label region.
    label_position: Geometry,
    /// Layout of options after the first.
    mode: RadioMode,
    /// Options in order.
    options: Vec<RadioOption>,
    /// Index of the option with the focus highlight.
    active: usize,
    /// Set by the first check and never cleared.
    ever_checked: bool,
    /// Label colors.
    label_attrs: Attributes,
    /// Option colors.
    option_attrs: Attributes,
    /// Handlers bound on every option region.
    handlers: Handlers,
}

impl RadioState {
    /// Region name of option `i`.
    fn option_region(&self, i: usize) -> String {
        part(&self.label, &self.options[i].name)
    }

    /// Rewrite the glyph of option `i`, if it is drawn.
    fn render(&self, screen: &mut Screen, i: usize) {
        if let Ok(r) = screen.region_mut(&self.option_region(i)) {
            r.clear();
            r.write(&self.options[i].text());
        }
    }

    /// Put the focus highlight on the active option. A group without options
    /// focuses its label instead.
    fn focus(&self, screen: &mut Screen) -> Result<()> {
        screen.set_cursor(false);
        if self.options.is_empty() {
            screen.set_current(&self.label)?;
            return Ok(());
        }
        screen.set_current(&self.option_region(self.active))?.highlight = true;
        Ok(())
    }

    /// Clear the focus highlight.
    fn unfocus(&self, screen: &mut Screen) -> Result<()> {
        if self.options.is_empty() {
            return Ok(());
        }
        screen.region_mut(&self.option_region(self.active))?.highlight = false;
        Ok(())
    }

    /// Move the active option by `delta`, wrapping at both ends.
    fn step(&mut self, screen: &mut Screen, delta: isize) -> Result<()> {
        let n = self.options.len();
        if n == 0 {
            return Ok(());
        }
        self.unfocus(screen)?;
        self.active = (self.active as isize + delta).rem_euclid(n as isize) as usize;
        self.focus(screen)
    }

    /// Uncheck every option.
    fn uncheck(&mut self, screen: &mut Screen) {
        for i in 0..self.options.len() {
            self.options[i].checked = false;
            self.render(screen, i);
        }
    }

    /// Make the active option the only checked one.
    fn check(&mut self, screen: &mut Screen) {
        if self.options.is_empty() {
            return;
        }
        self.uncheck(screen);
        let active = self.active;
        self.options[active].checked = true;
        self.ever_checked = true;
        self.render(screen, active);
        tracing::debug!(radio = %self.label, option = %self.options[active].name, "check");
    }
}

/// A labelled group of options, at most one of them checked. The first option
/// sits to the right of the label; later ones follow the layout mode. Arrow
/// keys and Tab move between options with wrap-around, and Enter or Space
/// checks the active one.
#[derive(Clone)]
pub struct Radio {
    /// Shared state.
    inner: Rc<RefCell<RadioState>>,
}

impl Radio {
    /// Construct an empty group at `(x, y)` with a label column `label_width`
    /// wide.
    pub fn new(label: &str, x: i32, y: i32, label_width: i32) -> Self {
        let position = Geometry::new(x, y, x + label_width + 1, y + 2);
        let inner = Rc::new(RefCell::new(RadioState {
            label: label.to_string(),
            position,
            label_position: position,
            mode: RadioMode::default(),
            options: vec![],
            active: 0,
            ever_checked: false,
            label_attrs: Attributes::text(Color::Yellow.bold(), Color::Default),
            option_attrs: Attributes {
                text_color: Color::White.into(),
                text_bg: Color::Default.into(),
                highlight: Color::Blue.bold(),
                highlight_bg: Color::Default.into(),
                ..Default::default()
            },
            handlers: Handlers::new(),
        }));
        let next = weak_handler(&inner, |inner, screen, _| {
            let mut st = inner.borrow_mut();
            st.step(screen, 1)
        });
        let pre = weak_handler(&inner, |inner, screen, _| {
            let mut st = inner.borrow_mut();
            st.step(screen, -1)
        });
        let check = weak_handler(&inner, |inner, screen, _| {
            inner.borrow_mut().check(screen);
            Ok(())
        });
        {
            let mut st = inner.borrow_mut();
            for k in [KeyCode::Down, KeyCode::Tab, KeyCode::Right] {
                st.handlers.insert(k.into(), next.clone());
            }
            for k in [KeyCode::Up, KeyCode::Left] {
                st.handlers.insert(k.into(), pre.clone());
            }
            st.handlers.insert(KeyCode::Enter.into(), check.clone());
            st.handlers.insert(Key::SPACE, check);
        }
        Self { inner }
    }

    /// Set the layout of options added from here on.
    pub fn with_mode(self, mode: RadioMode) -> Self {
        self.inner.borrow_mut().mode = mode;
        self
    }

    /// Append an option, placed relative to the previous one.
    pub fn with_option(self, name: &str) -> Self {
        {
            let mut st = self.inner.borrow_mut();
            let (x, y) = match st.options.last() {
                None => (st.position.w, st.position.y),
                Some(prev) => match st.mode {
                    RadioMode::Vertical => (prev.position.x, prev.position.h - 1),
                    RadioMode::Horizontal => (prev.position.w, prev.position.y),
                },
            };
            let position = Geometry::new(x, y, x + text_width(name) + 3, y + 2);
            st.position.grow_to(&position);
            st.options.push(RadioOption {
                name: name.to_string(),
                position,
                checked: false,
            });
        }
        self
    }

    /// Append several options.
    pub fn with_options(self, names: &[&str]) -> Self {
        names.iter().fold(self, |r, n| r.with_option(n))
    }

    /// Bind a handler on every option.
    pub fn with_handler(self, key: impl Into<Key>, handler: Handler) -> Self {
        self.add_handler_only(key.into(), handler);
        self
    }

    /// Set the label colors.
    pub fn with_label_color(self, fg: impl Into<Attr>, bg: impl Into<Attr>) -> Self {
        self.inner.borrow_mut().label_attrs = Attributes::text(fg, bg);
        self
    }

    /// Set the option colors: normal text, then the active option.
    pub fn with_option_color(
        self,
        fg: impl Into<Attr>,
        bg: impl Into<Attr>,
        highlight: impl Into<Attr>,
        highlight_bg: impl Into<Attr>,
    ) -> Self {
        self.inner.borrow_mut().option_attrs = Attributes {
            text_color: fg.into(),
            text_bg: bg.into(),
            highlight: highlight.into(),
            highlight_bg: highlight_bg.into(),
            ..Default::default()
        };
        self
    }

    /// Check the active option, unchecking the rest of the group.
    pub fn check(&self, screen: &mut Screen) {
        self.inner.borrow_mut().check(screen);
    }

    /// Uncheck every option.
    pub fn uncheck(&self, screen: &mut Screen) {
        self.inner.borrow_mut().uncheck(screen);
    }

    /// Name of the active option.
    pub fn selected(&self) -> Option<String> {
        let st = self.inner.borrow();
        st.options.get(st.active).map(|o| o.name.clone())
    }

    /// Name of the checked option.
    pub fn checked(&self) -> Option<String> {
        self.inner
            .borrow()
            .options
            .iter()
            .find(|o| o.checked)
            .map(|o| o.name.clone())
    }

    /// Has any option been checked since the group was built? This stays
    /// true after `uncheck`, which tells "nothing chosen yet" apart from a
    /// group that was cleared.
    pub fn is_checked(&self) -> bool {
        self.inner.borrow().ever_checked
    }

    /// Option names in order.
    pub fn options(&self) -> Vec<String> {
        self.inner
            .borrow()
            .options
            .iter()
            .map(|o| o.name.clone())
            .collect()
    }
}

impl Widget for Radio {
    fn label(&self) -> String {
        self.inner.borrow().label.clone()
    }

    fn position(&self) -> Geometry {
        self.inner.borrow().position
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Radio
    }

    fn focus(&self, screen: &mut Screen) -> Result<()> {
        self.inner.borrow().focus(screen)
    }

    fn unfocus(&self, screen: &mut Screen) -> Result<()> {
        self.inner.borrow().unfocus(screen)
    }

    fn draw(&self, screen: &mut Screen) -> Result<()> {
        {
            let st = self.inner.borrow();
            let placement = screen.set_region(&st.label, st.label_position)?;
            if placement.is_created() {
                let r = placement.region();
                r.frame = false;
                r.fg = st.label_attrs.text_color;
                r.bg = st.label_attrs.text_bg;
                r.write(&st.label);
            }
            if st.options.is_empty() {
                bind_all(screen, &st.label, &st.handlers)?;
            }
            for (i, opt) in st.options.iter().enumerate() {
                let name = st.option_region(i);
                let placement = screen.set_region(&name, opt.position)?;
                if placement.is_created() {
                    let r = placement.region();
                    r.frame = false;
                    r.fg = st.option_attrs.text_color;
                    r.bg = st.option_attrs.text_bg;
                    r.sel_fg = st.option_attrs.highlight;
                    r.sel_bg = st.option_attrs.highlight_bg;
                    r.write(&opt.text());
                }
                bind_all(screen, &name, &st.handlers)?;
            }
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
        for i in 0..st.options.len() {
            let name = st.option_region(i);
            screen.delete_keybindings(&name);
            remove_region(screen, &name)?;
        }
        Ok(())
    }

    fn add_handler_only(&self, key: Key, handler: Handler) {
        self.inner.borrow_mut().handlers.insert(key, handler);
    }

    fn has_focus(&self, screen: &Screen) -> bool {
        let st = self.inner.borrow();
        let current = screen.current();
        current == Some(st.label.as_str())
            || (0..st.options.len()).any(|i| current == Some(st.option_region(i).as_str()))
    }
}
