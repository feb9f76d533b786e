//! The capability set shared by every widget.

use std::{cell::RefCell, rc::Rc};

use trellis::{
    Handler, Handlers, Screen,
    error::Result,
    event::key::Key,
    geom::Geometry,
    missing_ok,
    style::{Attr, Color},
};
use unicode_width::UnicodeWidthStr;

/// The closed set of widget types. Containers use the tag to recover
/// type-specific behaviour without downcasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// A push button.
    Button,
    /// A toggle box.
    CheckBox,
    /// An option group.
    Radio,
    /// A labelled text field.
    InputField,
    /// A field with an expandable option list.
    Select,
    /// A header/row grid.
    Table,
}

/// What every widget can do. Widgets are cheap handles over shared state, so
/// all methods take `&self`; the single-threaded event loop guarantees that
/// only one handler touches a widget at a time.
pub trait Widget {
    /// Identity, unique within the widget's container.
    fn label(&self) -> String;

    /// The geometry siblings are laid out against.
    fn position(&self) -> Geometry;

    /// Type tag.
    fn kind(&self) -> WidgetKind;

    /// Claim input focus. Text-entry widgets show the cursor, selection
    /// widgets hide it.
    fn focus(&self, screen: &mut Screen) -> Result<()>;

    /// Release focus, clearing the highlight.
    fn unfocus(&self, screen: &mut Screen) -> Result<()>;

    /// Create regions and register handlers. Drawing again reuses existing
    /// regions, and rebinding a key replaces its previous handler.
    fn draw(&self, screen: &mut Screen) -> Result<()>;

    /// Remove every region and binding the widget created. Safe to call on a
    /// widget that was never drawn, or twice.
    fn close(&self, screen: &mut Screen) -> Result<()>;

    /// Register a handler without returning the widget, for containers wiring
    /// their own navigation into children.
    fn add_handler_only(&self, key: Key, handler: Handler);

    /// Does one of the widget's regions hold focus?
    fn has_focus(&self, screen: &Screen) -> bool;
}

/// Colors for one part of a widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Attributes {
    /// Text color.
    pub text_color: Attr,
    /// Text background.
    pub text_bg: Attr,
    /// Region foreground.
    pub fg: Attr,
    /// Region background.
    pub bg: Attr,
    /// Highlighted text color.
    pub highlight: Attr,
    /// Highlighted background.
    pub highlight_bg: Attr,
}

impl Attributes {
    /// Text colors only.
    pub fn text(color: impl Into<Attr>, bg: impl Into<Attr>) -> Self {
        Self {
            text_color: color.into(),
            text_bg: bg.into(),
            ..Default::default()
        }
    }
}

/// Display width of a string in columns.
pub(crate) fn text_width(s: &str) -> i32 {
    UnicodeWidthStr::width(s) as i32
}

/// Name of an auxiliary region belonging to a widget.
pub(crate) fn part(label: &str, part: &str) -> String {
    format!("{label}:{part}")
}

/// Delete a region if it exists.
pub(crate) fn remove_region(screen: &mut Screen, name: &str) -> Result<()> {
    screen.delete_region(name).or_else(missing_ok)
}

/// Bind a set of handlers on a region.
pub(crate) fn bind_all(screen: &mut Screen, region: &str, handlers: &Handlers) -> Result<()> {
    for (key, h) in handlers {
        screen.set_keybinding(region, *key, h.clone())?;
    }
    Ok(())
}

/// A handler that runs `f` on widget state, holding only a weak reference so
/// the state can own handlers that refer back to it. Once the state is gone
/// the handler does nothing.
pub(crate) fn weak_handler<T, F>(inner: &Rc<RefCell<T>>, f: F) -> Handler
where
    T: 'static,
    F: Fn(Rc<RefCell<T>>, &mut Screen, &str) -> Result<()> + 'static,
{
    let weak = Rc::downgrade(inner);
    Rc::new(move |screen: &mut Screen, region: &str| match weak.upgrade() {
        Some(inner) => f(inner, screen, region),
        None => Ok(()),
    })
}

/// Default error message color.
pub(crate) const ERROR_COLOR: Color = Color::Red;
