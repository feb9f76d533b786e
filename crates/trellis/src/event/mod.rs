//! Input events delivered by a backend.

pub mod key;

/// An input event.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Event {
    /// A keystroke, dispatched to the focused region.
    Key(key::Key),
    /// The terminal was resized.
    Resize(geom::Expanse),
}
