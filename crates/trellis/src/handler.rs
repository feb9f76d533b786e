//! Callbacks bound to regions.

use std::{collections::HashMap, rc::Rc};

use crate::{Screen, error::Result, event::key::Key};

/// A key handler. Handlers receive the screen and the name of the region the
/// key was delivered to, and run to completion before the next key is read.
pub type Handler = Rc<dyn Fn(&mut Screen, &str) -> Result<()>>;

/// A set of handlers keyed by key, at most one per key.
pub type Handlers = HashMap<Key, Handler>;

/// Wrap a closure as a `Handler`.
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&mut Screen, &str) -> Result<()> + 'static,
{
    Rc::new(f)
}

/// Receives the keys that reach an editable region without matching a
/// binding.
pub trait Editor {
    /// Apply one key to the region's buffer.
    fn edit(&self, screen: &mut Screen, region: &str, key: Key) -> Result<()>;
}
