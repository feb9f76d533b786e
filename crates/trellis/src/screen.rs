//! The screen: region store, key binding table and focus.

use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    event::{Event, key::Key},
    geom::{Expanse, Geometry, Point},
    handler::{Handler, Handlers},
    region::Region,
};

/// The outcome of `Screen::set_region`.
#[derive(Debug)]
pub enum Placement<'a> {
    /// The region did not previously exist and was created. Callers configure
    /// attributes and initial content here.
    Created(&'a mut Region),
    /// The region already existed. Only its geometry was updated.
    Existing(&'a mut Region),
}

impl<'a> Placement<'a> {
    /// The region, however it was obtained.
    pub fn region(self) -> &'a mut Region {
        match self {
            Self::Created(r) | Self::Existing(r) => r,
        }
    }

    /// Was the region created by this call?
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Owns every region, every key binding, the focused region and the cursor
/// flag. Regions are kept in creation order, which is also draw order.
#[derive(Default)]
pub struct Screen {
    /// Regions in creation order.
    regions: Vec<Region>,
    /// Key bindings by region name. The empty name holds global bindings.
    bindings: HashMap<String, Handlers>,
    /// Name of the focused region.
    current: Option<String>,
    /// Show the text cursor in the focused region.
    cursor: bool,
    /// Terminal size.
    size: Expanse,
}

impl Screen {
    /// Construct an empty screen.
    pub fn new(size: Expanse) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// The terminal size.
    pub fn size(&self) -> Expanse {
        self.size
    }

    /// Record a new terminal size.
    pub fn set_size(&mut self, size: Expanse) {
        self.size = size;
    }

    /// Position of a region in draw order.
    fn index(&self, name: &str) -> Option<usize> {
        self.regions.iter().position(|r| r.name() == name)
    }

    /// Create a region, or fetch and reposition an existing one.
    pub fn set_region(&mut self, name: &str, geometry: Geometry) -> Result<Placement<'_>> {
        geometry.validate()?;
        match self.index(name) {
            Some(i) => {
                let r = &mut self.regions[i];
                r.set_geometry(geometry);
                Ok(Placement::Existing(r))
            }
            None => {
                tracing::debug!(region = name, ?geometry, "create region");
                self.regions.push(Region::new(name, geometry));
                let last = self.regions.len() - 1;
                Ok(Placement::Created(&mut self.regions[last]))
            }
        }
    }

    /// Fetch a region.
    pub fn region(&self, name: &str) -> Result<&Region> {
        self.regions
            .iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| Error::UnknownRegion(name.into()))
    }

    /// Fetch a region mutably.
    pub fn region_mut(&mut self, name: &str) -> Result<&mut Region> {
        self.regions
            .iter_mut()
            .find(|r| r.name() == name)
            .ok_or_else(|| Error::UnknownRegion(name.into()))
    }

    /// Does a region with this name exist?
    pub fn has_region(&self, name: &str) -> bool {
        self.index(name).is_some()
    }

    /// All regions in draw order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Delete a region. Key bindings on the region are left in place; see
    /// `delete_keybindings`.
    pub fn delete_region(&mut self, name: &str) -> Result<()> {
        let i = self
            .index(name)
            .ok_or_else(|| Error::UnknownRegion(name.into()))?;
        self.regions.remove(i);
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        tracing::debug!(region = name, "delete region");
        Ok(())
    }

    /// Bind a key on a region, replacing any previous handler for that key.
    /// The empty region name binds globally.
    pub fn set_keybinding(
        &mut self,
        region: &str,
        key: impl Into<Key>,
        handler: Handler,
    ) -> Result<()> {
        if !region.is_empty() && !self.has_region(region) {
            return Err(Error::UnknownRegion(region.into()));
        }
        self.bindings
            .entry(region.to_string())
            .or_default()
            .insert(key.into(), handler);
        Ok(())
    }

    /// Remove every binding on a region.
    pub fn delete_keybindings(&mut self, region: &str) {
        if self.bindings.remove(region).is_some() {
            tracing::trace!(region, "delete keybindings");
        }
    }

    /// Is a handler bound for this key on this region?
    pub fn has_keybinding(&self, region: &str, key: impl Into<Key>) -> bool {
        let key = key.into();
        self.bindings
            .get(region)
            .is_some_and(|h| h.contains_key(&key))
    }

    /// Number of regions that carry at least one binding.
    pub fn bound_regions(&self) -> usize {
        self.bindings
            .iter()
            .filter(|(k, v)| !k.is_empty() && !v.is_empty())
            .count()
    }

    /// Focus a region.
    pub fn set_current(&mut self, name: &str) -> Result<&mut Region> {
        let i = self
            .index(name)
            .ok_or_else(|| Error::UnknownRegion(name.into()))?;
        if self.current.as_deref() != Some(name) {
            tracing::trace!(region = name, "focus");
            self.current = Some(name.to_string());
        }
        Ok(&mut self.regions[i])
    }

    /// Name of the focused region.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Show or hide the text cursor.
    pub fn set_cursor(&mut self, visible: bool) {
        self.cursor = visible;
    }

    /// Is the text cursor shown?
    pub fn cursor(&self) -> bool {
        self.cursor
    }

    /// Screen location of the text cursor, when it is visible and the focused
    /// region is editable.
    pub fn cursor_position(&self) -> Option<Point> {
        if !self.cursor {
            return None;
        }
        let r = self.region(self.current.as_deref()?).ok()?;
        if !r.editable {
            return None;
        }
        Some(r.geometry().content_origin() + r.cursor())
    }

    /// Find the handler for a key: bindings on the region first, then global
    /// bindings. Literal keys win over normalized ones.
    fn lookup(&self, region: Option<&str>, key: Key) -> Option<Handler> {
        let norm = key.normalize();
        let tables = region
            .and_then(|r| self.bindings.get(r))
            .into_iter()
            .chain(self.bindings.get(""));
        for table in tables {
            if let Some(h) = table.get(&key).or_else(|| table.get(&norm)) {
                return Some(h.clone());
            }
        }
        None
    }

    /// Deliver a key: to a bound handler if there is one, otherwise to the
    /// editor of the focused region.
    pub fn handle_key(&mut self, key: Key) -> Result<()> {
        let current = self.current.clone();
        if let Some(h) = self.lookup(current.as_deref(), key) {
            tracing::trace!(region = ?current, ?key, "dispatch binding");
            return h(self, current.as_deref().unwrap_or_default());
        }
        let Some(name) = current else {
            return Ok(());
        };
        let editor = self.region(&name)?.active_editor();
        if let Some(editor) = editor {
            editor.edit(self, &name, key)?;
        }
        Ok(())
    }

    /// Deliver an event.
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(k) => self.handle_key(k),
            Event::Resize(size) => {
                self.set_size(size);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::{
        event::key::{Ctrl, KeyCode, Shift},
        handler::{Editor, handler},
    };

    fn screen() -> Screen {
        Screen::new(Expanse::new(80, 24))
    }

    #[test]
    fn create_or_fetch() -> Result<()> {
        let mut s = screen();
        let g = Geometry::new(0, 0, 10, 2);
        assert!(s.set_region("a", g)?.is_created());
        s.region_mut("a")?.write("x");
        let again = s.set_region("a", Geometry::new(1, 1, 10, 3))?;
        assert!(!again.is_created());
        assert_eq!(again.region().buffer(), "x\n");
        assert_eq!(s.region("a")?.geometry(), Geometry::new(1, 1, 10, 3));
        assert_eq!(
            s.set_region("b", Geometry::new(5, 0, 5, 2)).err(),
            Some(Error::Geometry("invalid dimensions (5, 0) - (5, 2)".into()))
        );
        Ok(())
    }

    #[test]
    fn delete() -> Result<()> {
        let mut s = screen();
        s.set_region("a", Geometry::new(0, 0, 10, 2))?;
        s.set_current("a")?;
        s.delete_region("a")?;
        assert_eq!(s.current(), None);
        assert_eq!(s.delete_region("a"), Err(Error::UnknownRegion("a".into())));
        Ok(())
    }

    #[test]
    fn bindings() -> Result<()> {
        let mut s = screen();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        assert!(
            s.set_keybinding("nope", 'x', handler(|_, _| Ok(())))
                .is_err()
        );
        s.set_region("a", Geometry::new(0, 0, 10, 2))?;
        s.set_keybinding(
            "a",
            KeyCode::Enter,
            handler(move |_, region| {
                assert_eq!(region, "a");
                h.set(h.get() + 1);
                Ok(())
            }),
        )?;
        s.set_keybinding("", Ctrl + 'c', handler(|_, _| Err(Error::Quit)))?;

        // Nothing focused: region bindings don't fire, global ones do.
        s.handle_key(KeyCode::Enter.into())?;
        assert_eq!(hits.get(), 0);
        assert_eq!(s.handle_key(Ctrl + 'c'), Err(Error::Quit));

        s.set_current("a")?;
        s.handle_key(KeyCode::Enter.into())?;
        assert_eq!(hits.get(), 1);
        assert_eq!(s.bound_regions(), 1);

        s.delete_keybindings("a");
        s.handle_key(KeyCode::Enter.into())?;
        assert_eq!(hits.get(), 1);
        assert_eq!(s.bound_regions(), 0);
        Ok(())
    }

    #[test]
    fn normalized_lookup() -> Result<()> {
        let mut s = screen();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        s.set_region("a", Geometry::new(0, 0, 10, 2))?;
        s.set_current("a")?;
        s.set_keybinding(
            "a",
            'J',
            handler(move |_, _| {
                h.set(h.get() + 1);
                Ok(())
            }),
        )?;
        s.handle_key(Shift + 'j')?;
        assert_eq!(hits.get(), 1);
        Ok(())
    }

    /// Appends every typed character.
    struct Typist;

    impl Editor for Typist {
        fn edit(&self, screen: &mut Screen, region: &str, key: Key) -> Result<()> {
            if let Some(c) = key.text() {
                screen.region_mut(region)?.edit_write(c);
            }
            Ok(())
        }
    }

    #[test]
    fn editor() -> Result<()> {
        let mut s = screen();
        let r = s.set_region("a", Geometry::new(2, 3, 10, 5))?.region();
        r.set_editor(Rc::new(Typist));
        s.set_current("a")?;
        s.set_cursor(true);

        // Not editable yet.
        s.handle_key('x'.into())?;
        assert_eq!(s.region("a")?.buffer(), "");
        assert_eq!(s.cursor_position(), None);

        s.region_mut("a")?.editable = true;
        s.handle_key('x'.into())?;
        s.handle_key('y'.into())?;
        assert_eq!(s.region("a")?.buffer(), "xy\n");
        assert_eq!(s.cursor_position(), Some(Point { x: 5, y: 4 }));
        Ok(())
    }
}
