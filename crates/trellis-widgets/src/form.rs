//! The container: layout, focus order and data collection.

use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use trellis::{
    Error, Handler, Screen,
    error::Result,
    event::key::{Key, KeyCode},
    geom::Geometry,
};

use crate::{
    button::Button,
    checkbox::CheckBox,
    input::InputField,
    radio::Radio,
    select::Select,
    widget::{Widget, WidgetKind, remove_region, weak_handler},
};

/// Callback run after a form closes.
type CloseCallback = Rc<dyn Fn(&mut Screen) -> Result<()>>;

/// Everything a form collected, keyed by widget label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    /// Input field text.
    pub inputs: BTreeMap<String, String>,
    /// Check box states.
    pub check_boxes: BTreeMap<String, bool>,
    /// Highlighted select options.
    pub selects: BTreeMap<String, String>,
    /// Checked option of each radio group that has one.
    pub radios: BTreeMap<String, String>,
    /// Label of the radio group checked most recently.
    pub checked_radio: Option<String>,
}

/// Shared form state.
struct FormState {
    /// Form name, also the frame region name and title.
    name: String,
    /// Bounding geometry, grown as children are added.
    position: Geometry,
    /// Index of the focused child.
    active: usize,
    /// Index into `radios` of the group checked most recently.
    active_radio: Option<usize>,
    /// Input fields in order.
    inputs: Vec<InputField>,
    /// Check boxes in order.
    check_boxes: Vec<CheckBox>,
    /// Buttons in order.
    buttons: Vec<Button>,
    /// Selects in order.
    selects: Vec<Select>,
    /// Radio groups in order.
    radios: Vec<Radio>,
    /// Every child. Order is tab order and draw order.
    items: Vec<Rc<dyn Widget>>,
    /// Moves focus forward.
    next: Option<Handler>,
    /// Moves focus back.
    pre: Option<Handler>,
    /// Checks the focused radio group, unchecking every other group.
    check_radio: Option<Handler>,
    /// Run after the form closes.
    on_close: Option<CloseCallback>,
}

impl FormState {
    /// Origin of the next child. Children stack downwards at the left edge,
    /// except that a button following a button goes to its right.
    fn next_origin(&self, button: bool) -> (i32, i32) {
        match self.items.last() {
            None => (self.position.x + 1, self.position.y),
            Some(prev) => {
                let p = prev.position();
                if button && prev.kind() == WidgetKind::Button {
                    (p.w + 1, p.y)
                } else {
                    (self.position.x + 1, p.h)
                }
            }
        }
    }

    /// Append a child and grow the bounding geometry to hold it.
    fn push(&mut self, item: Rc<dyn Widget>) {
        self.position.grow_to(&item.position());
        tracing::trace!(form = %self.name, child = %item.label(), "add");
        self.items.push(item);
    }

    /// Move focus by `delta`, wrapping at both ends.
    fn step(&mut self, screen: &mut Screen, delta: isize) -> Result<()> {
        let n = self.items.len();
        if n == 0 {
            return Ok(());
        }
        self.items[self.active].unfocus(screen)?;
        self.active = (self.active as isize + delta).rem_euclid(n as isize) as usize;
        tracing::debug!(form = %self.name, active = self.active, "focus child");
        self.items[self.active].focus(screen)
    }

    /// Uncheck every radio group, then check the focused one.
    fn check_radio(&mut self, screen: &mut Screen) -> Result<()> {
        let Some(item) = self.items.get(self.active) else {
            return Ok(());
        };
        if item.kind() != WidgetKind::Radio {
            return Ok(());
        }
        let label = item.label();
        for r in &self.radios {
            r.uncheck(screen);
        }
        let group = self.radios.iter().position(|r| r.label() == label);
        if let Some(i) = group {
            self.radios[i].check(screen);
        }
        // A group without options checks nothing.
        self.active_radio = group.filter(|&i| self.radios[i].checked().is_some());
        Ok(())
    }
}

/// A framed container. Children are laid out as they are added, and once the
/// form is drawn Tab/Down and Shift-Tab/Up move focus through them in order,
/// wrapping at both ends. Checking an option in one radio group unchecks
/// every other group in the form.
#[derive(Clone)]
pub struct Form {
    /// Shared state.
    inner: Rc<RefCell<FormState>>,
}

/// A non-owning reference to a form, for handlers owned by the form's own
/// children.
#[derive(Clone)]
pub struct WeakForm {
    /// The form state.
    inner: Weak<RefCell<FormState>>,
}

impl WeakForm {
    /// The form, if it is still alive.
    pub fn upgrade(&self) -> Option<Form> {
        self.inner.upgrade().map(|inner| Form { inner })
    }
}

impl Form {
    /// A reference that does not keep the form alive.
    pub fn downgrade(&self) -> WeakForm {
        WeakForm {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Construct an empty form at `(x, y)` spanning `w` columns and `h` rows.
    pub fn new(name: &str, x: i32, y: i32, w: i32, h: i32) -> Self {
        let inner = Rc::new(RefCell::new(FormState {
            name: name.to_string(),
            position: Geometry::new(x, y, x + w, y + h),
            active: 0,
            active_radio: None,
            inputs: vec![],
            check_boxes: vec![],
            buttons: vec![],
            selects: vec![],
            radios: vec![],
            items: vec![],
            next: None,
            pre: None,
            check_radio: None,
            on_close: None,
        }));
        let next = weak_handler(&inner, |inner, screen, _| {
            let mut st = inner.borrow_mut();
            st.step(screen, 1)
        });
        let pre = weak_handler(&inner, |inner, screen, _| {
            let mut st = inner.borrow_mut();
            st.step(screen, -1)
        });
        let check_radio = weak_handler(&inner, |inner, screen, _| {
            let mut st = inner.borrow_mut();
            st.check_radio(screen)
        });
        {
            let mut st = inner.borrow_mut();
            st.next = Some(next);
            st.pre = Some(pre);
            st.check_radio = Some(check_radio);
        }
        Self { inner }
    }

    /// Run `f` after the form closes. An error from `f` is returned by
    /// `close`.
    pub fn with_on_close(self, f: impl Fn(&mut Screen) -> Result<()> + 'static) -> Self {
        self.inner.borrow_mut().on_close = Some(Rc::new(f));
        self
    }

    /// Add an input field.
    pub fn add_input_field(&self, label: &str, label_width: i32, field_width: i32) -> InputField {
        let mut st = self.inner.borrow_mut();
        let (x, y) = st.next_origin(false);
        let f = InputField::new(label, x, y, label_width, field_width);
        st.inputs.push(f.clone());
        st.push(Rc::new(f.clone()));
        f
    }

    /// Add a button that runs `handler` on Enter.
    pub fn add_button(&self, label: &str, handler: Handler) -> Button {
        let mut st = self.inner.borrow_mut();
        let (x, y) = st.next_origin(true);
        let b = Button::new(label, x, y, 0).with_handler(KeyCode::Enter, handler);
        st.buttons.push(b.clone());
        st.push(Rc::new(b.clone()));
        b
    }

    /// Add a check box.
    pub fn add_check_box(&self, label: &str, label_width: i32) -> CheckBox {
        let mut st = self.inner.borrow_mut();
        let (x, y) = st.next_origin(false);
        let c = CheckBox::new(label, x, y, label_width);
        st.check_boxes.push(c.clone());
        st.push(Rc::new(c.clone()));
        c
    }

    /// Add a select.
    pub fn add_select(&self, label: &str, label_width: i32, list_width: i32) -> Select {
        let mut st = self.inner.borrow_mut();
        let (x, y) = st.next_origin(false);
        let s = Select::new(label, x, y, label_width, list_width);
        st.selects.push(s.clone());
        st.push(Rc::new(s.clone()));
        s
    }

    /// Add a radio group. Options must be added before the next child, since
    /// the group's extent decides where that child goes.
    pub fn add_radio(&self, label: &str, label_width: i32) -> Radio {
        let mut st = self.inner.borrow_mut();
        let (x, y) = st.next_origin(false);
        let r = Radio::new(label, x, y, label_width);
        st.radios.push(r.clone());
        st.push(Rc::new(r.clone()));
        r
    }

    /// Refresh the geometry after a child grew. Radio groups grow as options
    /// are added to them.
    fn refit(&self) {
        let mut st = self.inner.borrow_mut();
        let grown = st
            .items
            .iter()
            .map(|i| i.position())
            .fold(st.position, |mut acc, g| {
                acc.grow_to(&g);
                acc
            });
        st.position = grown;
    }

    /// Bounding geometry of the children and the requested extent.
    pub fn position(&self) -> Geometry {
        self.refit();
        self.inner.borrow().position
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.inner.borrow().items.len()
    }

    /// Does the form have no children?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The buttons, in the order they were added.
    pub fn buttons(&self) -> Vec<Button> {
        self.inner.borrow().buttons.clone()
    }

    /// Index of the focused child.
    pub fn current_item(&self) -> usize {
        self.inner.borrow().active
    }

    /// The focused child.
    pub fn current_widget(&self) -> Option<Rc<dyn Widget>> {
        let st = self.inner.borrow();
        st.items.get(st.active).cloned()
    }

    /// Focus child `index` directly, without unfocusing the current one.
    /// Used to restore focus, for example after a modal closes.
    pub fn set_current_item(&self, screen: &mut Screen, index: usize) -> Result<()> {
        let mut st = self.inner.borrow_mut();
        if index >= st.items.len() {
            return Err(Error::Invalid(format!(
                "form {}: no item {index} of {}",
                st.name,
                st.items.len()
            )));
        }
        st.active = index;
        st.items[index].focus(screen)
    }

    /// Move focus to the next child, wrapping.
    pub fn next_item(&self, screen: &mut Screen) -> Result<()> {
        self.inner.borrow_mut().step(screen, 1)
    }

    /// Move focus to the previous child, wrapping.
    pub fn pre_item(&self, screen: &mut Screen) -> Result<()> {
        self.inner.borrow_mut().step(screen, -1)
    }

    /// Validate every input field. Every field is checked, so each one's
    /// error message reflects its own text even after an earlier failure.
    pub fn validate(&self, screen: &mut Screen) -> Result<bool> {
        let inputs = self.inner.borrow().inputs.clone();
        let mut valid = true;
        for f in &inputs {
            valid &= f.validate(screen)?;
        }
        tracing::debug!(form = %self.inner.borrow().name, valid, "validate");
        Ok(valid)
    }

    /// Input field text by label.
    pub fn field_texts(&self) -> BTreeMap<String, String> {
        let st = self.inner.borrow();
        st.inputs.iter().map(|f| (f.label(), f.text())).collect()
    }

    /// Check box states by label.
    pub fn check_box_states(&self) -> BTreeMap<String, bool> {
        let st = self.inner.borrow();
        st.check_boxes
            .iter()
            .map(|c| (c.label(), c.is_checked()))
            .collect()
    }

    /// Highlighted option of every select that has options, by label.
    pub fn selected_options(&self) -> BTreeMap<String, String> {
        let st = self.inner.borrow();
        st.selects
            .iter()
            .filter_map(|s| Some((s.label(), s.selected()?)))
            .collect()
    }

    /// Checked option of every radio group that has one, by label.
    pub fn radio_selections(&self) -> BTreeMap<String, String> {
        let st = self.inner.borrow();
        st.radios
            .iter()
            .filter_map(|r| Some((r.label(), r.checked()?)))
            .collect()
    }

    /// Label of the radio group checked most recently.
    pub fn checked_radio(&self) -> Option<String> {
        let st = self.inner.borrow();
        st.active_radio.map(|i| st.radios[i].label())
    }

    /// Everything collected so far.
    pub fn form_data(&self) -> FormData {
        FormData {
            inputs: self.field_texts(),
            check_boxes: self.check_box_states(),
            selects: self.selected_options(),
            radios: self.radio_selections(),
            checked_radio: self.checked_radio(),
        }
    }

    /// Draw the frame and every child, wiring navigation into each child,
    /// then focus the first child.
    pub fn draw(&self, screen: &mut Screen) -> Result<()> {
        self.refit();
        let (items, frame) = {
            let st = self.inner.borrow();
            let nav = [
                (Key::from(KeyCode::Tab), &st.next),
                (Key::from(KeyCode::Down), &st.next),
                (Key::from(KeyCode::Up), &st.pre),
                (Key::from(KeyCode::BackTab), &st.pre),
            ];
            for item in &st.items {
                for (k, h) in &nav {
                    if let Some(h) = h {
                        item.add_handler_only(*k, h.clone());
                    }
                }
                if item.kind() != WidgetKind::Radio {
                    continue;
                }
                if let Some(h) = &st.check_radio {
                    item.add_handler_only(KeyCode::Enter.into(), h.clone());
                    item.add_handler_only(Key::SPACE, h.clone());
                }
            }
            let p = st.position;
            (
                st.items.clone(),
                (st.name.clone(), Geometry::new(p.x, p.y, p.w + 1, p.h + 1)),
            )
        };
        let placement = screen.set_region(&frame.0, frame.1)?;
        if placement.is_created() {
            placement.region().title = frame.0.clone();
        }
        for item in &items {
            item.draw(screen)?;
        }
        for item in items.iter().skip(1) {
            if item.has_focus(screen) {
                item.unfocus(screen)?;
            }
        }
        self.inner.borrow_mut().active = 0;
        if let Some(first) = items.first() {
            first.focus(screen)?;
        }
        tracing::debug!(form = %frame.0, children = items.len(), "draw");
        Ok(())
    }

    /// Remove the frame and every child, then run the close callback.
    pub fn close(&self, screen: &mut Screen) -> Result<()> {
        let (name, items, on_close) = {
            let st = self.inner.borrow();
            (st.name.clone(), st.items.clone(), st.on_close.clone())
        };
        remove_region(screen, &name)?;
        for item in &items {
            item.close(screen)?;
        }
        tracing::debug!(form = %name, "close");
        match on_close {
            Some(f) => f(screen),
            None => Ok(()),
        }
    }

    /// Does one of the form's children hold focus?
    pub fn has_focus(&self, screen: &Screen) -> bool {
        self.inner.borrow().items.iter().any(|i| i.has_focus(screen))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use trellis::{geom::Expanse, handler};

    use super::*;
    use crate::radio::RadioMode;

    fn screen() -> Screen {
        Screen::new(Expanse::new(100, 40))
    }

    #[test]
    fn layout() {
        let f = Form::new("signup", 0, 0, 10, 2);
        let name = f.add_input_field("Name", 8, 20);
        let agree = f.add_check_box("Agree", 8);
        let ok = f.add_button("OK", handler(|_, _| Ok(())));
        let cancel = f.add_button("Cancel", handler(|_, _| Ok(())));
        assert_eq!(name.position(), Geometry::new(10, 0, 30, 2));
        assert_eq!(agree.position(), Geometry::new(10, 2, 12, 4));
        assert_eq!(ok.position(), Geometry::new(1, 4, 6, 6));
        assert_eq!(cancel.position(), Geometry::new(7, 4, 16, 6));
        assert_eq!(f.position(), Geometry::new(0, 0, 30, 6));
    }

    #[test]
    fn radio_groups_exclude_each_other() -> Result<()> {
        let mut s = screen();
        let f = Form::new("survey", 0, 0, 10, 2);
        let lang = f.add_radio("Lang", 6).with_options(&["Go", "Rust"]);
        let os = f
            .add_radio("OS", 6)
            .with_mode(RadioMode::Horizontal)
            .with_options(&["Linux", "Mac"]);
        f.draw(&mut s)?;
        assert!(lang.has_focus(&s));

        s.handle_key(KeyCode::Right.into())?;
        s.handle_key(KeyCode::Enter.into())?;
        assert_eq!(lang.checked().as_deref(), Some("Rust"));
        assert_eq!(f.checked_radio().as_deref(), Some("Lang"));

        s.handle_key(KeyCode::Tab.into())?;
        assert!(os.has_focus(&s));
        s.handle_key(Key::SPACE)?;
        assert_eq!(os.checked().as_deref(), Some("Linux"));
        assert_eq!(lang.checked(), None);
        assert_eq!(f.checked_radio().as_deref(), Some("OS"));
        assert_eq!(
            f.radio_selections(),
            BTreeMap::from([("OS".to_string(), "Linux".to_string())])
        );
        Ok(())
    }

    #[test]
    fn empty_radio_keeps_first_focus() -> Result<()> {
        let mut s = screen();
        let f = Form::new("f", 0, 0, 10, 2);
        let r = f.add_radio("R", 4);
        let i = f.add_input_field("I", 4, 10);
        f.draw(&mut s)?;
        assert_eq!(f.current_item(), 0);
        assert!(r.has_focus(&s));
        assert!(!i.has_focus(&s));

        s.handle_key(KeyCode::Tab.into())?;
        assert!(i.has_focus(&s));
        s.handle_key(KeyCode::BackTab.into())?;
        assert!(r.has_focus(&s));
        s.handle_key(KeyCode::Enter.into())?;
        assert_eq!(f.checked_radio(), None);
        Ok(())
    }

    #[test]
    fn set_current_item() -> Result<()> {
        let mut s = screen();
        let f = Form::new("f", 0, 0, 10, 2);
        f.add_input_field("A", 4, 10);
        let b = f.add_input_field("B", 4, 10);
        f.draw(&mut s)?;
        f.set_current_item(&mut s, 1)?;
        assert_eq!(f.current_item(), 1);
        assert!(b.has_focus(&s));
        assert!(matches!(
            f.set_current_item(&mut s, 2),
            Err(Error::Invalid(_))
        ));
        Ok(())
    }

    #[test]
    fn close_callback() -> Result<()> {
        let mut s = screen();
        let f = Form::new("f", 0, 0, 10, 2).with_on_close(|_| Err(Error::Quit));
        f.add_check_box("A", 4);
        f.draw(&mut s)?;
        assert_eq!(f.close(&mut s), Err(Error::Quit));
        assert_eq!(s.regions().count(), 0);
        assert_eq!(s.bound_regions(), 0);
        Ok(())
    }

    #[test]
    fn empty() -> Result<()> {
        let mut s = screen();
        let f = Form::new("f", 0, 0, 10, 2);
        f.draw(&mut s)?;
        f.next_item(&mut s)?;
        f.pre_item(&mut s)?;
        assert!(f.is_empty());
        assert_eq!(f.form_data(), FormData::default());
        f.close(&mut s)?;
        f.close(&mut s)
    }
}
