//! Form focus order, validation and teardown, driven through key dispatch.

use std::{cell::Cell, rc::Rc};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use trellis::{
    Screen,
    error::Result,
    event::key::{Key, KeyCode, Shift},
    geom::Expanse,
    handler,
};
use trellis_widgets::{Form, Widget};

fn screen() -> Screen {
    Screen::new(Expanse::new(120, 60))
}

/// A form with `n` children of mixed kinds, and the children as widgets.
fn mixed(n: usize) -> (Form, Vec<Rc<dyn Widget>>) {
    let f = Form::new("mixed", 0, 0, 10, 2);
    let mut items: Vec<Rc<dyn Widget>> = vec![];
    for i in 0..n {
        let label = format!("w{i}");
        match i % 5 {
            0 => items.push(Rc::new(f.add_input_field(&label, 6, 10))),
            1 => items.push(Rc::new(f.add_check_box(&label, 6))),
            2 => items.push(Rc::new(
                f.add_select(&label, 6, 10).with_options(&["a", "b"]),
            )),
            3 => items.push(Rc::new(f.add_radio(&label, 6).with_options(&["x", "y"]))),
            _ => items.push(Rc::new(f.add_button(&label, handler(|_, _| Ok(()))))),
        }
    }
    (f, items)
}

fn focused(s: &Screen, items: &[Rc<dyn Widget>]) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, w)| w.has_focus(s))
        .map(|(i, _)| i)
        .collect()
}

proptest! {
    #[test]
    fn draw_focuses_first_child(n in 1usize..12) {
        let mut s = screen();
        let (f, items) = mixed(n);
        f.draw(&mut s).unwrap();
        prop_assert_eq!(focused(&s, &items), vec![0]);
        prop_assert_eq!(f.current_item(), 0);
    }

    #[test]
    fn focus_cycles(n in 1usize..12, steps in 0usize..30) {
        let mut s = screen();
        let (f, items) = mixed(n);
        f.draw(&mut s).unwrap();
        for _ in 0..steps {
            s.handle_key(KeyCode::Tab.into()).unwrap();
        }
        prop_assert_eq!(focused(&s, &items), vec![steps % n]);

        // A full lap returns to the same child.
        for _ in 0..n {
            s.handle_key(KeyCode::Down.into()).unwrap();
        }
        prop_assert_eq!(f.current_item(), steps % n);

        // Going back undoes going forward.
        for _ in 0..steps {
            s.handle_key(KeyCode::Up.into()).unwrap();
        }
        prop_assert_eq!(focused(&s, &items), vec![0]);
    }
}

#[test]
fn backtab_wraps() -> Result<()> {
    let mut s = screen();
    let (f, items) = mixed(3);
    f.draw(&mut s)?;
    s.handle_key(KeyCode::BackTab.into())?;
    assert_eq!(focused(&s, &items), vec![2]);
    s.handle_key(Shift + KeyCode::BackTab)?;
    assert_eq!(focused(&s, &items), vec![1]);
    f.pre_item(&mut s)?;
    f.pre_item(&mut s)?;
    assert_eq!(f.current_item(), 2);
    f.next_item(&mut s)?;
    assert_eq!(focused(&s, &items), vec![0]);
    Ok(())
}

#[test]
fn validate_checks_every_field() -> Result<()> {
    let mut s = screen();
    let f = Form::new("signup", 0, 0, 10, 2);
    let a = f
        .add_input_field("A", 4, 10)
        .with_validator("needs a", |t| t == "a");
    let b = f
        .add_input_field("B", 4, 10)
        .with_validator("needs b", |t| t == "b");
    let c = f
        .add_input_field("C", 4, 10)
        .with_validator("needs c", |t| t == "c");
    f.draw(&mut s)?;
    s.handle_key('a'.into())?;
    s.handle_key(KeyCode::Tab.into())?;
    s.handle_key('x'.into())?;
    s.handle_key(KeyCode::Tab.into())?;
    s.handle_key('c'.into())?;

    assert!(!f.validate(&mut s)?);
    assert!(a.is_valid());
    assert!(!b.is_valid());
    assert!(c.is_valid());
    assert!(!s.has_region("A:error"));
    assert_eq!(s.region("B:error")?.buffer(), "needs b\n");
    assert!(!s.has_region("C:error"));
    Ok(())
}

#[test]
fn untouched_fields_fail_on_submit() -> Result<()> {
    let mut s = screen();
    let f = Form::new("signup", 0, 0, 10, 2);
    f.add_input_field("Name", 6, 10)
        .with_validator("required", |t| !t.is_empty());
    f.draw(&mut s)?;
    assert!(!s.has_region("Name:error"));
    assert!(!f.validate(&mut s)?);
    assert!(s.has_region("Name:error"));
    Ok(())
}

#[test]
fn collects_data() -> Result<()> {
    let mut s = screen();
    let f = Form::new("signup", 0, 0, 10, 2);
    f.add_input_field("Name", 6, 10);
    f.add_check_box("Agree", 6);
    f.add_select("Lang", 6, 10).with_options(&["Go", "Rust"]);
    f.add_radio("OS", 6).with_options(&["Linux", "Mac"]);
    f.draw(&mut s)?;

    s.handle_key('z'.into())?;
    s.handle_key(KeyCode::Tab.into())?;
    s.handle_key(Key::SPACE)?;
    s.handle_key(KeyCode::Tab.into())?;
    s.handle_key(KeyCode::Enter.into())?;
    s.handle_key('j'.into())?;
    s.handle_key(KeyCode::Enter.into())?;
    s.handle_key(KeyCode::Tab.into())?;
    s.handle_key(KeyCode::Right.into())?;
    s.handle_key(KeyCode::Enter.into())?;

    let data = f.form_data();
    assert_eq!(data.inputs["Name"], "z");
    assert!(data.check_boxes["Agree"]);
    assert_eq!(data.selects["Lang"], "Rust");
    assert_eq!(data.radios["OS"], "Mac");
    assert_eq!(data.checked_radio.as_deref(), Some("OS"));
    Ok(())
}

#[test]
fn close_is_idempotent() -> Result<()> {
    let mut s = screen();
    let closed = Rc::new(Cell::new(0));
    let c = closed.clone();
    let (f, _) = mixed(7);
    let f = f.with_on_close(move |_| {
        c.set(c.get() + 1);
        Ok(())
    });
    f.draw(&mut s)?;
    // Leave a select open, so its option list must go too.
    s.handle_key(KeyCode::Tab.into())?;
    s.handle_key(KeyCode::Tab.into())?;
    s.handle_key(KeyCode::Enter.into())?;

    f.close(&mut s)?;
    f.close(&mut s)?;
    assert_eq!(closed.get(), 2);
    assert_eq!(s.regions().count(), 0);
    assert_eq!(s.bound_regions(), 0);
    assert_eq!(s.current(), None);
    Ok(())
}

#[test]
fn button_closes_form() -> Result<()> {
    let mut s = screen();
    let f = Form::new("f", 0, 0, 10, 2);
    f.add_input_field("Name", 6, 10);
    let weak = f.downgrade();
    f.add_button(
        "Cancel",
        handler(move |s, _| match weak.upgrade() {
            Some(f) => f.close(s),
            None => Ok(()),
        }),
    );
    f.draw(&mut s)?;
    s.handle_key(KeyCode::Tab.into())?;
    s.handle_key(KeyCode::Enter.into())?;
    assert_eq!(s.regions().count(), 0);
    Ok(())
}
