use std::{
    cell::RefCell,
    fmt::{self, Write},
    rc::Rc,
};

use trellis::{
    Error, Screen,
    error::Result,
    event::key::{Ctrl, KeyCode},
    geom::Geometry,
    handler,
};
use trellis_widgets::{Form, FormData, Modal, WeakForm};

use crate::quit;

/// Message shown under empty required fields.
const REQUIRED: &str = "required input";

/// A required-field predicate.
fn required(text: &str) -> bool {
    !text.is_empty()
}

/// The collected form data, one `label: value` line per entry.
pub fn summary(data: &FormData) -> Result<String> {
    let mut s = String::new();
    let fmt_err = |e: fmt::Error| Error::Render(e.to_string());
    for (label, text) in &data.inputs {
        writeln!(s, "{label}: {text}").map_err(fmt_err)?;
    }
    for (label, checked) in &data.check_boxes {
        writeln!(s, "{label}: {checked}").map_err(fmt_err)?;
    }
    for (label, opt) in &data.selects {
        writeln!(s, "{label}: {opt}").map_err(fmt_err)?;
    }
    for (label, opt) in &data.radios {
        writeln!(s, "{label}: {opt}").map_err(fmt_err)?;
    }
    Ok(s)
}

/// Holds the summary modal while it is on screen.
type ModalSlot = Rc<RefCell<Option<Modal>>>;

/// Validate the form, and if it passes show what it collected in a modal.
/// Dismissing the modal puts focus back where it was.
fn register(form: &WeakForm, slot: &ModalSlot, screen: &mut Screen) -> Result<()> {
    let Some(form) = form.upgrade() else {
        return Ok(());
    };
    if !form.validate(screen)? {
        return Ok(());
    }
    let text = summary(&form.form_data())?;
    tracing::info!(%text, "registered");
    let modal = Modal::new("summary", Geometry::new(0, 0, 40, 15)).with_text(&text);
    let (weak_slot, weak_form) = (Rc::downgrade(slot), form.downgrade());
    modal.add_button(
        "OK",
        KeyCode::Enter,
        handler(move |s, _| {
            let modal = weak_slot.upgrade().and_then(|slot| slot.borrow_mut().take());
            if let Some(m) = modal {
                m.close(s)?;
            }
            match weak_form.upgrade() {
                Some(f) => f.set_current_item(s, f.current_item()),
                None => Ok(()),
            }
        }),
    );
    modal.draw(screen)?;
    *slot.borrow_mut() = Some(modal);
    Ok(())
}

/// Sign-up form demo: three required fields, a check box, a select, a radio
/// group and Register/Cancel buttons.
pub fn setup(screen: &mut Screen) -> Result<Form> {
    let form = Form::new("Sign Up", 0, 0, 0, 0);
    form.add_input_field("First Name", 11, 18)
        .with_validator(REQUIRED, required);
    form.add_input_field("Last Name", 11, 18)
        .with_validator(REQUIRED, required);
    form.add_input_field("Password", 11, 18)
        .with_validator(REQUIRED, required)
        .with_mask()
        .with_mask_keybinding(Ctrl + 'a');
    form.add_check_box("Age 18+", 11);
    form.add_select("Language", 11, 10)
        .with_options(&["Japanese", "English", "Chinese"]);
    form.add_radio("Favorite", 11)
        .with_options(&["Go", "Java", "PHP", "Python"]);
    let (weak, slot) = (form.downgrade(), ModalSlot::default());
    form.add_button("Register", handler(move |s, _| register(&weak, &slot, s)));
    form.add_button("Cancel", quit());
    form.draw(screen)?;
    Ok(form)
}
