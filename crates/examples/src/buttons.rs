use trellis::{Handler, Screen, error::Result, event::key::KeyCode, handler};
use trellis_widgets::{Button, Widget};

use crate::quit;

/// Move focus from one button to the other.
fn switch(from: &'static str, to: &'static str) -> Handler {
    handler(move |s, _| {
        s.region_mut(from)?.highlight = false;
        s.set_current(to)?.highlight = true;
        Ok(())
    })
}

/// Two stacked buttons. Tab moves between them and Enter on either quits.
pub fn setup(screen: &mut Screen) -> Result<Vec<Button>> {
    let buttons = vec![
        Button::new("Save", 0, 0, 5)
            .with_handler(KeyCode::Enter, quit())
            .with_handler(KeyCode::Tab, switch("Save", "Cancel")),
        Button::new("Cancel", 0, 2, 5)
            .with_handler(KeyCode::Enter, quit())
            .with_handler(KeyCode::Tab, switch("Cancel", "Save")),
    ];
    for b in &buttons {
        b.draw(screen)?;
    }
    Ok(buttons)
}
