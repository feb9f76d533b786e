use trellis::{
    Screen,
    error::Result,
    event::key::{Ctrl, KeyCode},
};
use trellis_widgets::{InputField, Widget};

use crate::quit;

/// Does the password start with a digit and end with a letter?
pub fn password_ok(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_digit())
        && text.ends_with(|c: char| c.is_ascii_alphabetic())
}

/// A masked password field. Ctrl-A shows or hides the text, Enter quits.
pub fn setup(screen: &mut Screen) -> Result<InputField> {
    let f = InputField::new("password", 0, 0, 10, 15)
        .with_handler(KeyCode::Enter, quit())
        .with_validator("start with a number, end with a letter", password_ok)
        .with_mask()
        .with_mask_keybinding(Ctrl + 'a')
        .with_field_border();
    f.draw(screen)?;
    Ok(f)
}
