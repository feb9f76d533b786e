use trellis::{Screen, error::Result, event::key::KeyCode};
use trellis_widgets::{Radio, RadioMode, Widget};

use crate::quit;

/// A vertical group of languages. Arrows move, Space checks, Esc quits.
pub fn setup(screen: &mut Screen) -> Result<Radio> {
    let r = Radio::new("Language", 0, 0, 11)
        .with_mode(RadioMode::Vertical)
        .with_options(&["Go", "Java", "PHP", "Python"])
        .with_handler(KeyCode::Esc, quit());
    r.draw(screen)?;
    Ok(r)
}
