use trellis::{Screen, error::Result, event::key::KeyCode, style::Color};
use trellis_widgets::{Select, Widget};

use crate::quit;

/// A select over programming languages. Esc quits.
pub fn setup(screen: &mut Screen) -> Result<Select> {
    let sel = Select::new("Programming Language", 0, 0, 22, 10)
        .with_options(&["Go", "Java", "PHP", "Python", "Ruby", "C", "C++", "C#"])
        .with_list_color(Color::White, Color::Default, Color::Black, Color::Green)
        .with_handler(KeyCode::Esc, quit())
        .with_list_handler(KeyCode::Esc, quit());
    sel.draw(screen)?;
    Ok(sel)
}
