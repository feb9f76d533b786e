use trellis::{Screen, error::Result, event::key::KeyCode, handler, style::Color};
use trellis_widgets::{CheckBox, Widget};

use crate::quit;

/// A column of check boxes. Space or Enter toggles, Tab moves down, Esc quits.
pub fn setup(screen: &mut Screen) -> Result<Vec<CheckBox>> {
    let labels = ["Rust", "Go", "Zig"];
    let mut boxes = vec![];
    for (i, l) in labels.iter().enumerate() {
        let (from, to) = (l.to_string(), labels[(i + 1) % labels.len()]);
        let b = CheckBox::new(l, 0, i as i32 * 2, 6)
            .with_label_color(Color::Yellow.bold(), Color::Default)
            .with_handler(KeyCode::Esc, quit())
            .with_handler(
                KeyCode::Tab,
                handler(move |s, _| {
                    s.region_mut(&from)?.highlight = false;
                    s.set_current(to)?.highlight = true;
                    Ok(())
                }),
            );
        b.draw(screen)?;
        boxes.push(b);
    }
    Ok(boxes)
}
