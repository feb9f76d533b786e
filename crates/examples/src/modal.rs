use trellis::{Screen, error::Result, event::key::KeyCode, geom::Geometry};
use trellis_widgets::Modal;

use crate::quit;

/// A yes/no question centred in the top two thirds of the screen.
pub fn setup(screen: &mut Screen) -> Result<Modal> {
    let size = screen.size();
    let (w, h) = (size.w as i32, size.h as i32);
    let (x, y) = (w / 3, h / 3);
    let modal = Modal::new("question", Geometry::new(x, y, w / 3 * 2, y + 8))
        .with_text("Do you want a new laptop?");
    modal.add_button("No", KeyCode::Enter, quit());
    modal.add_button("Yes", KeyCode::Enter, quit());
    modal.draw(screen)?;
    Ok(modal)
}
