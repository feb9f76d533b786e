use trellis::{Screen, error::Result, event::key::KeyCode};
use trellis_widgets::{Table, TableCell, TableHeader, TableRow, Widget};

use crate::quit;

/// Column names.
const COLUMNS: [&str; 5] = ["FirstName", "LastName", "Age", "Weight", "Height"];

/// A user table across the top half of the screen, five equal columns. Esc
/// quits.
pub fn setup(screen: &mut Screen) -> Result<Table> {
    let size = screen.size();
    let (w, h) = (size.w as i32 - 1, size.h as i32 - 1);
    let width = w / 5;
    let row = |cells: [&str; 5]| TableRow {
        cells: cells
            .iter()
            .map(|c| TableCell {
                value: c.to_string(),
                width,
            })
            .collect(),
    };
    let t = Table::new("Users", 0, 0, w, h / 2)
        .with_headers(COLUMNS.iter().map(|c| TableHeader::new(c, width)))
        .with_rows([
            row(["Ada", "Lovelace", "36", "55", "165"]),
            row(["Alan", "Turing", "41", "70", "178"]),
        ])
        .with_handler(KeyCode::Esc, quit());
    t.draw(screen)?;
    screen.set_current("Users")?;
    Ok(t)
}
