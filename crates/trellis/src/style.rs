//! Colors and text attributes for regions.

/// A terminal color value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    /// The terminal's own default.
    #[default]
    Default,
    /// Black.
    Black,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Blue.
    Blue,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
    /// White.
    White,
    /// An ANSI color. See [256 colors - cheat
    /// sheet](https://jonasjacek.github.io/colors/) for more info.
    AnsiValue(u8),
}

impl Color {
    /// This color, drawn bold.
    pub fn bold(self) -> Attr {
        Attr {
            color: self,
            bold: true,
        }
    }
}

/// A color plus the attributes a cell can carry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Attr {
    /// Color.
    pub color: Color,
    /// Bold text.
    pub bold: bool,
}

impl From<Color> for Attr {
    fn from(color: Color) -> Self {
        Self { color, bold: false }
    }
}

/// The fully resolved style of one cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
    /// Foreground.
    pub fg: Attr,
    /// Background.
    pub bg: Attr,
}

impl Style {
    /// Construct a style.
    pub fn new(fg: impl Into<Attr>, bg: impl Into<Attr>) -> Self {
        Self {
            fg: fg.into(),
            bg: bg.into(),
        }
    }
}
