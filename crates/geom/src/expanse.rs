use super::Point;

/// An `Expanse` has a width and height but no location. We use it for the
/// size of the terminal and of canvases.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Expanse {
    /// Width in columns.
    pub w: u32,
    /// Height in rows.
    pub h: u32,
}

impl Expanse {
    /// Construct an expanse.
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// The area of this expanse.
    pub fn area(&self) -> u32 {
        self.w * self.h
    }

    /// True if the point falls on a cell of an expanse anchored at the origin.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.w && (p.y as u32) < self.h
    }
}

impl From<(u32, u32)> for Expanse {
    fn from(v: (u32, u32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}

impl From<(u16, u16)> for Expanse {
    fn from(v: (u16, u16)) -> Self {
        Self {
            w: v.0.into(),
            h: v.1.into(),
        }
    }
}
