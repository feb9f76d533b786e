use crate::{Error, Point, Result};

/// A rectangle addressed by its corners, in absolute grid coordinates with the
/// origin at the top left. `(x, y)` is the top-left corner and `(w, h)` the
/// bottom-right corner, so a valid geometry has `w > x` and `h > y`.
///
/// The corner rows and columns are the border of a region; content lives
/// strictly inside them. A geometry of `(0, 0, 5, 2)` therefore has a single
/// content row at `y = 1`, four columns wide.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Geometry {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Right edge.
    pub w: i32,
    /// Bottom edge.
    pub h: i32,
}

impl Geometry {
    /// Construct a geometry from its corners.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Construct a geometry from an origin and a size.
    pub fn sized(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Check the corner invariant.
    pub fn validate(&self) -> Result<()> {
        if self.w <= self.x || self.h <= self.y {
            return Err(Error::Geometry(format!(
                "invalid dimensions ({}, {}) - ({}, {})",
                self.x, self.y, self.w, self.h
            )));
        }
        Ok(())
    }

    /// Distance between the left and right edges.
    pub fn width(&self) -> i32 {
        self.w - self.x
    }

    /// Distance between the top and bottom edges.
    pub fn height(&self) -> i32 {
        self.h - self.y
    }

    /// The top-left corner.
    pub fn tl(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    /// Number of content columns inside the border.
    pub fn inner_width(&self) -> u32 {
        (self.width() - 1).max(0) as u32
    }

    /// Number of content rows inside the border.
    pub fn inner_height(&self) -> u32 {
        (self.height() - 1).max(0) as u32
    }

    /// The first content cell.
    pub fn content_origin(&self) -> Point {
        self.tl().shift(1, 1)
    }

    /// Does the content area of this geometry hold the point?
    pub fn content_contains(&self, p: Point) -> bool {
        p.x > self.x && p.x < self.w && p.y > self.y && p.y < self.h
    }

    /// Do the content areas of the two geometries share a cell?
    pub fn content_overlaps(&self, other: &Self) -> bool {
        self.x + 1 < other.w && other.x + 1 < self.w && self.y + 1 < other.h && other.y + 1 < self.h
    }

    /// The same rectangle moved by `(dx, dy)`.
    pub fn shift(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w + dx, self.h + dy)
    }

    /// Grow the far corner so that it encloses `other`'s far corner. The origin
    /// never moves.
    pub fn grow_to(&mut self, other: &Self) {
        if other.w > self.w {
            self.w = other.w;
        }
        if other.h > self.h {
            self.h = other.h;
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn dimensions() -> Result<()> {
        let g = Geometry::new(2, 3, 10, 5);
        g.validate()?;
        assert_eq!(g.width(), 8);
        assert_eq!(g.height(), 2);
        assert_eq!(g.inner_width(), 7);
        assert_eq!(g.inner_height(), 1);
        assert_eq!(g.content_origin(), Point { x: 3, y: 4 });
        assert_eq!(Geometry::sized(2, 3, 8, 2), g);
        Ok(())
    }

    #[test]
    fn invalid() {
        assert!(Geometry::new(3, 0, 3, 2).validate().is_err());
        assert!(Geometry::new(0, 2, 3, 1).validate().is_err());
    }

    #[test]
    fn overlaps() {
        let field = Geometry::new(10, 0, 20, 2);
        let beside = Geometry::new(20, 0, 30, 2);
        let under = Geometry::new(10, 1, 20, 3);
        assert!(!field.content_overlaps(&beside));
        assert!(!field.content_overlaps(&under));
        assert!(field.content_overlaps(&Geometry::new(15, 0, 25, 2)));
    }

    #[test]
    fn grow() {
        let mut g = Geometry::new(0, 0, 5, 5);
        g.grow_to(&Geometry::new(1, 3, 9, 4));
        assert_eq!(g, Geometry::new(0, 0, 9, 5));
        g.grow_to(&Geometry::new(1, 3, 2, 12));
        assert_eq!(g, Geometry::new(0, 0, 9, 12));
    }

    #[test]
    fn shift() {
        let g = Geometry::new(2, 3, 10, 5);
        assert_eq!(g.shift(1, -2), Geometry::new(3, 1, 11, 3));
        assert_eq!(g.shift(1, -2).width(), g.width());
    }

    proptest! {
        #[test]
        fn grow_encloses(
            x in -50i32..50, y in -50i32..50, w in 1i32..50, h in 1i32..50,
            ox in -50i32..50, oy in -50i32..50, ow in 1i32..50, oh in 1i32..50,
        ) {
            let mut g = Geometry::sized(x, y, w, h);
            let other = Geometry::sized(ox, oy, ow, oh);
            g.grow_to(&other);
            prop_assert!(g.w >= other.w && g.h >= other.h);
            prop_assert_eq!(g.tl(), Point { x, y });
            prop_assert!(g.validate().is_ok());
        }
    }
}
