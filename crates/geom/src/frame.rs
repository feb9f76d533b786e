use super::{Geometry, Point};

/// The border cells of a region. Corners are reported separately from the
/// edges, and the edges exclude the corners.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Frame {
    /// The outer geometry
    outer: Geometry,
}

impl Frame {
    /// Construct a frame around a geometry.
    pub fn new(outer: Geometry) -> Self {
        Self { outer }
    }

    /// The top left corner
    pub fn topleft(&self) -> Point {
        Point::from((self.outer.x, self.outer.y))
    }

    /// The top right corner
    pub fn topright(&self) -> Point {
        Point::from((self.outer.w, self.outer.y))
    }

    /// The bottom left corner
    pub fn bottomleft(&self) -> Point {
        Point::from((self.outer.x, self.outer.h))
    }

    /// The bottom right corner
    pub fn bottomright(&self) -> Point {
        Point::from((self.outer.w, self.outer.h))
    }

    /// The top edge, not including corners
    pub fn top(&self) -> impl Iterator<Item = Point> + use<> {
        let y = self.outer.y;
        (self.outer.x + 1..self.outer.w).map(move |x| Point { x, y })
    }

    /// The bottom edge, not including corners
    pub fn bottom(&self) -> impl Iterator<Item = Point> + use<> {
        let y = self.outer.h;
        (self.outer.x + 1..self.outer.w).map(move |x| Point { x, y })
    }

    /// The left edge, not including corners
    pub fn left(&self) -> impl Iterator<Item = Point> + use<> {
        let x = self.outer.x;
        (self.outer.y + 1..self.outer.h).map(move |y| Point { x, y })
    }

    /// The right edge, not including corners
    pub fn right(&self) -> impl Iterator<Item = Point> + use<> {
        let x = self.outer.w;
        (self.outer.y + 1..self.outer.h).map(move |y| Point { x, y })
    }

    /// Is there room for content between the edges?
    pub fn has_inner(&self) -> bool {
        self.outer.inner_width() > 0 && self.outer.inner_height() > 0
    }

    /// Get the outer geometry of the frame (the geometry passed to Frame::new())
    pub fn outer(&self) -> Geometry {
        self.outer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    #[test]
    fn tframe() -> Result<()> {
        let f = Frame::new(Geometry::new(10, 10, 14, 13));
        assert_eq!(f.topleft(), Point { x: 10, y: 10 });
        assert_eq!(f.bottomright(), Point { x: 14, y: 13 });
        assert_eq!(
            f.top().collect::<Vec<_>>(),
            vec![(11, 10).into(), (12, 10).into(), (13, 10).into()]
        );
        assert_eq!(
            f.right().collect::<Vec<_>>(),
            vec![(14, 11).into(), (14, 12).into()]
        );
        assert_eq!(f.bottom().count(), 3);
        assert_eq!(f.left().count(), 2);
        Ok(())
    }

    #[test]
    fn test_inner_outer() -> Result<()> {
        let g = Geometry::new(0, 0, 5, 2);
        let frame = Frame::new(g);
        assert_eq!(frame.outer(), g);
        assert!(frame.has_inner());

        // No room between the edges.
        assert!(!Frame::new(Geometry::new(0, 0, 1, 2)).has_inner());
        assert!(!Frame::new(Geometry::new(0, 0, 5, 1)).has_inner());
        Ok(())
    }
}
