use std::ops::Add;

/// A grid location. Coordinates are signed: widgets may compute positions
/// that fall partly off screen, and rendering clips them.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub fn zero() -> Self {
        (0, 0).into()
    }

    /// Shift the point by an offset.
    pub fn shift(&self, x: i32, y: i32) -> Self {
        Self {
            x: self.x.saturating_add(x),
            y: self.y.saturating_add(y),
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from(v: (i32, i32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    #[test]
    fn add() -> Result<()> {
        assert_eq!(Point::zero() + (1, 1).into(), (1, 1).into());
        assert_eq!(Point::zero().shift(-2, 3), (-2, 3).into());
        Ok(())
    }
}
