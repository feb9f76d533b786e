//! Geometry primitives used across trellis.

/// Error types for geometry operations.
mod error;
/// Width/height size type.
mod expanse;
/// Frame decomposition of a region.
mod frame;
/// Corner-based rectangles.
mod geometry;
/// Point helpers.
mod point;

pub use error::{Error, Result};
pub use expanse::Expanse;
pub use frame::Frame;
pub use geometry::Geometry;
pub use point::Point;
