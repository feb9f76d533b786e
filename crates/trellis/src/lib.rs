//! Trellis: a terminal host for widget toolkits.
//!
//! The host owns a set of named rectangular regions, a table of key bindings
//! per region, the focused region and a cursor flag. A single-threaded main
//! loop draws the regions, reads one key, and dispatches it to exactly one
//! handler (or the focused region's editor) before reading the next.
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Geometry, Point, Expanse, Frame)
//! - [`Screen`] - Regions, bindings and focus
//! - [`backend`] - Terminal backends
//! - [`runloop`] - The main loop

/// Terminal backends.
pub mod backend;
/// Cell rasterisation.
pub mod canvas;
/// Region listing for debugging.
pub mod dump;
/// Error types.
pub mod error;
/// Input events.
pub mod event;
/// Handler and editor callbacks.
pub mod handler;
/// Named screen areas.
pub mod region;
/// The main loop.
pub mod runloop;
/// The region store.
pub mod screen;
/// Colors and attributes.
pub mod style;

pub use geom;

pub use canvas::Canvas;
pub use error::{Error, Result, missing_ok};
pub use handler::{Editor, Handler, Handlers, handler};
pub use region::Region;
pub use screen::{Placement, Screen};
