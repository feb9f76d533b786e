use std::result::Result as StdResult;

use thiserror::Error;

use crate::geom;

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
///
/// `UnknownRegion` is the only error widgets expect to see in normal operation:
/// teardown of a region that was never drawn reports it, and `missing_ok`
/// absorbs it. Everything else indicates a broken invariant and is propagated
/// until the main loop stops.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    #[error("unknown region: {0}")]
    /// A region name was not found on the screen.
    UnknownRegion(String),
    #[error("geometry: {0}")]
    /// Geometry failure.
    Geometry(String),
    #[error("invalid: {0}")]
    /// Invalid input error.
    Invalid(String),
    #[error("render: {0}")]
    /// Rendering or terminal IO failure.
    Render(String),
    #[error("handler: {0}")]
    /// A user-supplied handler failed.
    Handler(String),
    /// A handler asked the main loop to stop.
    #[error("quit")]
    Quit,
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}

/// Treat a missing region as success. Used for idempotent teardown:
///
/// ```ignore
/// screen.delete_region(name).or_else(missing_ok)?;
/// ```
pub fn missing_ok(e: Error) -> Result<()> {
    match e {
        Error::UnknownRegion(name) => {
            tracing::trace!(region = %name, "region already gone");
            Ok(())
        }
        e => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing() {
        assert_eq!(missing_ok(Error::UnknownRegion("x".into())), Ok(()));
        assert_eq!(missing_ok(Error::Quit), Err(Error::Quit));
        let e: Error = geom::Error::Geometry("bad".into()).into();
        assert_eq!(e, Error::Geometry("bad".into()));
    }
}
