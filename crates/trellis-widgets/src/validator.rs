//! Predicates over field text.

use std::{fmt, rc::Rc};

/// A predicate over the current text of a field, the message shown while it
/// fails, and the outcome of the last check.
#[derive(Clone)]
pub struct Validator {
    /// Message displayed beside the field while the predicate fails.
    message: String,
    /// The predicate.
    predicate: Rc<dyn Fn(&str) -> bool>,
    /// Outcome of the last check.
    valid: bool,
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("message", &self.message)
            .field("valid", &self.valid)
            .finish()
    }
}

impl Default for Validator {
    /// Accepts everything.
    fn default() -> Self {
        Self::new("", |_| true)
    }
}

impl Validator {
    /// Construct a validator. It counts as valid until the first check.
    pub fn new(message: &str, predicate: impl Fn(&str) -> bool + 'static) -> Self {
        Self {
            message: message.to_string(),
            predicate: Rc::new(predicate),
            valid: true,
        }
    }

    /// Check `text`, recording and returning the outcome.
    pub fn check(&mut self, text: &str) -> bool {
        self.valid = (self.predicate)(text);
        self.valid
    }

    /// Outcome of the last check.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check() {
        let mut v = Validator::new("required", |t| !t.is_empty());
        assert!(v.is_valid());
        assert!(!v.check(""));
        assert!(!v.is_valid());
        assert!(v.check("x"));
        assert_eq!(v.message(), "required");
        assert!(Validator::default().check(""));
    }
}
