//! This module contains the core primitives to represent keyboard input.
use std::ops::Add;

/// Modifier key state.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Mods {
    /// Shift is active.
    pub shift: bool,
    /// Control is active.
    pub ctrl: bool,
    /// Alt is active.
    pub alt: bool,
}

impl Mods {
    /// True if a modifier other than shift is held. Text entry only accepts
    /// characters typed without these.
    pub fn is_command(&self) -> bool {
        self.ctrl || self.alt
    }
}

impl Add<KeyCode> for Mods {
    type Output = Key;

    fn add(self, key: KeyCode) -> Self::Output {
        Key { mods: self, key }
    }
}

impl Add<char> for Mods {
    type Output = Key;

    fn add(self, other: char) -> Self::Output {
        Key {
            mods: self,
            key: other.into(),
        }
    }
}

impl Add<Self> for Mods {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self {
            shift: self.shift || other.shift,
            ctrl: self.ctrl || other.ctrl,
            alt: self.alt || other.alt,
        }
    }
}

/// No modifiers pressed.
#[allow(non_upper_case_globals)]
pub const Empty: Mods = Mods {
    shift: false,
    ctrl: false,
    alt: false,
};

/// Shift-only modifier state.
#[allow(non_upper_case_globals)]
pub const Shift: Mods = Mods {
    shift: true,
    ctrl: false,
    alt: false,
};

/// Control-only modifier state.
#[allow(non_upper_case_globals)]
pub const Ctrl: Mods = Mods {
    shift: false,
    ctrl: true,
    alt: false,
};

/// Alt-only modifier state.
#[allow(non_upper_case_globals)]
pub const Alt: Mods = Mods {
    shift: false,
    ctrl: false,
    alt: true,
};

/// Logical key codes.
#[derive(Debug, PartialOrd, PartialEq, Hash, Eq, Clone, Copy)]
pub enum KeyCode {
    /// Backspace key.
    Backspace,
    /// Enter/return key.
    Enter,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page up key.
    PageUp,
    /// Page down key.
    PageDown,
    /// Tab key.
    Tab,
    /// Shift + Tab key.
    BackTab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Null key code.
    Null,
    /// Escape key.
    Esc,
    /// F key.
    ///
    /// `KeyCode::F(1)` represents F1 key, etc.
    F(u8),
    /// A character.
    ///
    /// `KeyCode::Char('c')` represents `c` character, etc. The space bar is
    /// `KeyCode::Char(' ')`.
    Char(char),
}

impl From<char> for KeyCode {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

/// Keys that should be preserved verbatim in text input.
const LEAVE_INTACT: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];

/// A keystroke along with modifiers.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Key {
    /// Modifier state.
    pub mods: Mods,
    /// Key code.
    pub key: KeyCode,
}

impl Key {
    /// The space bar.
    pub const SPACE: Self = Self {
        mods: Empty,
        key: KeyCode::Char(' '),
    };

    /// When we receive an event, it includes the shift modifier and also the
    /// modified character - e.g. "shift + A" or "shift + (". When users bind
    /// keys, it's more intuitive to bind just "A" or "(". We normalise input
    /// for binding lookup as follows:
    ///
    /// - If shift is present:
    ///     - If the key is ascii lowercase, convert it to uppercase and remove
    ///       shift
    ///     - If the key is one of a special class of characters that commonly
    ///       don't have a shift conversion (space, enter), leave shift intact
    ///     - in all other cases, just remove shift
    ///
    /// | input             | normalization    |
    /// |-------------------|------------------|
    /// | shift + A         | A                |
    /// | shift + a         | A                |
    /// | shift + )         | )                |
    /// | shift + enter     | shift + enter    |
    /// | shift + ctrl + A  | ctrl + A         |
    /// | shift + backtab   | backtab          |
    pub fn normalize(&self) -> Self {
        if !self.mods.shift {
            return *self;
        }
        let mods = Mods {
            shift: false,
            alt: self.mods.alt,
            ctrl: self.mods.ctrl,
        };
        let c = match self.key {
            KeyCode::Char(c) => c,
            // BackTab already implies shift.
            KeyCode::BackTab => return Self { mods, key: self.key },
            _ => return *self,
        };
        if c.is_ascii_lowercase() {
            Self {
                mods,
                key: KeyCode::Char(c.to_ascii_uppercase()),
            }
        } else if LEAVE_INTACT.contains(&self.key) {
            *self
        } else {
            Self {
                mods,
                key: self.key,
            }
        }
    }

    /// The character typed, if this is a plain or shifted character key.
    pub fn text(&self) -> Option<char> {
        match self.key {
            KeyCode::Char(c) if !self.mods.is_command() => Some(c),
            _ => None,
        }
    }
}

impl PartialEq<KeyCode> for Key {
    fn eq(&self, c: &KeyCode) -> bool {
        // If there are modifiers, we never match.
        if self.mods != Empty {
            return false;
        }
        *c == self.key
    }
}

impl PartialEq<char> for Key {
    fn eq(&self, c: &char) -> bool {
        *self == KeyCode::Char(*c)
    }
}

impl PartialEq<Key> for char {
    fn eq(&self, k: &Key) -> bool {
        *k == KeyCode::Char(*self)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Self {
            mods: Empty,
            key: KeyCode::Char(c),
        }
    }
}

impl From<KeyCode> for Key {
    fn from(c: KeyCode) -> Self {
        Self {
            mods: Empty,
            key: c,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::Result, event::key::*};

    #[test]
    fn normalize() -> Result<()> {
        assert_eq!((Shift + 'A').normalize(), 'A',);
        assert_eq!((Shift + 'a').normalize(), 'A',);
        assert_eq!((Shift + ')').normalize(), ')',);
        assert_eq!((Shift + ' ').normalize(), Shift + ' ');
        assert_eq!((Shift + KeyCode::Enter).normalize(), Shift + KeyCode::Enter);
        assert_eq!((Shift + Alt + 'A').normalize(), Alt + 'A',);
        assert_eq!((Shift + KeyCode::BackTab).normalize(), KeyCode::BackTab);
        Ok(())
    }

    #[test]
    fn text() {
        assert_eq!(Key::from('x').text(), Some('x'));
        assert_eq!((Shift + 'X').text(), Some('X'));
        assert_eq!(Key::SPACE.text(), Some(' '));
        assert_eq!((Ctrl + 'a').text(), None);
        assert_eq!(Key::from(KeyCode::Enter).text(), None);
    }
}
