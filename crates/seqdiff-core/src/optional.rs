//! Presence marker for one side of an aligned element pair.
//!
//! `Optional<T>` is deliberately separate from `std::option::Option`: the
//! element type itself is frequently an `Option` (a nullable line, say), and
//! an aligned `None` element is still *present*. `Optional::Absent` means the
//! side has nothing at this position at all.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Optional<T> {
    /// This side of the alignment holds a value, possibly a "null" one.
    Present(T),
    /// This side of the alignment has no element here.
    #[default]
    Absent,
}

impl<T> Optional<T> {
    pub fn has_value(&self) -> bool {
        matches!(self, Optional::Present(_))
    }

    /// Borrow the held value; reading an absent side is an error.
    pub fn value(&self) -> Result<&T> {
        match self {
            Optional::Present(value) => Ok(value),
            Optional::Absent => Err(Error::NoValue),
        }
    }

    pub fn into_value(self) -> Result<T> {
        match self {
            Optional::Present(value) => Ok(value),
            Optional::Absent => Err(Error::NoValue),
        }
    }

    pub fn as_ref(&self) -> Optional<&T> {
        match self {
            Optional::Present(value) => Optional::Present(value),
            Optional::Absent => Optional::Absent,
        }
    }

    /// Bridge to `std::option::Option` once the caller no longer needs to
    /// tell an absent side from an absent element.
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Optional::Present(value) => Some(value),
            Optional::Absent => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Optional::Present(value) => Some(value),
            Optional::Absent => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Optional<U> {
        match self {
            Optional::Present(value) => Optional::Present(f(value)),
            Optional::Absent => Optional::Absent,
        }
    }
}

impl<T: Default> Optional<T> {
    pub fn value_or_default(self) -> T {
        self.into_option().unwrap_or_default()
    }
}

impl<T> From<T> for Optional<T> {
    fn from(value: T) -> Self {
        Optional::Present(value)
    }
}

impl<T: fmt::Display> fmt::Display for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Optional::Present(value) => write!(f, "{}", value),
            Optional::Absent => f.write_str("<none>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_none_element_is_still_a_value() {
        let aligned: Optional<Option<&str>> = Optional::Present(None);
        assert!(aligned.has_value());
        assert_eq!(aligned.value(), Ok(&None));
    }

    #[test]
    fn test_absent_value_is_an_error() {
        let absent: Optional<i32> = Optional::Absent;
        assert!(!absent.has_value());
        assert_eq!(absent.value(), Err(Error::NoValue));
        assert_eq!(absent.into_value(), Err(Error::NoValue));
    }

    #[test]
    fn test_conversions() {
        let present: Optional<i32> = 42.into();
        assert_eq!(present.as_option(), Some(&42));
        assert_eq!(present.map(|v| v * 2), Optional::Present(84));
        assert_eq!(Optional::<i32>::Absent.value_or_default(), 0);
        assert_eq!(Optional::<i32>::default(), Optional::Absent);
    }

    #[test]
    fn test_display() {
        assert_eq!(Optional::Present("x").to_string(), "x");
        assert_eq!(Optional::<&str>::Absent.to_string(), "<none>");
    }
}
