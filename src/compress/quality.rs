//! JPEG quality parameter.

use std::fmt;

use thiserror::Error;

/// JPEG encoder quality, always within `[Quality::MIN, Quality::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

/// The raw `quality` value was not an integer in range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Quality must be an integer between 1 and 100")]
pub struct InvalidQuality {
    /// The rejected input, kept for logging.
    pub raw: String,
}

impl Quality {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;
    pub const DEFAULT: Quality = Quality(75);

    /// Returns `None` when `value` is outside `[1, 100]`.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&value)
            .then_some(Self(value))
    }

    /// Resolve the `quality` query value.
    ///
    /// An absent or empty value yields `default`. Anything else must parse as a
    /// base-10 integer (an optional sign is accepted) inside `[1, 100]`.
    pub fn parse_or(raw: Option<&str>, default: Quality) -> Result<Self, InvalidQuality> {
        let raw = match raw {
            None | Some("") => return Ok(default),
            Some(raw) => raw,
        };

        raw.parse::<i64>()
            .ok()
            .and_then(|value| u8::try_from(value).ok())
            .and_then(Self::new)
            .ok_or_else(|| InvalidQuality {
                raw: raw.to_string(),
            })
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
