//! Thread count validation.
//!
//! The thread count reaches the child as an environment variable, so the
//! validated form is always the canonical decimal text of a positive
//! integer.

use std::fmt;
use std::num::NonZeroU32;

use serde_json::Value;

use crate::error::{json_kind, ShimError};

/// A validated, positive thread count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadCount(NonZeroU32);

impl ThreadCount {
    /// Build a thread count from an integer. Zero is rejected.
    pub fn new(threads: u32) -> Result<Self, ShimError> {
        NonZeroU32::new(threads)
            .map(Self)
            .ok_or_else(|| ShimError::InvalidThreadCount(threads.to_string()))
    }

    /// Parse a thread count from text.
    ///
    /// Surrounding whitespace is ignored. The remainder must be decimal
    /// digits only: no sign, no fractional part, no exponent.
    pub fn parse(text: &str) -> Result<Self, ShimError> {
        let invalid = || ShimError::InvalidThreadCount(text.to_string());

        let digits = text.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let value: u32 = digits.parse().map_err(|_| invalid())?;
        NonZeroU32::new(value).map(Self).ok_or_else(invalid)
    }

    /// Validate a thread count supplied as an untyped JSON value.
    ///
    /// Numbers must be positive whole values (`4` and `4.0` both pass);
    /// strings go through [`ThreadCount::parse`]. Any other JSON type is
    /// an [`ShimError::InvalidArgumentType`].
    pub fn from_json(value: &Value) -> Result<Self, ShimError> {
        match value {
            Value::String(text) => Self::parse(text),
            Value::Number(number) => {
                let invalid = || ShimError::InvalidThreadCount(number.to_string());
                if let Some(n) = number.as_u64() {
                    let n = u32::try_from(n).map_err(|_| invalid())?;
                    return NonZeroU32::new(n).map(Self).ok_or_else(invalid);
                }
                if number.is_i64() {
                    return Err(invalid());
                }
                match number.as_f64() {
                    Some(f) if is_whole_in_range(f) => {
                        NonZeroU32::new(f as u32).map(Self).ok_or_else(invalid)
                    }
                    _ => Err(invalid()),
                }
            }
            other => Err(ShimError::InvalidArgumentType {
                kind: json_kind(other),
            }),
        }
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Canonical decimal text, as written to the child's environment.
    pub fn to_env_value(self) -> String {
        self.0.to_string()
    }
}

fn is_whole_in_range(f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0 && f >= 1.0 && f <= f64::from(u32::MAX)
}

impl fmt::Display for ThreadCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ThreadCount {
    type Err = ShimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<u32> for ThreadCount {
    type Error = ShimError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
