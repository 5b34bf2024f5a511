//! Short code type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Longest short code the backend's base62 encoding can produce.
const MAX_LEN: usize = 32;

/// A validated short code: the compact identifier a long URL maps to.
///
/// Short codes are base62-encoded (`[0-9A-Za-z]`), non-empty, and bounded
/// in length. Validating here keeps obviously malformed codes off the
/// wire and out of request paths.
///
/// # Example
///
/// ```
/// use snip_core::ShortCode;
///
/// let code = ShortCode::new("Ab3xYz").unwrap();
/// assert_eq!(code.as_str(), "Ab3xYz");
/// assert!(ShortCode::new("not/a/code").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShortCode(String);

impl ShortCode {
    /// Create a new short code from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is empty, too long, or contains
    /// characters outside the base62 alphabet.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();

        if s.is_empty() {
            return Err(InvalidInputError::ShortCode {
                value: s.to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        if s.len() > MAX_LEN {
            return Err(InvalidInputError::ShortCode {
                value: s.to_string(),
                reason: format!("must be at most {} characters", MAX_LEN),
            }
            .into());
        }

        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidInputError::ShortCode {
                value: s.to_string(),
                reason: "must contain only base62 characters [0-9A-Za-z]".to_string(),
            }
            .into());
        }

        Ok(Self(s.to_string()))
    }

    /// Returns the short code as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ShortCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ShortCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ShortCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ShortCode::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
