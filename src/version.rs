//! API version normalisation.

use crate::{mapping::Value, Error, Result};
use std::fmt;

/// The version used when none is configured.
pub const DEFAULT_VERSION: &str = "1.4";

/// The API version segment of the endpoint URL.
///
/// Versions are accepted as strings or numbers and always rendered as a
/// trimmed, non-empty string. Numbers follow their shortest decimal form,
/// with a trailing `.0` kept for whole floats so `2.0` stays `"2.0"`.
///
/// ```
/// use omniture::ApiVersion;
///
/// assert_eq!(ApiVersion::try_from(1.4).unwrap().as_str(), "1.4");
/// assert_eq!(ApiVersion::try_from(" 1.3 ").unwrap().as_str(), "1.3");
/// assert!(ApiVersion::try_from("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiVersion(String);

impl ApiVersion {
    /// Creates a version from text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVersion`] if the text is blank.
    pub fn new(version: impl AsRef<str>) -> Result<Self> {
        let version = version.as_ref().trim();
        if version.is_empty() {
            return Err(Error::InvalidVersion(
                "version must not be empty".to_string(),
            ));
        }
        Ok(Self(version.to_string()))
    }

    /// Returns the rendered version.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self(DEFAULT_VERSION.to_string())
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for ApiVersion {
    type Error = Error;

    fn try_from(version: &str) -> Result<Self> {
        Self::new(version)
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = Error;

    fn try_from(version: String) -> Result<Self> {
        Self::new(version)
    }
}

impl TryFrom<f64> for ApiVersion {
    type Error = Error;

    fn try_from(version: f64) -> Result<Self> {
        if !version.is_finite() {
            return Err(Error::InvalidVersion(version.to_string()));
        }
        if version.fract() == 0.0 {
            Self::new(format!("{version:.1}"))
        } else {
            Self::new(version.to_string())
        }
    }
}

impl TryFrom<u32> for ApiVersion {
    type Error = Error;

    fn try_from(version: u32) -> Result<Self> {
        Self::new(version.to_string())
    }
}

impl TryFrom<i32> for ApiVersion {
    type Error = Error;

    fn try_from(version: i32) -> Result<Self> {
        Self::new(version.to_string())
    }
}

impl TryFrom<i64> for ApiVersion {
    type Error = Error;

    fn try_from(version: i64) -> Result<Self> {
        Self::new(version.to_string())
    }
}

impl TryFrom<Value> for ApiVersion {
    type Error = Error;

    fn try_from(version: Value) -> Result<Self> {
        match version {
            Value::String(text) => Self::new(text),
            Value::Number(number) => match number.as_i64() {
                Some(integer) => Self::try_from(integer),
                None => number
                    .as_f64()
                    .ok_or_else(|| Error::InvalidVersion(number.to_string()))
                    .and_then(Self::try_from),
            },
            other => Err(Error::InvalidVersion(other.to_string())),
        }
    }
}
