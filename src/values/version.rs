//! Dotted version literals with two to four numeric components.
//!
//! Version literals follow the `major.minor[.build[.revision]]` shape used
//! by packaging and contract metadata. A bare major component is not a
//! version; build and revision are optional and compare lower than zero
//! when absent (`1.2` sorts before `1.2.0`).

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

static RE_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?(?:\.(\d+))?$").expect("Invalid regex"));

/// Error raised when a string is not a well-formed version literal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid version literal: {0}")]
pub struct VersionParseError(pub String);

/// A dotted version number with 2-4 components.
///
/// # Example
///
/// ```rust
/// use value_mapping_sdk::values::VersionNumber;
///
/// let version: VersionNumber = "1.2.3".parse().unwrap();
/// assert_eq!(version.to_string(), "1.2.3");
/// assert!(version > "1.2".parse().unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionNumber {
    /// Major component
    pub major: u64,
    /// Minor component
    pub minor: u64,
    /// Optional build component
    pub build: Option<u64>,
    /// Optional revision component (requires build)
    pub revision: Option<u64>,
}

impl VersionNumber {
    /// Create a two-component version.
    pub fn new(major: u64, minor: u64) -> Self {
        VersionNumber {
            major,
            minor,
            build: None,
            revision: None,
        }
    }

    /// Create a version with an explicit build component.
    pub fn with_build(major: u64, minor: u64, build: u64) -> Self {
        VersionNumber {
            major,
            minor,
            build: Some(build),
            revision: None,
        }
    }

    /// Create a four-component version.
    pub fn with_revision(major: u64, minor: u64, build: u64, revision: u64) -> Self {
        VersionNumber {
            major,
            minor,
            build: Some(build),
            revision: Some(revision),
        }
    }
}

impl FromStr for VersionNumber {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let captures = RE_VERSION
            .captures(s)
            .ok_or_else(|| VersionParseError(s.to_string()))?;

        // Component groups are all-digit by construction; overflow is still
        // a parse failure.
        let component = |index: usize| -> Result<Option<u64>, VersionParseError> {
            captures
                .get(index)
                .map(|m| {
                    m.as_str()
                        .parse::<u64>()
                        .map_err(|_| VersionParseError(s.to_string()))
                })
                .transpose()
        };

        Ok(VersionNumber {
            major: component(1)?.unwrap_or(0),
            minor: component(2)?.unwrap_or(0),
            build: component(3)?,
            revision: component(4)?,
        })
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(build) = self.build {
            write!(f, ".{}", build)?;
        }
        if let Some(revision) = self.revision {
            write!(f, ".{}", revision)?;
        }
        Ok(())
    }
}

impl Serialize for VersionNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for VersionNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        VersionNumber::from_str(&s).map_err(serde::de::Error::custom)
    }
}
