//! Graph API version tag.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A supported Graph API version.
///
/// Requests are always issued against `/{version}/{resource}`. Only the
/// `v1.0` and `beta` surfaces exist; anything else is a configuration
/// error and is rejected before any network activity.
///
/// # Example
///
/// ```
/// use graph_slim::ApiVersion;
///
/// let version = ApiVersion::parse("beta").unwrap();
/// assert_eq!(version.as_str(), "beta");
/// assert!(ApiVersion::parse("v2.0").is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// The stable `v1.0` surface.
    #[default]
    V1,
    /// The `beta` surface.
    Beta,
}

impl ApiVersion {
    /// Parse a version tag, rejecting anything outside the supported set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an unsupported version.
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "v1.0" => Ok(ApiVersion::V1),
            "beta" => Ok(ApiVersion::Beta),
            other => Err(InvalidInputError::ApiVersion {
                value: other.to_string(),
            }
            .into()),
        }
    }

    /// Returns the version tag as it appears in request paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1.0",
            ApiVersion::Beta => "beta",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
