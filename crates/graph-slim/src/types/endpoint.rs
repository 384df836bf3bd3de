//! Graph service endpoint type.

use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// The default Graph service root.
pub const DEFAULT_ENDPOINT: &str = "https://graph.microsoft.com";

/// A validated Graph service base endpoint.
///
/// This type ensures the endpoint is absolute, uses HTTPS (or HTTP for
/// localhost), and is normalized for request URL construction. Continuation
/// links returned by the service are re-rooted against this endpoint via
/// [`GraphUrl::strip_base`].
///
/// # Example
///
/// ```
/// use graph_slim::GraphUrl;
///
/// let endpoint = GraphUrl::new("https://graph.microsoft.com").unwrap();
/// assert_eq!(
///     endpoint.request_url("/v1.0/users"),
///     "https://graph.microsoft.com/v1.0/users"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GraphUrl(Url);

impl GraphUrl {
    /// Create a new endpoint from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute, has no host, or uses a
    /// scheme other than HTTPS (HTTP is allowed only for localhost).
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::Endpoint {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: remove trailing slash
        let normalized = if url.path() == "/" {
            let mut u = url.clone();
            u.set_path("");
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    /// Returns the full request URL for a path relative to this endpoint.
    ///
    /// The join is textual: a continuation link that survived
    /// [`strip_base`](Self::strip_base) unchanged (a foreign-host link) is
    /// forwarded verbatim as a relative path rather than validated.
    pub fn request_url(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/{}", base, path)
    }

    /// Strip this endpoint's prefix from a continuation link.
    ///
    /// Returns the link as a path relative to this endpoint when the link
    /// lives under it, and the link unchanged otherwise.
    pub fn strip_base<'a>(&self, link: &'a str) -> &'a str {
        let base = self.0.as_str().trim_end_matches('/');
        if let Some(rest) = link.strip_prefix(base) {
            if rest.is_empty() {
                return "/";
            }
            if rest.starts_with('/') {
                return rest;
            }
        }
        link
    }

    /// Returns the base endpoint as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        // Must be absolute
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::Endpoint {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        // Must be HTTPS (or HTTP for localhost)
        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "::1");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::Endpoint {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        // Must have a host
        if url.host_str().is_none() {
            return Err(InvalidInputError::Endpoint {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl Default for GraphUrl {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT).expect("default Graph endpoint is valid")
    }
}

impl fmt::Display for GraphUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GraphUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for GraphUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let endpoint = GraphUrl::new("https://graph.microsoft.com").unwrap();
        assert_eq!(endpoint.host(), Some("graph.microsoft.com"));
    }

    #[test]
    fn valid_localhost_http() {
        let endpoint = GraphUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(endpoint.host(), Some("127.0.0.1"));
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(GraphUrl::new("http://graph.microsoft.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(GraphUrl::new("/v1.0/users").is_err());
    }

    #[test]
    fn request_url_strips_one_leading_slash() {
        let endpoint = GraphUrl::new("https://graph.microsoft.com").unwrap();
        assert_eq!(
            endpoint.request_url("/v1.0/users"),
            "https://graph.microsoft.com/v1.0/users"
        );
        assert_eq!(
            endpoint.request_url("v1.0/users"),
            "https://graph.microsoft.com/v1.0/users"
        );
    }

    #[test]
    fn request_url_handles_trailing_slash_endpoint() {
        let endpoint = GraphUrl::new("https://graph.microsoft.com/").unwrap();
        assert_eq!(
            endpoint.request_url("/v1.0/me"),
            "https://graph.microsoft.com/v1.0/me"
        );
    }

    #[test]
    fn strip_base_relativizes_continuation_link() {
        let endpoint = GraphUrl::new("https://graph.microsoft.com").unwrap();
        assert_eq!(
            endpoint.strip_base("https://graph.microsoft.com/v1.0/users?$skiptoken=abc"),
            "/v1.0/users?$skiptoken=abc"
        );
    }

    #[test]
    fn strip_base_leaves_foreign_host_link_untouched() {
        let endpoint = GraphUrl::new("https://graph.microsoft.com").unwrap();
        let link = "https://elsewhere.example.com/v1.0/users?page=2";
        assert_eq!(endpoint.strip_base(link), link);
    }

    #[test]
    fn strip_base_does_not_match_host_prefix_tricks() {
        let endpoint = GraphUrl::new("https://graph.microsoft.com").unwrap();
        let link = "https://graph.microsoft.com.evil.example/v1.0/users";
        assert_eq!(endpoint.strip_base(link), link);
    }
}
