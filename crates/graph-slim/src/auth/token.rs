//! Access token type.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

// Refresh this long before the nominal expiry so a token about to lapse
// is never sent.
const EXPIRY_LEEWAY_SECS: i64 = 60;

/// An access token for authenticated Graph requests.
///
/// Tokens carry an absolute expiry instant derived from the token
/// endpoint's `expires_in`. They are replaced, never mutated, on refresh.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone)]
pub struct AccessToken {
    secret: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Create a token with an explicit expiry instant.
    pub fn new(secret: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            secret: secret.into(),
            expires_at,
        }
    }

    /// Create a token expiring `expires_in_secs` seconds from now.
    pub(crate) fn with_lifetime(secret: impl Into<String>, expires_in_secs: u64) -> Self {
        let lifetime = Duration::seconds(expires_in_secs.min(i64::MAX as u64) as i64);
        Self::new(secret, Utc::now() + lifetime)
    }

    /// Whether the token has expired (or is inside the refresh leeway).
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at - Duration::seconds(EXPIRY_LEEWAY_SECS)
    }

    /// Returns the expiry instant.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns the token value for use in authorization headers.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers.
    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_not_expired() {
        let token = AccessToken::with_lifetime("tok", 3600);
        assert!(!token.is_expired());
    }

    #[test]
    fn elapsed_token_is_expired() {
        let token = AccessToken::new("tok", Utc::now() - Duration::seconds(1));
        assert!(token.is_expired());
    }

    #[test]
    fn token_inside_leeway_is_expired() {
        // Nominally alive for another 30s, but within the refresh window.
        let token = AccessToken::new("tok", Utc::now() + Duration::seconds(30));
        assert!(token.is_expired());
    }

    #[test]
    fn zero_lifetime_token_is_expired() {
        let token = AccessToken::with_lifetime("tok", 0);
        assert!(token.is_expired());
    }

    #[test]
    fn access_token_hides_value_in_debug() {
        let token = AccessToken::with_lifetime("eyJhbGciOiJIUzI1NiJ9.secret", 3600);
        let debug = format!("{:?}", token);
        assert!(!debug.contains("eyJ"));
        assert!(debug.contains("[REDACTED]"));
    }
}
