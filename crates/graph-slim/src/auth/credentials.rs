//! Client credentials type.

use std::fmt;

use crate::error::{Error, InvalidInputError};

/// Environment variable consulted for the tenant identifier.
pub const ENV_TENANT_ID: &str = "AZURE_TENANT_ID";
/// Environment variable consulted for the client identifier.
pub const ENV_CLIENT_ID: &str = "AZURE_CLIENT_ID";
/// Environment variable consulted for the client secret.
pub const ENV_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";

/// Credentials for the OAuth2 client-credentials grant.
///
/// Holds the Azure tenant identifier, client (application) identifier, and
/// client secret. Values not supplied explicitly are resolved from the
/// `AZURE_TENANT_ID`, `AZURE_CLIENT_ID`, and `AZURE_CLIENT_SECRET`
/// environment variables at construction time.
///
/// # Security
///
/// The secret is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use graph_slim::ClientCredentials;
///
/// let creds = ClientCredentials::new("tenant-id", "client-id", "client-secret");
/// assert_eq!(creds.tenant_id(), "tenant-id");
/// ```
#[derive(Clone)]
pub struct ClientCredentials {
    tenant_id: String,
    client_id: String,
    client_secret: String,
}

impl ClientCredentials {
    /// Create credentials from explicit values.
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Resolve all three credentials from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] naming the first missing variable.
    pub fn from_env() -> Result<Self, Error> {
        Self::resolve(None, None, None)
    }

    /// Resolve credentials, falling back to the environment for any value
    /// not supplied explicitly.
    pub fn resolve(
        tenant_id: Option<String>,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Result<Self, Error> {
        Self::resolve_with(tenant_id, client_id, client_secret, |name| {
            std::env::var(name).ok()
        })
    }

    /// Resolution with an injected environment lookup, for deterministic tests.
    pub(crate) fn resolve_with(
        tenant_id: Option<String>,
        client_id: Option<String>,
        client_secret: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Error> {
        let field = |explicit: Option<String>, name: &'static str| {
            explicit
                .or_else(|| lookup(name))
                .ok_or(InvalidInputError::MissingEnv { name })
        };

        Ok(Self {
            tenant_id: field(tenant_id, ENV_TENANT_ID)?,
            client_id: field(client_id, ENV_CLIENT_ID)?,
            client_secret: field(client_secret, ENV_CLIENT_SECRET)?,
        })
    }

    /// Returns the tenant identifier.
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// Returns the client identifier.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the client secret.
    ///
    /// # Security
    ///
    /// Use this only when constructing token requests.
    /// Never log or display this value.
    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

// Intentionally hide the secret in Debug output
impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn explicit_values_win_over_environment() {
        let vars = env(&[(ENV_TENANT_ID, "env-tenant")]);
        let creds = ClientCredentials::resolve_with(
            Some("explicit-tenant".to_string()),
            Some("client".to_string()),
            Some("secret".to_string()),
            |name| vars.get(name).cloned(),
        )
        .unwrap();
        assert_eq!(creds.tenant_id(), "explicit-tenant");
    }

    #[test]
    fn environment_fills_missing_values() {
        let vars = env(&[
            (ENV_TENANT_ID, "env-tenant"),
            (ENV_CLIENT_ID, "env-client"),
            (ENV_CLIENT_SECRET, "env-secret"),
        ]);
        let creds =
            ClientCredentials::resolve_with(None, None, None, |name| vars.get(name).cloned())
                .unwrap();
        assert_eq!(creds.tenant_id(), "env-tenant");
        assert_eq!(creds.client_id(), "env-client");
        assert_eq!(creds.client_secret(), "env-secret");
    }

    #[test]
    fn missing_variable_is_named_in_error() {
        let vars = env(&[(ENV_TENANT_ID, "env-tenant"), (ENV_CLIENT_ID, "env-client")]);
        let err = ClientCredentials::resolve_with(None, None, None, |name| {
            vars.get(name).cloned()
        })
        .unwrap_err();
        assert!(err.to_string().contains(ENV_CLIENT_SECRET));
    }

    #[test]
    fn credentials_hide_secret_in_debug() {
        let creds = ClientCredentials::new("tenant", "client", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("tenant"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
