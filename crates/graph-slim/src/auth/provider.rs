//! Token acquisition via the OAuth2 client-credentials grant.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{AuthError, Error};

use super::credentials::ClientCredentials;
use super::token::AccessToken;

/// The default authority issuing tokens for Graph.
pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";

/// The default scope requested for Graph access.
pub const DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// A source of access tokens.
///
/// This is the seam between [`GraphClient`](crate::GraphClient) and
/// credential acquisition: the client asks for a fresh token whenever the
/// cached one is missing or expired, and otherwise never touches the
/// provider.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Obtain a new access token.
    ///
    /// # Errors
    ///
    /// Failures propagate unmodified to the caller of the in-progress
    /// fetch; they are never retried.
    async fn acquire(&self) -> Result<AccessToken, Error>;
}

/// [`TokenProvider`] implementation for the client-credentials grant.
///
/// Posts a form-encoded token request to
/// `{authority}/{tenant}/oauth2/v2.0/token` and converts the response into
/// an [`AccessToken`] carrying the reported lifetime.
///
/// # Example
///
/// ```no_run
/// use graph_slim::{ClientCredentials, ClientCredentialsProvider};
///
/// let creds = ClientCredentials::new("tenant-id", "client-id", "client-secret");
/// let provider = ClientCredentialsProvider::new(creds);
/// ```
#[derive(Debug)]
pub struct ClientCredentialsProvider {
    client: reqwest::Client,
    credentials: ClientCredentials,
    authority: String,
    scope: String,
}

impl ClientCredentialsProvider {
    /// Create a provider for the given credentials against the default
    /// Microsoft identity platform authority.
    pub fn new(credentials: ClientCredentials) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("graph-slim/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            credentials,
            authority: DEFAULT_AUTHORITY.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
        }
    }

    /// Override the token authority (for tests or sovereign clouds).
    #[must_use]
    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = authority.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the requested scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority,
            self.credentials.tenant_id()
        )
    }

    async fn error_detail(response: reqwest::Response) -> String {
        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<TokenErrorBody>(&text) {
            Ok(body) => match body.error_description {
                Some(description) => format!("{}: {}", body.error, description),
                None => body.error,
            },
            Err(_) => text,
        }
    }
}

#[async_trait]
impl TokenProvider for ClientCredentialsProvider {
    #[instrument(skip(self), fields(tenant = %self.credentials.tenant_id()))]
    async fn acquire(&self) -> Result<AccessToken, Error> {
        debug!("requesting access token");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id()),
            ("client_secret", self.credentials.client_secret()),
            ("scope", self.scope.as_str()),
        ];

        let response = self
            .client
            .post(self.token_url())
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = Self::error_detail(response).await;
            return Err(AuthError::TokenRejected {
                status: status.as_u16(),
                detail,
            }
            .into());
        }

        let body: TokenResponse = response.json().await?;
        debug!(expires_in = body.expires_in, "access token issued");

        Ok(AccessToken::with_lifetime(body.access_token, body.expires_in))
    }
}

/// Success body of the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

/// Standard OAuth2 error body of the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenErrorBody {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> ClientCredentialsProvider {
        ClientCredentialsProvider::new(ClientCredentials::new("tenant", "client", "secret"))
    }

    #[test]
    fn token_url_includes_tenant() {
        assert_eq!(
            provider().token_url(),
            "https://login.microsoftonline.com/tenant/oauth2/v2.0/token"
        );
    }

    #[test]
    fn with_authority_trims_trailing_slash() {
        let provider = provider().with_authority("http://127.0.0.1:9999/");
        assert_eq!(
            provider.token_url(),
            "http://127.0.0.1:9999/tenant/oauth2/v2.0/token"
        );
    }
}
