//! Graph client: token cache and the paginated fetch loop.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::auth::{AccessToken, ClientCredentials, ClientCredentialsProvider, TokenProvider};
use crate::error::{Error, UpstreamError};
use crate::resource::Resource;
use crate::rest::{PageBody, RawResponse, RestTransport, query};
use crate::types::{ApiVersion, GraphUrl};

/// Client for paginated Microsoft Graph reads.
///
/// One logical [`get`](GraphClient::get) call follows the service's
/// continuation links across as many HTTP round-trips as needed and returns
/// the concatenated result set. The client caches one access token and
/// refreshes it through its [`TokenProvider`] at the start of each call.
///
/// # Thread Safety
///
/// Clients are cheap to clone (they use an internal `Arc`) and safe to
/// share across tasks. At most one token refresh is in flight at a time;
/// concurrent calls reuse the token it produces.
///
/// # Example
///
/// ```no_run
/// use graph_slim::GraphClient;
///
/// # async fn example() -> Result<(), graph_slim::Error> {
/// let client = GraphClient::from_env()?;
/// let users = client.get("/users", &[("$top", "10")], "v1.0").await?;
///
/// for user in &users {
///     println!("{:?}", user.get("displayName").as_str());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GraphClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: RestTransport,
    provider: Arc<dyn TokenProvider>,
    token: RwLock<Option<AccessToken>>,
    last_response: RwLock<Option<RawResponse>>,
}

impl GraphClient {
    /// Create a client for the public Graph endpoint with the
    /// client-credentials provider.
    pub fn new(credentials: ClientCredentials) -> Self {
        Self::with_provider(
            GraphUrl::default(),
            Arc::new(ClientCredentialsProvider::new(credentials)),
        )
    }

    /// Create a client with credentials resolved from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing environment variable.
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self::new(ClientCredentials::from_env()?))
    }

    /// Create a client against an explicit endpoint and token provider.
    pub fn with_provider(endpoint: GraphUrl, provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport: RestTransport::new(endpoint),
                provider,
                token: RwLock::new(None),
                last_response: RwLock::new(None),
            }),
        }
    }

    /// Returns the Graph endpoint this client is configured for.
    pub fn endpoint(&self) -> &GraphUrl {
        self.inner.transport.endpoint()
    }

    /// Fetch a resource, following pagination until exhausted.
    ///
    /// The request path is `/{version}/{resource}` with one leading slash
    /// stripped from `resource`. Query parameters embedded in `resource`
    /// are merged with `query_parameters`; the explicit set wins on
    /// collision. Results preserve page order and in-page order.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] for a version outside `v1.0`/`beta`,
    ///   before any network activity
    /// - [`Error::Auth`] when a token cannot be obtained
    /// - [`Error::Upstream`] for any non-200 page response, carrying the
    ///   raw body; never retried
    /// - [`Error::Transport`] for network or decoding failures
    #[instrument(skip(self, query_parameters), fields(endpoint = %self.endpoint()))]
    pub async fn get(
        &self,
        resource: &str,
        query_parameters: &[(&str, &str)],
        version: &str,
    ) -> Result<Vec<Resource>, Error> {
        let version = ApiVersion::parse(version)?;
        let token = self.ensure_valid_token().await?;

        let resource = resource.strip_prefix('/').unwrap_or(resource);
        let path = format!("/{}/{}", version, resource);

        // Parameters embedded in the resource path are the base; the
        // explicit set overwrites them on collision.
        let mut params = query::resolve(&path);
        params.extend(
            query_parameters
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );

        debug!(%path, "fetching resource");

        let mut results = Vec::new();
        let mut next_link: Option<String> = None;

        loop {
            let url = match next_link.as_deref() {
                None => path.clone(),
                Some(link) => self.endpoint().strip_base(link).to_string(),
            };

            let response = self.inner.transport.get(&url, &params, &token).await?;
            let status = response.status;
            let body = response.body.clone();
            *self.inner.last_response.write().await = Some(response);

            if status != 200 {
                return Err(UpstreamError { status, body }.into());
            }

            let page = PageBody::from_value(&body);
            results.extend(page.value.into_iter().map(Resource::new));

            match page.next_link {
                Some(link) => next_link = Some(link),
                None => break,
            }
        }

        debug!(count = results.len(), "fetch complete");
        Ok(results)
    }

    /// The most recent raw HTTP response received by this client, retained
    /// across success and failure for diagnostics.
    pub async fn last_response(&self) -> Option<RawResponse> {
        self.inner.last_response.read().await.clone()
    }

    /// Return the cached token, refreshing it first when missing or
    /// expired. Runs once per top-level fetch; pages within one fetch
    /// reuse the token it yields.
    async fn ensure_valid_token(&self) -> Result<String, Error> {
        {
            let held = self.inner.token.read().await;
            if let Some(token) = held.as_ref() {
                if !token.is_expired() {
                    return Ok(token.secret().to_string());
                }
            }
        }

        let mut slot = self.inner.token.write().await;
        // another caller may have refreshed while we waited on the lock
        if let Some(token) = slot.as_ref() {
            if !token.is_expired() {
                return Ok(token.secret().to_string());
            }
        }

        info!("acquiring access token");
        let token = self.inner.provider.acquire().await?;
        let secret = token.secret().to_string();
        *slot = Some(token);
        Ok(secret)
    }
}

// Custom Debug impl that hides the cached token
impl std::fmt::Debug for GraphClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphClient")
            .field("endpoint", self.endpoint())
            .field("token", &"[REDACTED]")
            .finish()
    }
}
