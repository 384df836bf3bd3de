//! HTTP transport for Graph requests.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, trace};

use crate::error::{Error, TransportError};
use crate::types::GraphUrl;

use super::query::{self, QueryMap};
use super::wire::RawResponse;

/// HTTP client for bearer-authenticated Graph GET requests.
#[derive(Debug, Clone)]
pub(crate) struct RestTransport {
    client: reqwest::Client,
    endpoint: GraphUrl,
}

impl RestTransport {
    /// Create a transport rooted at the given Graph endpoint.
    pub fn new(endpoint: GraphUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("graph-slim/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, endpoint }
    }

    /// Returns the base endpoint this transport is configured for.
    pub fn endpoint(&self) -> &GraphUrl {
        &self.endpoint
    }

    /// Issue a GET against a path relative to the base endpoint.
    ///
    /// Parameters embedded in `path` are sent alongside `params`; `params`
    /// wins when both name the same key. The response body is parsed as
    /// JSON; a non-JSON body is a decode error on an OK response and is
    /// retained as a raw string otherwise.
    pub async fn get(
        &self,
        path: &str,
        params: &QueryMap,
        token: &str,
    ) -> Result<RawResponse, Error> {
        let (route, _) = query::split(path);
        let mut merged = query::resolve(path);
        merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));

        let url = self.endpoint.request_url(route);
        debug!(%url, "GET");
        trace!(?merged, "query parameters");

        let response = self
            .client
            .get(&url)
            .query(&merged)
            .headers(self.auth_headers(token))
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        trace!(status, "response received");

        let body = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(err) if status == 200 => {
                return Err(TransportError::Decode {
                    message: err.to_string(),
                }
                .into());
            }
            // keep the raw text of error responses as diagnostic detail
            Err(_) => serde_json::Value::String(text),
        };

        Ok(RawResponse { status, body })
    }

    /// Create authorization headers for authenticated requests.
    fn auth_headers(&self, token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).expect("invalid token characters"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_creation() {
        let endpoint = GraphUrl::new("https://graph.microsoft.com").unwrap();
        let transport = RestTransport::new(endpoint.clone());
        assert_eq!(transport.endpoint().as_str(), endpoint.as_str());
    }
}
