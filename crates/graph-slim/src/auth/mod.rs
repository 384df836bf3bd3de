//! Authentication: credentials, access tokens, and token acquisition.
//!
//! The [`GraphClient`](crate::GraphClient) caches one [`AccessToken`] and
//! refreshes it through a [`TokenProvider`] whenever it is missing or
//! expired.

mod credentials;
mod provider;
mod token;

pub use credentials::{ClientCredentials, ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_TENANT_ID};
pub use provider::{ClientCredentialsProvider, DEFAULT_AUTHORITY, DEFAULT_SCOPE, TokenProvider};
pub use token::AccessToken;
