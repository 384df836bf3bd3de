//! graph-slim - Minimal Microsoft Graph read client.
//!
//! This library authenticates with the client-credentials grant, issues
//! paginated read requests, and aggregates the paginated results into a
//! single collection of loosely-typed [`Resource`] records.
//!
//! # Example
//!
//! ```no_run
//! use graph_slim::GraphClient;
//!
//! # async fn example() -> Result<(), graph_slim::Error> {
//! let client = GraphClient::from_env()?;
//! let users = client.get("/users", &[], "v1.0").await?;
//!
//! for user in &users {
//!     println!("{:?}", user.get("displayName").as_str());
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod error;
pub mod resource;
pub mod rest;
pub mod types;

mod client;

// Re-export primary types at crate root for convenience
pub use auth::{AccessToken, ClientCredentials, ClientCredentialsProvider, TokenProvider};
pub use client::GraphClient;
pub use error::Error;
pub use resource::{Field, Resource};
pub use rest::RawResponse;
pub use types::{ApiVersion, GraphUrl};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
