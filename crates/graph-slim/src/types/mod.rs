//! Validated primitive types.

mod endpoint;
mod version;

pub use endpoint::{DEFAULT_ENDPOINT, GraphUrl};
pub use version::ApiVersion;
