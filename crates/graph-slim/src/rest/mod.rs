//! REST transport layer for Graph requests.

pub(crate) mod query;
mod transport;
mod wire;

pub(crate) use transport::RestTransport;
pub(crate) use wire::PageBody;
pub use wire::RawResponse;
