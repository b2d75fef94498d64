//! Outbound plumbing shared by every domain module of the gateway: backend
//! endpoint configuration, query-string assembly and the JSON HTTP client.

pub mod endpoint;
pub mod error;
pub mod http;
pub mod query;

pub use endpoint::{BackendEndpoint, BackendsConfig};
pub use error::UpstreamError;
pub use http::{HttpClient, RawResponse, UpstreamMethod};
pub use query::build_query_url;
