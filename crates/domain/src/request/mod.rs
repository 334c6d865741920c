//! HTTP request types for the collection endpoint

mod header;
mod method;
mod spec;

pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use spec::{RequestSpec, record_url};
