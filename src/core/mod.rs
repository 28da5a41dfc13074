//! Core infrastructure: HTTP transport seam, request options, provider API
//! plumbing.

pub mod api;
pub mod options;
pub mod transport;

pub use options::RequestOptions;
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, MockHttpTransport, ReqwestHttpTransport,
};
