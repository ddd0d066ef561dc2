//! Transport layer for the z.ai client.

pub mod http;

pub use http::HttpTransport;
