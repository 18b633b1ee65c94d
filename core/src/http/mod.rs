// storefront/src/http/mod.rs

//! The one HTTP client shared by every service module.

pub mod client;
pub mod request;
pub mod transport;

pub use client::HttpClient;
pub use request::{ApiRequest, ApiResponse, Credential, Method};
pub use transport::{ReqwestTransport, Transport, TransportError};
