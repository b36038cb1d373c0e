//! apiref - catalog-driven client for a remote HTTP API
//!
//! This library exposes the core components behind the `invoke-endpoint`
//! and `find-endpoint` binaries, enabling integration tests and embedding in
//! other tools.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod search;
pub mod telemetry;

// Re-export key types for convenience
pub use auth::{resolve_token, Credential, Token, TokenSource};
pub use catalog::{load_catalog, Catalog, EndpointRecord};
pub use config::{Config, SearchConfig};
pub use error::{AppError, Result};
pub use http::{Invoker, ReqwestTransport, RetryPolicy};
pub use search::{search, SearchResult, DEFAULT_LIMIT};
