//! Credential loading and bearer token resolution.

pub mod credentials;
pub mod token;

pub use credentials::Credential;
pub use token::{
    resolve_token, select_token_source, ClientCredentialsExchange, StaticToken, Token,
    TokenSource,
};
