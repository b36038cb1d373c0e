//! Bearer token acquisition.
//!
//! Two strategies sit behind `TokenSource`:
//! - `StaticToken`: an operator-supplied token, returned verbatim
//! - `ClientCredentialsExchange`: form-encoded POST to `{base_url}/oauth/token`
//!
//! `resolve_token` prefers the static token whenever one is supplied, so a
//! tenant whose exchange contract differs can still be driven.

use crate::auth::credentials::Credential;
use crate::error::{AppError, Result};
use crate::http::transport::{HttpRequest, HttpTransport, RequestBody};
use reqwest::Method;
use serde_json::Value;
use std::fmt;

/// Path appended to the tenant base URL for the exchange.
pub const TOKEN_ENDPOINT_PATH: &str = "/oauth/token";

/// Opaque bearer token. No expiry is tracked.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

pub trait TokenSource {
    fn fetch_token(&self) -> Result<Token>;

    /// Short strategy name for logs.
    fn strategy(&self) -> &'static str;
}

pub struct StaticToken {
    token: Token,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Token::new(token),
        }
    }
}

impl TokenSource for StaticToken {
    fn fetch_token(&self) -> Result<Token> {
        Ok(self.token.clone())
    }

    fn strategy(&self) -> &'static str {
        "static"
    }
}

pub struct ClientCredentialsExchange<'a> {
    credential: &'a Credential,
    transport: &'a dyn HttpTransport,
}

impl<'a> ClientCredentialsExchange<'a> {
    pub fn new(credential: &'a Credential, transport: &'a dyn HttpTransport) -> Self {
        Self {
            credential,
            transport,
        }
    }

    pub fn token_url(&self) -> String {
        format!("{}{}", self.credential.base_url(), TOKEN_ENDPOINT_PATH)
    }

    fn request(&self) -> HttpRequest {
        HttpRequest::new(Method::POST, self.token_url())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(RequestBody::Form(vec![
                ("grant_type".to_string(), "client_credentials".to_string()),
                ("client_id".to_string(), self.credential.client_id().to_string()),
                (
                    "client_secret".to_string(),
                    self.credential.client_secret().to_string(),
                ),
            ]))
    }
}

impl TokenSource for ClientCredentialsExchange<'_> {
    fn fetch_token(&self) -> Result<Token> {
        let reply = self.transport.send(&self.request())?;

        if !reply.is_success() {
            tracing::error!(status = reply.status, "Token exchange rejected");
            return Err(AppError::AuthExchangeError {
                status: reply.status,
                body: reply.body,
            });
        }

        let payload: Value = serde_json::from_str(&reply.body).map_err(|e| {
            AppError::ResponseDecodeError(format!("token response is not JSON: {}", e))
        })?;

        payload
            .get("access_token")
            .and_then(Value::as_str)
            .map(Token::new)
            .ok_or(AppError::TokenFieldMissing)
    }

    fn strategy(&self) -> &'static str {
        "client_credentials"
    }
}

/// Pick the strategy: a non-empty override wins, otherwise exchange.
pub fn select_token_source<'a>(
    override_token: Option<&str>,
    credential: &'a Credential,
    transport: &'a dyn HttpTransport,
) -> Box<dyn TokenSource + 'a> {
    match override_token.filter(|token| !token.is_empty()) {
        Some(token) => Box::new(StaticToken::new(token)),
        None => Box::new(ClientCredentialsExchange::new(credential, transport)),
    }
}

/// Resolve the bearer token for one invocation session.
pub fn resolve_token(
    override_token: Option<&str>,
    credential: &Credential,
    transport: &dyn HttpTransport,
) -> Result<Token> {
    let source = select_token_source(override_token, credential, transport);
    tracing::debug!(strategy = source.strategy(), "Resolving access token");
    source.fetch_token()
}
