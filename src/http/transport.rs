//! HTTP transport seam.
//!
//! Everything above this module speaks `HttpRequest` / `HttpReply`. The
//! production implementation is a blocking reqwest client; tests substitute
//! scripted transports.

use crate::error::{AppError, Result};
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::Method;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Request payload variants the client needs.
#[derive(Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// Serialized as JSON text.
    Json(Value),
    /// Serialized as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

// Form bodies carry client secrets; only field names are printed.
impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestBody::Empty => f.write_str("Empty"),
            RequestBody::Json(value) => f.debug_tuple("Json").field(value).finish(),
            RequestBody::Form(pairs) => f
                .debug_tuple("Form")
                .field(&pairs.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>())
                .finish(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Value of the first header named `name`, compared case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw text of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one HTTP exchange.
///
/// Implementations return `Ok` for every response that carries a status,
/// including 4xx/5xx. `Err` is reserved for network-level failures
/// (refused connection, timeout, broken stream).
pub trait HttpTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpReply>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpReply> {
        (**self).send(request)
    }
}

/// Blocking reqwest client. Connections are pooled across attempts.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a client whose timeout bounds each individual attempt.
    ///
    /// `None` disables the timeout entirely; reqwest's blocking client would
    /// otherwise fall back to its own 30 second default.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        Self::with_builder(Client::builder(), timeout)
    }

    /// Finish `builder` with the per-attempt timeout applied.
    pub fn with_builder(builder: ClientBuilder, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            client: builder.timeout(timeout).build()?,
        })
    }

    /// Wrap a preconfigured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpReply> {
        let mut builder = self.client.request(request.method.clone(), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => {
                let bytes = serde_json::to_vec(value).map_err(|e| {
                    AppError::ValidationError(format!("Request body is not serializable: {}", e))
                })?;
                builder.body(bytes)
            }
            RequestBody::Form(pairs) => builder.form(pairs),
        };

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        Ok(HttpReply { status, body })
    }
}

/// Parse an HTTP verb, ignoring case.
///
/// # Errors
/// Returns `AppError::ValidationError` for empty or malformed verbs.
pub fn parse_method(verb: &str) -> Result<Method> {
    let upper = verb.trim().to_ascii_uppercase();
    Method::from_bytes(upper.as_bytes())
        .map_err(|_| AppError::ValidationError(format!("Invalid HTTP method '{}'", verb)))
}
