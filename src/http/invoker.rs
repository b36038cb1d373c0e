//! Retrying invocation of catalog endpoints.
//!
//! # Retry policy
//! Attempts are 1-indexed and capped at `max_attempts`. A 2xx reply ends the
//! loop immediately. A transient status (429, 500, 502, 503, 504) on any
//! attempt but the last sleeps `base_delay * 2^(attempt-1)` and tries again.
//! Every other outcome is terminal:
//! - non-transient status, or transient status on the last attempt:
//!   `AppError::InvocationError` with that attempt's status and body
//! - network-level failure: the transport's `AppError::TransportError`,
//!   never retried

use crate::auth::Token;
use crate::config::Config;
use crate::error::{is_transient_status, AppError, Result};
use crate::http::transport::{parse_method, HttpReply, HttpRequest, HttpTransport, RequestBody};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: config.base_delay,
        }
    }

    /// Delay slept after a transient failure on `attempt` (1-indexed).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }

    pub fn should_retry(&self, status: u16, attempt: u32) -> bool {
        is_transient_status(status) && attempt < self.max_attempts
    }

    /// Every delay the policy can produce, in order.
    pub fn schedule(&self) -> Vec<Duration> {
        (1..self.max_attempts).map(|a| self.delay_after(a)).collect()
    }
}

/// Blocks the calling thread between attempts.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

pub struct Invoker<T, S = ThreadSleeper> {
    transport: T,
    sleeper: S,
    policy: RetryPolicy,
}

impl<T: HttpTransport> Invoker<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self::with_sleeper(transport, ThreadSleeper, policy)
    }
}

impl<T: HttpTransport, S: Sleeper> Invoker<T, S> {
    pub fn with_sleeper(transport: T, sleeper: S, policy: RetryPolicy) -> Self {
        Self {
            transport,
            sleeper,
            policy,
        }
    }

    /// Call `base_url + path` with bearer `token`, retrying transient statuses.
    ///
    /// Returns the parsed JSON body of the first 2xx reply (`null` when the
    /// body is empty).
    pub fn invoke(
        &self,
        base_url: &str,
        token: &Token,
        method: &str,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let request = build_request(base_url, token, method, path, body)?;

        let mut attempt: u32 = 1;
        loop {
            let reply = self.transport.send(&request)?;

            if reply.is_success() {
                tracing::debug!(
                    attempt,
                    status = reply.status,
                    method = %request.method,
                    path,
                    "Request succeeded"
                );
                return decode_body(&reply);
            }

            if self.policy.should_retry(reply.status, attempt) {
                let delay = self.policy.delay_after(attempt);
                tracing::warn!(
                    attempt,
                    max_attempts = self.policy.max_attempts,
                    status = reply.status,
                    delay_ms = delay.as_millis() as u64,
                    "Transient status, backing off"
                );
                self.sleeper.sleep(delay);
                attempt += 1;
                continue;
            }

            tracing::error!(
                attempt,
                status = reply.status,
                method = %request.method,
                path,
                "Request failed"
            );
            return Err(AppError::InvocationError {
                status: reply.status,
                body: reply.body,
            });
        }
    }
}

fn build_request(
    base_url: &str,
    token: &Token,
    method: &str,
    path: &str,
    body: Option<&Value>,
) -> Result<HttpRequest> {
    let method = parse_method(method)?;
    let request = HttpRequest::new(method, format!("{}{}", base_url, path))
        .header("Authorization", format!("Bearer {}", token.as_str()))
        .header("Content-Type", "application/json");

    Ok(match body {
        Some(value) => request.body(RequestBody::Json(value.clone())),
        None => request,
    })
}

fn decode_body(reply: &HttpReply) -> Result<Value> {
    if reply.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&reply.body).map_err(|e| AppError::ResponseDecodeError(e.to_string()))
}
