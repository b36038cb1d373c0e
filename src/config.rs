use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable carrying a pre-obtained bearer token.
pub const TOKEN_ENV_VAR: &str = "APIREF_TOKEN";

const DEFAULT_API_REF: &str = "api-reference.json";

/// Log output format for the CLI binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> anyhow::Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!(
                "Unsupported APIREF_LOG_FORMAT '{}' (expected text or json)",
                other
            ),
        }
    }
}

/// Settings read by `find-endpoint`, which never touches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub api_ref_path: PathBuf,
    pub log_format: LogFormat,
}

impl SearchConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads only `APIREF_API_REF` and `APIREF_LOG_FORMAT`.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            api_ref_path: lookup("APIREF_API_REF")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_API_REF)),
            log_format: LogFormat::parse(&lookup("APIREF_LOG_FORMAT").unwrap_or_default())?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the endpoint catalog document.
    pub api_ref_path: PathBuf,
    /// Path to the credential document (BaseUrl / ClientId / ClientSecret).
    pub credentials_path: PathBuf,
    /// Bearer token supplied by the operator. Empty values are treated as unset.
    pub token_override: Option<String>,
    /// Maximum HTTP attempts per invocation, including the first.
    pub max_attempts: u32,
    /// Backoff base; attempt n waits `base_delay * 2^(n-1)` before retrying.
    pub base_delay: Duration,
    /// Per-attempt timeout. None disables it.
    pub request_timeout: Option<Duration>,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_ref_path: PathBuf::from(DEFAULT_API_REF),
            credentials_path: PathBuf::from("credentials.json"),
            token_override: None,
            max_attempts: 4,
            base_delay: Duration::from_millis(500),
            request_timeout: Some(Duration::from_secs(30)),
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// `from_env` is this with `std::env::var`; tests pass a map instead of
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let shared = SearchConfig::from_lookup(&lookup)?;

        let max_attempts: u32 = lookup("APIREF_MAX_ATTEMPTS")
            .unwrap_or_else(|| defaults.max_attempts.to_string())
            .parse()?;
        if max_attempts == 0 {
            anyhow::bail!("APIREF_MAX_ATTEMPTS must be at least 1");
        }

        let base_delay_ms: u64 = lookup("APIREF_BASE_DELAY_MS")
            .unwrap_or_else(|| defaults.base_delay.as_millis().to_string())
            .parse()?;

        let timeout_secs: u64 = lookup("APIREF_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse()?;

        Ok(Self {
            api_ref_path: shared.api_ref_path,
            credentials_path: lookup("APIREF_CREDENTIALS")
                .map(PathBuf::from)
                .unwrap_or(defaults.credentials_path),
            token_override: lookup(TOKEN_ENV_VAR).filter(|token| !token.is_empty()),
            max_attempts,
            base_delay: Duration::from_millis(base_delay_ms),
            request_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            log_format: shared.log_format,
        })
    }
}
