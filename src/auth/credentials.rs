use crate::error::{AppError, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Tenant credentials, as stored in the credential document:
/// `{ "BaseUrl": ..., "ClientId": ..., "ClientSecret": ... }`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credential {
    #[serde(rename = "BaseUrl")]
    base_url: String,
    #[serde(rename = "ClientId")]
    client_id: String,
    #[serde(rename = "ClientSecret")]
    client_secret: String,
}

impl Credential {
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Read the credential document at `path`.
    ///
    /// # Errors
    /// Returns `AppError::CredentialLoadError` if the file is missing,
    /// unreadable, or lacks one of the three keys.
    pub fn load(path: &Path) -> Result<Self> {
        let origin = path.display().to_string();

        let text = fs::read_to_string(path).map_err(|e| AppError::CredentialLoadError {
            path: origin.clone(),
            reason: match e.kind() {
                ErrorKind::NotFound => "file not found".to_string(),
                _ => e.to_string(),
            },
        })?;

        Self::parse(&text, &origin)
    }

    pub fn parse(text: &str, origin: &str) -> Result<Self> {
        let raw: Credential =
            serde_json::from_str(text).map_err(|e| AppError::CredentialLoadError {
                path: origin.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self::new(raw.base_url, raw.client_id, raw.client_secret))
    }

    /// Tenant base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

fn normalize_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
