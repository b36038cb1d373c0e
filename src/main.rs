//! Invoke one API endpoint listed in the API reference.
//!
//! Usage:
//!   invoke-endpoint --path /api/account/cloud-gateway/v1/emergency-contact
//!   invoke-endpoint --method POST --path /api/policy/blocked-senders --body '{"data":[]}'
//!
//! The bearer token comes from `APIREF_TOKEN` when set, otherwise from a
//! client-credentials exchange using the credential document.

use anyhow::Context;
use apiref::auth::{resolve_token, Credential};
use apiref::catalog::load_catalog;
use apiref::http::{Invoker, ReqwestTransport, RetryPolicy};
use apiref::{telemetry, Config};
use clap::Parser;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "invoke-endpoint", version)]
#[command(about = "Call an API endpoint from the reference catalog and print the JSON response")]
struct Cli {
    /// HTTP method of the endpoint.
    #[arg(long, default_value = "GET")]
    method: String,
    /// Endpoint path exactly as listed in the API reference.
    #[arg(long)]
    path: String,
    /// Inline JSON request body.
    #[arg(long, conflicts_with = "body_file")]
    body: Option<String>,
    /// File holding the JSON request body.
    #[arg(long)]
    body_file: Option<PathBuf>,
    /// Path to the API reference (overrides APIREF_API_REF).
    #[arg(long)]
    api_ref: Option<PathBuf>,
    /// Path to the credential document (overrides APIREF_CREDENTIALS).
    #[arg(long)]
    credentials: Option<PathBuf>,
}

fn read_body(cli: &Cli) -> anyhow::Result<Option<Value>> {
    if let Some(inline) = &cli.body {
        let value = serde_json::from_str(inline).context("parsing --body as JSON")?;
        return Ok(Some(value));
    }
    if let Some(path) = &cli.body_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading body file {}", path.display()))?;
        let value = serde_json::from_str(&text)
            .with_context(|| format!("parsing body file {} as JSON", path.display()))?;
        return Ok(Some(value));
    }
    Ok(None)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(path) = &cli.api_ref {
        config.api_ref_path = path.clone();
    }
    if let Some(path) = &cli.credentials {
        config.credentials_path = path.clone();
    }

    telemetry::init(config.log_format);

    let body = read_body(&cli)?;

    // Both documents are checked before anything touches the network
    let credential = Credential::load(&config.credentials_path)?;
    let catalog = load_catalog(&config.api_ref_path)?;
    let endpoint = catalog.find_endpoint(&cli.method, &cli.path)?;

    tracing::info!(
        name = %endpoint.name,
        method = %endpoint.method,
        path = %endpoint.path,
        "Invoking endpoint"
    );

    let transport = ReqwestTransport::new(config.request_timeout)?;
    let token = resolve_token(config.token_override.as_deref(), &credential, &transport)?;

    let invoker = Invoker::new(&transport, RetryPolicy::from_config(&config));
    let response = invoker.invoke(
        credential.base_url(),
        &token,
        &endpoint.method,
        &endpoint.path,
        body.as_ref(),
    )?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
