//! Catalog loading and endpoint lookup.
//!
//! The API reference is a JSON document of the form
//! `{ "endpoints": [ { "name", "category", "method", "path", ... }, ... ] }`.
//! It is parsed wholesale; a malformed record fails the whole load.

use crate::catalog::types::{Catalog, EndpointRecord};
use crate::error::{AppError, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Origin label used in errors for documents that did not come from a file.
const INLINE_ORIGIN: &str = "<inline>";

/// Read and parse the catalog document at `path`.
///
/// # Errors
/// Returns `AppError::CatalogLoadError` if the file is missing, unreadable,
/// or not a valid catalog document.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let origin = path.display().to_string();

    let text = fs::read_to_string(path).map_err(|e| AppError::CatalogLoadError {
        path: origin.clone(),
        reason: match e.kind() {
            ErrorKind::NotFound => "file not found".to_string(),
            _ => e.to_string(),
        },
    })?;

    let catalog = parse_catalog(&text, &origin)?;

    tracing::debug!(
        path = %origin,
        endpoints = catalog.len(),
        "API reference loaded"
    );

    Ok(catalog)
}

/// Parse a catalog document held in memory.
pub fn parse_catalog(text: &str, origin: &str) -> Result<Catalog> {
    let catalog: Catalog = serde_json::from_str(text).map_err(|e| AppError::CatalogLoadError {
        path: origin.to_string(),
        reason: e.to_string(),
    })?;

    report_duplicates(&catalog, origin);

    Ok(catalog)
}

impl Catalog {
    /// Read and parse the catalog document at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        load_catalog(path)
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json_str(text: &str) -> Result<Self> {
        parse_catalog(text, INLINE_ORIGIN)
    }

    /// Build a catalog from an already-parsed JSON document.
    pub fn from_json_value(value: Value) -> Result<Self> {
        let catalog: Catalog =
            serde_json::from_value(value).map_err(|e| AppError::CatalogLoadError {
                path: INLINE_ORIGIN.to_string(),
                reason: e.to_string(),
            })?;
        report_duplicates(&catalog, INLINE_ORIGIN);
        Ok(catalog)
    }

    /// Find the first record answering to `method` + `path`, in document order.
    ///
    /// # Errors
    /// Returns `AppError::EndpointNotFound` carrying the requested pair.
    pub fn find_endpoint(&self, method: &str, path: &str) -> Result<&EndpointRecord> {
        self.endpoints()
            .iter()
            .find(|record| record.matches(method, path))
            .ok_or_else(|| AppError::EndpointNotFound {
                method: method.to_string(),
                path: path.to_string(),
            })
    }
}

/// Records whose (method, path) pair already appeared earlier in the
/// document. Methods compare case-insensitively, paths exactly.
fn duplicate_entries(catalog: &Catalog) -> Vec<&EndpointRecord> {
    let mut seen = HashSet::with_capacity(catalog.len());
    let mut duplicates = Vec::new();

    for record in catalog.endpoints() {
        let key = (record.method.to_uppercase(), record.path.as_str());
        if !seen.insert(key) {
            duplicates.push(record);
        }
    }

    duplicates
}

/// Warn about repeated (method, path) pairs. Duplicates are kept; lookups
/// resolve to the first one.
fn report_duplicates(catalog: &Catalog, origin: &str) {
    let duplicates = duplicate_entries(catalog);

    if let Some(first) = duplicates.first() {
        tracing::warn!(
            path = %origin,
            duplicates = duplicates.len(),
            first_method = %first.method,
            first_path = %first.path,
            "API reference repeats endpoints; lookups use the first occurrence"
        );
    }
}
