//! Keyword search over the endpoint catalog.
//!
//! # Ranking
//! 1. Optional category filter (case-insensitive equality; empty means none)
//! 2. Per term: +3 if it occurs in the record text, +2 more if it occurs as
//!    a whole word
//! 3. Zero-score records are dropped
//! 4. Stable sort by score descending, so ties keep catalog order
//! 5. Truncate to `limit`

pub mod render;
pub mod scoring;

use crate::catalog::{Catalog, EndpointRecord};
use serde::Serialize;

pub use render::{render_result, NO_RESULTS_MESSAGE};
pub use scoring::{compile_terms, score_record, TermMatcher};

/// Default number of results to return
pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<'a> {
    pub record: &'a EndpointRecord,
    /// Always positive for returned results.
    pub score: u32,
}

/// Rank `catalog` entries against `terms`.
///
/// Terms are lower-cased here; empty terms contribute nothing. An empty
/// result is a normal outcome, not an error.
pub fn search<'a, S: AsRef<str>>(
    catalog: &'a Catalog,
    terms: &[S],
    category: Option<&str>,
    limit: usize,
) -> Vec<SearchResult<'a>> {
    let matchers = compile_terms(terms);
    let category = category
        .filter(|wanted| !wanted.is_empty())
        .map(str::to_lowercase);

    let mut results: Vec<SearchResult<'a>> = catalog
        .endpoints()
        .iter()
        .filter(|record| {
            category
                .as_deref()
                .map_or(true, |wanted| record.category.to_lowercase() == wanted)
        })
        .filter_map(|record| {
            let score = score_record(record, &matchers);
            (score > 0).then_some(SearchResult { record, score })
        })
        .collect();

    // sort_by is stable: equal scores keep document order
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(limit);

    tracing::debug!(
        terms = matchers.len(),
        category = category.as_deref().unwrap_or(""),
        matches = results.len(),
        "Endpoint search completed"
    );

    results
}
