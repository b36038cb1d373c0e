//! Plain-text rendering of search results for the terminal.

use crate::search::SearchResult;

/// Characters of description shown before eliding.
pub const MAX_DESCRIPTION_CHARS: usize = 120;

pub const NO_RESULTS_MESSAGE: &str = "No results. Try different keywords or remove filters.";

/// Render one result as a block of lines (no trailing newline).
///
/// ```text
/// [Gateway] GET /api/...  -- Get Emergency Contact
///   desc: Return the emergency contact
///   params: 2
///   url: https://...
/// ```
/// The `desc` and `params` lines are omitted when empty.
pub fn render_result(result: &SearchResult<'_>) -> String {
    let record = result.record;
    let mut lines = vec![format!(
        "[{}] {} {}  -- {}",
        record.category, record.method, record.path, record.name
    )];

    if !record.description.is_empty() {
        lines.push(format!("  desc: {}", truncate_description(&record.description)));
    }
    if !record.parameters.is_empty() {
        lines.push(format!("  params: {}", record.parameters.len()));
    }
    lines.push(format!("  url: {}", record.url));

    lines.join("\n")
}

/// First `MAX_DESCRIPTION_CHARS` characters, plus "..." when cut.
fn truncate_description(desc: &str) -> String {
    match desc.char_indices().nth(MAX_DESCRIPTION_CHARS) {
        Some((cut, _)) => format!("{}...", &desc[..cut]),
        None => desc.to_string(),
    }
}
