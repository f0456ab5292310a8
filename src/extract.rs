//! Pulls the JSON document out of a free-text model reply.
//!
//! The model is asked for a bare JSON object but usually wraps it in a
//! sentence or a code fence. We take everything from the first `{` to the
//! last `}` and parse that. Braces in the surrounding prose break this; the
//! result is then a parse error and nothing is salvaged.

use serde_json::Value;
use tracing::{debug, warn};

use crate::{CinqueTerreError, Result};

/// Characters of the raw reply kept when reporting a parse failure
pub const PREVIEW_CHARS: usize = 1000;

/// Candidate JSON span, inclusive of both braces
#[must_use]
pub fn json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    // '}' is one byte, so end + 1 is a char boundary
    Some(&text[start..=end])
}

/// Extract and parse the JSON object embedded in `text`
pub fn extract_json_object(text: &str) -> Result<Value> {
    let Some(candidate) = json_span(text) else {
        warn!("No JSON object found in response ({} chars)", text.len());
        return Err(CinqueTerreError::JsonNotFound);
    };

    debug!(
        "Parsing JSON candidate of {} bytes (reply was {} bytes)",
        candidate.len(),
        text.len()
    );

    serde_json::from_str(candidate).map_err(|source| {
        warn!(
            "JSON parsing error: {}. Raw response: {}...",
            source,
            response_preview(text, PREVIEW_CHARS)
        );
        CinqueTerreError::JsonParse { source }
    })
}

/// First `limit` characters of a reply, for diagnostics
#[must_use]
pub fn response_preview(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
