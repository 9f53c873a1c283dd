//! Isolates the JSON object embedded in a model answer.
//!
//! Models often wrap the payload in prose or code fences. The object is taken
//! to span from the first `{` to the last `}`; braces inside string values are
//! not special-cased, so a stray brace at either edge of the answer can still
//! produce a bad slice.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("No valid JSON object found in the response")]
    NoJsonFound { content: String },

    #[error("Failed to parse as JSON: {source}")]
    MalformedJson {
        content: String,
        #[source]
        source: serde_json::Error,
    },
}

impl NormalizeError {
    /// The trimmed model answer, for surfacing to a human.
    pub fn content(&self) -> &str {
        match self {
            NormalizeError::NoJsonFound { content } => content,
            NormalizeError::MalformedJson { content, .. } => content,
        }
    }
}

/// Parses the outermost `{ ... }` span of `raw` as JSON.
pub fn extract_json(raw: &str) -> Result<Value, NormalizeError> {
    let trimmed = raw.trim();

    let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) else {
        return Err(NormalizeError::NoJsonFound {
            content: trimmed.to_string(),
        });
    };

    let candidate = if end >= start {
        &trimmed[start..=end]
    } else {
        ""
    };

    serde_json::from_str(candidate).map_err(|source| NormalizeError::MalformedJson {
        content: trimmed.to_string(),
        source,
    })
}
