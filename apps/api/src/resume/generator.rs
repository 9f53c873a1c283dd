//! Resume generation: prompt → model → structured JSON.
//!
//! The model's output is returned as parsed, with no schema check: keys such
//! as `summary` or `experience` are whatever the model chose to emit.

use serde_json::Value;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::llm_client::normalize::extract_json;
use crate::llm_client::{non_empty, TextGenerator};

/// Sends `prompt` to the model and parses the JSON object in its answer.
pub async fn generate_structured_resume(
    llm: &dyn TextGenerator,
    prompt: &str,
) -> Result<Value, AppError> {
    info!("Calling AI model");
    let raw = non_empty(llm.generate(prompt).await?)?;
    debug!("Raw AI response: {raw}");

    let resume = extract_json(&raw)?;
    info!("Parsed resume JSON successfully");
    Ok(resume)
}
