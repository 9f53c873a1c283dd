// Resume endpoints: enhance an uploaded resume, or build one from form fields.
// All model calls go through llm_client; the JSON answer is returned as is.

pub mod fields;
pub mod generator;
pub mod handlers;
pub mod prompts;
