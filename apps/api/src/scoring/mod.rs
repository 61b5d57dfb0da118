// Lead scoring: prompt, model-output extraction, and the analyzer that never fails.
// All model calls go through llm_client.

pub mod analyzer;
pub mod extract;
pub mod models;
pub mod prompts;
