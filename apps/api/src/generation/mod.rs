// Resume generation: prompt assembly, one completion call, lenient JSON
// extraction and a merge with the profile that falls back to static content.
// All completion calls go through llm_client.

pub mod email_advisor;
pub mod generator;
pub mod handlers;
pub mod merger;
pub mod parser;
pub mod prompt_builder;
pub mod prompts;
